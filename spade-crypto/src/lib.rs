//! SPADE: symmetric, group-based equality-predicate encryption.
//!
//! A curator runs `Setup`, subjects encrypt fixed-length integer vectors under
//! per-subject secrets, and an analyst holding a curator-derived per-query key
//! learns exactly which entries equal the queried value and nothing else.
//! Curator and analyst are assumed semi-honest and non-colluding.

pub mod analytics;
pub mod codec;
pub mod errors;
pub mod keys;
pub mod params;
pub mod preset;
pub mod protocol;
pub mod ring;
pub mod spade;
pub mod store;

pub use errors::SpadeError;
pub use keys::MasterKeyPair;
pub use params::{GroupParams, PublicParams};
pub use spade::{CipherPair, Ciphertext, DecryptedVector, QueryKey, Spade};
