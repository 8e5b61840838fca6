//! Curator-held master key material.

use crate::params::{GroupParams, PublicParams};

use num_bigint::BigUint;

use serde::{Deserialize, Serialize};

/// Master key pair produced by `Setup`.
///
/// `public_keys[i] = generator^secret_keys[i] mod modulus`. The secret half is
/// owned exclusively by the curator and must never cross its trust boundary;
/// the public half is shared with every subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterKeyPair {
    pub secret_keys: Vec<BigUint>,
    pub public_keys: Vec<BigUint>,
}

impl MasterKeyPair {
    /// Bundles the shareable half of the key pair with the group parameters,
    /// hex-encoded for out-of-band distribution.
    pub fn public_params(&self, params: &GroupParams) -> PublicParams {
        PublicParams::from_parts(params, &self.public_keys)
    }
}
