//! Modular arithmetic over the multiplicative group Z_q^*.

pub mod math;

pub use math::{mod_inverse, mod_pow, mod_pow_signed, random_in_range, random_odd};
