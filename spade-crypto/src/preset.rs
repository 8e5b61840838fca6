//! Default deployment parameters shared with existing installations.

use crate::errors::SpadeError;
use crate::params::GroupParams;

use lazy_static::lazy_static;
use num_bigint::BigUint;

lazy_static! {
    /// Prime modulus used by existing deployments: 2^128 + 51, a 129-bit
    /// number just above the 128-bit range.
    pub static ref DEFAULT_MODULUS: BigUint =
        BigUint::parse_bytes(b"340282366920938463463374607431768211507", 10)
            .expect("literal modulus parses");
    /// Generator of the default group.
    pub static ref DEFAULT_GENERATOR: BigUint = BigUint::from(2u32);
}

/// Default vector capacity; subject records are padded up to this length.
pub const DEFAULT_VECTOR_SIZE: usize = 1000;

/// Padding sentinel, chosen outside both application value domains
/// (hypnogram stages reach 10, dinucleotide codes reach 16).
pub const PADDING_SENTINEL: u64 = 20;

/// Builds the default group with a caller-chosen vector capacity.
pub fn default_group(vector_size: usize) -> Result<GroupParams, SpadeError> {
    GroupParams::try_with(DEFAULT_MODULUS.clone(), DEFAULT_GENERATOR.clone(), vector_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_integer::Integer;

    #[test]
    fn default_group_is_valid() {
        let params = default_group(DEFAULT_VECTOR_SIZE).unwrap();
        assert!(params.modulus.is_odd());
        assert_eq!(params.modulus.bits(), 129);
        assert_eq!(params.vector_size(), DEFAULT_VECTOR_SIZE);
    }
}
