//! Group parameters shared by every engine operation, plus the hex-encoded
//! bundle used to distribute public material out-of-band.

use crate::codec::{biguint_from_hex, biguint_to_hex};
use crate::errors::SpadeError;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

use serde::{Deserialize, Serialize};

/// Configuration triple fixed for the lifetime of a deployment.
///
/// Every plaintext, key and ciphertext vector bound to these parameters has
/// exactly `vector_size` entries. The struct is immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupParams {
    /// Odd modulus `q`, intended to be a (safe) prime.
    pub modulus: BigUint,
    /// Generator `g` of the multiplicative group, coprime to `q`.
    pub generator: BigUint,
    /// Fixed capacity `n` of every associated vector.
    pub vector_size: usize,
}

impl GroupParams {
    /// Creates new group parameters, validating the group structure.
    ///
    /// # Errors
    ///
    /// Returns `SpadeError::InvalidGroupParams` if the modulus is even or `< 3`,
    /// if `vector_size` is zero, or if `gcd(generator, modulus) != 1`.
    pub fn try_with(
        modulus: BigUint,
        generator: BigUint,
        vector_size: usize,
    ) -> Result<Self, SpadeError> {
        if modulus < BigUint::from(3u32) || modulus.is_even() {
            return Err(SpadeError::InvalidGroupParams(format!(
                "modulus must be odd and > 2, got {}",
                modulus
            )));
        }
        if vector_size == 0 {
            return Err(SpadeError::InvalidGroupParams(
                "vector size must be positive".to_string(),
            ));
        }
        if !generator.gcd(&modulus).is_one() {
            return Err(SpadeError::InvalidGroupParams(format!(
                "generator {} and modulus {} are not relatively prime",
                generator, modulus
            )));
        }

        Ok(Self {
            modulus,
            generator,
            vector_size,
        })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn generator(&self) -> &BigUint {
        &self.generator
    }

    pub fn vector_size(&self) -> usize {
        self.vector_size
    }

    /// Validates that `values` has the fixed vector length.
    pub(crate) fn check_len<T>(&self, values: &[T]) -> Result<(), SpadeError> {
        if values.len() != self.vector_size {
            return Err(SpadeError::LengthMismatch {
                expected: self.vector_size,
                actual: values.len(),
            });
        }
        Ok(())
    }
}

/// Public material distributed to subjects: modulus `q`, generator `g` and the
/// master public keys `mpk`, all as hex-encoded big-endian integers.
///
/// Field names match the wire format existing deployments exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicParams {
    pub q: String,
    pub g: String,
    pub mpk: Vec<String>,
}

impl PublicParams {
    /// Bundles group parameters and master public keys for distribution.
    pub fn from_parts(params: &GroupParams, public_keys: &[BigUint]) -> Self {
        Self {
            q: biguint_to_hex(&params.modulus),
            g: biguint_to_hex(&params.generator),
            mpk: public_keys.iter().map(biguint_to_hex).collect(),
        }
    }

    /// Parses the bundle back into validated group parameters and the master
    /// public key vector. The vector capacity is taken from the `mpk` length.
    ///
    /// # Errors
    ///
    /// Returns `SpadeError::Serialization` on malformed hex and
    /// `SpadeError::InvalidGroupParams` if the recovered group is unusable.
    pub fn to_parts(&self) -> Result<(GroupParams, Vec<BigUint>), SpadeError> {
        let modulus = biguint_from_hex(&self.q)?;
        let generator = biguint_from_hex(&self.g)?;
        let public_keys = self
            .mpk
            .iter()
            .map(|hex| biguint_from_hex(hex))
            .collect::<Result<Vec<_>, _>>()?;

        let params = GroupParams::try_with(modulus, generator, public_keys.len())?;
        Ok((params, public_keys))
    }
}
