//! The SPADE engine: the five core operations of the equality-predicate
//! encryption scheme.
//!
//! A data owner encrypts a fixed-length vector of small integers; an analyst
//! holding a curator-issued query key for value `v` learns, per position, only
//! whether that entry equals `v`. A decrypted entry equal to the group identity
//! `1` signals a match; any other value is indistinguishable from random.
//!
//! The engine is stateless apart from the borrowed group parameters. All
//! secret material flows through explicit arguments, so independent calls are
//! safe to run concurrently as long as each supplies its own RNG stream.

use crate::errors::SpadeError;
use crate::keys::MasterKeyPair;
use crate::params::GroupParams;
use crate::ring::{mod_pow, mod_pow_signed, random_in_range, random_odd};

use num_bigint::{BigInt, BigUint};
use num_traits::One;

use rand::RngCore;

use serde::{Deserialize, Serialize};

/// One ciphertext entry: `c0 = g^(r+alpha)`, `c1 = pk^alpha * (g^r)^m`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherPair {
    pub c0: BigUint,
    pub c1: BigUint,
}

/// Ordered vector of exactly `vector_size` ciphertext pairs. Immutable once
/// produced; re-encryption replaces the whole vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    pub pairs: Vec<CipherPair>,
}

impl Ciphertext {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Per-(subject, value) decryption material. Single-use for that value: a key
/// derived for `v1` silently mis-decrypts under any other value.
pub type QueryKey = Vec<BigUint>;

/// Decryption output; entry `i` equals `1` iff the plaintext entry `i` equalled
/// the query value.
pub type DecryptedVector = Vec<BigUint>;

/// Returns whether a decrypted entry signals a plaintext match.
pub fn is_match(entry: &BigUint) -> bool {
    entry.is_one()
}

/// The engine. Holds the group parameters by reference and nothing else.
#[derive(Debug, Clone, Copy)]
pub struct Spade<'a> {
    params: &'a GroupParams,
}

impl<'a> Spade<'a> {
    pub fn new(params: &'a GroupParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GroupParams {
        self.params
    }

    /// Generates a fresh master key pair: `n` secrets uniform in
    /// `[1, modulus-1]` and their public counterparts `g^sk mod q`.
    ///
    /// Deterministic given a seeded RNG, fresh keys otherwise.
    pub fn setup<R: RngCore + ?Sized>(&self, rng: &mut R) -> MasterKeyPair {
        let q = &self.params.modulus;
        let g = &self.params.generator;
        let low = BigUint::one();
        let high = q - BigUint::one();

        let secret_keys: Vec<BigUint> = (0..self.params.vector_size)
            .map(|_| random_in_range(&low, &high, rng))
            .collect();
        let public_keys = secret_keys.iter().map(|sk| mod_pow(g, sk, q)).collect();

        MasterKeyPair {
            secret_keys,
            public_keys,
        }
    }

    /// Samples a fresh per-subject secret `alpha`, uniform in `[1, modulus-1]`.
    /// Never reuse an alpha across subjects.
    pub fn random_alpha<R: RngCore + ?Sized>(&self, rng: &mut R) -> BigUint {
        let q = &self.params.modulus;
        random_in_range(&BigUint::one(), &(q - BigUint::one()), rng)
    }

    /// Computes the public, subject-scoped registration key `g^alpha mod q`.
    pub fn register(&self, alpha: &BigUint) -> BigUint {
        mod_pow(&self.params.generator, alpha, &self.params.modulus)
    }

    /// Encrypts a plaintext vector under the master public keys and the
    /// subject secret `alpha`.
    ///
    /// For each entry: sample an odd blinding exponent `r`, then
    /// `c0 = g^(r+alpha)` and `c1 = pk^alpha * (g^r)^m mod q`.
    ///
    /// This is the throughput-critical path: three modular exponentiations per
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns `SpadeError::LengthMismatch` if `public_keys` or `plaintext` do
    /// not have the fixed vector length.
    pub fn encrypt<R: RngCore + ?Sized>(
        &self,
        public_keys: &[BigUint],
        alpha: &BigUint,
        plaintext: &[u64],
        rng: &mut R,
    ) -> Result<Ciphertext, SpadeError> {
        self.params.check_len(public_keys)?;
        self.params.check_len(plaintext)?;

        let q = &self.params.modulus;
        let g = &self.params.generator;

        let mut pairs = Vec::with_capacity(plaintext.len());
        for (pk, &m) in public_keys.iter().zip(plaintext) {
            let r = random_odd(q, rng);

            let c0 = mod_pow(g, &(&r + alpha), q);
            let g_r = mod_pow(g, &r, q);
            let c1 = mod_pow(pk, alpha, q) * mod_pow(&g_r, &BigUint::from(m), q) % q;

            pairs.push(CipherPair { c0, c1 });
        }

        Ok(Ciphertext { pairs })
    }

    /// Derives the decryption key vector for one `(subject, value)` pair:
    /// `dk_i = reg_key^(value - sk_i) mod q`, with the exponent handled as a
    /// signed integer.
    ///
    /// Must be invoked fresh for every distinct query value; callers must not
    /// cache a key across values.
    ///
    /// # Errors
    ///
    /// Returns `SpadeError::LengthMismatch` on a wrong-length secret key
    /// vector, `SpadeError::NotInvertible` if the registration key is not
    /// coprime to the modulus.
    pub fn derive_query_key(
        &self,
        query_value: u64,
        secret_keys: &[BigUint],
        registration_key: &BigUint,
    ) -> Result<QueryKey, SpadeError> {
        self.params.check_len(secret_keys)?;

        let q = &self.params.modulus;
        let value = BigInt::from(query_value);

        secret_keys
            .iter()
            .map(|sk| {
                let exponent = &value - BigInt::from(sk.clone());
                mod_pow_signed(registration_key, &exponent, q)
            })
            .collect()
    }

    /// Decrypts a ciphertext under a query key derived for `query_value`:
    /// `y_i = dk_i * c1_i * c0_i^(-query_value) mod q`.
    ///
    /// A non-identity entry is the expected "not equal" signal, never an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `SpadeError::LengthMismatch` on wrong-length inputs,
    /// `SpadeError::NotInvertible` if a `c0` entry is not coprime to the
    /// modulus.
    pub fn decrypt(
        &self,
        query_key: &[BigUint],
        query_value: u64,
        ciphertext: &Ciphertext,
    ) -> Result<DecryptedVector, SpadeError> {
        self.params.check_len(query_key)?;
        self.params.check_len(&ciphertext.pairs)?;

        let q = &self.params.modulus;
        let neg_value = -BigInt::from(query_value);

        query_key
            .iter()
            .zip(&ciphertext.pairs)
            .map(|(dk, pair)| {
                let c0_inv = mod_pow_signed(&pair.c0, &neg_value, q)?;
                Ok(dk * &pair.c1 % q * c0_inv % q)
            })
            .collect()
    }
}
