//! Big-integer modular exponentiation and uniform sampling.

use crate::errors::SpadeError;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use rand::RngCore;

/// Computes `base^exponent mod modulus` for a non-negative exponent.
///
/// `exponent == 0` yields `1` (also for `base == 0`).
///
/// # Example
///
/// ```
/// # use spade_crypto::ring::mod_pow;
/// # use num_bigint::BigUint;
/// let q = BigUint::from(23u32);
/// assert_eq!(mod_pow(&BigUint::from(2u32), &BigUint::from(5u32), &q), BigUint::from(9u32));
/// assert_eq!(mod_pow(&BigUint::from(2u32), &BigUint::ZERO, &q), BigUint::from(1u32));
/// ```
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exponent, modulus)
}

/// Computes the modular multiplicative inverse `a^-1 mod modulus`.
///
/// The inverse exists if and only if `gcd(a, modulus) == 1`.
/// Uses the Extended Euclidean Algorithm.
///
/// # Errors
///
/// Returns `SpadeError::NotInvertible` if `gcd(a, modulus) != 1` (in particular
/// if `a ≡ 0 mod modulus`).
///
/// # Example
///
/// ```
/// # use spade_crypto::ring::mod_inverse;
/// # use num_bigint::BigUint;
/// let q = BigUint::from(23u32);
/// assert_eq!(mod_inverse(&BigUint::from(5u32), &q).unwrap(), BigUint::from(14u32));
/// assert!(mod_inverse(&BigUint::ZERO, &q).is_err());
/// ```
pub fn mod_inverse(a: &BigUint, modulus: &BigUint) -> Result<BigUint, SpadeError> {
    let a_int = BigInt::from(a % modulus);
    let m_int = BigInt::from(modulus.clone());

    let ext = a_int.extended_gcd(&m_int);
    if !ext.gcd.is_one() {
        return Err(SpadeError::NotInvertible(format!(
            "no inverse for {} mod {} (gcd={})",
            a, modulus, ext.gcd
        )));
    }

    let inv = ext.x.mod_floor(&m_int);
    // mod_floor against a positive modulus never yields a negative value
    match inv.to_biguint() {
        Some(v) => Ok(v),
        None => Err(SpadeError::NotInvertible(format!(
            "inverse normalization failed for {} mod {}",
            a, modulus
        ))),
    }
}

/// Computes `base^exponent mod modulus` for a signed exponent.
///
/// A negative exponent is handled by inverting `base` modulo `modulus` first,
/// then raising the inverse to `-exponent`.
///
/// # Errors
///
/// Returns `SpadeError::NotInvertible` when the exponent is negative and
/// `gcd(base, modulus) != 1`.
///
/// # Example
///
/// ```
/// # use spade_crypto::ring::mod_pow_signed;
/// # use num_bigint::{BigInt, BigUint};
/// let q = BigUint::from(23u32);
/// // 2^-1 = 12 mod 23, so 2^-3 = 12^3 = 3 mod 23
/// let y = mod_pow_signed(&BigUint::from(2u32), &BigInt::from(-3), &q).unwrap();
/// assert_eq!(y, BigUint::from(3u32));
/// ```
pub fn mod_pow_signed(
    base: &BigUint,
    exponent: &BigInt,
    modulus: &BigUint,
) -> Result<BigUint, SpadeError> {
    if exponent.sign() == Sign::Minus {
        let inverse = mod_inverse(base, modulus)?;
        Ok(inverse.modpow(exponent.magnitude(), modulus))
    } else {
        Ok(base.modpow(exponent.magnitude(), modulus))
    }
}

/// Samples a uniform value in `[0, bound)` by rejection over `bound.bits()`-bit
/// candidates. `bound` must be non-zero.
fn random_below<R: RngCore + ?Sized>(bound: &BigUint, rng: &mut R) -> BigUint {
    debug_assert!(!bound.is_zero());

    let bits = bound.bits();
    let n_bytes = bits.div_ceil(8) as usize;
    let excess_bits = (n_bytes as u64) * 8 - bits;

    let mut buf = vec![0u8; n_bytes];
    loop {
        rng.fill_bytes(&mut buf);
        buf[0] >>= excess_bits;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < bound {
            return candidate;
        }
    }
}

/// Samples a uniform value in `[low, high]` (both bounds inclusive).
///
/// The sampler must be backed by a cryptographically secure generator; the
/// scheme's soundness rests on these draws being unpredictable.
pub fn random_in_range<R: RngCore + ?Sized>(
    low: &BigUint,
    high: &BigUint,
    rng: &mut R,
) -> BigUint {
    debug_assert!(low <= high);

    let width = high - low + BigUint::one();
    low + random_below(&width, rng)
}

/// Samples a uniform odd value in `[1, modulus - 1]` for an odd modulus.
///
/// Used for the per-entry blinding exponent. Restricting the blinding factor to
/// odd residues keeps the correctness test `r·(x−v) ≡ 0` away from spurious
/// zeroes introduced by small-order elements; the rule assumes the modulus is a
/// safe prime (or equivalent) and must be preserved as-is.
pub fn random_odd<R: RngCore + ?Sized>(modulus: &BigUint, rng: &mut R) -> BigUint {
    debug_assert!(modulus.is_odd());

    // Odd residues in [1, modulus - 1] are 2k + 1 for k in [0, (modulus - 1) / 2).
    let count = (modulus - BigUint::one()) >> 1;
    let k = random_below(&count, rng);
    (k << 1) + BigUint::one()
}
