//! Canonical byte encoding of big integers and ciphertext-pair vectors, used at
//! the persistence/transport boundary.
//!
//! The ciphertext format is:
//! `[pair_count_le (u32) | len(c0_0) (u32) | c0_0 | len(c1_0) (u32) | c1_0 | ...]`
//! where each value is the minimal big-endian encoding of an unsigned integer.
//! Pair grouping and ordering are semantically significant (position `i` binds
//! to the `i`-th master key) and are preserved exactly.

use crate::errors::SpadeError;
use crate::spade::{CipherPair, Ciphertext};

use num_bigint::BigUint;
use num_traits::{Num, Zero};

const LEN_SIZE_BYTES: usize = std::mem::size_of::<u32>();

/// Encodes an unsigned big integer as minimal big-endian bytes.
///
/// Zero encodes as the empty byte string; no other value carries a leading
/// zero byte. This matches the convention existing deployments persist.
///
/// # Example
///
/// ```
/// # use spade_crypto::codec::encode_biguint;
/// # use num_bigint::BigUint;
/// assert_eq!(encode_biguint(&BigUint::from(0u32)), Vec::<u8>::new());
/// assert_eq!(encode_biguint(&BigUint::from(0x01ffu32)), vec![0x01, 0xff]);
/// ```
pub fn encode_biguint(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        return Vec::new();
    }
    value.to_bytes_be()
}

/// Decodes big-endian bytes back into an unsigned big integer.
///
/// Inverse of [`encode_biguint`]; the empty byte string decodes to zero, and
/// non-minimal encodings (leading zero bytes) are accepted.
pub fn decode_biguint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Renders a big integer as lowercase hex, the out-of-band wire form for the
/// modulus, generator and master public keys.
pub fn biguint_to_hex(value: &BigUint) -> String {
    format!("{:x}", value)
}

/// Parses a hex-encoded big-endian integer.
///
/// # Errors
///
/// Returns `SpadeError::Serialization` on non-hex input.
pub fn biguint_from_hex(hex: &str) -> Result<BigUint, SpadeError> {
    BigUint::from_str_radix(hex, 16)
        .map_err(|e| SpadeError::Serialization(format!("invalid hex integer {:?}: {}", hex, e)))
}

/// Serializes a ciphertext-pair vector into bytes, preserving pair order.
///
/// # Errors
///
/// Returns `SpadeError::Serialization` if the vector or any encoded value is
/// too large for the `u32` length prefixes.
pub fn encode_ciphertext(ciphertext: &Ciphertext) -> Result<Vec<u8>, SpadeError> {
    let pairs = &ciphertext.pairs;
    if pairs.len() > u32::MAX as usize {
        return Err(SpadeError::Serialization(
            "too many ciphertext pairs for serialization format".to_string(),
        ));
    }

    let mut result = Vec::with_capacity(LEN_SIZE_BYTES * (1 + 2 * pairs.len()));
    result.extend_from_slice(&(pairs.len() as u32).to_le_bytes());
    for pair in pairs {
        for value in [&pair.c0, &pair.c1] {
            let bytes = encode_biguint(value);
            if bytes.len() > u32::MAX as usize {
                return Err(SpadeError::Serialization(
                    "ciphertext value too large for serialization format".to_string(),
                ));
            }
            result.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            result.extend_from_slice(&bytes);
        }
    }
    Ok(result)
}

/// Deserializes bytes produced by [`encode_ciphertext`] back into the ordered
/// pair vector. Values are regrouped strictly two-at-a-time in original order.
///
/// # Errors
///
/// Returns `SpadeError::Serialization` naming the offending byte offset when
/// the data is truncated or carries trailing garbage.
pub fn decode_ciphertext(data: &[u8]) -> Result<Ciphertext, SpadeError> {
    let mut offset = 0usize;
    let pair_count = read_u32(data, &mut offset)? as usize;

    // The header is untrusted; never reserve more than the payload could
    // possibly hold (each pair carries at least two length prefixes).
    let max_possible = data.len() / (2 * LEN_SIZE_BYTES);
    let mut pairs = Vec::with_capacity(pair_count.min(max_possible));
    for _ in 0..pair_count {
        let c0 = read_value(data, &mut offset)?;
        let c1 = read_value(data, &mut offset)?;
        pairs.push(CipherPair { c0, c1 });
    }

    if offset != data.len() {
        return Err(SpadeError::Serialization(format!(
            "trailing {} bytes after ciphertext at offset {}",
            data.len() - offset,
            offset
        )));
    }

    Ok(Ciphertext { pairs })
}

fn read_u32(data: &[u8], offset: &mut usize) -> Result<u32, SpadeError> {
    let end = offset
        .checked_add(LEN_SIZE_BYTES)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            SpadeError::Serialization(format!(
                "truncated length prefix at offset {} (total {} bytes)",
                offset,
                data.len()
            ))
        })?;

    let bytes: [u8; LEN_SIZE_BYTES] = data[*offset..end]
        .try_into()
        .map_err(|_| SpadeError::Serialization("length prefix slice failed".to_string()))?;
    *offset = end;
    Ok(u32::from_le_bytes(bytes))
}

fn read_value(data: &[u8], offset: &mut usize) -> Result<BigUint, SpadeError> {
    let len = read_u32(data, offset)? as usize;
    let end = offset
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            SpadeError::Serialization(format!(
                "truncated value of {} bytes at offset {} (total {} bytes)",
                len,
                offset,
                data.len()
            ))
        })?;

    let value = decode_biguint(&data[*offset..end]);
    *offset = end;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(c0: u64, c1: u64) -> CipherPair {
        CipherPair {
            c0: BigUint::from(c0),
            c1: BigUint::from(c1),
        }
    }

    #[test]
    fn biguint_round_trip() {
        for value in [0u128, 1, 255, 256, 65535, u128::MAX] {
            let value = BigUint::from(value);
            assert_eq!(decode_biguint(&encode_biguint(&value)), value);
        }
    }

    #[test]
    fn zero_is_empty() {
        assert!(encode_biguint(&BigUint::ZERO).is_empty());
        assert_eq!(decode_biguint(&[]), BigUint::ZERO);
    }

    #[test]
    fn hex_round_trip() {
        let value = BigUint::parse_bytes(b"340282366920938463463374607431768211507", 10).unwrap();
        assert_eq!(biguint_from_hex(&biguint_to_hex(&value)).unwrap(), value);
        assert!(biguint_from_hex("not hex").is_err());
    }

    #[test]
    fn ciphertext_round_trip_preserves_order() {
        let ciphertext = Ciphertext {
            pairs: vec![pair(9, 1), pair(1, 9), pair(0, u64::MAX)],
        };
        let bytes = encode_ciphertext(&ciphertext).unwrap();
        assert_eq!(decode_ciphertext(&bytes).unwrap(), ciphertext);
    }

    #[test]
    fn empty_ciphertext_round_trips() {
        let ciphertext = Ciphertext { pairs: vec![] };
        let bytes = encode_ciphertext(&ciphertext).unwrap();
        assert_eq!(bytes.len(), LEN_SIZE_BYTES);
        assert_eq!(decode_ciphertext(&bytes).unwrap(), ciphertext);
    }

    #[test]
    fn truncated_data_is_rejected() {
        let ciphertext = Ciphertext {
            pairs: vec![pair(123456, 654321)],
        };
        let bytes = encode_ciphertext(&ciphertext).unwrap();

        assert!(decode_ciphertext(&bytes[..2]).is_err());
        assert!(decode_ciphertext(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn oversized_pair_count_header_is_rejected() {
        // A bare header claiming u32::MAX pairs must fail cleanly, without
        // attempting to reserve space for pairs the payload cannot contain.
        let hostile = [0xffu8; 4];
        assert!(matches!(
            decode_ciphertext(&hostile),
            Err(SpadeError::Serialization(_))
        ));

        // Same claim followed by a short payload.
        let mut with_payload = hostile.to_vec();
        with_payload.extend_from_slice(&[0u8; 16]);
        assert!(decode_ciphertext(&with_payload).is_err());
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let ciphertext = Ciphertext {
            pairs: vec![pair(1, 2)],
        };
        let mut bytes = encode_ciphertext(&ciphertext).unwrap();
        bytes.push(0);

        match decode_ciphertext(&bytes) {
            Err(SpadeError::Serialization(msg)) => assert!(msg.contains("trailing")),
            other => panic!("expected serialization error, got {:?}", other),
        }
    }
}
