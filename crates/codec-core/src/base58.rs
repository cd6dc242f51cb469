//! Base58 encoding as used by Bitcoin.
//!
//! The input is read as one big-endian number and rewritten in base 58.
//! Leading zero bytes carry no numeric value, so each one is emitted as a
//! leading `'1'` (digit zero) to keep the byte length recoverable.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::CodecError;

/// The Bitcoin Base58 alphabet: no `0`, `O`, `I` or `l`.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const INVALID: u8 = 0xff;

/// ASCII -> digit value, `INVALID` for characters outside the alphabet.
const DECODE_MAP: [u8; 128] = build_decode_map();

const fn build_decode_map() -> [u8; 128] {
    let mut map = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
}

#[inline]
fn digit_value(character: char) -> Option<u8> {
    let code = character as usize;
    if code >= DECODE_MAP.len() {
        return None;
    }
    match DECODE_MAP[code] {
        INVALID => None,
        digit => Some(digit),
    }
}

/// Arbitrary-precision unsigned integer.
///
/// Stored as little-endian 32-bit limbs with no zero limbs at the top, so
/// zero is the empty vector. Only the operations base conversion needs are
/// provided: multiply-and-add and divide by a small constant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BigNat {
    limbs: Vec<u32>,
}

impl BigNat {
    /// Zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Whether this number is zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// `self = self * factor + addend`.
    pub fn mul_add(&mut self, factor: u32, addend: u32) {
        let mut carry = addend as u64;
        for limb in self.limbs.iter_mut() {
            let value = (*limb as u64) * (factor as u64) + carry;
            *limb = value as u32;
            carry = value >> 32;
        }
        if carry > 0 {
            self.limbs.push(carry as u32);
        }
        self.normalize();
    }

    /// `self = self / divisor`, returning the remainder.
    ///
    /// `divisor` must be non-zero.
    pub fn div_rem(&mut self, divisor: u32) -> u32 {
        debug_assert!(divisor != 0);

        let mut remainder = 0u64;
        for limb in self.limbs.iter_mut().rev() {
            let value = (remainder << 32) | (*limb as u64);
            *limb = (value / divisor as u64) as u32;
            remainder = value % divisor as u64;
        }
        self.normalize();
        remainder as u32
    }

    /// Read a big-endian byte string.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let mut n = Self::zero();
        for &byte in bytes {
            n.mul_add(256, byte as u32);
        }
        n
    }

    /// Minimal big-endian byte string; empty for zero.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self
            .limbs
            .iter()
            .rev()
            .flat_map(|limb| limb.to_be_bytes())
            .collect();
        let leading = bytes.iter().take_while(|&&b| b == 0).count();
        bytes.drain(..leading);
        bytes
    }

    fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }
}

/// Encode bytes as Base58. The empty input encodes to the empty string.
pub fn encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    let mut n = BigNat::from_be_bytes(&bytes[zeros..]);
    let mut digits = Vec::with_capacity(bytes.len() * 138 / 100 + 1);
    while !n.is_zero() {
        digits.push(ALPHABET[n.div_rem(58) as usize]);
    }

    let mut result = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        result.push('1');
    }
    result.extend(digits.iter().rev().map(|&d| d as char));
    result
}

/// Decode a Base58 string. Fails on any character outside [`ALPHABET`].
pub fn decode(input: &str) -> Result<Vec<u8>, CodecError> {
    let mut n = BigNat::zero();
    let mut zeros = 0;
    let mut leading = true;

    for (index, character) in input.chars().enumerate() {
        let digit = digit_value(character)
            .ok_or(CodecError::InvalidBase58Char { character, index })?;

        if leading && digit == 0 {
            zeros += 1;
            continue;
        }
        leading = false;
        n.mul_add(58, digit as u32);
    }

    let mut result = vec![0u8; zeros];
    result.extend(n.to_be_bytes());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Bitcoin Core's base58_encode_decode.json
    const VECTORS: [(&str, &str); 14] = [
        ("", ""),
        ("61", "2g"),
        ("626262", "a3gV"),
        ("636363", "aPEr"),
        ("73696d706c792061206c6f6e6720737472696e67", "2cFupjhnEsSn59qHXstmK2ffpLv2"),
        ("00eb15231dfceb60925886b67d065299925915aeb172c06647", "1NS17iag9jJgTHD1VXjvLCEnZuQ3rJDE9L"),
        ("516b6fcd0f", "ABnLTmg"),
        ("bf4f89001e670274dd", "3SEo3LWLoPntC"),
        ("572e4794", "3EFU7m"),
        ("ecac89cad93923c02321", "EJDM8drfXA6uyA"),
        ("10c8511e", "Rt5zm"),
        ("00000000000000000000", "1111111111"),
        ("000111d38e5fc9071ffcd20b4a763cc9ae4f252bb4e48fd66a835e252ada93ff480d6dd43dc62a641155a5", "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz"),
        ("00000000000000000000000000000000000000000000000000000000000000000000000000000000", "1111111111111111111111111111111111111111"),
    ];

    #[test]
    fn test_bitcoin_core_vectors() {
        for (hex_data, encoded) in VECTORS {
            let bytes = hex::decode(hex_data).unwrap();
            assert_eq!(encode(&bytes), encoded);
            assert_eq!(decode(encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn test_ietf_vectors() {
        assert_eq!(encode(b"Hello World!"), "2NEpo7TZRRrLZSi2U");
        assert_eq!(
            encode(b"The quick brown fox jumps over the lazy dog."),
            "USm3fpXnKG5EUBx2ndxBDMPVciP5hGey2Jh4NDv6gmeo1LkMeiKrLJUUBk6Z"
        );
        assert_eq!(encode(&[0x00, 0x00, 0x28, 0x7f, 0xb4, 0xcd]), "11233QC4");
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode(&[]), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_leading_zeros_map_to_ones() {
        for zeros in 0..5 {
            let mut bytes = vec![0u8; zeros];
            bytes.extend_from_slice(&[0x01, 0x02, 0x03]);

            let encoded = encode(&bytes);
            let ones = encoded.chars().take_while(|&c| c == '1').count();
            assert_eq!(ones, zeros);
            assert_eq!(decode(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn test_round_trip_lengths() {
        for len in 0..100usize {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_invalid_characters() {
        for (input, bad, index) in [("10", '0', 1), ("O1", 'O', 0), ("1I", 'I', 1), ("abl", 'l', 2), ("ab é", ' ', 2)] {
            assert_eq!(
                decode(input),
                Err(CodecError::InvalidBase58Char { character: bad, index })
            );
        }
    }

    #[test]
    fn test_bignat_arithmetic() {
        let mut n = BigNat::from_be_bytes(&[0x01, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(n.to_be_bytes(), [0x01, 0x00, 0x00, 0x00, 0x00]);

        // 2^32 = 74051160 * 58 + 16
        assert_eq!(n.div_rem(58), 16);
        assert_eq!(n.to_be_bytes(), 74_051_160u32.to_be_bytes());

        n.mul_add(58, 16);
        assert_eq!(n.to_be_bytes(), [0x01, 0x00, 0x00, 0x00, 0x00]);

        let mut zero = BigNat::from_be_bytes(&[0, 0, 0]);
        assert!(zero.is_zero());
        assert_eq!(zero.div_rem(58), 0);
        assert!(zero.to_be_bytes().is_empty());
    }
}
