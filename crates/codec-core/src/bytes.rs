//! Hex and byte helpers shared by the codecs and their callers.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::CodecError;

/// Decode a hex string into bytes.
///
/// Case-insensitive and whitespace-tolerant. An odd number of digits is
/// treated as if a leading `0` nibble were present, so `"abc"` decodes to
/// `[0x0a, 0xbc]`.
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, CodecError> {
    let mut nibbles = Vec::with_capacity(input.len() + 1);

    for (index, character) in input.chars().enumerate() {
        if character.is_whitespace() {
            continue;
        }
        let nibble = character
            .to_digit(16)
            .ok_or(CodecError::InvalidHexChar { character, index })?;
        nibbles.push(nibble as u8);
    }

    if nibbles.len() % 2 != 0 {
        nibbles.insert(0, 0);
    }

    Ok(nibbles
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

/// Encode bytes as lowercase hex.
#[inline]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Reverse the byte order of a hex string.
///
/// Bitcoin displays txids and block hashes in reversed byte order; this
/// converts between the internal and display forms.
pub fn reverse_byte_order(hex: &str) -> Result<String, CodecError> {
    let mut bytes = hex_to_bytes(hex)?;
    bytes.reverse();
    Ok(bytes_to_hex(&bytes))
}

/// Concatenate byte slices in order.
pub fn concat_bytes(parts: &[&[u8]]) -> Vec<u8> {
    let total = parts.iter().map(|part| part.len()).sum();
    let mut result = Vec::with_capacity(total);
    for part in parts {
        result.extend_from_slice(part);
    }
    result
}

/// Serialize `value` as exactly `width` little-endian bytes.
///
/// High-order bytes that do not fit are dropped; widths past 16 bytes are
/// zero-filled.
pub fn number_to_little_endian(value: u128, width: usize) -> Vec<u8> {
    let le = value.to_le_bytes();
    (0..width).map(|i| le.get(i).copied().unwrap_or(0)).collect()
}

/// Read a little-endian unsigned integer of up to 16 bytes.
pub fn little_endian_to_number(bytes: &[u8]) -> Result<u128, CodecError> {
    if bytes.len() > 16 {
        return Err(CodecError::UnexpectedLength {
            expected: 16,
            actual: bytes.len(),
        });
    }

    Ok(bytes
        .iter()
        .rev()
        .fold(0u128, |acc, &byte| (acc << 8) | byte as u128))
}

/// Byte-for-byte equality. Not constant time.
#[inline]
pub fn bytes_equal(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// Split a hex string into groups of `group_size` characters joined by
/// `separator`, e.g. `"deadbeef"` -> `"de ad be ef"`.
pub fn format_hex(hex: &str, group_size: usize, separator: &str) -> String {
    if group_size == 0 {
        return String::from(hex);
    }

    let chars: Vec<char> = hex.chars().collect();
    let mut result = String::with_capacity(hex.len() + hex.len() / group_size * separator.len());
    for (i, group) in chars.chunks(group_size).enumerate() {
        if i > 0 {
            result.push_str(separator);
        }
        result.extend(group.iter());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let bytes = hex_to_bytes("00ff10Ab").unwrap();
        assert_eq!(bytes, [0x00, 0xff, 0x10, 0xab]);
        assert_eq!(bytes_to_hex(&bytes), "00ff10ab");
    }

    #[test]
    fn test_hex_odd_length_and_whitespace() {
        assert_eq!(hex_to_bytes("abc").unwrap(), [0x0a, 0xbc]);
        assert_eq!(hex_to_bytes("de ad\nbe ef").unwrap(), [0xde, 0xad, 0xbe, 0xef]);
        assert!(hex_to_bytes("").unwrap().is_empty());
    }

    #[test]
    fn test_hex_invalid_character() {
        assert_eq!(
            hex_to_bytes("12g4"),
            Err(CodecError::InvalidHexChar { character: 'g', index: 2 })
        );
    }

    #[test]
    fn test_reverse_byte_order() {
        assert_eq!(reverse_byte_order("01020304").unwrap(), "04030201");
        assert_eq!(reverse_byte_order("123").unwrap(), "2301");
    }

    #[test]
    fn test_concat_bytes() {
        assert_eq!(concat_bytes(&[&[1, 2], &[], &[3]]), [1, 2, 3]);
    }

    #[test]
    fn test_little_endian_numbers() {
        assert_eq!(number_to_little_endian(0x0102, 4), [0x02, 0x01, 0x00, 0x00]);
        assert_eq!(number_to_little_endian(0x010203, 2), [0x03, 0x02]);
        assert_eq!(little_endian_to_number(&[0x02, 0x01, 0x00, 0x00]).unwrap(), 0x0102);
        assert_eq!(little_endian_to_number(&[]).unwrap(), 0);
        assert!(little_endian_to_number(&[0u8; 17]).is_err());

        let n = 0xdead_beef_u128;
        assert_eq!(little_endian_to_number(&number_to_little_endian(n, 8)).unwrap(), n);
    }

    #[test]
    fn test_bytes_equal() {
        assert!(bytes_equal(&[1, 2, 3], &[1, 2, 3]));
        assert!(!bytes_equal(&[1, 2, 3], &[1, 2]));
        assert!(!bytes_equal(&[1, 2, 3], &[1, 2, 4]));
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex("deadbeef", 2, " "), "de ad be ef");
        assert_eq!(format_hex("deadbeef", 4, ":"), "dead:beef");
        assert_eq!(format_hex("abc", 2, " "), "ab c");
    }
}
