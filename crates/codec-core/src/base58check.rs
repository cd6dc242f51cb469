//! Base58Check: Base58 over `version || data || checksum`.
//!
//! The checksum is the first four bytes of double SHA256 of
//! `version || data`. A checksum mismatch on decode is reported through
//! [`Base58CheckDecoded::valid`] rather than as an error; use
//! [`decode_strict`] to turn it into one.

use alloc::string::String;
use alloc::vec::Vec;
use serde::Serialize;

use crate::base58;
use crate::error::CodecError;
use crate::hash::{hash256_with, Sha256Provider, Sha2};

/// Length of the trailing checksum in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Smallest decodable payload: one version byte plus the checksum.
pub const MIN_DECODED_LEN: usize = 1 + CHECKSUM_LEN;

/// Result of decoding a Base58Check string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Base58CheckDecoded {
    /// Version prefix (1 byte unless another length was requested).
    pub version: Vec<u8>,
    /// Payload after the version prefix.
    pub data: Vec<u8>,
    /// Checksum carried by the string.
    pub checksum: [u8; CHECKSUM_LEN],
    /// Checksum recomputed from `version || data`.
    pub calculated_checksum: [u8; CHECKSUM_LEN],
    /// Whether the two checksums match.
    pub valid: bool,
}

/// First four bytes of double SHA256 of `payload`.
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    checksum_with(&Sha2, payload)
}

/// [`checksum`] with an injected SHA256 provider.
pub fn checksum_with<P: Sha256Provider>(provider: &P, payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = hash256_with(provider, payload);
    let mut result = [0u8; CHECKSUM_LEN];
    result.copy_from_slice(&hash[..CHECKSUM_LEN]);
    result
}

/// Encode `version || data` with a trailing checksum.
///
/// `version` is usually a single byte (`&[0x00]` for a mainnet P2PKH
/// address) but may be longer, e.g. the four-byte BIP32 prefixes.
pub fn encode(version: &[u8], data: &[u8]) -> String {
    encode_with(&Sha2, version, data)
}

/// [`encode`] with an injected SHA256 provider.
pub fn encode_with<P: Sha256Provider>(provider: &P, version: &[u8], data: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(version.len() + data.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(version);
    bytes.extend_from_slice(data);

    let checksum = checksum_with(provider, &bytes);
    bytes.extend_from_slice(&checksum);

    base58::encode(&bytes)
}

/// Decode a Base58Check string, treating the first byte as the version.
pub fn decode(input: &str) -> Result<Base58CheckDecoded, CodecError> {
    decode_with(&Sha2, input, 1)
}

/// Decode with a caller-chosen version prefix length.
///
/// Which prefix length applies (1 for addresses and WIF, 4 for extended
/// keys) is the caller's decision; the codec only splits where told.
pub fn decode_with_version_len(input: &str, version_len: usize) -> Result<Base58CheckDecoded, CodecError> {
    decode_with(&Sha2, input, version_len)
}

/// Decode with an injected SHA256 provider and version prefix length.
pub fn decode_with<P: Sha256Provider>(
    provider: &P,
    input: &str,
    version_len: usize,
) -> Result<Base58CheckDecoded, CodecError> {
    let bytes = base58::decode(input)?;

    if bytes.len() < MIN_DECODED_LEN {
        return Err(CodecError::PayloadTooShort(bytes.len()));
    }

    let (payload, claimed) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if version_len > payload.len() {
        return Err(CodecError::VersionTooLong {
            version_len,
            payload_len: payload.len(),
        });
    }

    let mut checksum = [0u8; CHECKSUM_LEN];
    checksum.copy_from_slice(claimed);
    let calculated_checksum = checksum_with(provider, payload);
    let valid = checksum == calculated_checksum;

    if !valid {
        tracing::debug!(
            claimed = %hex::encode(checksum),
            calculated = %hex::encode(calculated_checksum),
            "Base58Check checksum mismatch"
        );
    }

    let (version, data) = payload.split_at(version_len);
    Ok(Base58CheckDecoded {
        version: version.to_vec(),
        data: data.to_vec(),
        checksum,
        calculated_checksum,
        valid,
    })
}

/// Like [`decode`], but a checksum mismatch is an error.
pub fn decode_strict(input: &str) -> Result<Base58CheckDecoded, CodecError> {
    let decoded = decode(input)?;
    if !decoded.valid {
        return Err(CodecError::ChecksumMismatch);
    }
    Ok(decoded)
}

/// Whether `input` decodes and its checksum matches.
pub fn is_valid(input: &str) -> bool {
    decode(input).map(|d| d.valid).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use alloc::vec;

    const PUBKEY_HASH: &str = "751e76e8199196d454941c45d1b3a323f1433bd6";
    const P2PKH: &str = "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH";

    #[test]
    fn test_encode_p2pkh() {
        let hash = hex::decode(PUBKEY_HASH).unwrap();
        assert_eq!(encode(&[0x00], &hash), P2PKH);
    }

    #[test]
    fn test_encode_wif() {
        let mut key = vec![0u8; 32];
        key[31] = 1;

        assert_eq!(encode(&[0x80], &key), "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf");

        key.push(0x01); // compressed
        assert_eq!(encode(&[0x80], &key), "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn");
    }

    #[test]
    fn test_decode_p2pkh() {
        let decoded = decode(P2PKH).unwrap();

        assert!(decoded.valid);
        assert_eq!(decoded.version, [0x00]);
        assert_eq!(hex::encode(&decoded.data), PUBKEY_HASH);
        assert_eq!(decoded.checksum, decoded.calculated_checksum);
    }

    #[test]
    fn test_decode_p2sh() {
        let decoded = decode("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy").unwrap();

        assert!(decoded.valid);
        assert_eq!(decoded.version, [0x05]);
        assert_eq!(decoded.data.len(), 20);
    }

    #[test]
    fn test_decode_extended_key_version() {
        let xpub = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
        let decoded = decode_with_version_len(xpub, 4).unwrap();

        assert!(decoded.valid);
        assert_eq!(decoded.version, [0x04, 0x88, 0xb2, 0x1e]);
        assert_eq!(decoded.data.len(), 74);
        assert_eq!(encode(&decoded.version, &decoded.data), xpub);
    }

    #[test]
    fn test_round_trip() {
        for version in [vec![0x00], vec![0x6f], vec![0x04, 0x35, 0x87, 0xcf]] {
            for len in [0usize, 1, 20, 32, 33, 78] {
                let data: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
                let encoded = encode(&version, &data);
                let decoded = decode_with_version_len(&encoded, version.len()).unwrap();

                assert!(decoded.valid);
                assert_eq!(decoded.version, version);
                assert_eq!(decoded.data, data);
            }
        }
    }

    #[test]
    fn test_single_character_change_invalidates() {
        let original: Vec<char> = P2PKH.chars().collect();

        for i in 0..original.len() {
            let mut changed = original.clone();
            changed[i] = if original[i] == 'z' { 'y' } else { 'z' };
            let changed: String = changed.into_iter().collect();

            match decode(&changed) {
                Ok(decoded) => assert!(!decoded.valid, "flip at {} still valid", i),
                Err(err) => assert_eq!(err.kind(), ErrorKind::Length),
            }
        }
    }

    #[test]
    fn test_bad_checksum_is_flagged() {
        // Last character changed.
        let decoded = decode("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN3").unwrap();
        assert!(!decoded.valid);
        assert_ne!(decoded.checksum, decoded.calculated_checksum);

        assert!(!is_valid("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN3"));
        assert!(is_valid("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2"));
        assert_eq!(
            decode_strict("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN3"),
            Err(CodecError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_too_short() {
        // Four bytes: a checksum with nothing in front of it.
        let short = base58::encode(&[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(decode(&short), Err(CodecError::PayloadTooShort(4)));
        assert_eq!(decode(""), Err(CodecError::PayloadTooShort(0)));
        assert!(!is_valid(""));
    }

    #[test]
    fn test_version_longer_than_payload() {
        let encoded = encode(&[0x00], &[0xaa]);
        assert_eq!(
            decode_with_version_len(&encoded, 3),
            Err(CodecError::VersionTooLong { version_len: 3, payload_len: 2 })
        );
    }

    #[test]
    fn test_invalid_alphabet() {
        let err = decode("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Alphabet);
    }

    #[test]
    fn test_serialized_field_names() {
        let decoded = decode(P2PKH).unwrap();
        let json = serde_json::to_value(&decoded).unwrap();

        assert_eq!(json["valid"], true);
        assert_eq!(json["version"], serde_json::json!([0]));
        assert!(json.get("calculatedChecksum").is_some());
    }
}
