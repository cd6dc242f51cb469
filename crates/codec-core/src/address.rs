//! Bitcoin address construction, validation and scriptPubKey generation.
//!
//! Supports:
//! - P2PKH (Pay to Public Key Hash) - Legacy addresses starting with 1 (mainnet) or m/n (testnet)
//! - P2SH (Pay to Script Hash) - Addresses starting with 3 (mainnet) or 2 (testnet)
//! - P2WPKH (Pay to Witness Public Key Hash) - Native SegWit v0, bc1q.../tb1q...
//! - P2WSH (Pay to Witness Script Hash) - Native SegWit v0, bc1q... (32-byte program)
//! - P2TR (Pay to Taproot) - SegWit v1, bc1p.../tb1p...
//!
//! Unlike the raw [`bech32`](crate::bech32) codec, validation here rejects
//! witness programs encoded with the wrong checksum variant.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::Serialize;
use thiserror::Error;

use crate::base58check;
use crate::bech32::{self, VariantMismatch};
use crate::error::CodecError;
use crate::network::Network;

const HASH160_LEN: usize = 20;

/// Address validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The underlying Base58Check or Bech32 decode failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Base58Check checksum does not match.
    #[error("invalid checksum")]
    InvalidChecksum,

    /// Base58Check version byte is not a known address version.
    #[error("unknown address version byte: 0x{0:02x}")]
    UnknownVersion(u8),

    /// Bech32 human-readable part does not name a known network.
    #[error("unknown human-readable part: {0}")]
    UnknownHrp(String),

    /// Legacy address payload is not a 20-byte hash.
    #[error("invalid address payload length: {0}")]
    InvalidPayloadLength(usize),

    /// SegWit address uses the checksum variant BIP350 forbids for its version.
    #[error("{0}")]
    VariantMismatch(VariantMismatch),

    /// Address belongs to a different network than expected.
    #[error("address network mismatch: expected {expected}, got {got}")]
    NetworkMismatch { expected: Network, got: Network },

    /// Valid witness program without a defined output type.
    #[error("unsupported address type: witness version {witness_version}, {program_len}-byte program")]
    UnsupportedType { witness_version: u8, program_len: usize },
}

/// Bitcoin address type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressType {
    /// Legacy P2PKH: OP_DUP OP_HASH160 <20-byte-hash> OP_EQUALVERIFY OP_CHECKSIG
    P2PKH,
    /// P2SH: OP_HASH160 <20-byte-hash> OP_EQUAL
    P2SH,
    /// Native SegWit v0 P2WPKH: OP_0 <20-byte-hash>
    P2WPKH,
    /// Native SegWit v0 P2WSH: OP_0 <32-byte-hash>
    P2WSH,
    /// Taproot P2TR: OP_1 <32-byte-x-only-pubkey>
    P2TR,
}

impl AddressType {
    /// Get the display name for this address type.
    pub fn name(&self) -> &'static str {
        match self {
            AddressType::P2PKH => "P2PKH",
            AddressType::P2SH => "P2SH",
            AddressType::P2WPKH => "P2WPKH",
            AddressType::P2WSH => "P2WSH",
            AddressType::P2TR => "P2TR",
        }
    }
}

/// A validated Bitcoin address with its scriptPubKey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedAddress {
    /// The type of address.
    pub address_type: AddressType,
    /// The network this address belongs to.
    pub network: Network,
    /// The scriptPubKey for this address (used in transaction outputs).
    pub script_pubkey: Vec<u8>,
    /// The original address string, trimmed.
    pub display: String,
}

/// Legacy P2PKH address for a 20-byte HASH160 of a public key.
pub fn encode_p2pkh(pubkey_hash: &[u8], network: Network) -> Result<String, CodecError> {
    encode_legacy(network.p2pkh_version(), pubkey_hash)
}

/// P2SH address for a 20-byte HASH160 of a redeem script.
pub fn encode_p2sh(script_hash: &[u8], network: Network) -> Result<String, CodecError> {
    encode_legacy(network.p2sh_version(), script_hash)
}

fn encode_legacy(version: u8, hash: &[u8]) -> Result<String, CodecError> {
    if hash.len() != HASH160_LEN {
        return Err(CodecError::UnexpectedLength {
            expected: HASH160_LEN,
            actual: hash.len(),
        });
    }
    Ok(base58check::encode(&[version], hash))
}

/// Validate a Bitcoin address and return its details.
pub fn validate_address(address: &str, expected_network: Network) -> Result<ValidatedAddress, AddressError> {
    let trimmed = address.trim();

    let lower = trimmed.to_ascii_lowercase();
    let is_segwit = [Network::Mainnet, Network::Testnet]
        .iter()
        .any(|n| lower.starts_with(n.bech32_hrp()) && lower[n.bech32_hrp().len()..].starts_with(bech32::SEPARATOR));

    let validated = if is_segwit {
        validate_segwit_address(trimmed)?
    } else {
        validate_legacy_address(trimmed)?
    };

    if validated.network != expected_network {
        return Err(AddressError::NetworkMismatch {
            expected: expected_network,
            got: validated.network,
        });
    }

    Ok(validated)
}

/// Validate a Base58Check encoded address (P2PKH or P2SH).
fn validate_legacy_address(address: &str) -> Result<ValidatedAddress, AddressError> {
    let decoded = base58check::decode(address)?;

    if !decoded.valid {
        return Err(AddressError::InvalidChecksum);
    }

    let version = decoded.version[0];
    let hash = &decoded.data;

    let (address_type, network) = match version {
        0x00 => (AddressType::P2PKH, Network::Mainnet),
        0x05 => (AddressType::P2SH, Network::Mainnet),
        0x6f => (AddressType::P2PKH, Network::Testnet),
        0xc4 => (AddressType::P2SH, Network::Testnet),
        _ => return Err(AddressError::UnknownVersion(version)),
    };

    if hash.len() != HASH160_LEN {
        return Err(AddressError::InvalidPayloadLength(hash.len()));
    }

    let script_pubkey = match address_type {
        AddressType::P2PKH => {
            // OP_DUP OP_HASH160 <20-byte-hash> OP_EQUALVERIFY OP_CHECKSIG
            let mut script = Vec::with_capacity(25);
            script.push(0x76);
            script.push(0xa9);
            script.push(0x14);
            script.extend_from_slice(hash);
            script.push(0x88);
            script.push(0xac);
            script
        }
        _ => {
            // OP_HASH160 <20-byte-hash> OP_EQUAL
            let mut script = Vec::with_capacity(23);
            script.push(0xa9);
            script.push(0x14);
            script.extend_from_slice(hash);
            script.push(0x87);
            script
        }
    };

    Ok(ValidatedAddress {
        address_type,
        network,
        script_pubkey,
        display: address.to_string(),
    })
}

/// Validate a Bech32/Bech32m encoded address (P2WPKH, P2WSH, or P2TR).
fn validate_segwit_address(address: &str) -> Result<ValidatedAddress, AddressError> {
    let decoded = bech32::decode(address)?;

    let network = Network::from_hrp(&decoded.hrp).ok_or_else(|| AddressError::UnknownHrp(decoded.hrp.clone()))?;

    if let Some(mismatch) = bech32::variant_mismatch(decoded.witness_version, decoded.variant) {
        return Err(AddressError::VariantMismatch(mismatch));
    }

    let address_type = match (decoded.witness_version, decoded.program.len()) {
        (0, 20) => AddressType::P2WPKH,
        (0, 32) => AddressType::P2WSH,
        (1, 32) => AddressType::P2TR,
        (witness_version, program_len) => {
            return Err(AddressError::UnsupportedType {
                witness_version,
                program_len,
            })
        }
    };

    Ok(ValidatedAddress {
        address_type,
        network,
        script_pubkey: witness_script_pubkey(decoded.witness_version, &decoded.program),
        display: address.to_string(),
    })
}

/// `OP_n <program>` output script for a witness program.
pub fn witness_script_pubkey(witness_version: u8, program: &[u8]) -> Vec<u8> {
    // OP_0 = 0x00, OP_1..OP_16 = 0x51..0x60
    let version_opcode = if witness_version == 0 { 0x00 } else { 0x50 + witness_version };
    let mut script = Vec::with_capacity(2 + program.len());
    script.push(version_opcode);
    script.push(program.len() as u8);
    script.extend_from_slice(program);
    script
}
