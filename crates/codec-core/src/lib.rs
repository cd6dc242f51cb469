//! Bitcoin address codecs.
//!
//! This crate provides pure Rust implementations of:
//! - Base58 and Base58Check (legacy addresses, WIF, extended keys)
//! - Bech32 and Bech32m (SegWit v0 and Taproot addresses)
//! - RIPEMD-160, and HASH160/HASH256 over a pluggable SHA256 provider
//! - Hex and little-endian byte helpers
//! - Address validation with scriptPubKey generation

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod address;
pub mod base58;
pub mod base58check;
pub mod bech32;
pub mod bytes;
pub mod error;
pub mod hash;
pub mod network;
pub mod ripemd160;

pub use address::{encode_p2pkh, encode_p2sh, validate_address, AddressError, AddressType, ValidatedAddress};
pub use base58check::Base58CheckDecoded;
pub use bech32::{encode_p2tr, encode_p2wpkh, encode_p2wsh, Bech32Decoded, Variant, VariantMismatch};
pub use error::{CodecError, ErrorKind};
pub use hash::{double_sha256, double_sha256 as hash256, hash160, sha256, Sha256Provider, Sha2};
pub use network::Network;
