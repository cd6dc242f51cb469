//! Base58, Base58Check and Bech32 entry points.

use codec_core::{address, base58, base58check, bech32, Sha2};
use wasm_bindgen::prelude::*;

use crate::convert::{console_warn, js_error, parse_network, to_js, version_bytes};

/// Encode bytes as Base58.
#[wasm_bindgen(js_name = base58Encode)]
pub fn base58_encode(bytes: &[u8]) -> String {
    base58::encode(bytes)
}

/// Decode a Base58 string. Fails on characters outside the alphabet.
#[wasm_bindgen(js_name = base58Decode)]
pub fn base58_decode(input: &str) -> Result<Vec<u8>, JsValue> {
    base58::decode(input).map_err(js_error)
}

/// Encode `version || data` with a double-SHA256 checksum.
///
/// # Arguments
/// * `version` - A single byte as a number, or a `Uint8Array` prefix
/// * `data` - The payload
#[wasm_bindgen(js_name = base58CheckEncode)]
pub async fn base58_check_encode(version: JsValue, data: Vec<u8>) -> Result<String, JsValue> {
    let version = version_bytes(&version)?;
    Ok(base58check::encode_with(&Sha2, &version, &data))
}

/// Decode a Base58Check string into
/// `{ version, data, checksum, calculatedChecksum, valid }`.
///
/// A checksum mismatch is reported through `valid`, not thrown.
///
/// # Arguments
/// * `input` - The Base58Check string
/// * `version_length` - Version prefix length in bytes (default 1)
#[wasm_bindgen(js_name = base58CheckDecode)]
pub async fn base58_check_decode(input: String, version_length: Option<u32>) -> Result<JsValue, JsValue> {
    let version_len = version_length.unwrap_or(1) as usize;
    let decoded = base58check::decode_with(&Sha2, &input, version_len).map_err(js_error)?;
    to_js(&decoded)
}

/// Encode a witness program as Bech32 (`"bech32"`, the default) or Bech32m.
///
/// A version/variant pairing BIP350 does not prescribe is encoded anyway
/// and reported as a console warning.
#[wasm_bindgen(js_name = bech32Encode)]
pub fn bech32_encode(
    hrp: &str,
    witness_version: u8,
    program: &[u8],
    variant: Option<String>,
) -> Result<String, JsValue> {
    let variant = match variant {
        Some(name) => bech32::Variant::from_str(&name)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid variant: {}", name)))?,
        None => bech32::Variant::Bech32,
    };

    if let Some(mismatch) = bech32::variant_mismatch(witness_version, variant) {
        console_warn(&format!("bech32Encode: {}", mismatch));
    }

    bech32::encode(hrp, witness_version, program, variant).map_err(js_error)
}

/// Decode a SegWit address into `{ hrp, witnessVersion, program, variant }`.
#[wasm_bindgen(js_name = bech32Decode)]
pub fn bech32_decode(input: &str) -> Result<JsValue, JsValue> {
    let decoded = bech32::decode(input).map_err(js_error)?;
    to_js(&decoded)
}

/// P2WPKH address for a 20-byte public key hash.
#[wasm_bindgen(js_name = encodeP2WPKH)]
pub fn encode_p2wpkh(pubkey_hash: &[u8], network: &str) -> Result<String, JsValue> {
    bech32::encode_p2wpkh(pubkey_hash, parse_network(network)?).map_err(js_error)
}

/// P2WSH address for a 32-byte script hash.
#[wasm_bindgen(js_name = encodeP2WSH)]
pub fn encode_p2wsh(script_hash: &[u8], network: &str) -> Result<String, JsValue> {
    bech32::encode_p2wsh(script_hash, parse_network(network)?).map_err(js_error)
}

/// P2TR address for a 32-byte x-only public key.
#[wasm_bindgen(js_name = encodeP2TR)]
pub fn encode_p2tr(x_only_pubkey: &[u8], network: &str) -> Result<String, JsValue> {
    bech32::encode_p2tr(x_only_pubkey, parse_network(network)?).map_err(js_error)
}

/// Legacy P2PKH address for a 20-byte public key hash.
#[wasm_bindgen(js_name = encodeP2PKH)]
pub fn encode_p2pkh(pubkey_hash: &[u8], network: &str) -> Result<String, JsValue> {
    address::encode_p2pkh(pubkey_hash, parse_network(network)?).map_err(js_error)
}

/// P2SH address for a 20-byte script hash.
#[wasm_bindgen(js_name = encodeP2SH)]
pub fn encode_p2sh(script_hash: &[u8], network: &str) -> Result<String, JsValue> {
    address::encode_p2sh(script_hash, parse_network(network)?).map_err(js_error)
}

/// Validate an address for a network and return
/// `{ addressType, network, scriptPubkey, display }`.
#[wasm_bindgen(js_name = validateAddress)]
pub fn validate_address(input: &str, network: &str) -> Result<JsValue, JsValue> {
    let validated = address::validate_address(input, parse_network(network)?)
        .map_err(|e| JsValue::from_str(&format!("Invalid address: {}", e)))?;
    to_js(&validated)
}
