//! Hashing, hex and randomness helpers.

use codec_core::{bytes, hash, ripemd160, Sha2};
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;

use crate::convert::js_error;

/// Decode a hex string (case-insensitive, whitespace ignored).
#[wasm_bindgen(js_name = hexToBytes)]
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, JsValue> {
    bytes::hex_to_bytes(input).map_err(js_error)
}

/// Encode bytes as lowercase hex.
#[wasm_bindgen(js_name = bytesToHex)]
pub fn bytes_to_hex(data: &[u8]) -> String {
    bytes::bytes_to_hex(data)
}

/// Reverse the byte order of a hex string (txid display form).
#[wasm_bindgen(js_name = reverseByteOrder)]
pub fn reverse_byte_order(input: &str) -> Result<String, JsValue> {
    bytes::reverse_byte_order(input).map_err(js_error)
}

/// Group a hex string for display.
#[wasm_bindgen(js_name = formatHex)]
pub fn format_hex(input: &str, group_size: usize, separator: &str) -> String {
    bytes::format_hex(input, group_size, separator)
}

/// RIPEMD-160 digest.
#[wasm_bindgen(js_name = ripemd160)]
pub fn ripemd160_digest(data: &[u8]) -> Vec<u8> {
    ripemd160::hash(data).to_vec()
}

/// SHA256 digest.
#[wasm_bindgen(js_name = sha256)]
pub async fn sha256(data: Vec<u8>) -> Uint8Array {
    Uint8Array::from(&hash::sha256(&data)[..])
}

/// RIPEMD160(SHA256(data)).
#[wasm_bindgen(js_name = hash160)]
pub async fn hash160(data: Vec<u8>) -> Uint8Array {
    Uint8Array::from(&hash::hash160_with(&Sha2, &data)[..])
}

/// SHA256(SHA256(data)).
#[wasm_bindgen(js_name = hash256)]
pub async fn hash256(data: Vec<u8>) -> Uint8Array {
    Uint8Array::from(&hash::hash256_with(&Sha2, &data)[..])
}

/// `length` cryptographically random bytes from the platform source.
#[wasm_bindgen(js_name = randomBytes)]
pub fn random_bytes(length: usize) -> Result<Vec<u8>, JsValue> {
    let mut buf = vec![0u8; length];
    getrandom::getrandom(&mut buf)
        .map_err(|e| JsValue::from_str(&format!("Random source unavailable: {}", e)))?;
    Ok(buf)
}
