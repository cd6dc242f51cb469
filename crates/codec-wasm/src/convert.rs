//! Conversions between core types and JavaScript values.

use codec_core::Network;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Serialize a decoded result into a plain JS object.
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
}

/// Map any displayable error to a JS string error.
pub fn js_error<E: core::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&format!("{}", error))
}

/// Parse a network name ("mainnet", "testnet", ...).
pub fn parse_network(network: &str) -> Result<Network, JsValue> {
    Network::from_str(network).ok_or_else(|| JsValue::from_str(&format!("Invalid network: {}", network)))
}

/// Read a Base58Check version given either as a number (one byte) or as a
/// `Uint8Array`.
pub fn version_bytes(version: &JsValue) -> Result<Vec<u8>, JsValue> {
    if let Some(number) = version.as_f64() {
        if number.fract() != 0.0 || !(0.0..=255.0).contains(&number) {
            return Err(JsValue::from_str(&format!("Version byte out of range: {}", number)));
        }
        return Ok(vec![number as u8]);
    }

    if version.is_instance_of::<js_sys::Uint8Array>() {
        return Ok(js_sys::Uint8Array::new(version).to_vec());
    }

    Err(JsValue::from_str("Version must be a byte or a Uint8Array"))
}

/// Forward a message to the browser console as a warning.
pub fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}
