//! WebAssembly bindings for the Bitcoin address codecs.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - Base58 and Base58Check encoding
//! - Bech32/Bech32m encoding and the P2WPKH/P2WSH/P2TR wrappers
//! - Legacy address encoding and address validation
//! - HASH160, HASH256, RIPEMD-160 and hex helpers
//! - Random bytes for key material
//!
//! Functions that hash are exported as `async` so the JavaScript surface
//! stays awaitable regardless of which SHA256 backs them.

use wasm_bindgen::prelude::*;

pub mod codec;
pub mod convert;
pub mod util;

/// Initialize the WASM module with better panic messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
