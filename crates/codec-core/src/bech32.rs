//! Bech32 (BIP173) and Bech32m (BIP350) encoding.
//!
//! A Bech32 string is `hrp || '1' || data || checksum`, where data and
//! checksum are 5-bit symbols drawn from [`CHARSET`]. The two variants only
//! differ in the constant the checksum is XOR-ed with.
//!
//! [`encode_raw`]/[`decode_raw`] work on arbitrary 5-bit data; [`encode`]
//! and [`decode`] add the witness version/program layer used by SegWit
//! addresses.

use alloc::string::String;
use alloc::vec::Vec;
use serde::Serialize;

use crate::error::CodecError;
use crate::network::Network;

/// Data charset; excludes `1`, `b`, `i` and `o`.
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Separator between human-readable part and data.
pub const SEPARATOR: char = '1';

/// Number of checksum symbols.
pub const CHECKSUM_LEN: usize = 6;

/// Longest permitted Bech32 string.
pub const MAX_LENGTH: usize = 90;

/// Highest witness version.
pub const MAX_WITNESS_VERSION: u8 = 16;

/// Shortest witness program, in bytes.
pub const MIN_PROGRAM_LEN: usize = 2;

/// Longest witness program, in bytes.
pub const MAX_PROGRAM_LEN: usize = 40;

/// Checksum constant for Bech32.
pub const BECH32_CONST: u32 = 1;

/// Checksum constant for Bech32m.
pub const BECH32M_CONST: u32 = 0x2bc830a3;

const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

const INVALID: u8 = 0xff;

const CHARSET_REV: [u8; 128] = build_charset_rev();

const fn build_charset_rev() -> [u8; 128] {
    let mut map = [INVALID; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        map[CHARSET[i] as usize] = i as u8;
        i += 1;
    }
    map
}

/// Which checksum constant a string uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// BIP173, constant 1. Witness version 0.
    Bech32,
    /// BIP350, constant `0x2bc830a3`. Witness version 1 and above.
    Bech32m,
}

impl Variant {
    /// Checksum constant for this variant.
    pub fn constant(&self) -> u32 {
        match self {
            Variant::Bech32 => BECH32_CONST,
            Variant::Bech32m => BECH32M_CONST,
        }
    }

    /// Variant BIP350 prescribes for `witness_version`.
    pub fn for_witness_version(witness_version: u8) -> Self {
        if witness_version == 0 {
            Variant::Bech32
        } else {
            Variant::Bech32m
        }
    }

    /// Parse `"bech32"` or `"bech32m"`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bech32" => Some(Variant::Bech32),
            "bech32m" => Some(Variant::Bech32m),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Bech32 => "bech32",
            Variant::Bech32m => "bech32m",
        }
    }

    fn from_constant(constant: u32) -> Option<Self> {
        match constant {
            BECH32_CONST => Some(Variant::Bech32),
            BECH32M_CONST => Some(Variant::Bech32m),
            _ => None,
        }
    }
}

impl core::fmt::Display for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A witness version encoded with the variant BIP350 does not prescribe.
///
/// Not an error: the codec still encodes it, but callers should surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantMismatch {
    pub witness_version: u8,
    pub variant: Variant,
    pub expected: Variant,
}

impl core::fmt::Display for VariantMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "witness version {} should use {}, not {}",
            self.witness_version, self.expected, self.variant
        )
    }
}

/// Check whether `variant` is the one prescribed for `witness_version`.
pub fn variant_mismatch(witness_version: u8, variant: Variant) -> Option<VariantMismatch> {
    let expected = Variant::for_witness_version(witness_version);
    if variant == expected {
        None
    } else {
        Some(VariantMismatch {
            witness_version,
            variant,
            expected,
        })
    }
}

/// Generic Bech32 payload: HRP plus 5-bit data, checksum stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bech32Data {
    pub hrp: String,
    pub data: Vec<u8>,
    pub variant: Variant,
}

/// Decoded SegWit address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Decoded {
    pub hrp: String,
    pub witness_version: u8,
    pub program: Vec<u8>,
    pub variant: Variant,
}

/// Expand the HRP for checksumming: high 3 bits of each character, a zero,
/// then the low 5 bits of each character.
pub fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut result = Vec::with_capacity(bytes.len() * 2 + 1);
    result.extend(bytes.iter().map(|b| b >> 5));
    result.push(0);
    result.extend(bytes.iter().map(|b| b & 31));
    result
}

/// BCH checksum over 5-bit values.
pub fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;

    for &value in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ffffff) << 5) ^ (value as u32);
        for (i, &g) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }

    chk
}

/// Six checksum symbols for `hrp` and `data`.
pub fn create_checksum(hrp: &str, data: &[u8], variant: Variant) -> [u8; CHECKSUM_LEN] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; CHECKSUM_LEN]);

    let m = polymod(&values) ^ variant.constant();

    let mut checksum = [0u8; CHECKSUM_LEN];
    for (i, symbol) in checksum.iter_mut().enumerate() {
        *symbol = ((m >> (5 * (5 - i))) & 31) as u8;
    }
    checksum
}

/// Whether `data` (checksum included) verifies under `variant`.
pub fn verify_checksum(hrp: &str, data: &[u8], variant: Variant) -> bool {
    checksum_variant(hrp, data) == Some(variant)
}

fn checksum_variant(hrp: &str, data: &[u8]) -> Option<Variant> {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    Variant::from_constant(polymod(&values))
}

/// Regroup a sequence of `from_bits`-wide values into `to_bits`-wide ones.
///
/// With `pad`, a trailing partial group is zero-filled on the right. Without
/// it, leftover bits must be fewer than `from_bits` and all zero.
pub fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> Result<Vec<u8>, CodecError> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::with_capacity(data.len() * from_bits as usize / to_bits as usize + 1);
    let max_value = (1u32 << to_bits) - 1;
    let max_acc = (1u32 << (from_bits + to_bits - 1)) - 1;

    for &value in data {
        if (value as u32) >> from_bits != 0 {
            return Err(CodecError::ValueOutOfRange { value, bits: from_bits });
        }
        acc = ((acc << from_bits) | (value as u32)) & max_acc;
        bits += from_bits;

        while bits >= to_bits {
            bits -= to_bits;
            result.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            result.push(((acc << (to_bits - bits)) & max_value) as u8);
        }
    } else if bits >= from_bits || ((acc << (to_bits - bits)) & max_value) != 0 {
        return Err(CodecError::InvalidPadding);
    }

    Ok(result)
}

fn check_hrp(hrp: &str) -> Result<(), CodecError> {
    if hrp.is_empty() {
        return Err(CodecError::InvalidSeparator);
    }
    match hrp.chars().find(|c| !(33..=126).contains(&(*c as u32))) {
        Some(character) => Err(CodecError::InvalidHrpChar { character }),
        None => Ok(()),
    }
}

/// Encode an HRP and 5-bit data with a checksum. Output is lowercase.
pub fn encode_raw(hrp: &str, data: &[u8], variant: Variant) -> Result<String, CodecError> {
    check_hrp(hrp)?;
    if hrp.chars().any(|c| c.is_ascii_lowercase()) && hrp.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(CodecError::MixedCase);
    }

    let total = hrp.len() + 1 + data.len() + CHECKSUM_LEN;
    if total > MAX_LENGTH {
        return Err(CodecError::StringTooLong(total));
    }

    let hrp = hrp.to_ascii_lowercase();
    let checksum = create_checksum(&hrp, data, variant);

    let mut result = String::with_capacity(total);
    result.push_str(&hrp);
    result.push(SEPARATOR);
    for &value in data.iter().chain(checksum.iter()) {
        let symbol = CHARSET
            .get(value as usize)
            .ok_or(CodecError::ValueOutOfRange { value, bits: 5 })?;
        result.push(*symbol as char);
    }
    Ok(result)
}

/// Decode a Bech32 or Bech32m string into HRP and 5-bit data.
///
/// The variant is whichever checksum constant verifies; a string matching
/// neither is rejected.
pub fn decode_raw(input: &str) -> Result<Bech32Data, CodecError> {
    if input.len() > MAX_LENGTH {
        return Err(CodecError::StringTooLong(input.len()));
    }

    let has_lower = input.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = input.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(CodecError::MixedCase);
    }

    let input = input.to_ascii_lowercase();

    let sep_pos = input.rfind(SEPARATOR).ok_or(CodecError::InvalidSeparator)?;
    if sep_pos == 0 || sep_pos + 1 + CHECKSUM_LEN > input.len() {
        return Err(CodecError::InvalidSeparator);
    }

    let hrp = &input[..sep_pos];
    check_hrp(hrp)?;

    let mut data = Vec::with_capacity(input.len() - sep_pos - 1);
    for (offset, character) in input[sep_pos + 1..].chars().enumerate() {
        let index = sep_pos + 1 + offset;
        let value = CHARSET_REV
            .get(character as usize)
            .copied()
            .filter(|&v| v != INVALID)
            .ok_or(CodecError::InvalidBech32Char { character, index })?;
        data.push(value);
    }

    let variant = checksum_variant(hrp, &data).ok_or(CodecError::InvalidBech32Checksum)?;

    data.truncate(data.len() - CHECKSUM_LEN);

    Ok(Bech32Data {
        hrp: String::from(hrp),
        data,
        variant,
    })
}

fn check_witness(witness_version: u8, program_len: usize) -> Result<(), CodecError> {
    if witness_version > MAX_WITNESS_VERSION {
        return Err(CodecError::InvalidWitnessVersion(witness_version));
    }
    if !(MIN_PROGRAM_LEN..=MAX_PROGRAM_LEN).contains(&program_len) {
        return Err(CodecError::InvalidProgramLength(program_len));
    }
    if witness_version == 0 && program_len != 20 && program_len != 32 {
        return Err(CodecError::InvalidV0ProgramLength(program_len));
    }
    Ok(())
}

/// Encode a witness program.
///
/// Pairing version 0 with Bech32m, or version 1+ with Bech32, is allowed
/// but logged at warn level; see [`variant_mismatch`].
pub fn encode(hrp: &str, witness_version: u8, program: &[u8], variant: Variant) -> Result<String, CodecError> {
    check_witness(witness_version, program.len())?;

    if let Some(mismatch) = variant_mismatch(witness_version, variant) {
        tracing::warn!(
            witness_version,
            variant = mismatch.variant.name(),
            expected = mismatch.expected.name(),
            "encoding witness program with non-standard Bech32 variant"
        );
    }

    let mut data = Vec::with_capacity(1 + (program.len() * 8 + 4) / 5);
    data.push(witness_version);
    data.extend(convert_bits(program, 8, 5, true)?);

    encode_raw(hrp, &data, variant)
}

/// Decode a SegWit address into HRP, witness version and program.
pub fn decode(input: &str) -> Result<Bech32Decoded, CodecError> {
    let Bech32Data { hrp, data, variant } = decode_raw(input)?;

    let (&witness_version, program_data) = data.split_first().ok_or(CodecError::EmptyData)?;
    if witness_version > MAX_WITNESS_VERSION {
        return Err(CodecError::InvalidWitnessVersion(witness_version));
    }

    let program = convert_bits(program_data, 5, 8, false)?;
    check_witness(witness_version, program.len())?;

    Ok(Bech32Decoded {
        hrp,
        witness_version,
        program,
        variant,
    })
}

fn expect_len(bytes: &[u8], expected: usize) -> Result<(), CodecError> {
    if bytes.len() != expected {
        return Err(CodecError::UnexpectedLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// P2WPKH address for a 20-byte HASH160 of a compressed public key.
pub fn encode_p2wpkh(pubkey_hash: &[u8], network: Network) -> Result<String, CodecError> {
    expect_len(pubkey_hash, 20)?;
    encode(network.bech32_hrp(), 0, pubkey_hash, Variant::Bech32)
}

/// P2WSH address for a 32-byte SHA256 of a witness script.
pub fn encode_p2wsh(script_hash: &[u8], network: Network) -> Result<String, CodecError> {
    expect_len(script_hash, 32)?;
    encode(network.bech32_hrp(), 0, script_hash, Variant::Bech32)
}

/// P2TR address for a 32-byte x-only output key.
pub fn encode_p2tr(x_only_pubkey: &[u8], network: Network) -> Result<String, CodecError> {
    expect_len(x_only_pubkey, 32)?;
    encode(network.bech32_hrp(), 1, x_only_pubkey, Variant::Bech32m)
}
