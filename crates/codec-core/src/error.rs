//! Error type shared by every codec in this crate.

use thiserror::Error;

/// Broad category of a [`CodecError`].
///
/// Callers that only need to know *why* an input was rejected (bad symbol,
/// bad size, bad checksum, ...) can match on this instead of on the
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character or value outside the codec's symbol set.
    Alphabet,
    /// Input too short or too long for the structure being decoded.
    Length,
    /// Structurally valid input whose checksum does not verify.
    Checksum,
    /// A numeric field outside its permitted range.
    Range,
    /// Malformed layout: mixed case, missing separator, bad padding.
    Format,
}

/// Errors returned by the Base58, Base58Check, Bech32 and hex codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Character not present in the Base58 alphabet.
    #[error("invalid Base58 character {character:?} at index {index}")]
    InvalidBase58Char { character: char, index: usize },

    /// Character not present in the Bech32 charset.
    #[error("invalid Bech32 character {character:?} at index {index}")]
    InvalidBech32Char { character: char, index: usize },

    /// Human-readable part contains a character outside ASCII 33..=126.
    #[error("invalid character {character:?} in human-readable part")]
    InvalidHrpChar { character: char },

    /// Non-hex character in a hex string.
    #[error("invalid hex character {character:?} at index {index}")]
    InvalidHexChar { character: char, index: usize },

    /// A value handed to `convert_bits` does not fit in the source width.
    #[error("value {value} does not fit in {bits} bits")]
    ValueOutOfRange { value: u8, bits: u32 },

    /// Decoded Base58Check payload shorter than version + checksum.
    #[error("Base58Check payload too short: {0} bytes")]
    PayloadTooShort(usize),

    /// Requested version prefix longer than the decoded payload allows.
    #[error("version prefix of {version_len} bytes does not fit in a {payload_len}-byte payload")]
    VersionTooLong { version_len: usize, payload_len: usize },

    /// Witness program outside 2..=40 bytes.
    #[error("invalid witness program length: {0}")]
    InvalidProgramLength(usize),

    /// Witness version 0 with a program that is neither 20 nor 32 bytes.
    #[error("witness version 0 requires a 20 or 32 byte program, got {0}")]
    InvalidV0ProgramLength(usize),

    /// Fixed-size input (hash, x-only key) of the wrong length.
    #[error("expected {expected} bytes, got {actual}")]
    UnexpectedLength { expected: usize, actual: usize },

    /// Bech32 string longer than 90 characters.
    #[error("Bech32 string too long: {0} characters")]
    StringTooLong(usize),

    /// Base58Check checksum mismatch (strict decode only).
    #[error("Base58Check checksum mismatch")]
    ChecksumMismatch,

    /// Bech32 checksum matched neither the Bech32 nor the Bech32m constant.
    #[error("invalid Bech32 checksum")]
    InvalidBech32Checksum,

    /// Witness version outside 0..=16.
    #[error("invalid witness version: {0}")]
    InvalidWitnessVersion(u8),

    /// Bech32 string mixes upper and lower case.
    #[error("mixed-case Bech32 string")]
    MixedCase,

    /// No `1` separator, empty HRP, or fewer than 6 data characters.
    #[error("invalid Bech32 separator position")]
    InvalidSeparator,

    /// Bech32 data part has no witness version symbol.
    #[error("empty Bech32 data part")]
    EmptyData,

    /// Leftover bits after 5-to-8 regrouping are non-zero or a whole group.
    #[error("non-canonical padding in Bech32 data")]
    InvalidPadding,
}

impl CodecError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::InvalidBase58Char { .. }
            | CodecError::InvalidBech32Char { .. }
            | CodecError::InvalidHrpChar { .. }
            | CodecError::InvalidHexChar { .. }
            | CodecError::ValueOutOfRange { .. } => ErrorKind::Alphabet,
            CodecError::PayloadTooShort(_)
            | CodecError::VersionTooLong { .. }
            | CodecError::InvalidProgramLength(_)
            | CodecError::InvalidV0ProgramLength(_)
            | CodecError::UnexpectedLength { .. }
            | CodecError::StringTooLong(_) => ErrorKind::Length,
            CodecError::ChecksumMismatch | CodecError::InvalidBech32Checksum => ErrorKind::Checksum,
            CodecError::InvalidWitnessVersion(_) => ErrorKind::Range,
            CodecError::MixedCase
            | CodecError::InvalidSeparator
            | CodecError::EmptyData
            | CodecError::InvalidPadding => ErrorKind::Format,
        }
    }
}
