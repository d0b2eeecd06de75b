//! Error type shared by every stage of the encoder.

use thiserror::Error;

use crate::mode::Mode;

/// Errors produced while building or rendering a QR Code symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// `create` was called with an empty string.
    #[error("No input text")]
    NoInputText,

    #[error("Unknown EC Level: {0}")]
    UnknownEcLevel(String),

    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Invalid QR Code version: {0}")]
    InvalidVersion(String),

    #[error("Invalid mask pattern: {0}")]
    InvalidMaskPattern(String),

    /// Even version 40 cannot hold the segments at the requested EC level.
    #[error("The amount of data is too big to be stored in a QR Code")]
    DataTooBig,

    /// The caller pinned a version smaller than the data requires.
    #[error(
        "The chosen QR Code version cannot contain this amount of data. \
         Chosen version: {chosen}. Minimum version required to store current data is: {minimum}"
    )]
    VersionTooSmall { chosen: u8, minimum: u8 },

    /// The caller forced a mode that cannot represent the data.
    #[error("\"{data}\" cannot be encoded with mode {mode}. Suggested mode is: {suggested}")]
    IncompatibleMode {
        data: String,
        mode: Mode,
        suggested: Mode,
    },

    /// The Shift JIS value of a Kanji character lies outside the two
    /// double-byte ranges QR Code accepts.
    #[error("Invalid SJIS character: {0}. Make sure your charset is UTF-8")]
    InvalidSjisCharacter(char),

    #[error("Color should be defined as hex string")]
    ColorNotHex,

    #[error("Invalid hex color: {0}")]
    InvalidColor(String),

    /// The Reed-Solomon encoder was used before a degree was set.
    #[error("Encoder not initialized")]
    EncoderNotInitialized,

    #[cfg(feature = "png")]
    #[error("PNG encoding failed: {0}")]
    Png(String),
}

pub type Result<T> = std::result::Result<T, QrError>;
