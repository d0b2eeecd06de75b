//! Error correction levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QrError;

/// QR Code error correction levels.
///
/// Higher levels can recover more damage but leave less room for data.
/// The enum order goes from least to most redundancy and doubles as the
/// column index into the EC tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCorrectionLevel {
    /// Low: ~7% of codewords can be restored.
    L = 0,
    /// Medium: ~15% of codewords can be restored.
    #[default]
    M = 1,
    /// Quartile: ~25% of codewords can be restored.
    Q = 2,
    /// High: ~30% of codewords can be restored.
    H = 3,
}

impl ErrorCorrectionLevel {
    pub const ALL: [ErrorCorrectionLevel; 4] = [Self::L, Self::M, Self::Q, Self::H];

    /// The 2-bit indicator written into the format information.
    ///
    /// Per ISO 18004 Table C.1 this does not follow the natural ordering:
    /// L = 01, M = 00, Q = 11, H = 10.
    pub fn bit(self) -> u32 {
        match self {
            ErrorCorrectionLevel::L => 0b01,
            ErrorCorrectionLevel::M => 0b00,
            ErrorCorrectionLevel::Q => 0b11,
            ErrorCorrectionLevel::H => 0b10,
        }
    }

    /// Position in the L, M, Q, H columns of the EC tables.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCorrectionLevel::L => "L",
            ErrorCorrectionLevel::M => "M",
            ErrorCorrectionLevel::Q => "Q",
            ErrorCorrectionLevel::H => "H",
        }
    }

    /// Parse `value`, falling back to `default` when it is not a level.
    pub fn from_or(value: &str, default: Self) -> Self {
        value.parse().unwrap_or(default)
    }
}

impl FromStr for ErrorCorrectionLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l" | "low" => Ok(ErrorCorrectionLevel::L),
            "m" | "medium" => Ok(ErrorCorrectionLevel::M),
            "q" | "quartile" => Ok(ErrorCorrectionLevel::Q),
            "h" | "high" => Ok(ErrorCorrectionLevel::H),
            _ => Err(QrError::UnknownEcLevel(s.to_string())),
        }
    }
}

impl fmt::Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCorrectionLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCorrectionLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_info_bits() {
        assert_eq!(ErrorCorrectionLevel::L.bit(), 0b01);
        assert_eq!(ErrorCorrectionLevel::M.bit(), 0b00);
        assert_eq!(ErrorCorrectionLevel::Q.bit(), 0b11);
        assert_eq!(ErrorCorrectionLevel::H.bit(), 0b10);
    }

    #[test]
    fn parse_short_and_long_names() {
        assert_eq!("l".parse(), Ok(ErrorCorrectionLevel::L));
        assert_eq!("Medium".parse(), Ok(ErrorCorrectionLevel::M));
        assert_eq!("QUARTILE".parse(), Ok(ErrorCorrectionLevel::Q));
        assert_eq!("h".parse(), Ok(ErrorCorrectionLevel::H));
        assert_eq!(
            "x".parse::<ErrorCorrectionLevel>(),
            Err(QrError::UnknownEcLevel("x".into()))
        );
    }

    #[test]
    fn from_or_falls_back() {
        assert_eq!(
            ErrorCorrectionLevel::from_or("bogus", ErrorCorrectionLevel::Q),
            ErrorCorrectionLevel::Q
        );
        assert_eq!(
            ErrorCorrectionLevel::from_or("high", ErrorCorrectionLevel::Q),
            ErrorCorrectionLevel::H
        );
    }

    #[test]
    fn default_is_medium() {
        assert_eq!(ErrorCorrectionLevel::default(), ErrorCorrectionLevel::M);
    }

    #[test]
    fn serde_as_letter() {
        let json = serde_json::to_string(&ErrorCorrectionLevel::H).unwrap();
        assert_eq!(json, "\"H\"");
        let level: ErrorCorrectionLevel = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(level, ErrorCorrectionLevel::L);
    }
}
