//! Data encoding modes and character classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QrError;
use crate::version::Version;

/// The 45 characters of the alphanumeric set, in code value order.
const ALPHANUMERIC_CHARS: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// QR Code encoding modes.
///
/// Different modes pack different character sets with different density:
///
/// ```text
/// Mode          Indicator  Bits per char   Count bits (v1-9, v10-26, v27-40)
/// Numeric       0001       10 per 3        10, 12, 14
/// Alphanumeric  0010       11 per 2         9, 11, 13
/// Byte          0100        8               8, 16, 16
/// Kanji         1000       13               8, 10, 12
/// ```
///
/// `Mixed` never appears in a segment. It stands for "several segments" in
/// capacity queries, where only the raw data bit count matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
    Mixed,
}

impl Mode {
    /// 4-bit mode indicator written before every segment.
    pub fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Kanji => 0b1000,
            Mode::Mixed => 0,
        }
    }

    /// Width of the character count indicator for this mode at `version`.
    pub fn char_count_bits(self, version: Version) -> usize {
        let widths: [usize; 3] = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
            Mode::Kanji => [8, 10, 12],
            Mode::Mixed => return 0,
        };

        match version.value() {
            1..=9 => widths[0],
            10..=26 => widths[1],
            _ => widths[2],
        }
    }

    /// Payload bits needed for `length` characters (bytes for Byte mode).
    pub fn payload_bits(self, length: usize) -> usize {
        match self {
            Mode::Numeric => {
                let rest = length % 3;
                10 * (length / 3) + if rest > 0 { rest * 3 + 1 } else { 0 }
            }
            Mode::Alphanumeric => 11 * (length / 2) + 6 * (length % 2),
            Mode::Byte => 8 * length,
            Mode::Kanji => 13 * length,
            Mode::Mixed => 0,
        }
    }

    /// Densest mode able to represent all of `data`.
    ///
    /// Kanji is reported for strings made only of Kanji-range characters,
    /// whether or not a Shift JIS converter is available; callers downgrade
    /// to Byte when it is not.
    pub fn best_for_data(data: &str) -> Mode {
        if data.is_empty() {
            Mode::Byte
        } else if data.chars().all(is_numeric) {
            Mode::Numeric
        } else if data.chars().all(is_alphanumeric) {
            Mode::Alphanumeric
        } else if data.chars().all(is_kanji) {
            Mode::Kanji
        } else {
            Mode::Byte
        }
    }

    /// Parse `value`, falling back to `default` when it names no mode.
    pub fn from_or(value: &str, default: Mode) -> Mode {
        value.parse().unwrap_or(default)
    }

    /// Whether data classified as `best` may be written in this mode.
    ///
    /// Byte accepts anything; otherwise a mode may not be narrower than
    /// the data requires.
    pub(crate) fn can_encode(self, best: Mode) -> bool {
        self == Mode::Byte || self.indicator() >= best.indicator()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Numeric => "Numeric",
            Mode::Alphanumeric => "Alphanumeric",
            Mode::Byte => "Byte",
            Mode::Kanji => "Kanji",
            Mode::Mixed => "Mixed",
        }
    }
}

impl FromStr for Mode {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "numeric" => Ok(Mode::Numeric),
            "alphanumeric" => Ok(Mode::Alphanumeric),
            "kanji" => Ok(Mode::Kanji),
            "byte" => Ok(Mode::Byte),
            _ => Err(QrError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Mode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_str().to_lowercase())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub fn is_numeric(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_alphanumeric(c: char) -> bool {
    alphanumeric_value(c).is_some()
}

/// Code value of `c` in the alphanumeric table.
pub fn alphanumeric_value(c: char) -> Option<u32> {
    if !c.is_ascii() {
        return None;
    }
    ALPHANUMERIC_CHARS
        .iter()
        .position(|&a| a == c as u8)
        .map(|i| i as u32)
}

/// Characters of the JIS X 0208 repertoire that Kanji mode can carry:
/// CJK punctuation, kana, fullwidth forms, unified ideographs, Greek and
/// Cyrillic letters, and a handful of symbols.
pub fn is_kanji(c: char) -> bool {
    matches!(
        c,
        '\u{3000}'..='\u{303F}'
            | '\u{3040}'..='\u{309F}'
            | '\u{30A0}'..='\u{30FF}'
            | '\u{FF00}'..='\u{FFEF}'
            | '\u{4E00}'..='\u{9FAF}'
            | '\u{2605}'..='\u{2606}'
            | '\u{2190}'..='\u{2195}'
            | '\u{203B}'
            | '\u{2010}'
            | '\u{2015}'
            | '\u{2018}'
            | '\u{2019}'
            | '\u{2025}'
            | '\u{2026}'
            | '\u{201C}'
            | '\u{201D}'
            | '\u{2225}'
            | '\u{2260}'
            | '\u{0391}'..='\u{0451}'
            | '\u{00A7}'
            | '\u{00A8}'
            | '\u{00B1}'
            | '\u{00B4}'
            | '\u{00D7}'
            | '\u{00F7}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn char_count_bits_by_band() {
        assert_eq!(Mode::Numeric.char_count_bits(v(1)), 10);
        assert_eq!(Mode::Numeric.char_count_bits(v(10)), 12);
        assert_eq!(Mode::Numeric.char_count_bits(v(27)), 14);
        assert_eq!(Mode::Alphanumeric.char_count_bits(v(9)), 9);
        assert_eq!(Mode::Alphanumeric.char_count_bits(v(26)), 11);
        assert_eq!(Mode::Byte.char_count_bits(v(9)), 8);
        assert_eq!(Mode::Byte.char_count_bits(v(40)), 16);
        assert_eq!(Mode::Kanji.char_count_bits(v(40)), 12);
        assert_eq!(Mode::Mixed.char_count_bits(v(40)), 0);
    }

    #[test]
    fn payload_bits() {
        assert_eq!(Mode::Numeric.payload_bits(5), 17);
        assert_eq!(Mode::Numeric.payload_bits(8), 27);
        assert_eq!(Mode::Numeric.payload_bits(1), 4);
        assert_eq!(Mode::Alphanumeric.payload_bits(11), 61);
        assert_eq!(Mode::Byte.payload_bits(3), 24);
        assert_eq!(Mode::Kanji.payload_bits(2), 26);
    }

    #[test]
    fn best_mode() {
        assert_eq!(Mode::best_for_data("0123"), Mode::Numeric);
        assert_eq!(Mode::best_for_data("HELLO WORLD"), Mode::Alphanumeric);
        assert_eq!(Mode::best_for_data("AB12$%"), Mode::Alphanumeric);
        assert_eq!(Mode::best_for_data("hello"), Mode::Byte);
        assert_eq!(Mode::best_for_data("点茗"), Mode::Kanji);
        assert_eq!(Mode::best_for_data("点a"), Mode::Byte);
        assert_eq!(Mode::best_for_data(""), Mode::Byte);
    }

    #[test]
    fn alphanumeric_values() {
        assert_eq!(alphanumeric_value('0'), Some(0));
        assert_eq!(alphanumeric_value('A'), Some(10));
        assert_eq!(alphanumeric_value(' '), Some(36));
        assert_eq!(alphanumeric_value(':'), Some(44));
        assert_eq!(alphanumeric_value('a'), None);
        assert_eq!(alphanumeric_value('É'), None);
    }

    #[test]
    fn parse_modes() {
        assert_eq!("BYTE".parse(), Ok(Mode::Byte));
        assert_eq!("alphanumeric".parse(), Ok(Mode::Alphanumeric));
        assert_eq!(
            "mixed".parse::<Mode>(),
            Err(QrError::UnknownMode("mixed".into()))
        );
        assert_eq!(Mode::from_or("nope", Mode::Numeric), Mode::Numeric);
    }

    #[test]
    fn narrowing_is_rejected() {
        assert!(Mode::Byte.can_encode(Mode::Kanji));
        assert!(Mode::Alphanumeric.can_encode(Mode::Numeric));
        assert!(!Mode::Numeric.can_encode(Mode::Alphanumeric));
        assert!(!Mode::Alphanumeric.can_encode(Mode::Byte));
    }
}
