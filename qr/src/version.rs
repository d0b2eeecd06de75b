//! Symbol versions, capacities and version information.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ec_code;
use crate::ec_level::ErrorCorrectionLevel;
use crate::error::{QrError, Result};
use crate::format_info::bch_digit;
use crate::mode::Mode;
use crate::segment::Segment;

/// Total codewords per version (1-40). ISO 18004:2015 Table 9.
const TOTAL_CODEWORDS: [usize; 40] = [
    26, 44, 70, 100, 134, 172, 196, 242, 292, 346, // 1-10
    404, 466, 532, 581, 655, 733, 815, 901, 991, 1085, // 11-20
    1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185, // 21-30
    2323, 2465, 2611, 2761, 2876, 3034, 3196, 3362, 3532, 3706, // 31-40
];

/// Golay (18,6) generator polynomial:
/// x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1.
const G18: u32 = 0b1_1111_0010_0101;

/// QR Code version, 1 to 40. Version `v` is `4v + 17` modules wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(value: u8) -> Result<Self> {
        if (1..=40).contains(&value) {
            Ok(Version(value))
        } else {
            Err(QrError::InvalidVersion(value.to_string()))
        }
    }

    /// Parse `value`, falling back to `default` when it is not a version.
    pub fn from_or(value: &str, default: Option<Version>) -> Option<Version> {
        value
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(|n| Version::new(n).ok())
            .or(default)
    }

    /// Every version from 1 to 40.
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Modules per side.
    pub fn symbol_size(self) -> usize {
        self.0 as usize * 4 + 17
    }

    /// Codewords (data and EC) the symbol holds.
    pub fn total_codewords(self) -> usize {
        TOTAL_CODEWORDS[self.index()]
    }

    /// How much `mode` data fits at this version and level.
    ///
    /// For [`Mode::Mixed`] this is the raw number of data bits. For the other
    /// modes it is a character count (bytes for Byte mode), after reserving
    /// the mode indicator and character count indicator of one segment.
    pub fn capacity(self, level: ErrorCorrectionLevel, mode: Mode) -> usize {
        let data_bits = ec_code::data_codewords(self, level) * 8;
        if mode == Mode::Mixed {
            return data_bits;
        }

        let usable_bits = data_bits - reserved_bits(mode, self);
        match mode {
            Mode::Numeric => usable_bits * 3 / 10,
            Mode::Alphanumeric => usable_bits * 2 / 11,
            Mode::Kanji => usable_bits / 13,
            Mode::Byte | Mode::Mixed => usable_bits / 8,
        }
    }

    /// Smallest version able to hold `segments` at `level`.
    ///
    /// A single segment is measured by its character count against its own
    /// mode's capacity; several segments by their summed bit length against
    /// the raw data bits. An empty list fits in version 1.
    pub fn best_for_segments(segments: &[Segment], level: ErrorCorrectionLevel) -> Option<Version> {
        match segments {
            [] => Some(Version::MIN),
            [segment] => Version::all()
                .find(|v| segment.char_count() <= v.capacity(level, segment.mode())),
            _ => Version::all()
                .find(|v| total_bits(segments, *v) <= v.capacity(level, Mode::Mixed)),
        }
    }

    /// 18-bit version information word, present from version 7 on.
    pub fn encoded_bits(self) -> Option<u32> {
        if self.0 < 7 {
            return None;
        }

        let g18_digit = bch_digit(G18);
        let mut d = (self.0 as u32) << 12;
        while bch_digit(d) >= g18_digit {
            d ^= G18 << (bch_digit(d) - g18_digit);
        }
        Some(((self.0 as u32) << 12) | d)
    }
}

/// Mode indicator plus character count indicator of one segment.
fn reserved_bits(mode: Mode, version: Version) -> usize {
    4 + mode.char_count_bits(version)
}

/// Bits all `segments` take once written at `version`, headers included.
pub(crate) fn total_bits(segments: &[Segment], version: Version) -> usize {
    segments
        .iter()
        .map(|s| reserved_bits(s.mode(), version) + s.bit_length())
        .sum()
}

impl TryFrom<u8> for Version {
    type Error = QrError;

    fn try_from(value: u8) -> Result<Self> {
        Version::new(value)
    }
}

impl From<Version> for u8 {
    fn from(version: Version) -> u8 {
        version.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
