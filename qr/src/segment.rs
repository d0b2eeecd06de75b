//! Data segments and mode segmentation.
//!
//! Text input is first split into maximal runs of one character class
//! (digits, the rest of the alphanumeric set, Kanji, anything else). Each run
//! may also be written in any wider mode:
//!
//! ```text
//! Numeric      -> Numeric | Alphanumeric | Byte
//! Alphanumeric -> Alphanumeric | Byte
//! Kanji        -> Kanji | Byte
//! Byte         -> Byte
//! ```
//!
//! Choosing a mode per run is a shortest-path problem over the layered graph
//! of (run, mode) pairs: switching mode costs a fresh segment header, staying
//! in the same mode extends the current segment. The graph is acyclic and
//! layered, so a forward dynamic program over run boundaries finds the
//! minimum total bit length exactly.

use serde::{Deserialize, Serialize};

use crate::bit_buffer::BitBuffer;
use crate::ec_code;
use crate::ec_level::ErrorCorrectionLevel;
use crate::error::{QrError, Result};
use crate::kanji::{ShiftJis, kanji_value};
use crate::mode::{self, Mode};
use crate::version::Version;

/// A run of data committed to one encoding mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Numeric(String),
    Alphanumeric(String),
    Byte(Vec<u8>),
    /// Kanji text together with its 13-bit Kanji mode values.
    Kanji { text: String, codes: Vec<u16> },
}

impl Segment {
    pub fn numeric(data: &str) -> Result<Self> {
        if data.chars().all(mode::is_numeric) {
            Ok(Segment::Numeric(data.to_string()))
        } else {
            Err(incompatible(data, Mode::Numeric))
        }
    }

    pub fn alphanumeric(data: &str) -> Result<Self> {
        if data.chars().all(mode::is_alphanumeric) {
            Ok(Segment::Alphanumeric(data.to_string()))
        } else {
            Err(incompatible(data, Mode::Alphanumeric))
        }
    }

    pub fn byte(data: Vec<u8>) -> Self {
        Segment::Byte(data)
    }

    pub fn kanji(data: &str, sjis: &dyn ShiftJis) -> Result<Self> {
        let codes = data
            .chars()
            .map(|c| kanji_value(c, sjis))
            .collect::<Result<Vec<_>>>()?;
        Ok(Segment::Kanji {
            text: data.to_string(),
            codes,
        })
    }

    pub fn mode(&self) -> Mode {
        match self {
            Segment::Numeric(_) => Mode::Numeric,
            Segment::Alphanumeric(_) => Mode::Alphanumeric,
            Segment::Byte(_) => Mode::Byte,
            Segment::Kanji { .. } => Mode::Kanji,
        }
    }

    /// Value of the character count indicator: characters, or bytes in
    /// Byte mode.
    pub fn char_count(&self) -> usize {
        match self {
            Segment::Numeric(s) | Segment::Alphanumeric(s) => s.len(),
            Segment::Byte(bytes) => bytes.len(),
            Segment::Kanji { codes, .. } => codes.len(),
        }
    }

    /// Payload bits, excluding mode and count indicators.
    pub fn bit_length(&self) -> usize {
        self.mode().payload_bits(self.char_count())
    }

    /// The segment's data as bytes (UTF-8 for the text modes).
    pub fn data(&self) -> &[u8] {
        match self {
            Segment::Numeric(s) | Segment::Alphanumeric(s) => s.as_bytes(),
            Segment::Byte(bytes) => bytes,
            Segment::Kanji { text, .. } => text.as_bytes(),
        }
    }

    /// Append the payload to `buffer`.
    ///
    /// Fails with [`QrError::IncompatibleMode`] when the data holds
    /// characters the segment's mode cannot carry.
    pub fn write(&self, buffer: &mut BitBuffer) -> Result<()> {
        match self {
            Segment::Numeric(digits) => {
                if !digits.bytes().all(|d| d.is_ascii_digit()) {
                    return Err(incompatible(digits, Mode::Numeric));
                }
                for group in digits.as_bytes().chunks(3) {
                    let value = group
                        .iter()
                        .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
                    buffer.put(value, group.len() * 3 + 1);
                }
            }
            Segment::Alphanumeric(text) => {
                let values = text
                    .chars()
                    .map(|c| {
                        mode::alphanumeric_value(c)
                            .ok_or_else(|| incompatible(text, Mode::Alphanumeric))
                    })
                    .collect::<Result<Vec<u32>>>()?;
                for pair in values.chunks(2) {
                    match pair {
                        [a, b] => buffer.put(a * 45 + b, 11),
                        [a] => buffer.put(*a, 6),
                        _ => unreachable!(),
                    }
                }
            }
            Segment::Byte(bytes) => {
                for &b in bytes {
                    buffer.put(b as u32, 8);
                }
            }
            Segment::Kanji { text, codes } => {
                if codes.iter().any(|&code| code > 0x1FFF) {
                    return Err(incompatible(text, Mode::Kanji));
                }
                for &code in codes {
                    buffer.put(code as u32, 13);
                }
            }
        }
        Ok(())
    }
}

fn incompatible(data: &str, mode: Mode) -> QrError {
    QrError::IncompatibleMode {
        data: data.to_string(),
        mode,
        suggested: Mode::best_for_data(data),
    }
}

/// One element of array input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentInput {
    /// Text encoded in the densest mode that can hold all of it.
    Text(String),
    /// Raw bytes, always Byte mode.
    Bytes(Vec<u8>),
    /// Text with a mode hint. A hint that names no mode is ignored.
    Typed {
        data: String,
        #[serde(default)]
        mode: Option<String>,
    },
}

impl SegmentInput {
    pub fn with_mode(data: impl Into<String>, mode: Mode) -> Self {
        SegmentInput::Typed {
            data: data.into(),
            mode: Some(mode.as_str().to_lowercase()),
        }
    }
}

impl From<&str> for SegmentInput {
    fn from(data: &str) -> Self {
        SegmentInput::Text(data.to_string())
    }
}

impl From<String> for SegmentInput {
    fn from(data: String) -> Self {
        SegmentInput::Text(data)
    }
}

impl From<Vec<u8>> for SegmentInput {
    fn from(data: Vec<u8>) -> Self {
        SegmentInput::Bytes(data)
    }
}

/// Data handed to [`create`](crate::create).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrInput {
    /// Text segmented automatically for minimum size.
    Text(String),
    /// Caller-defined segments, encoded as given.
    Segments(Vec<SegmentInput>),
}

impl From<&str> for QrInput {
    fn from(data: &str) -> Self {
        QrInput::Text(data.to_string())
    }
}

impl From<String> for QrInput {
    fn from(data: String) -> Self {
        QrInput::Text(data)
    }
}

impl From<Vec<SegmentInput>> for QrInput {
    fn from(segments: Vec<SegmentInput>) -> Self {
        QrInput::Segments(segments)
    }
}

/// Build one segment from `data`, honoring a mode hint where it is wide
/// enough for the data.
fn build_single_segment(
    data: &str,
    hint: Option<&str>,
    sjis: Option<&dyn ShiftJis>,
) -> Result<Segment> {
    let best = Mode::best_for_data(data);
    let mode = hint.map_or(best, |h| Mode::from_or(h, best));

    if !mode.can_encode(best) {
        return Err(QrError::IncompatibleMode {
            data: data.to_string(),
            mode,
            suggested: best,
        });
    }

    build_segment(mode, data, sjis)
}

/// Segments for array input, one per element, without optimization.
pub fn from_array(items: &[SegmentInput], sjis: Option<&dyn ShiftJis>) -> Result<Vec<Segment>> {
    items
        .iter()
        .map(|item| match item {
            SegmentInput::Text(data) => build_single_segment(data, None, sjis),
            SegmentInput::Bytes(bytes) => Ok(Segment::byte(bytes.clone())),
            SegmentInput::Typed { data, mode } => {
                build_single_segment(data, mode.as_deref(), sjis)
            }
        })
        .collect()
}

/// A maximal run of one character class.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Run {
    mode: Mode,
    text: String,
}

impl Run {
    /// Character count indicator value if the run is written in `mode`.
    fn length_in(&self, mode: Mode) -> usize {
        match mode {
            Mode::Byte => self.text.len(),
            _ => self.text.chars().count(),
        }
    }
}

fn classify(c: char, kanji_enabled: bool) -> Mode {
    if mode::is_numeric(c) {
        Mode::Numeric
    } else if mode::is_alphanumeric(c) {
        Mode::Alphanumeric
    } else if kanji_enabled && mode::is_kanji(c) {
        Mode::Kanji
    } else {
        Mode::Byte
    }
}

fn split_runs(data: &str, kanji_enabled: bool) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for c in data.chars() {
        let mode = classify(c, kanji_enabled);
        match runs.last_mut() {
            Some(run) if run.mode == mode => run.text.push(c),
            _ => runs.push(Run {
                mode,
                text: c.to_string(),
            }),
        }
    }
    runs
}

/// Segment of `text` in `mode`. Kanji without a converter degrades to Byte.
fn build_segment(mode: Mode, text: &str, sjis: Option<&dyn ShiftJis>) -> Result<Segment> {
    match (mode, sjis) {
        (Mode::Numeric, _) => Segment::numeric(text),
        (Mode::Alphanumeric, _) => Segment::alphanumeric(text),
        (Mode::Kanji, Some(sjis)) => Segment::kanji(text, sjis),
        _ => Ok(Segment::byte(text.as_bytes().to_vec())),
    }
}

/// Split `data` by character class without optimizing.
///
/// Cheap and usually suboptimal; used only to estimate a starting version.
pub fn raw_split(data: &str, sjis: Option<&dyn ShiftJis>) -> Result<Vec<Segment>> {
    split_runs(data, sjis.is_some())
        .iter()
        .map(|run| build_segment(run.mode, &run.text, sjis))
        .collect()
}

/// Modes considered in the optimizer, in a fixed order.
const MODES: [Mode; 4] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte, Mode::Kanji];

/// Whether a run of class `class` may be written in `MODES[slot]`.
fn widens_to(class: Mode, slot: usize) -> bool {
    match class {
        Mode::Numeric => slot <= 2,
        Mode::Alphanumeric => slot == 1 || slot == 2,
        Mode::Kanji => slot == 2 || slot == 3,
        _ => slot == 2,
    }
}

/// Segment `data` for minimum encoded size at `version`.
pub fn from_string(
    data: &str,
    version: Version,
    sjis: Option<&dyn ShiftJis>,
) -> Result<Vec<Segment>> {
    let runs = split_runs(data, sjis.is_some());
    let n = runs.len();

    // No segment longer than this fits in any symbol.
    let max_bits = ec_code::data_codewords(Version::MAX, ErrorCorrectionLevel::L) * 8;

    // cost[i]: fewest bits to encode runs[..i]; choice[i]: (start, mode)
    // of the last segment on that path.
    let mut cost = vec![usize::MAX; n + 1];
    let mut choice = vec![(0usize, Mode::Byte); n + 1];
    cost[0] = 0;

    for end in 1..=n {
        let mut allowed = [true; 4];
        let mut lengths = [0usize; 4];

        for start in (0..end).rev() {
            let run = &runs[start];
            for slot in 0..MODES.len() {
                allowed[slot] &= widens_to(run.mode, slot);
                if allowed[slot] {
                    lengths[slot] += run.length_in(MODES[slot]);
                }
            }

            let mut fits_somewhere = false;
            for (slot, &mode) in MODES.iter().enumerate() {
                if !allowed[slot] {
                    continue;
                }
                let segment_bits =
                    4 + mode.char_count_bits(version) + mode.payload_bits(lengths[slot]);
                fits_somewhere |= segment_bits <= max_bits;

                let bits = cost[start] + segment_bits;
                if bits < cost[end] {
                    cost[end] = bits;
                    choice[end] = (start, mode);
                }
            }

            // Starting earlier only lengthens the segment.
            if !fits_somewhere {
                break;
            }
        }
    }

    let mut path: Vec<(Mode, usize, usize)> = Vec::new();
    let mut end = n;
    while end > 0 {
        let (start, mode) = choice[end];
        path.push((mode, start, end));
        end = start;
    }
    path.reverse();

    // Adjacent segments sharing a mode become one.
    let mut merged: Vec<(Mode, String)> = Vec::new();
    for (mode, start, end) in path {
        let text: String = runs[start..end].iter().map(|r| r.text.as_str()).collect();
        match merged.last_mut() {
            Some((last, acc)) if *last == mode => acc.push_str(&text),
            _ => merged.push((mode, text)),
        }
    }

    tracing::debug!(
        version = version.value(),
        runs = n,
        segments = merged.len(),
        bits = cost[n],
        "optimized segmentation"
    );

    merged
        .iter()
        .map(|(mode, text)| build_segment(*mode, text, sjis))
        .collect()
}
