//! Symbol construction: from segments to a masked module matrix.
//!
//! ```text
//! segments --create_data--> data codewords --create_codewords--> data + EC
//!     |                                                             |
//!     |   finder, timing, alignment, format, version patterns       |
//!     +--------------------------> BitMatrix <------ setup_data ----+
//!                                      |
//!                           mask search, final format info
//! ```

use crate::bit_buffer::BitBuffer;
use crate::bit_matrix::BitMatrix;
use crate::ec_code;
use crate::ec_level::ErrorCorrectionLevel;
use crate::error::{QrError, Result};
use crate::format_info;
use crate::mask::{self, MaskPattern};
use crate::options::QrOptions;
use crate::patterns;
use crate::reed_solomon::ReedSolomonEncoder;
use crate::segment::{self, QrInput, Segment};
use crate::version::Version;

/// Pad codewords alternated after the terminator.
const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// A finished QR Code symbol.
#[derive(Debug, Clone)]
pub struct Symbol {
    modules: BitMatrix,
    version: Version,
    error_correction_level: ErrorCorrectionLevel,
    mask_pattern: MaskPattern,
    segments: Vec<Segment>,
}

impl Symbol {
    /// Modules per side.
    pub fn size(&self) -> usize {
        self.modules.size()
    }

    /// Module at (`row`, `col`); `true` is dark.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.modules.get(row, col)
    }

    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn error_correction_level(&self) -> ErrorCorrectionLevel {
        self.error_correction_level
    }

    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask_pattern
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Encode `input` into a QR Code symbol.
///
/// Text is segmented for the shortest bit stream; a list of
/// [`SegmentInput`](crate::SegmentInput)s is taken as given, one segment per
/// item. The smallest version that fits is used unless `options` pins one.
pub fn create(input: impl Into<QrInput>, options: &QrOptions) -> Result<Symbol> {
    let level = options.error_correction_level.unwrap_or_default();
    let sjis = options.sjis();

    let segments = match input.into() {
        QrInput::Text(text) => {
            if text.is_empty() {
                return Err(QrError::NoInputText);
            }

            let estimated = match options.version {
                Some(version) => Some(version),
                None => {
                    let raw = segment::raw_split(&text, sjis)?;
                    Version::best_for_segments(&raw, level)
                }
            };
            tracing::debug!(
                estimated = estimated.map(Version::value),
                "estimated version"
            );

            segment::from_string(&text, estimated.unwrap_or(Version::MAX), sjis)?
        }
        QrInput::Segments(items) => segment::from_array(&items, sjis)?,
    };

    let minimum = Version::best_for_segments(&segments, level).ok_or(QrError::DataTooBig)?;
    let version = match options.version {
        None => minimum,
        Some(chosen) if chosen < minimum => {
            return Err(QrError::VersionTooSmall {
                chosen: chosen.value(),
                minimum: minimum.value(),
            });
        }
        Some(chosen) => chosen,
    };

    tracing::debug!(
        version = version.value(),
        level = %level,
        segments = segments.len(),
        "building symbol"
    );

    let codewords = encode_codewords(&segments, version, level)?;

    let mut modules = function_patterns(version, level);
    setup_data(&mut modules, &codewords);

    let mask_pattern = match options.mask_pattern {
        Some(pattern) => pattern,
        None => mask::best_mask(&mut modules, |matrix, pattern| {
            setup_format_info(matrix, level, pattern)
        }),
    };

    mask::apply_mask(mask_pattern, &mut modules);
    setup_format_info(&mut modules, level, mask_pattern);

    Ok(Symbol {
        modules,
        version,
        error_correction_level: level,
        mask_pattern,
        segments,
    })
}

/// Final codeword sequence of `segments`: interleaved data codewords
/// followed by interleaved error correction codewords.
pub fn encode_codewords(
    segments: &[Segment],
    version: Version,
    level: ErrorCorrectionLevel,
) -> Result<Vec<u8>> {
    let data = create_data(segments, version, level)?;
    create_codewords(&data, version, level)
}

/// Segment headers and payloads, terminated and padded to the data capacity.
fn create_data(
    segments: &[Segment],
    version: Version,
    level: ErrorCorrectionLevel,
) -> Result<BitBuffer> {
    let mut buffer = BitBuffer::new();

    for segment in segments {
        let mode = segment.mode();
        buffer.put(mode.indicator(), 4);
        buffer.put(segment.char_count() as u32, mode.char_count_bits(version));
        segment.write(&mut buffer)?;
    }

    let data_bits = ec_code::data_codewords(version, level) * 8;
    if buffer.len() > data_bits {
        return Err(QrError::DataTooBig);
    }

    // Terminator: up to four zero bits.
    let terminator = (data_bits - buffer.len()).min(4);
    buffer.put(0, terminator);

    while buffer.len() % 8 != 0 {
        buffer.put_bit(false);
    }

    let remaining = (data_bits - buffer.len()) / 8;
    for pad in PAD_CODEWORDS.iter().cycle().take(remaining) {
        buffer.put(*pad as u32, 8);
    }

    Ok(buffer)
}

/// Split the data into EC blocks, compute each block's error correction
/// codewords, and interleave.
///
/// Blocks come in two groups; the second group's blocks carry one more data
/// codeword. Every block has the same number of EC codewords.
fn create_codewords(
    data: &BitBuffer,
    version: Version,
    level: ErrorCorrectionLevel,
) -> Result<Vec<u8>> {
    let total_codewords = version.total_codewords();
    let ec_total = ec_code::total_ec_codewords(version, level);
    let data_total = total_codewords - ec_total;
    let blocks = ec_code::blocks_count(version, level);

    let blocks_in_group2 = total_codewords % blocks;
    let blocks_in_group1 = blocks - blocks_in_group2;

    let total_in_group1 = total_codewords / blocks;
    let data_in_group1 = data_total / blocks;
    let data_in_group2 = data_in_group1 + 1;
    let ec_count = total_in_group1 - data_in_group1;

    let rs = ReedSolomonEncoder::new(ec_count);
    let bytes = data.as_bytes();

    let mut data_blocks: Vec<&[u8]> = Vec::with_capacity(blocks);
    let mut ec_blocks: Vec<Vec<u8>> = Vec::with_capacity(blocks);
    let mut offset = 0;

    for b in 0..blocks {
        let size = if b < blocks_in_group1 {
            data_in_group1
        } else {
            data_in_group2
        };
        let block = &bytes[offset..offset + size];
        ec_blocks.push(rs.encode(block)?);
        data_blocks.push(block);
        offset += size;
    }

    let mut codewords = Vec::with_capacity(total_codewords);

    for i in 0..data_in_group2 {
        for block in &data_blocks {
            if let Some(&codeword) = block.get(i) {
                codewords.push(codeword);
            }
        }
    }

    for i in 0..ec_count {
        for block in &ec_blocks {
            codewords.push(block[i]);
        }
    }

    Ok(codewords)
}

/// A matrix holding every function pattern of `version`, all reserved.
///
/// The format information is drawn for mask 0 to reserve its cells; it is
/// rewritten once the mask is known.
fn function_patterns(version: Version, level: ErrorCorrectionLevel) -> BitMatrix {
    let mut matrix = BitMatrix::new(version.symbol_size());

    setup_finder_patterns(&mut matrix, version);
    setup_timing_patterns(&mut matrix);
    setup_alignment_patterns(&mut matrix, version);
    setup_format_info(&mut matrix, level, MaskPattern::default());
    setup_version_info(&mut matrix, version);

    matrix
}

/// Finder patterns with their light separators, clipped at the symbol edge.
///
/// ```text
/// #######
/// #.....#
/// #.###.#
/// #.###.#
/// #.###.#
/// #.....#
/// #######
/// ```
fn setup_finder_patterns(matrix: &mut BitMatrix, version: Version) {
    let size = matrix.size() as isize;

    for (row, col) in patterns::finder_positions(version) {
        let (row, col) = (row as isize, col as isize);

        for r in -1..=7isize {
            if row + r < 0 || row + r >= size {
                continue;
            }
            for c in -1..=7isize {
                if col + c < 0 || col + c >= size {
                    continue;
                }

                let dark = ((0..=6).contains(&r) && (c == 0 || c == 6))
                    || ((0..=6).contains(&c) && (r == 0 || r == 6))
                    || ((2..=4).contains(&r) && (2..=4).contains(&c));

                matrix.set((row + r) as usize, (col + c) as usize, dark, true);
            }
        }
    }
}

/// Alternating modules on row 6 and column 6 between the finder patterns.
fn setup_timing_patterns(matrix: &mut BitMatrix) {
    let size = matrix.size();

    for r in 8..size - 8 {
        let dark = r % 2 == 0;
        matrix.set(r, 6, dark, true);
        matrix.set(6, r, dark, true);
    }
}

/// 5x5 alignment patterns: dark ring, light ring, dark center.
fn setup_alignment_patterns(matrix: &mut BitMatrix, version: Version) {
    for (row, col) in patterns::alignment_positions(version) {
        for r in -2..=2isize {
            for c in -2..=2isize {
                let dark = r == -2 || r == 2 || c == -2 || c == 2 || (r == 0 && c == 0);
                let row = (row as isize + r) as usize;
                let col = (col as isize + c) as usize;
                matrix.set(row, col, dark, true);
            }
        }
    }
}

/// Version information: an 18-bit word drawn as a 6x3 block above the
/// bottom-left finder and its transpose left of the top-right finder.
fn setup_version_info(matrix: &mut BitMatrix, version: Version) {
    let Some(bits) = version.encoded_bits() else {
        return;
    };
    let size = matrix.size();

    for i in 0..18 {
        let row = i / 3;
        let col = i % 3 + size - 8 - 3;
        let dark = (bits >> i) & 1 == 1;

        matrix.set(row, col, dark, true);
        matrix.set(col, row, dark, true);
    }
}

/// Format information, drawn twice around the finder patterns, plus the
/// dark module at (size - 8, 8).
fn setup_format_info(matrix: &mut BitMatrix, level: ErrorCorrectionLevel, mask: MaskPattern) {
    let size = matrix.size();
    let bits = format_info::encoded_bits(level, mask);

    for i in 0..15 {
        let dark = (bits >> i) & 1 == 1;

        // Down column 8: skip the timing row, then continue bottom-left.
        if i < 6 {
            matrix.set(i, 8, dark, true);
        } else if i < 8 {
            matrix.set(i + 1, 8, dark, true);
        } else {
            matrix.set(size - 15 + i, 8, dark, true);
        }

        // Along row 8: top-right first, then leftwards past the timing column.
        if i < 8 {
            matrix.set(8, size - i - 1, dark, true);
        } else if i < 9 {
            matrix.set(8, 15 - i, dark, true);
        } else {
            matrix.set(8, 15 - i - 1, dark, true);
        }
    }

    matrix.set(size - 8, 8, true, true);
}

/// Place codeword bits MSB first in the non-reserved modules, zig-zagging up
/// and down two-module-wide columns from the bottom-right corner. The
/// vertical timing column is skipped.
fn setup_data(matrix: &mut BitMatrix, codewords: &[u8]) {
    let size = matrix.size() as isize;
    let mut upward = true;
    let mut row = size - 1;
    let mut bit_index: usize = 0;
    let total_bits = codewords.len() * 8;

    let mut col = size - 1;
    while col > 0 {
        if col == 6 {
            col -= 1;
        }

        loop {
            for c in 0..2 {
                let (r, cc) = (row as usize, (col - c) as usize);
                if matrix.is_reserved(r, cc) {
                    continue;
                }

                let dark = bit_index < total_bits
                    && (codewords[bit_index / 8] >> (7 - bit_index % 8)) & 1 == 1;
                matrix.set(r, cc, dark, false);
                bit_index += 1;
            }

            let next = if upward { row - 1 } else { row + 1 };
            if next < 0 || next >= size {
                upward = !upward;
                break;
            }
            row = next;
        }

        col -= 2;
    }
}
