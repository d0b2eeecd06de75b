//! # QR Code Encoder
//!
//! A QR Code symbol encoder implementing **ISO/IEC 18004**, with optimal
//! mode segmentation and pluggable renderers.
//!
//! ## Specification Reference
//!
//! - Section 6: Symbol structure (finder patterns, timing, alignment)
//! - Section 7: Data encoding (modes, character count indicators)
//! - Section 8: Error correction (Reed-Solomon codes over GF(2^8))
//! - Section 9: Codeword placement (zigzag pattern)
//! - Section 10: Data masking (8 mask patterns, penalty scoring)
//! - Annex C: Format and version information encoding
//!
//! ## Library Organization
//!
//! ```text
//! lib.rs
//! +-- create()                    Entry point: text or segments -> Symbol
//! |
//! +-- Data Encoding (Section 7)
//! |   +-- mode                    Character classes, count indicator widths
//! |   +-- segment                 Segments, raw split, shortest-path optimizer
//! |   +-- kanji                   Shift JIS strategy, 13-bit Kanji values
//! |   +-- bit_buffer              MSB-first bit accumulator
//! |
//! +-- Capacity (Section 7, Table 7-9)
//! |   +-- version                 Version newtype, capacities, best version
//! |   +-- ec_level                L/M/Q/H
//! |   +-- ec_code                 EC blocks and codewords per version/level
//! |
//! +-- Error Correction (Section 8)
//! |   +-- galois                  GF(2^8) log/antilog tables
//! |   +-- polynomial              Multiply, remainder, generator polynomial
//! |   +-- reed_solomon            EC codewords for one block
//! |
//! +-- Matrix Construction (Section 6, 9)
//! |   +-- bit_matrix              Modules plus reserved mask
//! |   +-- patterns                Finder and alignment positions
//! |   +-- symbol                  Codewords, layout, data placement
//! |
//! +-- Masking (Section 10)
//! |   +-- mask                    Patterns, penalties N1-N4, best mask
//! |
//! +-- Format Info (Annex C)
//! |   +-- format_info             BCH(15,5) EC level + mask
//! |   +-- version::encoded_bits   BCH(18,6) version (v7+)
//! |
//! +-- render                      RGBA image, PNG, SVG, terminal text
//! ```
//!
//! ## Encoding Pipeline
//!
//! ```text
//! "HELLO 123" --segment--> [Alphanumeric "HELLO ", Numeric "123"]
//!             --version--> smallest version that fits at the EC level
//!             --symbol---> data codewords + RS codewords, interleaved
//!             --layout---> function patterns, zigzag data placement
//!             --mask-----> lowest-penalty pattern, final format info
//! ```
//!
//! Text input is segmented for the shortest bit stream. Mixed content such
//! as `"ITEM 00012345"` is split when a mode switch costs fewer bits than
//! staying in the wider mode:
//!
//! ```text
//! [Mode Indicator (4 bits)] [Character Count] [Data Bits]  per segment
//! [Terminator (<= 4 bits)] [0 to byte boundary] [0xEC 0x11 ...]
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use qrgen::{ErrorCorrectionLevel, QrOptions, RenderOptions};
//!
//! let options = QrOptions::default().with_error_correction_level(ErrorCorrectionLevel::Q);
//! let symbol = qrgen::create("HELLO WORLD", &options).unwrap();
//! assert_eq!(symbol.size(), 21);
//!
//! let svg = qrgen::render::svg::render(&symbol, &RenderOptions::default());
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! Segments can also be given explicitly, one per item:
//!
//! ```
//! use qrgen::{Mode, QrOptions, SegmentInput};
//!
//! let input = vec![
//!     SegmentInput::with_mode("AB", Mode::Byte),
//!     SegmentInput::from("0123456789"),
//! ];
//! let symbol = qrgen::create(input, &QrOptions::default()).unwrap();
//! assert_eq!(symbol.segments()[0].mode(), Mode::Byte);
//! assert_eq!(symbol.segments()[1].mode(), Mode::Numeric);
//! ```

pub mod bit_buffer;
pub mod bit_matrix;
pub mod ec_code;
pub mod ec_level;
pub mod error;
pub mod format_info;
pub mod galois;
pub mod kanji;
pub mod mask;
pub mod mode;
pub mod options;
pub mod patterns;
pub mod polynomial;
pub mod reed_solomon;
pub mod render;
pub mod segment;
pub mod symbol;
pub mod version;

pub use bit_matrix::BitMatrix;
pub use ec_level::ErrorCorrectionLevel;
pub use error::{QrError, Result};
pub use kanji::ShiftJis;
pub use mask::MaskPattern;
pub use mode::Mode;
pub use options::{Color, ColorOptions, QrOptions, RenderOptions};
pub use segment::{QrInput, Segment, SegmentInput};
pub use symbol::{Symbol, create, encode_codewords};
pub use version::Version;
