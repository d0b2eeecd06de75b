//! Terminal rendering with Unicode block characters.
//!
//! Dark modules are drawn as ink, so the output reads correctly on a light
//! background.

use crate::symbol::Symbol;

const FULL: char = '\u{2588}';
const UPPER: char = '\u{2580}';
const LOWER: char = '\u{2584}';

/// Module at (`row`, `col`) of the symbol padded by `margin` light modules.
fn padded(symbol: &Symbol, margin: usize, row: usize, col: usize) -> bool {
    let size = symbol.size();
    row >= margin
        && col >= margin
        && row < size + margin
        && col < size + margin
        && symbol.get(row - margin, col - margin)
}

/// Compact rendering: two module rows per line with half blocks.
///
/// ```text
/// top  bottom  char
///  #     #      full block
///  #     .      upper half
///  .     #      lower half
///  .     .      space
/// ```
pub fn to_utf8(symbol: &Symbol, margin: usize) -> String {
    let total = symbol.size() + 2 * margin;
    let mut result = String::with_capacity((total + 1) * total.div_ceil(2) * 3);

    for row in (0..total).step_by(2) {
        for col in 0..total {
            let top = padded(symbol, margin, row, col);
            let bottom = row + 1 < total && padded(symbol, margin, row + 1, col);

            result.push(match (top, bottom) {
                (true, true) => FULL,
                (true, false) => UPPER,
                (false, true) => LOWER,
                (false, false) => ' ',
            });
        }
        result.push('\n');
    }

    result
}

/// Wide rendering: one line per module row, two characters per module so
/// modules come out roughly square.
pub fn to_ascii(symbol: &Symbol, margin: usize) -> String {
    let total = symbol.size() + 2 * margin;
    let mut result = String::with_capacity((total * 2 + 1) * total * 3);

    for row in 0..total {
        for col in 0..total {
            if padded(symbol, margin, row, col) {
                result.push(FULL);
                result.push(FULL);
            } else {
                result.push_str("  ");
            }
        }
        result.push('\n');
    }

    result
}
