//! Shift JIS conversion for Kanji mode.
//!
//! The encoder ships no JIS X 0208 table. Callers who want Kanji mode supply
//! a [`ShiftJis`] implementation through [`QrOptions`](crate::QrOptions);
//! without one, Kanji-range text is written in Byte mode as UTF-8.

use std::fmt;

use crate::error::{QrError, Result};

/// Maps a character to its double-byte Shift JIS value.
pub trait ShiftJis: Send + Sync {
    /// Shift JIS code of `c`, or `None` if it has none.
    fn to_sjis(&self, c: char) -> Option<u16>;
}

impl<F> ShiftJis for F
where
    F: Fn(char) -> Option<u16> + Send + Sync,
{
    fn to_sjis(&self, c: char) -> Option<u16> {
        self(c)
    }
}

impl fmt::Debug for dyn ShiftJis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ShiftJis")
    }
}

/// 13-bit Kanji mode value of `c`.
///
/// Shift JIS values in `0x8140..=0x9FFC` are offset by `0x8140`, values in
/// `0xE040..=0xEBBF` by `0xC140`; the high byte of the result is then
/// multiplied by `0xC0` and added to the low byte.
pub fn kanji_value(c: char, sjis: &dyn ShiftJis) -> Result<u16> {
    let code = sjis.to_sjis(c).ok_or(QrError::InvalidSjisCharacter(c))?;

    let offset = match code {
        0x8140..=0x9FFC => code - 0x8140,
        0xE040..=0xEBBF => code - 0xC140,
        _ => return Err(QrError::InvalidSjisCharacter(c)),
    };

    Ok((offset >> 8) * 0xC0 + (offset & 0xFF))
}
