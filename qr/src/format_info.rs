//! Format information: BCH(15,5) encoded EC level and mask pattern.
//!
//! ```text
//! [EC level (2 bits)][Mask (3 bits)][BCH remainder (10 bits)] XOR 101010000010010
//! ```
//!
//! The final XOR guarantees the word is never all zeros.

use crate::ec_level::ErrorCorrectionLevel;
use crate::mask::MaskPattern;

/// BCH generator polynomial: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1.
const G15: u32 = 0b101_0011_0111;

const G15_MASK: u32 = 0b101_0100_0001_0010;

/// Bit length of `data`.
pub fn bch_digit(mut data: u32) -> u32 {
    let mut digit = 0;
    while data != 0 {
        digit += 1;
        data >>= 1;
    }
    digit
}

/// 15-bit format information word.
pub fn encoded_bits(level: ErrorCorrectionLevel, mask: MaskPattern) -> u32 {
    let data = (level.bit() << 3) | mask.value() as u32;

    let g15_digit = bch_digit(G15);
    let mut d = data << 10;
    while bch_digit(d) >= g15_digit {
        d ^= G15 << (bch_digit(d) - g15_digit);
    }

    ((data << 10) | d) ^ G15_MASK
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(n: u8) -> MaskPattern {
        MaskPattern::new(n).unwrap()
    }

    #[test]
    fn bch_digits() {
        assert_eq!(bch_digit(0), 0);
        assert_eq!(bch_digit(1), 1);
        assert_eq!(bch_digit(G15), 11);
        assert_eq!(bch_digit(0x1F25), 13);
    }

    /// Known values from ISO 18004 Table C.1.
    #[test]
    fn known_values() {
        use ErrorCorrectionLevel::*;
        let cases = [
            (M, 0, 0b101010000010010),
            (M, 1, 0b101000100100101),
            (M, 2, 0b101111001111100),
            (L, 0, 0b111011111000100),
            (L, 1, 0b111001011110011),
            (H, 0, 0b001011010001001),
            (H, 1, 0b001001110111110),
            (Q, 0, 0b011010101011111),
            (Q, 1, 0b011000001101000),
        ];

        for (level, m, expected) in cases {
            let result = encoded_bits(level, mask(m));
            assert_eq!(
                result, expected,
                "format bits mismatch for {}-{}: got {:#017b}, expected {:#017b}",
                level, m, result, expected
            );
        }
    }

    #[test]
    fn never_all_zero() {
        for level in ErrorCorrectionLevel::ALL {
            for m in MaskPattern::all() {
                assert_ne!(encoded_bits(level, m), 0);
                assert!(encoded_bits(level, m) < 1 << 15);
            }
        }
    }
}
