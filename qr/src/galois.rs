//! GF(2^8) arithmetic for Reed-Solomon encoding.
//!
//! Elements are polynomials over GF(2) modulo the primitive polynomial
//! x^8 + x^4 + x^3 + x^2 + 1 (0x11D). Addition is XOR; multiplication goes
//! through log/antilog tables:
//!
//! ```text
//! a * b = EXP[LOG[a] + LOG[b]]
//! ```
//!
//! The antilog table is stored twice over (512 entries) so the sum of two
//! logarithms can index it directly without a `% 255`.

/// Primitive polynomial of the field.
const PRIMITIVE: u16 = 0x11D;

/// GF(2^8) with precomputed log and antilog tables.
pub struct Gf256;

impl Gf256 {
    /// Antilogarithm table: `EXP[i] = alpha^i`, valid for `i < 510`.
    const EXP: [u8; 512] = Self::generate_exp_table();

    /// Logarithm table: `LOG[alpha^i] = i`. `LOG[0]` is meaningless.
    const LOG: [u8; 256] = Self::generate_log_table();

    const fn generate_exp_table() -> [u8; 512] {
        let mut table = [0u8; 512];
        let mut x = 1u16;

        let mut i = 0;
        while i < 255 {
            table[i] = x as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE;
            }
            i += 1;
        }

        while i < 512 {
            table[i] = table[i - 255];
            i += 1;
        }

        table
    }

    const fn generate_log_table() -> [u8; 256] {
        let exp = Self::generate_exp_table();
        let mut table = [0u8; 256];

        let mut i = 0;
        while i < 255 {
            table[exp[i] as usize] = i as u8;
            i += 1;
        }

        table
    }

    /// `alpha^n`.
    pub fn exp(n: usize) -> u8 {
        Self::EXP[n]
    }

    /// Discrete logarithm of a non-zero element.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero, which has no logarithm.
    pub fn log(n: u8) -> u8 {
        assert!(n >= 1, "log({n}) is undefined in GF(2^8)");
        Self::LOG[n as usize]
    }

    /// Multiply two field elements.
    pub fn mul(x: u8, y: u8) -> u8 {
        if x == 0 || y == 0 {
            return 0;
        }
        Self::EXP[Self::LOG[x as usize] as usize + Self::LOG[y as usize] as usize]
    }
}
