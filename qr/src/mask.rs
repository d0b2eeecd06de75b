//! Data masking and penalty scoring.
//!
//! Masking XORs every non-reserved module with one of 8 patterns (row = i,
//! col = j):
//!
//! ```text
//! 0: (i + j) mod 2 = 0
//! 1: i mod 2 = 0
//! 2: j mod 3 = 0
//! 3: (i + j) mod 3 = 0
//! 4: (i/2 + j/3) mod 2 = 0
//! 5: (i*j) mod 2 + (i*j) mod 3 = 0
//! 6: ((i*j) mod 2 + (i*j) mod 3) mod 2 = 0
//! 7: ((i*j) mod 3 + (i+j) mod 2) mod 2 = 0
//! ```
//!
//! The pattern with the lowest total penalty wins:
//! 1. Runs of 5+ same-color modules: 3 + (length - 5)
//! 2. 2x2 blocks of one color: 3 per block
//! 3. Finder-like 1:1:3:1:1 patterns with 4 light modules on one side: 40 each
//! 4. Dark proportion: 10 per 5% step away from 50%

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bit_matrix::BitMatrix;
use crate::error::{QrError, Result};

const N1: u32 = 3;
const N2: u32 = 3;
const N3: u32 = 40;
const N4: u32 = 10;

/// One of the 8 mask patterns.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(value: u8) -> Result<Self> {
        if value < 8 {
            Ok(MaskPattern(value))
        } else {
            Err(QrError::InvalidMaskPattern(value.to_string()))
        }
    }

    /// Parse `value`, falling back to `default` when it is not a pattern.
    pub fn from_or(value: &str, default: Option<MaskPattern>) -> Option<MaskPattern> {
        value
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(|n| MaskPattern::new(n).ok())
            .or(default)
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether the module at (`i`, `j`) is flipped by this pattern.
    pub fn is_masked(self, i: usize, j: usize) -> bool {
        match self.0 {
            0 => (i + j) % 2 == 0,
            1 => i % 2 == 0,
            2 => j % 3 == 0,
            3 => (i + j) % 3 == 0,
            4 => (i / 2 + j / 3) % 2 == 0,
            5 => (i * j) % 2 + (i * j) % 3 == 0,
            6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            _ => ((i * j) % 3 + (i + j) % 2) % 2 == 0,
        }
    }
}

impl TryFrom<u8> for MaskPattern {
    type Error = QrError;

    fn try_from(value: u8) -> Result<Self> {
        MaskPattern::new(value)
    }
}

impl From<MaskPattern> for u8 {
    fn from(mask: MaskPattern) -> u8 {
        mask.0
    }
}

impl fmt::Display for MaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// XOR every non-reserved module with `pattern`. Applying it twice
/// restores the matrix.
pub fn apply_mask(pattern: MaskPattern, matrix: &mut BitMatrix) {
    let size = matrix.size();
    for col in 0..size {
        for row in 0..size {
            if matrix.is_reserved(row, col) {
                continue;
            }
            matrix.xor(row, col, pattern.is_masked(row, col));
        }
    }
}

/// Rule 1: runs of five or more same-color modules, rows and columns.
pub fn penalty_n1(matrix: &BitMatrix) -> u32 {
    let size = matrix.size();
    let mut points = 0;

    let run_points = |len: usize| if len >= 5 { N1 + (len - 5) as u32 } else { 0 };

    for i in 0..size {
        let mut row_run = 0;
        let mut col_run = 0;
        let mut last_in_row = None;
        let mut last_in_col = None;

        for j in 0..size {
            let module = matrix.get(i, j);
            if last_in_row == Some(module) {
                row_run += 1;
            } else {
                points += run_points(row_run);
                last_in_row = Some(module);
                row_run = 1;
            }

            let module = matrix.get(j, i);
            if last_in_col == Some(module) {
                col_run += 1;
            } else {
                points += run_points(col_run);
                last_in_col = Some(module);
                col_run = 1;
            }
        }

        points += run_points(row_run) + run_points(col_run);
    }

    points
}

/// Rule 2: 2x2 blocks of one color.
pub fn penalty_n2(matrix: &BitMatrix) -> u32 {
    let size = matrix.size();
    let mut blocks = 0;

    for row in 0..size - 1 {
        for col in 0..size - 1 {
            let color = matrix.get(row, col);
            if color == matrix.get(row, col + 1)
                && color == matrix.get(row + 1, col)
                && color == matrix.get(row + 1, col + 1)
            {
                blocks += 1;
            }
        }
    }

    blocks * N2
}

/// Rule 3: dark-light-dark-dark-dark-light-dark with four light modules
/// before or after, found through an 11-bit sliding window.
pub fn penalty_n3(matrix: &BitMatrix) -> u32 {
    let size = matrix.size();
    let mut patterns = 0;

    for i in 0..size {
        let mut row_bits = 0u32;
        let mut col_bits = 0u32;

        for j in 0..size {
            row_bits = ((row_bits << 1) & 0x7FF) | matrix.get(i, j) as u32;
            if j >= 10 && (row_bits == 0x5D0 || row_bits == 0x05D) {
                patterns += 1;
            }

            col_bits = ((col_bits << 1) & 0x7FF) | matrix.get(j, i) as u32;
            if j >= 10 && (col_bits == 0x5D0 || col_bits == 0x05D) {
                patterns += 1;
            }
        }
    }

    patterns * N3
}

/// Rule 4: deviation of the dark proportion from 50%, in 5% steps.
pub fn penalty_n4(matrix: &BitMatrix) -> u32 {
    let total = matrix.modules().len();
    let dark = matrix.dark_count();

    // ceil(dark * 100 / total / 5)
    let step = (dark * 20).div_ceil(total);
    step.abs_diff(10) as u32 * N4
}

pub fn penalty(matrix: &BitMatrix) -> u32 {
    penalty_n1(matrix) + penalty_n2(matrix) + penalty_n3(matrix) + penalty_n4(matrix)
}

/// Pattern with the lowest penalty; the earliest wins ties.
///
/// `setup_format` draws the format information for a candidate before it
/// is scored, so the score reflects the finished symbol.
pub fn best_mask<F>(matrix: &mut BitMatrix, mut setup_format: F) -> MaskPattern
where
    F: FnMut(&mut BitMatrix, MaskPattern),
{
    let mut best_pattern = MaskPattern(0);
    let mut lowest_penalty = u32::MAX;

    for pattern in MaskPattern::all() {
        setup_format(matrix, pattern);
        apply_mask(pattern, matrix);
        let score = penalty(matrix);
        apply_mask(pattern, matrix);

        tracing::trace!(mask = pattern.value(), penalty = score, "mask candidate");

        if score < lowest_penalty {
            lowest_penalty = score;
            best_pattern = pattern;
        }
    }

    tracing::debug!(
        mask = best_pattern.value(),
        penalty = lowest_penalty,
        "selected mask"
    );
    best_pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn matrix_from(rows: &[&str]) -> BitMatrix {
        let mut m = BitMatrix::new(rows.len());
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                m.set(r, c, ch == '#', false);
            }
        }
        m
    }

    fn random_matrix(rng: &mut StdRng, size: usize) -> BitMatrix {
        let mut m = BitMatrix::new(size);
        for r in 0..size {
            for c in 0..size {
                m.set(r, c, rng.gen_bool(0.5), rng.gen_bool(0.2));
            }
        }
        m
    }

    #[test]
    fn mask_patterns_at_origin_row() {
        let first_row: Vec<Vec<bool>> = MaskPattern::all()
            .map(|p| (0..6).map(|j| p.is_masked(0, j)).collect())
            .collect();
        // Row 0: i*j = 0 everywhere, so patterns 5 and 6 mask the whole row.
        assert_eq!(first_row[0], vec![true, false, true, false, true, false]);
        assert_eq!(first_row[1], vec![true; 6]);
        assert_eq!(first_row[2], vec![true, false, false, true, false, false]);
        assert_eq!(first_row[5], vec![true; 6]);
        assert_eq!(first_row[6], vec![true; 6]);
        assert_eq!(first_row[7], vec![true, false, true, false, true, false]);
    }

    #[test]
    fn pattern_7_off_axis() {
        let p = MaskPattern::new(7).unwrap();
        // (1*1)%3 + (1+1)%2 = 1 -> odd.
        assert!(!p.is_masked(1, 1));
        // (1*2)%3 + (1+2)%2 = 3 -> odd.
        assert!(!p.is_masked(1, 2));
        // (2*3)%3 + (2+3)%2 = 1 -> odd.
        assert!(!p.is_masked(2, 3));
        // (3*3)%3 + (3+3)%2 = 0 -> even.
        assert!(p.is_masked(3, 3));
    }

    #[test]
    fn mask_pattern_parsing() {
        assert!(MaskPattern::new(8).is_err());
        assert_eq!(MaskPattern::from_or("3", None), MaskPattern::new(3).ok());
        assert_eq!(MaskPattern::from_or("9", None), None);
        assert_eq!(
            MaskPattern::from_or("x", MaskPattern::new(1).ok()),
            MaskPattern::new(1).ok()
        );
    }

    #[test]
    fn masking_twice_restores_matrix() {
        let mut rng = StdRng::seed_from_u64(18004);
        for size in [21, 25, 45] {
            let original = random_matrix(&mut rng, size);
            for pattern in MaskPattern::all() {
                let mut m = original.clone();
                apply_mask(pattern, &mut m);
                apply_mask(pattern, &mut m);
                assert_eq!(m, original, "pattern {}", pattern);
            }
        }
    }

    #[test]
    fn masking_skips_reserved_modules() {
        let mut rng = StdRng::seed_from_u64(7);
        let original = random_matrix(&mut rng, 21);
        let mut m = original.clone();
        apply_mask(MaskPattern::new(1).unwrap(), &mut m);
        for r in 0..21 {
            for c in 0..21 {
                if m.is_reserved(r, c) {
                    assert_eq!(m.get(r, c), original.get(r, c));
                }
            }
        }
    }

    #[test]
    fn n1_scores_long_runs() {
        // Dark top row of 7 scores 3 + 2; the alternating rest scores nothing.
        let mut m = BitMatrix::new(7);
        for r in 0..7 {
            for c in 0..7 {
                m.set(r, c, r == 0 || (r + c) % 2 == 1, false);
            }
        }
        assert_eq!(penalty_n1(&m), 5);
    }

    #[test]
    fn n1_all_light() {
        // 5 rows and 5 columns, each one run of 5.
        let m = BitMatrix::new(5);
        assert_eq!(penalty_n1(&m), 30);
    }

    #[test]
    fn n2_counts_uniform_blocks() {
        let m = matrix_from(&["##.", "##.", "..."]);
        // Only the top-left block is uniform.
        assert_eq!(penalty_n2(&m), 3);
    }

    #[test]
    fn n3_detects_finder_like_rows() {
        let rows = [
            "#.###.#....",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
        ];
        let m = matrix_from(&rows);
        assert_eq!(penalty_n3(&m), 40);

        let rows = [
            "....#.###.#",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
        ];
        assert_eq!(penalty_n3(&matrix_from(&rows)), 40);
    }

    #[test]
    fn n4_balance() {
        let mut m = BitMatrix::new(10);
        assert_eq!(penalty_n4(&m), 100);
        for i in 0..50 {
            m.set(i / 10, i % 10, true, false);
        }
        assert_eq!(penalty_n4(&m), 0);
        // 51% rounds up to the 55% step.
        m.set(5, 0, true, false);
        assert_eq!(penalty_n4(&m), 10);
    }

    #[test]
    fn best_mask_prefers_lowest_penalty() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut m = random_matrix(&mut rng, 21);
        let before = m.clone();

        let chosen = best_mask(&mut m, |_, _| {});
        assert_eq!(m, before, "search must leave the matrix unmasked");

        let scores: Vec<u32> = MaskPattern::all()
            .map(|p| {
                let mut candidate = before.clone();
                apply_mask(p, &mut candidate);
                penalty(&candidate)
            })
            .collect();
        let min = *scores.iter().min().unwrap();
        let first = scores.iter().position(|&s| s == min).unwrap();
        assert_eq!(chosen.value() as usize, first);
    }
}
