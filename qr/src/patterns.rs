//! Positions of the finder and alignment patterns.
//!
//! ```text
//!     +-------+-------------+-------+
//!     |finder |   timing    |finder |
//!     +-------+      .      +-------+
//!     |   .       [a]     [a]       |
//!     |timing                       |
//!     |   .       [a]     [a]       |
//!     +-------+                     |
//!     |finder |   [a]     [a]       |
//!     +-------+---------------------+
//! ```
//!
//! Finder patterns sit in three corners. Alignment patterns ([a]) are
//! centered on every pair of coordinates from [`alignment_coords`], except
//! the three pairs that would collide with a finder pattern.

use crate::version::Version;

/// Side of a finder pattern, separator excluded.
pub const FINDER_PATTERN_SIZE: usize = 7;

/// Top-left corners of the three finder patterns as (row, col).
pub fn finder_positions(version: Version) -> [(usize, usize); 3] {
    let far = version.symbol_size() - FINDER_PATTERN_SIZE;
    [(0, 0), (far, 0), (0, far)]
}

/// Row and column coordinates of alignment pattern centers.
///
/// The first coordinate is always 6 and the last `size - 7`; the ones in
/// between are spaced evenly by an even interval, measured back from the
/// last. Version 1 has none.
pub fn alignment_coords(version: Version) -> Vec<usize> {
    if version.value() == 1 {
        return Vec::new();
    }

    let pos_count = version.value() as usize / 7 + 2;
    let size = version.symbol_size();
    // Version 32 breaks the formula.
    let interval = if size == 145 {
        26
    } else {
        (size - 13).div_ceil(2 * pos_count - 2) * 2
    };

    let mut coords = Vec::with_capacity(pos_count);
    coords.push(size - 7);
    for i in 1..pos_count - 1 {
        coords.push(coords[i - 1] - interval);
    }
    coords.push(6);
    coords.reverse();
    coords
}

/// Centers of every alignment pattern as (row, col).
pub fn alignment_positions(version: Version) -> Vec<(usize, usize)> {
    let coords = alignment_coords(version);
    let last = coords.len().saturating_sub(1);

    let mut positions = Vec::new();
    for (i, &row) in coords.iter().enumerate() {
        for (j, &col) in coords.iter().enumerate() {
            let overlaps_finder = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !overlaps_finder {
                positions.push((row, col));
            }
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn finder_corners() {
        assert_eq!(finder_positions(v(1)), [(0, 0), (14, 0), (0, 14)]);
        assert_eq!(finder_positions(v(40)), [(0, 0), (170, 0), (0, 170)]);
    }

    /// Rows of ISO 18004 Annex E.
    #[test]
    fn alignment_coordinates_table() {
        assert!(alignment_coords(v(1)).is_empty());
        assert_eq!(alignment_coords(v(2)), vec![6, 18]);
        assert_eq!(alignment_coords(v(6)), vec![6, 34]);
        assert_eq!(alignment_coords(v(7)), vec![6, 22, 38]);
        assert_eq!(alignment_coords(v(14)), vec![6, 26, 46, 66]);
        assert_eq!(alignment_coords(v(22)), vec![6, 26, 50, 74, 98]);
        assert_eq!(alignment_coords(v(32)), vec![6, 34, 60, 86, 112, 138]);
        assert_eq!(alignment_coords(v(36)), vec![6, 24, 50, 76, 102, 128, 154]);
        assert_eq!(alignment_coords(v(40)), vec![6, 30, 58, 86, 114, 142, 170]);
    }

    #[test]
    fn alignment_positions_skip_finder_corners() {
        assert!(alignment_positions(v(1)).is_empty());
        assert_eq!(alignment_positions(v(2)), vec![(18, 18)]);

        let positions = alignment_positions(v(7));
        assert_eq!(positions.len(), 6);
        assert!(!positions.contains(&(6, 6)));
        assert!(!positions.contains(&(6, 38)));
        assert!(!positions.contains(&(38, 6)));
        assert!(positions.contains(&(38, 38)));
        assert!(positions.contains(&(6, 22)));
    }

    #[test]
    fn alignment_counts() {
        for version in Version::all() {
            let n = alignment_coords(version).len();
            let expected = if n == 0 { 0 } else { n * n - 3 };
            assert_eq!(alignment_positions(version).len(), expected, "version {}", version);
        }
    }
}
