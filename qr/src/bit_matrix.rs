//! Square module grid with a parallel "reserved" mask.
//!
//! Reserved modules belong to function patterns and metadata (finder,
//! timing, alignment, format and version information). They are never
//! touched by data placement or masking.

/// `size x size` grid of modules, row-major. `true` is dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    size: usize,
    data: Vec<bool>,
    reserved: Vec<bool>,
}

impl BitMatrix {
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "BitMatrix size must be defined and greater than 0");
        Self {
            size,
            data: vec![false; size * size],
            reserved: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Set a module, optionally marking it reserved. Reserving is sticky.
    pub fn set(&mut self, row: usize, col: usize, value: bool, reserved: bool) {
        let index = self.index(row, col);
        self.data[index] = value;
        if reserved {
            self.reserved[index] = true;
        }
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[self.index(row, col)]
    }

    /// Flip the module if `value` is true.
    pub fn xor(&mut self, row: usize, col: usize, value: bool) {
        let index = self.index(row, col);
        self.data[index] ^= value;
    }

    pub fn is_reserved(&self, row: usize, col: usize) -> bool {
        self.reserved[self.index(row, col)]
    }

    /// All modules in row-major order.
    pub fn modules(&self) -> &[bool] {
        &self.data
    }

    pub fn dark_count(&self) -> usize {
        self.data.iter().filter(|&&m| m).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_and_reserve() {
        let mut m = BitMatrix::new(5);
        m.set(1, 2, true, false);
        m.set(3, 4, false, true);
        assert!(m.get(1, 2));
        assert!(!m.is_reserved(1, 2));
        assert!(m.is_reserved(3, 4));
        assert!(m.modules()[7]);

        // Later unreserved writes keep the reservation.
        m.set(3, 4, true, false);
        assert!(m.is_reserved(3, 4));
    }

    #[test]
    fn xor_flips_only_on_true() {
        let mut m = BitMatrix::new(3);
        m.xor(0, 0, true);
        m.xor(0, 1, false);
        assert!(m.get(0, 0));
        assert!(!m.get(0, 1));
        m.xor(0, 0, true);
        assert!(!m.get(0, 0));
        assert_eq!(m.dark_count(), 0);
    }

    #[test]
    #[should_panic(expected = "greater than 0")]
    fn zero_size_panics() {
        BitMatrix::new(0);
    }
}
