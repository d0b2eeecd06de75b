//! Reed-Solomon error correction codewords.
//!
//! The EC codewords of a block are the remainder of
//! `data(x) * x^degree` divided by the generator polynomial of `degree`.

use crate::error::{QrError, Result};
use crate::polynomial;

/// Computes error correction codewords for data blocks of a fixed degree.
///
/// The generator polynomial is built once in [`initialize`](Self::initialize)
/// and reused for every block.
#[derive(Debug, Clone, Default)]
pub struct ReedSolomonEncoder {
    degree: usize,
    generator: Option<Vec<u8>>,
}

impl ReedSolomonEncoder {
    /// Encoder ready to produce `degree` EC codewords per block.
    pub fn new(degree: usize) -> Self {
        let mut encoder = Self::default();
        encoder.initialize(degree);
        encoder
    }

    /// (Re)build the generator polynomial for `degree` EC codewords.
    pub fn initialize(&mut self, degree: usize) {
        self.degree = degree;
        self.generator = Some(polynomial::generate_ec_polynomial(degree));
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// EC codewords for one data block, always exactly `degree` bytes long.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(QrError::EncoderNotInitialized)?;

        let mut padded = Vec::with_capacity(data.len() + self.degree);
        padded.extend_from_slice(data);
        padded.resize(data.len() + self.degree, 0);

        let remainder = polynomial::modulo(&padded, generator);

        // Leading zeros were stripped by the division; restore them.
        let start = self.degree.saturating_sub(remainder.len());
        let mut codewords = vec![0u8; self.degree];
        codewords[start..].copy_from_slice(&remainder);
        Ok(codewords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Data codewords of "HELLO WORLD" at 1-M and their EC codewords.
    #[test]
    fn hello_world_1m() {
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let encoder = ReedSolomonEncoder::new(10);
        assert_eq!(
            encoder.encode(&data).unwrap(),
            vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]
        );
    }

    #[test]
    fn uninitialized_encoder_fails() {
        let encoder = ReedSolomonEncoder::default();
        assert_eq!(encoder.encode(&[1, 2, 3]), Err(QrError::EncoderNotInitialized));
    }

    #[test]
    fn output_length_matches_degree() {
        for degree in [7, 13, 18, 30] {
            let encoder = ReedSolomonEncoder::new(degree);
            assert_eq!(encoder.encode(&[0, 0, 0, 1]).unwrap().len(), degree);
            // An all-zero block has an all-zero remainder.
            assert_eq!(encoder.encode(&[0; 12]).unwrap(), vec![0; degree]);
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let data: Vec<u8> = (0..40).map(|i| (i * 37 % 251) as u8).collect();
        let a = ReedSolomonEncoder::new(22).encode(&data).unwrap();
        let b = ReedSolomonEncoder::new(22).encode(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reinitialize_changes_degree() {
        let mut encoder = ReedSolomonEncoder::new(10);
        encoder.initialize(16);
        assert_eq!(encoder.degree(), 16);
        assert_eq!(encoder.encode(&[1, 2, 3]).unwrap().len(), 16);
    }
}
