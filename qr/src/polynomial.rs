//! Polynomials over GF(2^8), most significant coefficient first.

use crate::galois::Gf256;

/// Product of two polynomials.
pub fn mul(p1: &[u8], p2: &[u8]) -> Vec<u8> {
    if p1.is_empty() || p2.is_empty() {
        return Vec::new();
    }

    let mut coeff = vec![0u8; p1.len() + p2.len() - 1];
    for (i, &a) in p1.iter().enumerate() {
        for (j, &b) in p2.iter().enumerate() {
            coeff[i + j] ^= Gf256::mul(a, b);
        }
    }
    coeff
}

/// Remainder of `dividend / divisor`, with leading zero coefficients
/// stripped.
pub fn modulo(dividend: &[u8], divisor: &[u8]) -> Vec<u8> {
    let mut result = dividend.to_vec();

    while result.len() >= divisor.len() {
        let coeff = result[0];
        for (i, &d) in divisor.iter().enumerate() {
            result[i] ^= Gf256::mul(d, coeff);
        }

        let offset = result.iter().position(|&c| c != 0).unwrap_or(result.len());
        result.drain(..offset);
    }

    result
}

/// Reed-Solomon generator polynomial of the given degree:
///
/// ```text
/// g(x) = (x - alpha^0)(x - alpha^1)...(x - alpha^(degree-1))
/// ```
pub fn generate_ec_polynomial(degree: usize) -> Vec<u8> {
    let mut poly = vec![1u8];
    for i in 0..degree {
        poly = mul(&poly, &[1, Gf256::exp(i)]);
    }
    poly
}
