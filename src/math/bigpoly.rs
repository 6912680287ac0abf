//! Arbitrary-precision polynomials in Z[X]/(X^N − 1).
//!
//! Only signing key construction needs these: the resultants of degree-157+
//! ternary polynomials run to hundreds of digits, and the F/G basis vectors
//! are assembled from them before being reduced back to machine integers.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use super::poly::IntPoly;

/// Dense polynomial with `BigInt` coefficients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigIntPoly {
    coeffs: Vec<BigInt>,
}

impl BigIntPoly {
    /// Zero polynomial of degree bound `n`.
    pub fn zero(n: usize) -> Self {
        Self {
            coeffs: vec![BigInt::zero(); n],
        }
    }

    /// Widen a machine-integer polynomial.
    pub fn from_int_poly(p: &IntPoly) -> Self {
        Self {
            coeffs: p.coeffs().iter().map(|&c| BigInt::from(c)).collect(),
        }
    }

    /// Build from a coefficient vector.
    pub fn from_coeffs(coeffs: Vec<BigInt>) -> Self {
        Self { coeffs }
    }

    /// Ring degree N.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// True if the coefficient vector is empty.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Coefficient slice.
    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    /// Mutable coefficient slice.
    pub fn coeffs_mut(&mut self) -> &mut [BigInt] {
        &mut self.coeffs
    }

    /// Narrow back to machine integers; `None` if any coefficient
    /// overflows i64.
    pub fn to_int_poly(&self) -> Option<IntPoly> {
        let coeffs: Option<Vec<i64>> = self
            .coeffs
            .iter()
            .map(|c| i64::try_from(c).ok())
            .collect();
        coeffs.map(IntPoly::from_coeffs)
    }

    /// Cyclic convolution.
    pub fn mult(&self, other: &Self) -> Self {
        let n = self.coeffs.len();
        assert_eq!(n, other.coeffs.len(), "ring degrees must match");
        let mut coeffs = vec![BigInt::zero(); n];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                let k = if i + j >= n { i + j - n } else { i + j };
                coeffs[k] += a * b;
            }
        }
        Self { coeffs }
    }

    /// Add `other` in place.
    pub fn add_assign(&mut self, other: &Self) {
        assert_eq!(self.coeffs.len(), other.coeffs.len(), "ring degrees must match");
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a += b;
        }
    }

    /// Subtract `other` in place.
    pub fn sub_assign(&mut self, other: &Self) {
        assert_eq!(self.coeffs.len(), other.coeffs.len(), "ring degrees must match");
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a -= b;
        }
    }

    /// Multiply every coefficient by a scalar.
    pub fn scalar_mul(&self, scalar: &BigInt) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| c * scalar).collect(),
        }
    }

    /// Divide every coefficient by `d`, rounding to the nearest integer
    /// (halves toward +∞).
    pub fn div_round(&self, d: &BigInt) -> Self {
        let (divisor, flip) = if d.is_negative() {
            (-d.clone(), true)
        } else {
            (d.clone(), false)
        };
        let half = &divisor / 2;
        Self {
            coeffs: self
                .coeffs
                .iter()
                .map(|c| {
                    let c = if flip { -c } else { c.clone() };
                    let shifted: BigInt = c + &half;
                    shifted.div_floor(&divisor)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn mult_matches_int_poly() {
        let a = IntPoly::from_coeffs(vec![1, -2, 3, 0, 5]);
        let b = IntPoly::from_coeffs(vec![-1, 4, 0, 2, -3]);
        let big_prod = BigIntPoly::from_int_poly(&a).mult(&BigIntPoly::from_int_poly(&b));
        assert_eq!(big_prod.to_int_poly().unwrap(), a.mult(&b));
    }

    #[test]
    fn div_round_nearest() {
        let p = BigIntPoly::from_coeffs(vec![big(7), big(-7), big(5), big(-5), big(0)]);
        let r = p.div_round(&big(2));
        let coeffs: Vec<i64> = r.coeffs().iter().map(|c| i64::try_from(c).unwrap()).collect();
        // 3.5 -> 4, -3.5 -> -3 (halves toward +inf), 2.5 -> 3, -2.5 -> -2
        assert_eq!(coeffs, vec![4, -3, 3, -2, 0]);
    }

    #[test]
    fn div_round_negative_divisor() {
        let p = BigIntPoly::from_coeffs(vec![big(7), big(-6)]);
        let r = p.div_round(&big(-2));
        let coeffs: Vec<i64> = r.coeffs().iter().map(|c| i64::try_from(c).unwrap()).collect();
        assert_eq!(coeffs, vec![-3, 3]);
    }

    #[test]
    fn to_int_poly_overflow() {
        let mut p = BigIntPoly::zero(3);
        p.coeffs_mut()[0] = BigInt::from(i64::MAX) * 2;
        assert!(p.to_int_poly().is_none());
    }
}
