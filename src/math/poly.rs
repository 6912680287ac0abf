//! Polynomial arithmetic over Z[X]/(X^N − 1).
//!
//! `IntPoly` is the dense workhorse type: a length-N coefficient vector
//! under cyclic convolution. Operations take immutable inputs and return
//! new owned values; nothing is aliased across calls.
//!
//! Coefficients are kept as `i64` and reduced on demand. The canonical
//! reduced range for modulus m is [−m/2, m/2) for even m and
//! [−(m−1)/2, (m−1)/2] for odd m.
//!
//! # Example
//!
//! ```
//! use ntru::math::IntPoly;
//!
//! // X + 2 and X^2, multiplied in Z[X]/(X^3 − 1)
//! let a = IntPoly::from_coeffs(vec![2, 1, 0]);
//! let b = IntPoly::from_coeffs(vec![0, 0, 1]);
//!
//! // X·X^2 wraps around to 1
//! let product = a.mult(&b);
//! assert_eq!(product.coeffs(), &[1, 0, 2]);
//!
//! // reduction to the canonical centered range
//! let centered = product.scalar_mul(5).center_mod(7);
//! assert_eq!(centered.coeffs(), &[-2, 0, 3]);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use zeroize::Zeroize;

/// Center a single coefficient into the canonical range for modulus `m`.
#[inline]
pub fn center_coeff(c: i64, m: i64) -> i64 {
    let r = c.rem_euclid(m);
    if r >= (m + 1) / 2 {
        r - m
    } else {
        r
    }
}

/// Dense polynomial in Z[X]/(X^N − 1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct IntPoly {
    coeffs: Vec<i64>,
}

impl IntPoly {
    /// Zero polynomial of degree bound `n`.
    pub fn zero(n: usize) -> Self {
        Self {
            coeffs: vec![0; n],
        }
    }

    /// The multiplicative identity (1, 0, …, 0).
    pub fn one(n: usize) -> Self {
        let mut coeffs = vec![0; n];
        coeffs[0] = 1;
        Self { coeffs }
    }

    /// Build from a coefficient vector.
    pub fn from_coeffs(coeffs: Vec<i64>) -> Self {
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
    pub fn coeffs(&self) -> &[i64] {
        &self.coeffs
    }

    /// Mutable coefficient slice.
    pub fn coeffs_mut(&mut self) -> &mut [i64] {
        &mut self.coeffs
    }

    /// True if every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// Index of the highest nonzero coefficient (0 for the zero polynomial).
    pub fn degree(&self) -> usize {
        self.coeffs
            .iter()
            .rposition(|&c| c != 0)
            .unwrap_or(0)
    }

    /// Cyclic convolution: the k-th output coefficient is the sum of
    /// a\[i\]·b\[j\] over i + j ≡ k (mod N). Accumulates in i128 so no
    /// intermediate product is truncated.
    pub fn mult(&self, other: &Self) -> Self {
        let n = self.coeffs.len();
        assert_eq!(n, other.coeffs.len(), "ring degrees must match");

        let mut acc = vec![0i128; n];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                let k = if i + j >= n { i + j - n } else { i + j };
                acc[k] += a as i128 * b as i128;
            }
        }
        let coeffs = acc
            .into_iter()
            .map(|c| {
                assert!(
                    c >= i64::MIN as i128 && c <= i64::MAX as i128,
                    "convolution overflow"
                );
                c as i64
            })
            .collect();
        Self { coeffs }
    }

    /// Cyclic convolution followed by centering mod `m`.
    pub fn mult_mod(&self, other: &Self, m: i64) -> Self {
        self.mult(other).center_mod(m)
    }

    /// Multiply every coefficient by a scalar.
    pub fn scalar_mul(&self, scalar: i64) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|&c| c * scalar).collect(),
        }
    }

    /// Reduce every coefficient to the canonical centered range mod `m`.
    pub fn center_mod(&self, m: i64) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|&c| center_coeff(c, m)).collect(),
        }
    }

    /// Reduce every coefficient to [0, m).
    pub fn positive_mod(&self, m: i64) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|&c| c.rem_euclid(m)).collect(),
        }
    }

    /// Round every coefficient to the nearest multiple of `k`, returning the
    /// multiplier polynomial. Halves round away from zero.
    pub fn div_round(&self, k: i64) -> Self {
        let k_half = (k + 1) / 2;
        Self {
            coeffs: self
                .coeffs
                .iter()
                .map(|&c| {
                    let adj = if c > 0 { k_half } else { -k_half };
                    (c + adj) / k
                })
                .collect(),
        }
    }

    /// The conjugate under X → X⁻¹: coefficient i moves to N − i.
    pub fn reverse(&self) -> Self {
        let n = self.coeffs.len();
        let mut coeffs = vec![0; n];
        coeffs[0] = self.coeffs[0];
        for i in 1..n {
            coeffs[i] = self.coeffs[n - i];
        }
        Self { coeffs }
    }

    /// Multiply by X in place (cyclic rotation of coefficients).
    pub fn rotate1(&mut self) {
        if let Some(last) = self.coeffs.pop() {
            self.coeffs.insert(0, last);
        }
    }

    /// Sum of all coefficients, i.e. the evaluation at X = 1.
    pub fn sum_coeffs(&self) -> i64 {
        self.coeffs.iter().sum()
    }

    /// True if the two polynomials agree coefficient-wise mod `m`.
    pub fn equals_mod(&self, other: &Self, m: i64) -> bool {
        self.coeffs.len() == other.coeffs.len()
            && self
                .coeffs
                .iter()
                .zip(other.coeffs.iter())
                .all(|(&a, &b)| (a - b).rem_euclid(m) == 0)
    }

    /// Squared Euclidean norm of the centered coefficient vector, with the
    /// mean subtracted out (translation-invariant).
    ///
    /// Mod-q values wrap, so the representatives are first rotated to put
    /// the largest empty gap of the value distribution at the range
    /// boundary; without this a tight cluster straddling ±q/2 would read as
    /// a huge norm.
    pub fn centered_norm_sq(&self, q: i64) -> f64 {
        let shifted = self.shift_gap(q);
        let n = shifted.coeffs.len() as f64;
        let mut sum = 0i64;
        let mut sq_sum = 0i64;
        for &c in &shifted.coeffs {
            sum += c;
            sq_sum += c * c;
        }
        sq_sum as f64 - (sum as f64) * (sum as f64) / n
    }

    /// Rotate mod-q representatives so the largest gap in the sorted value
    /// distribution sits at the boundary of the centered range.
    fn shift_gap(&self, q: i64) -> Self {
        let centered = self.center_mod(q);
        let mut sorted = centered.coeffs.clone();
        sorted.sort_unstable();

        let pmin = sorted[0];
        let pmax = sorted[sorted.len() - 1];
        let mut max_range = 0;
        let mut max_range_start = 0;
        for w in sorted.windows(2) {
            let range = w[1] - w[0];
            if range > max_range {
                max_range = range;
                max_range_start = w[0];
            }
        }

        // The distribution is circular: the gap wrapping through ±q/2 is
        // q − (pmax − pmin).
        let wrap_gap = q - (pmax - pmin);
        let shift = if wrap_gap > max_range {
            (pmax + pmin) / 2
        } else {
            max_range_start + max_range / 2 + q / 2
        };

        Self {
            coeffs: centered
                .coeffs
                .iter()
                .map(|&c| center_coeff(c - shift, q))
                .collect(),
        }
    }
}

impl Add for &IntPoly {
    type Output = IntPoly;

    fn add(self, rhs: Self) -> IntPoly {
        assert_eq!(self.coeffs.len(), rhs.coeffs.len(), "ring degrees must match");
        IntPoly {
            coeffs: self
                .coeffs
                .iter()
                .zip(rhs.coeffs.iter())
                .map(|(&a, &b)| a + b)
                .collect(),
        }
    }
}

impl Add for IntPoly {
    type Output = IntPoly;

    fn add(self, rhs: Self) -> IntPoly {
        &self + &rhs
    }
}

impl AddAssign<&IntPoly> for IntPoly {
    fn add_assign(&mut self, rhs: &IntPoly) {
        assert_eq!(self.coeffs.len(), rhs.coeffs.len(), "ring degrees must match");
        for (a, &b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *a += b;
        }
    }
}

impl Sub for &IntPoly {
    type Output = IntPoly;

    fn sub(self, rhs: Self) -> IntPoly {
        assert_eq!(self.coeffs.len(), rhs.coeffs.len(), "ring degrees must match");
        IntPoly {
            coeffs: self
                .coeffs
                .iter()
                .zip(rhs.coeffs.iter())
                .map(|(&a, &b)| a - b)
                .collect(),
        }
    }
}

impl Sub for IntPoly {
    type Output = IntPoly;

    fn sub(self, rhs: Self) -> IntPoly {
        &self - &rhs
    }
}

impl SubAssign<&IntPoly> for IntPoly {
    fn sub_assign(&mut self, rhs: &IntPoly) {
        assert_eq!(self.coeffs.len(), rhs.coeffs.len(), "ring degrees must match");
        for (a, &b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *a -= b;
        }
    }
}

impl Neg for &IntPoly {
    type Output = IntPoly;

    fn neg(self) -> IntPoly {
        IntPoly {
            coeffs: self.coeffs.iter().map(|&c| -c).collect(),
        }
    }
}

impl Neg for IntPoly {
    type Output = IntPoly;

    fn neg(self) -> IntPoly {
        -&self
    }
}
