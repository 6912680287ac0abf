//! Sparse ternary polynomials.
//!
//! Key material and blinding polynomials have coefficients in {−1, 0, 1}
//! with exact Hamming weights fixed by the parameter set. Storing the +1 and
//! −1 index lists keeps products with dense polynomials at O(d·N) instead of
//! O(N²), which dominates key generation and signing.

use rand::{seq::SliceRandom, CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use sha3::digest::XofReader;
use zeroize::Zeroize;

use super::poly::IntPoly;

/// Ternary polynomial stored as +1/−1 index lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct TernaryPoly {
    n: usize,
    ones: Vec<usize>,
    neg_ones: Vec<usize>,
}

impl TernaryPoly {
    /// Build from explicit index lists. Indices must be distinct and < n;
    /// callers constructing from decoded bytes validate beforehand.
    pub fn from_indices(n: usize, ones: Vec<usize>, neg_ones: Vec<usize>) -> Self {
        debug_assert!(ones.iter().chain(&neg_ones).all(|&i| i < n));
        Self { n, ones, neg_ones }
    }

    /// Sample a uniformly random ternary polynomial with exactly
    /// `num_ones` coefficients at +1 and `num_neg_ones` at −1.
    pub fn random<R: Rng + CryptoRng>(
        n: usize,
        num_ones: usize,
        num_neg_ones: usize,
        rng: &mut R,
    ) -> Self {
        assert!(num_ones + num_neg_ones <= n, "weights exceed ring degree");
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(rng);
        let ones = indices[..num_ones].to_vec();
        let neg_ones = indices[num_ones..num_ones + num_neg_ones].to_vec();
        Self { n, ones, neg_ones }
    }

    /// Derive a ternary polynomial deterministically from an extendable
    /// output function. Indices are rejection-sampled from 16-bit reads so
    /// the distribution over [0, n) is uniform.
    pub fn from_xof<X: XofReader>(
        xof: &mut X,
        n: usize,
        num_ones: usize,
        num_neg_ones: usize,
    ) -> Self {
        assert!(num_ones + num_neg_ones <= n, "weights exceed ring degree");
        let limit = (u16::MAX as usize + 1) - (u16::MAX as usize + 1) % n;
        let mut used = vec![false; n];
        let mut draw = |used: &mut Vec<bool>| loop {
            let mut buf = [0u8; 2];
            xof.read(&mut buf);
            let v = u16::from_le_bytes(buf) as usize;
            if v >= limit {
                continue;
            }
            let idx = v % n;
            if !used[idx] {
                used[idx] = true;
                return idx;
            }
        };
        let ones = (0..num_ones).map(|_| draw(&mut used)).collect();
        let neg_ones = (0..num_neg_ones).map(|_| draw(&mut used)).collect();
        Self { n, ones, neg_ones }
    }

    /// Ring degree N.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True if the ring degree is zero.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Indices of the +1 coefficients.
    pub fn ones(&self) -> &[usize] {
        &self.ones
    }

    /// Indices of the −1 coefficients.
    pub fn neg_ones(&self) -> &[usize] {
        &self.neg_ones
    }

    /// Expand to a dense polynomial.
    pub fn to_int_poly(&self) -> IntPoly {
        let mut coeffs = vec![0i64; self.n];
        for &i in &self.ones {
            coeffs[i] = 1;
        }
        for &i in &self.neg_ones {
            coeffs[i] = -1;
        }
        IntPoly::from_coeffs(coeffs)
    }

    /// Sparse cyclic product with a dense polynomial.
    pub fn mult(&self, other: &IntPoly) -> IntPoly {
        assert_eq!(self.n, other.len(), "ring degrees must match");
        let b = other.coeffs();
        let mut coeffs = vec![0i64; self.n];
        for &i in &self.ones {
            for (j, &bj) in b.iter().enumerate() {
                let k = if i + j >= self.n { i + j - self.n } else { i + j };
                coeffs[k] += bj;
            }
        }
        for &i in &self.neg_ones {
            for (j, &bj) in b.iter().enumerate() {
                let k = if i + j >= self.n { i + j - self.n } else { i + j };
                coeffs[k] -= bj;
            }
        }
        IntPoly::from_coeffs(coeffs)
    }

    /// Sparse product reduced to the centered range mod `m`.
    pub fn mult_mod(&self, other: &IntPoly, m: i64) -> IntPoly {
        self.mult(other).center_mod(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use sha3::digest::{ExtendableOutput, Update};
    use sha3::Shake256;

    #[test]
    fn random_has_exact_weights() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let t = TernaryPoly::random(157, 30, 29, &mut rng);
        assert_eq!(t.ones().len(), 30);
        assert_eq!(t.neg_ones().len(), 29);

        let dense = t.to_int_poly();
        assert_eq!(dense.coeffs().iter().filter(|&&c| c == 1).count(), 30);
        assert_eq!(dense.coeffs().iter().filter(|&&c| c == -1).count(), 29);
        assert_eq!(dense.sum_coeffs(), 1);
    }

    #[test]
    fn sparse_mult_matches_dense() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let t = TernaryPoly::random(61, 12, 11, &mut rng);
        let p = IntPoly::from_coeffs((0..61).map(|i| (i as i64 * 13) % 97 - 48).collect());

        assert_eq!(t.mult(&p), t.to_int_poly().mult(&p));
    }

    #[test]
    fn xof_sampling_is_deterministic() {
        let mut h1 = Shake256::default();
        h1.update(b"seed material");
        let mut x1 = h1.finalize_xof();
        let t1 = TernaryPoly::from_xof(&mut x1, 107, 12, 12);

        let mut h2 = Shake256::default();
        h2.update(b"seed material");
        let mut x2 = h2.finalize_xof();
        let t2 = TernaryPoly::from_xof(&mut x2, 107, 12, 12);

        assert_eq!(t1, t2);
        assert_eq!(t1.ones().len(), 12);
        assert_eq!(t1.neg_ones().len(), 12);
    }

    #[test]
    fn xof_indices_are_distinct() {
        let mut h = Shake256::default();
        h.update(b"other seed");
        let mut x = h.finalize_xof();
        let t = TernaryPoly::from_xof(&mut x, 107, 20, 20);

        let mut all: Vec<usize> = t.ones().iter().chain(t.neg_ones()).copied().collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 40);
    }
}
