//! Multiplicative inverses in (Z/m)[X]/(X^N − 1).
//!
//! Two cases cover everything NTRU key generation needs:
//!
//! - modulus 2^k: the almost-inverse algorithm finds the mod-2 inverse,
//!   then Newton iteration (b ← 2b − a·b²) doubles the precision of the
//!   modulus each round until it reaches q
//! - modulus a small odd prime: the almost-inverse algorithm run directly
//!   over GF(p)
//!
//! Both fail with `NotInvertible` exactly when the input shares a factor
//! with X^N − 1 under the base modulus; callers resample and retry.

use crate::error::{NtruError, Result};

use super::poly::IntPoly;

/// Inverse of a scalar mod m via extended Euclid.
pub(crate) fn mod_inverse_scalar(a: i64, m: i64) -> Result<i64> {
    let (mut t, mut new_t) = (0i64, 1i64);
    let (mut r, mut new_r) = (m, a.rem_euclid(m));
    while new_r != 0 {
        let quot = r / new_r;
        (t, new_t) = (new_t, t - quot * new_t);
        (r, new_r) = (new_r, r - quot * new_r);
    }
    if r != 1 {
        return Err(NtruError::NotInvertible);
    }
    Ok(t.rem_euclid(m))
}

/// Invert `a` in (Z/2^k)[X]/(X^N − 1), where `q` = 2^k.
///
/// Starts from the mod-2 inverse and lifts by Newton iteration; each round
/// squares the working modulus (capped at q, which is all the precision the
/// result needs).
pub fn invert_mod_pow2(a: &IntPoly, q: i64) -> Result<IntPoly> {
    assert!(q >= 4 && (q as u64).is_power_of_two(), "modulus must be a power of two");
    let mut b = almost_inverse(a, 2)?;

    let mut v: i64 = 2;
    while v < q {
        v = v.saturating_mul(v).min(q);
        // b <- 2b − a·b² (mod v)
        let ab = a.mult(&b).positive_mod(v);
        let abb = ab.mult(&b).positive_mod(v);
        b = (&b.scalar_mul(2) - &abb).positive_mod(v);
    }
    Ok(b.center_mod(q))
}

/// Invert `a` in GF(p)[X]/(X^N − 1) for a small prime `p`.
pub fn invert_mod_prime(a: &IntPoly, p: i64) -> Result<IntPoly> {
    Ok(almost_inverse(a, p)?.center_mod(p))
}

fn deg(f: &[i64]) -> usize {
    f.iter().rposition(|&c| c != 0).unwrap_or(0)
}

/// Almost-inverse algorithm over GF(p), p prime.
///
/// Maintains b·a ≡ f·x^k and c·a ≡ g·x^k (mod X^N − 1, p). The working
/// buffers have one extra slot because g starts as X^N − 1 itself.
fn almost_inverse(a: &IntPoly, p: i64) -> Result<IntPoly> {
    let n = a.len();
    let mut k = 0usize;

    let mut b = vec![0i64; n + 1];
    b[0] = 1;
    let mut c = vec![0i64; n + 1];

    let mut f: Vec<i64> = a.coeffs().iter().map(|&x| x.rem_euclid(p)).collect();
    f.push(0);
    let mut g = vec![0i64; n + 1];
    g[0] = p - 1;
    g[n] = 1;

    loop {
        while f[0] == 0 {
            if f.iter().all(|&x| x == 0) {
                return Err(NtruError::NotInvertible);
            }
            // f <- f/x, c <- c·x
            for i in 1..=n {
                f[i - 1] = f[i];
            }
            f[n] = 0;
            for i in (1..=n).rev() {
                c[i] = c[i - 1];
            }
            c[0] = 0;
            k += 1;
            if k > 4 * n {
                return Err(NtruError::NotInvertible);
            }
        }
        if deg(&f) == 0 {
            break;
        }
        if deg(&f) < deg(&g) {
            std::mem::swap(&mut f, &mut g);
            std::mem::swap(&mut b, &mut c);
        }
        // zero the constant term of f, mirroring the step on b
        let u = (f[0] * mod_inverse_scalar(g[0], p)?).rem_euclid(p);
        for i in 0..=n {
            f[i] = (f[i] - u * g[i]).rem_euclid(p);
            b[i] = (b[i] - u * c[i]).rem_euclid(p);
        }
    }

    // inverse = f[0]⁻¹ · x^(N−k) · b, folded back into degree < N
    let f0_inv = mod_inverse_scalar(f[0], p)?;
    let shift = k % n;
    let mut out = vec![0i64; n];
    for (i, &bi) in b.iter().enumerate() {
        if bi != 0 {
            let idx = (i % n + n - shift) % n;
            out[idx] = (out[idx] + bi * f0_inv).rem_euclid(p);
        }
    }
    Ok(IntPoly::from_coeffs(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ternary::TernaryPoly;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn invertible_sample(n: usize, d: usize, rng: &mut ChaCha20Rng) -> IntPoly {
        // f(1) = 1, so the mod-2 factor X − 1 never divides f
        loop {
            let f = TernaryPoly::random(n, d, d - 1, rng).to_int_poly();
            if invert_mod_pow2(&f, 4).is_ok() {
                return f;
            }
        }
    }

    #[test]
    fn scalar_inverse() {
        assert_eq!(mod_inverse_scalar(3, 7).unwrap(), 5);
        assert_eq!(mod_inverse_scalar(1, 2).unwrap(), 1);
        assert!(mod_inverse_scalar(6, 9).is_err());
    }

    #[test]
    fn inverse_mod_pow2_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for q in [8, 64, 2048] {
            let f = invertible_sample(107, 15, &mut rng);
            let fq = invert_mod_pow2(&f, q).unwrap();
            let prod = f.mult_mod(&fq, q);
            assert!(prod.equals_mod(&IntPoly::one(107), q), "q = {}", q);
        }
    }

    #[test]
    fn inverse_mod_prime_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        for _ in 0..4 {
            let f = loop {
                let f = TernaryPoly::random(61, 10, 9, &mut rng).to_int_poly();
                if let Ok(fp) = invert_mod_prime(&f, 3) {
                    break (f, fp);
                }
            };
            let (f, fp) = f;
            assert!(f.mult_mod(&fp, 3).equals_mod(&IntPoly::one(61), 3));
        }
    }

    #[test]
    fn all_ones_not_invertible() {
        // (X − 1) · (1 + X + … + X^16) = X^17 − 1, so the all-ones
        // polynomial shares a nontrivial factor with X^N − 1 mod 2
        let f = IntPoly::from_coeffs(vec![1; 17]);
        assert!(matches!(
            invert_mod_pow2(&f, 2048),
            Err(NtruError::NotInvertible)
        ));
    }

    #[test]
    fn inverse_is_deterministic() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        let f = invertible_sample(107, 15, &mut rng);
        assert_eq!(
            invert_mod_pow2(&f, 2048).unwrap(),
            invert_mod_pow2(&f, 2048).unwrap()
        );
    }
}
