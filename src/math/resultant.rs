//! Resultants of ring elements with X^N − 1.
//!
//! Signing key construction solves f·G − g·F = q, which needs, for each
//! short polynomial a, the resultant res(X^N − 1, a) together with a
//! polynomial rho satisfying rho·a ≡ res (mod X^N − 1). The resultant of a
//! ternary polynomial at N = 157 has hundreds of digits, so the integer
//! result is assembled by CRT from modular resultants over a stream of
//! small primes; each modular computation is a plain extended Euclidean
//! pass over GF(p)[X] with the classical leading-coefficient bookkeeping.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::bigpoly::BigIntPoly;
use super::inverse::mod_inverse_scalar;
use super::poly::IntPoly;

/// res(X^N − 1, a) together with rho such that rho·a ≡ res (mod X^N − 1).
#[derive(Clone, Debug)]
pub struct Resultant {
    pub rho: BigIntPoly,
    pub res: BigInt,
}

fn deg(f: &[i64]) -> Option<usize> {
    f.iter().rposition(|&c| c != 0)
}

fn pow_mod(mut base: i64, mut exp: u64, p: i64) -> i64 {
    let mut acc = 1i64;
    base = base.rem_euclid(p);
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % p;
        }
        base = base * base % p;
        exp >>= 1;
    }
    acc
}

/// Modular resultant of `a` with X^N − 1 over GF(p).
///
/// Returns `None` when gcd(a, X^N − 1) is non-constant mod p, i.e. exactly
/// when p divides the integer resultant; such primes contribute nothing to
/// the CRT reconstruction and are skipped.
pub fn resultant_mod(a: &IntPoly, p: i64) -> Option<(i64, IntPoly)> {
    let n = a.len();

    // r0 = X^N − 1, r1 = a; track Bezout coefficients for the a-side only,
    // so u·a ≡ r (mod X^N − 1) at every step.
    let mut r0 = vec![0i64; n + 1];
    r0[0] = p - 1;
    r0[n] = 1;
    let mut r1: Vec<i64> = a.coeffs().iter().map(|&c| c.rem_euclid(p)).collect();
    r1.push(0);

    let buf = 2 * n + 2;
    let mut u0 = vec![0i64; buf];
    let mut u1 = vec![0i64; buf];
    u1[0] = 1;

    let mut res = 1i64;
    loop {
        let d1 = match deg(&r1) {
            // remainder vanished at positive degree: p | res
            None => return None,
            Some(d) => d,
        };
        let Some(d0) = deg(&r0) else {
            return None;
        };

        if d1 == 0 {
            res = res * pow_mod(r1[0], d0 as u64, p) % p;
            // rho = u1 · r1[0]⁻¹ · res, folded into degree < N
            let scale = mod_inverse_scalar(r1[0], p).ok()? * res % p;
            let mut rho = vec![0i64; n];
            for (i, &c) in u1.iter().enumerate() {
                if c != 0 {
                    let idx = i % n;
                    rho[idx] = (rho[idx] + c * scale).rem_euclid(p);
                }
            }
            return Some((res, IntPoly::from_coeffs(rho)));
        }

        // r0 mod r1, mirroring the reduction on the Bezout coefficients
        let lc_inv = mod_inverse_scalar(r1[d1], p).ok()?;
        for k in (d1..=d0).rev() {
            let coef = r0[k] * lc_inv % p;
            if coef == 0 {
                continue;
            }
            let shift = k - d1;
            for i in 0..=d1 {
                r0[i + shift] = (r0[i + shift] - coef * r1[i]).rem_euclid(p);
            }
            for i in 0..buf - shift {
                u0[i + shift] = (u0[i + shift] - coef * u1[i]).rem_euclid(p);
            }
        }

        let d_rem = deg(&r0).map_or(0, |d| d);
        res = res * pow_mod(r1[d1], (d0 - d_rem) as u64, p) % p;
        if d0 % 2 == 1 && d1 % 2 == 1 {
            res = (p - res) % p;
        }

        std::mem::swap(&mut r0, &mut r1);
        std::mem::swap(&mut u0, &mut u1);
    }
}

fn is_prime(v: i64) -> bool {
    if v < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= v {
        if v % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

fn next_prime(after: i64) -> i64 {
    let mut v = after + 1;
    while !is_prime(v) {
        v += 1;
    }
    v
}

/// Integer resultant of `a` with X^N − 1, via CRT over small primes.
///
/// The prime product is driven past a Hadamard-style bound on |res| and
/// the rho coefficients, then everything is centered mod the product.
pub fn resultant(a: &IntPoly) -> Resultant {
    let n = a.len();
    let sq: i64 = a.coeffs().iter().map(|&c| c * c).sum();

    // |res| <= ||a||^N · ||X^N − 1||^deg(a); rho coefficients are minors of
    // the same Sylvester matrix and obey the same bound. The extra factor
    // keeps the centered lift unambiguous.
    let bound = BigInt::from(2 * sq + 4).pow((n as u32 + 2) / 2) << (n / 2 + 8);

    let mut prime = 10_000i64;
    let mut modulus = BigInt::one();
    let mut res = BigInt::zero();
    let mut rho = BigIntPoly::zero(n);
    let mut skipped = 0u32;

    while modulus < bound {
        prime = next_prime(prime);
        let Some((res_p, rho_p)) = resultant_mod(a, prime) else {
            // every prime divides the resultant only when it is zero over
            // Z, i.e. `a` shares a rational factor with X^N − 1; report
            // zero so callers reject the draw
            skipped += 1;
            if skipped > 512 {
                return Resultant {
                    rho: BigIntPoly::zero(n),
                    res: BigInt::zero(),
                };
            }
            continue;
        };

        if modulus.is_one() {
            modulus = BigInt::from(prime);
            res = BigInt::from(res_p);
            rho = BigIntPoly::from_coeffs(
                rho_p.coeffs().iter().map(|&c| BigInt::from(c)).collect(),
            );
            continue;
        }

        // pairwise CRT: e1 ≡ 1 (mod modulus), 0 (mod prime); e2 the reverse
        let p_big = BigInt::from(prime);
        let gcd = modulus.extended_gcd(&p_big);
        debug_assert!(gcd.gcd.is_one());
        let new_modulus = &modulus * &p_big;
        let e1 = (&gcd.y * &p_big).mod_floor(&new_modulus);
        let e2 = (&gcd.x * &modulus).mod_floor(&new_modulus);

        res = (&res * &e1 + BigInt::from(res_p) * &e2).mod_floor(&new_modulus);
        for (c, &cp) in rho.coeffs_mut().iter_mut().zip(rho_p.coeffs()) {
            *c = (&*c * &e1 + BigInt::from(cp) * &e2).mod_floor(&new_modulus);
        }
        modulus = new_modulus;
    }

    // center everything mod the prime product
    let half = &modulus / 2;
    if res > half {
        res -= &modulus;
    }
    for c in rho.coeffs_mut() {
        if &*c > &half {
            *c -= &modulus;
        }
    }
    Resultant { rho, res }
}
