//! Short lattice basis construction for NTRUSign.
//!
//! Starting from sparse ternary f and g, key generation completes them to
//! a basis of the NTRU lattice by solving f·G − g·F = q over the ring.
//! The raw solution comes out of resultants and a Bezout identity with
//! enormous coefficients; a Babai-style correction against f·f̄ + g·ḡ and
//! a rotation reduction shrink F and G to the same scale as f and g
//! without ever disturbing the determinant identity.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroize;

use crate::error::{NtruError, Result};
use crate::math::{invert_mod_pow2, resultant, resultant_mod, BigIntPoly, IntPoly, TernaryPoly};
use crate::params::{BasisType, SignatureParams};

const KEYGEN_MAX_ATTEMPTS: u32 = 100;

/// One signing basis: the two short polynomials the signer projects with,
/// plus the public polynomial h this basis induces.
#[derive(Clone, Debug, Serialize, Deserialize, Zeroize)]
pub struct Basis {
    /// Sparse ternary f, invertible mod q.
    pub f: TernaryPoly,
    /// Second projection polynomial: g under the transpose convention,
    /// the completed F under the standard one.
    pub f_prime: IntPoly,
    /// h = f′·f⁻¹ resp. g·f⁻¹ (mod q), coefficients in [0, q).
    pub h: IntPoly,
}

/// The full short basis, before the convention-specific projection pair
/// is extracted. Kept separate so tests can check f·G − g·F = q directly.
pub(crate) struct ShortBasis {
    pub f: TernaryPoly,
    pub g: TernaryPoly,
    pub big_f: IntPoly,
    pub big_g: IntPoly,
    pub fq: IntPoly,
}

fn dot(a: &IntPoly, b: &IntPoly) -> i64 {
    a.coeffs().iter().zip(b.coeffs()).map(|(&x, &y)| x * y).sum()
}

/// Nearest integer to num/denom for denom > 0, halves toward +∞.
fn round_div(num: i64, denom: i64) -> i64 {
    (2 * num + denom).div_euclid(2 * denom)
}

/// Rejects candidates whose resultant vanishes mod 2N + 1. Only
/// meaningful when 2N + 1 is prime; parameter sets where it is not leave
/// `prime_check` off.
fn passes_prime_check(a: &IntPoly, n: usize) -> bool {
    matches!(resultant_mod(a, 2 * n as i64 + 1), Some((r, _)) if r != 0)
}

/// Reduce F and G against all rotations of (f, g) until no rotation
/// shortens them further. Subtracting c·(X^j·f, X^j·g) from (F, G) leaves
/// f·G − g·F unchanged, so the determinant identity survives.
fn minimize(f: &IntPoly, g: &IntPoly, big_f: &mut IntPoly, big_g: &mut IntPoly) {
    let denom = dot(f, f) + dot(g, g);
    loop {
        let mut changed = false;
        let mut u = f.clone();
        let mut v = g.clone();
        for _ in 0..f.len() {
            let c = round_div(dot(big_f, &u) + dot(big_g, &v), denom);
            if c != 0 {
                *big_f -= &u.scalar_mul(c);
                *big_g -= &v.scalar_mul(c);
                changed = true;
            }
            u.rotate1();
            v.rotate1();
        }
        if !changed {
            return;
        }
    }
}

/// One key generation attempt. `None` means the draw was unusable
/// (non-invertible f, non-coprime resultants) and the caller resamples.
pub(crate) fn try_short_basis<R: Rng + CryptoRng>(
    params: &SignatureParams,
    rng: &mut R,
) -> Result<Option<ShortBasis>> {
    let (n, q) = (params.n, params.q);
    let f = TernaryPoly::random(n, params.d + 1, params.d, rng);
    let g = TernaryPoly::random(n, params.d + 1, params.d, rng);
    let f_int = f.to_int_poly();
    let g_int = g.to_int_poly();

    if params.prime_check
        && (!passes_prime_check(&f_int, n) || !passes_prime_check(&g_int, n))
    {
        return Ok(None);
    }
    let fq = match invert_mod_pow2(&f_int, q) {
        Ok(fq) => fq,
        Err(NtruError::NotInvertible) => return Ok(None),
        Err(e) => return Err(e),
    };

    let rf = resultant(&f_int);
    let rg = resultant(&g_int);
    let bezout = rf.res.extended_gcd(&rg.res);
    if !bezout.gcd.is_one() {
        return Ok(None);
    }

    // f·A − g·B = q·(x·res_f + y·res_g) = q
    let q_big = BigInt::from(q);
    let a = rf.rho.scalar_mul(&(&bezout.x * &q_big));
    let b = rg.rho.scalar_mul(&(-&bezout.y * &q_big));

    // Babai correction: subtract the multiple of (f, g) closest to (B, A)
    // under the f·f̄ + g·ḡ quadratic form
    let f_rev = f_int.reverse();
    let g_rev = g_int.reverse();
    let t = &f_int.mult(&f_rev) + &g_int.mult(&g_rev);
    let rt = resultant(&t);
    if rt.res.is_zero() {
        return Ok(None);
    }
    let mut num = BigIntPoly::from_int_poly(&f_rev).mult(&b);
    num.add_assign(&BigIntPoly::from_int_poly(&g_rev).mult(&a));
    let c = num.mult(&rt.rho).div_round(&rt.res);

    let mut big_f = b;
    big_f.sub_assign(&BigIntPoly::from_int_poly(&f_int).mult(&c));
    let mut big_g = a;
    big_g.sub_assign(&BigIntPoly::from_int_poly(&g_int).mult(&c));
    let (Some(mut big_f), Some(mut big_g)) = (big_f.to_int_poly(), big_g.to_int_poly())
    else {
        return Ok(None);
    };
    minimize(&f_int, &g_int, &mut big_f, &mut big_g);

    Ok(Some(ShortBasis {
        f,
        g,
        big_f,
        big_g,
        fq,
    }))
}

/// Generate one signing basis under the parameter set's convention.
pub fn generate_basis<R: Rng + CryptoRng>(
    params: &SignatureParams,
    rng: &mut R,
) -> Result<Basis> {
    for attempt in 1..=KEYGEN_MAX_ATTEMPTS {
        let Some(sb) = try_short_basis(params, rng)? else {
            debug!(attempt, "unusable draw, resampling basis candidates");
            continue;
        };
        let (f_prime, h) = match params.basis_type {
            BasisType::Standard => {
                let h = sb.g.mult(&sb.fq).positive_mod(params.q);
                (sb.big_f, h)
            }
            BasisType::Transpose => {
                let h = sb.big_f.mult_mod(&sb.fq, params.q).positive_mod(params.q);
                (sb.g.to_int_poly(), h)
            }
        };
        return Ok(Basis {
            f: sb.f,
            f_prime,
            h,
        });
    }
    Err(NtruError::KeyGenerationFailed {
        attempts: KEYGEN_MAX_ATTEMPTS,
    })
}
