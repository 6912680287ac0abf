//! NTRUSign core operations.
//!
//! The message is hashed to a ring element i, and the signer produces an
//! approximate closest lattice point s using the short private bases.
//! Perturbation bases are applied first, innermost outward, each one
//! re-targeting the point through the difference of adjacent public
//! polynomials; basis 0 finishes the projection. A signature is accepted
//! only when the combined norm of s and its deviation s·h − i clears the
//! parameter set's bound, otherwise the counter bumps and the message is
//! re-hashed.

use rand::{CryptoRng, Rng};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Shake256};
use tracing::debug;

use crate::encode::{pack_coeffs, unpack_coeffs};
use crate::error::{NtruError, Result};
use crate::math::poly::center_coeff;
use crate::math::IntPoly;
use crate::params::SignatureParams;

use super::basis::{generate_basis, Basis};
use super::keys::{SignatureKeyPair, SignaturePrivateKey, SignaturePublicKey};

/// Attempt budget for the norm-bound rejection loop. The published
/// parameter sets accept on the first counter almost always.
const SIGN_MAX_ATTEMPTS: u32 = 1000;

/// Generate a signing key pair with B + 1 fresh bases.
pub fn generate_key_pair<R: Rng + CryptoRng>(
    params: &SignatureParams,
    rng: &mut R,
) -> Result<SignatureKeyPair> {
    let mut bases = Vec::with_capacity(params.num_perturbation_bases + 1);
    for _ in 0..=params.num_perturbation_bases {
        bases.push(generate_basis(params, rng)?);
    }
    let public = SignaturePublicKey {
        h: bases[0].h.clone(),
    };
    Ok(SignatureKeyPair {
        public,
        private: SignaturePrivateKey { bases },
    })
}

/// Hash the message and counter to a ring element with centered mod-q
/// coefficients. SHA3-256 compresses the message once; SHAKE256 then
/// stretches digest ‖ counter so re-signing never re-reads the message.
fn create_msg_rep(msg: &[u8], counter: i32, params: &SignatureParams) -> IntPoly {
    let digest = Sha3_256::digest(msg);
    let mut hasher = Shake256::default();
    hasher.update(&digest);
    hasher.update(&counter.to_le_bytes());
    let mut xof = hasher.finalize_xof();

    let bytes_per_coeff = params.q_bits().div_ceil(8);
    let mask = params.q - 1;
    let mut coeffs = Vec::with_capacity(params.n);
    let mut buf = [0u8; 8];
    for _ in 0..params.n {
        xof.read(&mut buf[..bytes_per_coeff]);
        let mut v = 0i64;
        for b in (0..bytes_per_coeff).rev() {
            v = v << 8 | buf[b] as i64;
        }
        coeffs.push(center_coeff(v & mask, params.q));
    }
    IntPoly::from_coeffs(coeffs)
}

/// Project the target point onto the lattice spanned by one basis:
/// s_k = f′·⌊f·i/q⌉ − f·⌊f′·i/q⌉.
fn project(basis: &Basis, target: &IntPoly, q: i64) -> IntPoly {
    let y = basis.f_prime.mult(&basis.f.mult(target).div_round(q));
    let x = basis.f.mult(&basis.f_prime.mult(target).div_round(q));
    &y - &x
}

fn sign_once(msg_rep: &IntPoly, private: &SignaturePrivateKey, q: i64) -> IntPoly {
    let bases = &private.bases;
    let mut s = IntPoly::zero(msg_rep.len());
    let mut target = msg_rep.clone();
    for k in (1..bases.len()).rev() {
        let si = project(&bases[k], &target, q);
        s += &si;
        // re-target through the public-polynomial difference of the
        // adjacent levels; bases[0].h is the public key itself
        let dh = &bases[k].h - &bases[k - 1].h;
        target = si.mult_mod(&dh, q);
    }
    s += &project(&bases[0], &target, q);
    s
}

/// Combined norm acceptance test shared by signing and verification.
fn norm_ok(s: &IntPoly, msg_rep: &IntPoly, h: &IntPoly, params: &SignatureParams) -> bool {
    let deviation = &s.mult(h) - msg_rep;
    let norm_sq =
        s.centered_norm_sq(params.q) + params.beta_sq * deviation.centered_norm_sq(params.q);
    norm_sq <= params.norm_bound_sq
}

/// Sign a message. Deterministic for a given key and message: the only
/// variability is the rejection counter, which is part of the signature.
pub fn sign(
    msg: &[u8],
    key_pair: &SignatureKeyPair,
    params: &SignatureParams,
) -> Result<Vec<u8>> {
    for counter in 0..SIGN_MAX_ATTEMPTS as i32 {
        let msg_rep = create_msg_rep(msg, counter, params);
        let s = sign_once(&msg_rep, &key_pair.private, params.q);
        if norm_ok(&s, &msg_rep, &key_pair.public.h, params) {
            let mut out = pack_coeffs(
                s.positive_mod(params.q).coeffs(),
                params.q_bits() as u32,
            );
            out.extend_from_slice(&counter.to_le_bytes());
            return Ok(out);
        }
        debug!(counter, "signature norm over bound, bumping counter");
    }
    Err(NtruError::SigningFailed {
        attempts: SIGN_MAX_ATTEMPTS,
    })
}

/// Verify a signature. Malformed input verifies as false, never as an
/// error: a verifier exposes a single bit.
pub fn verify(
    msg: &[u8],
    signature: &[u8],
    public: &SignaturePublicKey,
    params: &SignatureParams,
) -> bool {
    let s_len = (params.n * params.q_bits()).div_ceil(8);
    if signature.len() != s_len + 4 {
        return false;
    }
    let Ok(counter_bytes) = signature[s_len..].try_into() else {
        return false;
    };
    let counter = i32::from_le_bytes(counter_bytes);
    if counter < 0 || counter >= SIGN_MAX_ATTEMPTS as i32 {
        return false;
    }
    let Ok(coeffs) = unpack_coeffs(&signature[..s_len], params.n, params.q_bits() as u32)
    else {
        return false;
    };
    let s = IntPoly::from_coeffs(coeffs);
    let msg_rep = create_msg_rep(msg, counter, params);
    norm_ok(&s, &msg_rep, &public.h, params)
}
