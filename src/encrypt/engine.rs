//! NTRUEncrypt core operations.
//!
//! Encryption follows the SVES construction: the plaintext is wrapped in
//! a salted, length-prefixed, zero-padded buffer, spread into ternary ring
//! coefficients, and masked with r·h for a blinding polynomial r derived
//! deterministically from the message, the salt, and the public key.
//! Decryption inverts the ring step, re-derives r from the recovered
//! buffer, and accepts only if the ciphertext equals r·h + m.

use rand::{CryptoRng, Rng};
use sha3::digest::{ExtendableOutput, Update};
use sha3::Shake256;
use tracing::debug;

use crate::encode::{bits_to_trits, pack_coeffs, trits_to_bits, unpack_coeffs};
use crate::error::{NtruError, Result};
use crate::math::{invert_mod_pow2, invert_mod_prime, IntPoly, TernaryPoly};
use crate::params::EncryptionParams;

use super::keys::{EncryptionKeyPair, EncryptionPrivateKey, EncryptionPublicKey};

/// Key generation resamples f until it is invertible mod q and mod 3;
/// non-invertible draws are rare, so hitting this budget means the
/// parameters are broken.
const KEYGEN_MAX_ATTEMPTS: u32 = 100;

/// Salt resampling budget for the minimum-trit-count check.
const ENCRYPT_MAX_ATTEMPTS: u32 = 100;

/// Generate an NTRUEncrypt key pair.
///
/// f is ternary with df coefficients at +1 and df − 1 at −1, so f(1) = 1
/// and f has a chance of being invertible both mod q and mod 3.
pub fn generate_key_pair<R: Rng + CryptoRng>(
    params: &EncryptionParams,
    rng: &mut R,
) -> Result<EncryptionKeyPair> {
    for attempt in 1..=KEYGEN_MAX_ATTEMPTS {
        let f = TernaryPoly::random(params.n, params.df, params.df - 1, rng);
        let f_int = f.to_int_poly();
        let (fq, fp) = match invert_mod_pow2(&f_int, params.q)
            .and_then(|fq| Ok((fq, invert_mod_prime(&f_int, params.p)?)))
        {
            Ok(pair) => pair,
            Err(NtruError::NotInvertible) => {
                debug!(attempt, "sampled f not invertible, resampling");
                continue;
            }
            Err(e) => return Err(e),
        };
        let g = TernaryPoly::random(params.n, params.dg, params.dg, rng);
        let h = g.mult(&fq).scalar_mul(params.p).positive_mod(params.q);
        return Ok(EncryptionKeyPair {
            public: EncryptionPublicKey { h },
            private: EncryptionPrivateKey { f, fp },
        });
    }
    Err(NtruError::KeyGenerationFailed {
        attempts: KEYGEN_MAX_ATTEMPTS,
    })
}

/// salt ‖ length octet ‖ message ‖ zero padding
fn build_buffer(msg: &[u8], salt: &[u8], params: &EncryptionParams) -> Vec<u8> {
    let mut buf = Vec::with_capacity(params.buffer_len_bytes());
    buf.extend_from_slice(salt);
    buf.push(msg.len() as u8);
    buf.extend_from_slice(msg);
    buf.resize(params.buffer_len_bytes(), 0);
    buf
}

/// Ternary spread of the buffer into a full-width ring element.
fn buffer_to_poly(buf: &[u8], params: &EncryptionParams) -> IntPoly {
    let mut coeffs = bits_to_trits(buf);
    coeffs.resize(params.n, 0);
    IntPoly::from_coeffs(coeffs)
}

/// Blinding polynomial r, derived from the message, the salt, and a
/// truncation of the public key so that r is bound to all three.
fn derive_blinding(
    msg: &[u8],
    salt: &[u8],
    public: &EncryptionPublicKey,
    params: &EncryptionParams,
) -> TernaryPoly {
    let h_bytes = public.to_bytes(params);
    let h_trunc = &h_bytes[..(params.db / 8).min(h_bytes.len())];
    let mut hasher = Shake256::default();
    hasher.update(msg);
    hasher.update(salt);
    hasher.update(h_trunc);
    let mut xof = hasher.finalize_xof();
    TernaryPoly::from_xof(&mut xof, params.n, params.dr, params.dr)
}

/// Each trit value must occur at least dm0 times, which keeps enough
/// entropy in the message representative.
fn trit_counts_ok(m: &IntPoly, params: &EncryptionParams) -> bool {
    let mut counts = [0usize; 3];
    for &c in m.coeffs() {
        counts[(c + 1) as usize] += 1;
    }
    counts.iter().all(|&c| c >= params.dm0)
}

/// Encrypt `msg` under the given public key.
pub fn encrypt<R: Rng + CryptoRng>(
    msg: &[u8],
    public: &EncryptionPublicKey,
    params: &EncryptionParams,
    rng: &mut R,
) -> Result<Vec<u8>> {
    if msg.len() > params.max_msg_len {
        return Err(NtruError::MessageTooLong {
            len: msg.len(),
            max: params.max_msg_len,
        });
    }
    for attempt in 1..=ENCRYPT_MAX_ATTEMPTS {
        let mut salt = vec![0u8; params.db / 8];
        rng.fill_bytes(&mut salt);
        let buf = build_buffer(msg, &salt, params);
        let m = buffer_to_poly(&buf, params);
        if !trit_counts_ok(&m, params) {
            debug!(attempt, "message representative failed trit count, resalting");
            continue;
        }
        let r = derive_blinding(msg, &salt, public, params);
        let e = (&r.mult(&public.h) + &m).positive_mod(params.q);
        return Ok(pack_coeffs(e.coeffs(), params.q.trailing_zeros()));
    }
    Err(NtruError::EncryptionFailed {
        attempts: ENCRYPT_MAX_ATTEMPTS,
    })
}

/// Decrypt a ciphertext and verify its consistency.
///
/// Every internal failure maps to the same `DecryptionFailed`, so a caller
/// (or an attacker replaying modified ciphertexts) learns nothing about
/// where decryption broke down.
pub fn decrypt(
    ciphertext: &[u8],
    key_pair: &EncryptionKeyPair,
    params: &EncryptionParams,
) -> Result<Vec<u8>> {
    let e = IntPoly::from_coeffs(unpack_coeffs(
        ciphertext,
        params.n,
        params.q.trailing_zeros(),
    )?);

    // a = f·e centered mod q recovers 3·r·g + f·m exactly when the
    // parameters keep coefficients inside (−q/2, q/2]
    let a = key_pair.private.f.mult(&e).center_mod(params.q);
    let m = key_pair
        .private
        .fp
        .mult_mod(&a.positive_mod(params.p), params.p)
        .center_mod(params.p);

    let encoded = params.encoded_coeffs();
    if m.coeffs()[encoded..].iter().any(|&c| c != 0) {
        return Err(NtruError::DecryptionFailed);
    }
    if !trit_counts_ok(&m, params) {
        return Err(NtruError::DecryptionFailed);
    }
    let buf = trits_to_bits(&m.coeffs()[..encoded], params.buffer_len_bytes())
        .map_err(|_| NtruError::DecryptionFailed)?;

    let salt_len = params.db / 8;
    let msg_len = buf[salt_len] as usize;
    if msg_len > params.max_msg_len {
        return Err(NtruError::DecryptionFailed);
    }
    let (salt, rest) = buf.split_at(salt_len);
    let msg = &rest[1..1 + msg_len];
    if rest[1 + msg_len..].iter().any(|&b| b != 0) {
        return Err(NtruError::DecryptionFailed);
    }

    // honest ciphertexts satisfy e = r·h + m for the re-derived r
    let r = derive_blinding(msg, salt, &key_pair.public, params);
    let expected = &r.mult(&key_pair.public.h) + &m;
    if !e.equals_mod(&expected, params.q) {
        return Err(NtruError::DecryptionFailed);
    }
    Ok(msg.to_vec())
}
