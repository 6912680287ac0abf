//! End-to-end NTRUSign scenarios.

use ntru::{generate_signature_key_pair, sign, verify, SignatureParams};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[test]
fn sign_and_verify() {
    let params = SignatureParams::test157();
    let mut rng = ChaCha20Rng::seed_from_u64(2001);
    let kp = generate_signature_key_pair(&params, &mut rng).unwrap();

    let msg = b"test message";
    let sig = sign(msg, &kp, &params).unwrap();
    assert!(verify(msg, &sig, &kp.public, &params));
}

#[test]
fn tampered_message_rejected() {
    let params = SignatureParams::test157();
    let mut rng = ChaCha20Rng::seed_from_u64(2002);
    let kp = generate_signature_key_pair(&params, &mut rng).unwrap();

    let sig = sign(b"test message", &kp, &params).unwrap();
    assert!(!verify(b"test messagf", &sig, &kp.public, &params));
    assert!(!verify(b"", &sig, &kp.public, &params));
}

#[test]
fn tampered_signature_rejected() {
    let params = SignatureParams::test157();
    let mut rng = ChaCha20Rng::seed_from_u64(2003);
    let kp = generate_signature_key_pair(&params, &mut rng).unwrap();

    let msg = b"test message";
    let mut sig = sign(msg, &kp, &params).unwrap();
    sig[20] ^= 0x40;
    assert!(!verify(msg, &sig, &kp.public, &params));
}

#[test]
fn random_signature_rejected() {
    let params = SignatureParams::test157();
    let mut rng = ChaCha20Rng::seed_from_u64(2004);
    let kp = generate_signature_key_pair(&params, &mut rng).unwrap();

    let sig_len = (params.n * params.q_bits()).div_ceil(8) + 4;
    let mut sig = vec![0u8; sig_len];
    rng.fill_bytes(&mut sig);
    sig[sig_len - 4..].copy_from_slice(&1i32.to_le_bytes());
    assert!(!verify(b"test message", &sig, &kp.public, &params));
}

#[test]
fn signing_is_deterministic() {
    let params = SignatureParams::test157();
    let mut rng = ChaCha20Rng::seed_from_u64(2005);
    let kp = generate_signature_key_pair(&params, &mut rng).unwrap();

    let s1 = sign(b"same input", &kp, &params).unwrap();
    let s2 = sign(b"same input", &kp, &params).unwrap();
    assert_eq!(s1, s2);
}

#[test]
fn signatures_from_different_keys_do_not_cross_verify() {
    let params = SignatureParams::test157();
    let mut rng = ChaCha20Rng::seed_from_u64(2006);
    let kp_a = generate_signature_key_pair(&params, &mut rng).unwrap();
    let kp_b = generate_signature_key_pair(&params, &mut rng).unwrap();

    let sig = sign(b"message", &kp_a, &params).unwrap();
    assert!(!verify(b"message", &sig, &kp_b.public, &params));
}

#[test]
fn sign_and_verify_with_perturbation_basis() {
    // the full s157 set: one perturbation basis on top of basis 0
    let params = SignatureParams::s157();
    let mut rng = ChaCha20Rng::seed_from_u64(2007);
    let kp = generate_signature_key_pair(&params, &mut rng).unwrap();
    assert_eq!(kp.private.bases.len(), 2);

    let msg = b"test message";
    let sig = sign(msg, &kp, &params).unwrap();
    assert!(verify(msg, &sig, &kp.public, &params));
    assert!(!verify(b"other message", &sig, &kp.public, &params));
}

#[test]
fn signing_succeeds_under_a_tightened_norm_bound() {
    // well under the published 22506 but comfortably above the norm a
    // legitimate signature actually reaches, so the counter loop must
    // still terminate
    let params = SignatureParams {
        norm_bound_sq: 15000.0,
        ..SignatureParams::test157()
    };
    let mut rng = ChaCha20Rng::seed_from_u64(2008);
    let kp = generate_signature_key_pair(&params, &mut rng).unwrap();

    let msg = b"test message";
    let sig = sign(msg, &kp, &params).unwrap();
    assert!(verify(msg, &sig, &kp.public, &params));
}

#[test]
fn multiple_messages_one_key() {
    let params = SignatureParams::test157();
    let mut rng = ChaCha20Rng::seed_from_u64(2009);
    let kp = generate_signature_key_pair(&params, &mut rng).unwrap();

    for i in 0u32..8 {
        let msg = i.to_le_bytes();
        let sig = sign(&msg, &kp, &params).unwrap();
        assert!(verify(&msg, &sig, &kp.public, &params));
    }
}
