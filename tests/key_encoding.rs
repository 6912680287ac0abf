//! Key serialization at production parameters, both schemes.

use ntru::encrypt::{EncryptionPrivateKey, EncryptionPublicKey};
use ntru::sign::{SignaturePrivateKey, SignaturePublicKey};
use ntru::{
    generate_encryption_key_pair, generate_signature_key_pair, EncryptionParams,
    SignatureParams,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn encryption_keys_roundtrip_at_439() {
    let params = EncryptionParams::apr2011_439();
    let mut rng = ChaCha20Rng::seed_from_u64(3001);
    let kp = generate_encryption_key_pair(&params, &mut rng).unwrap();

    let pub_bytes = kp.public.to_bytes(&params);
    assert_eq!(pub_bytes.len(), (439 * 11usize).div_ceil(8));
    let pub_back = EncryptionPublicKey::from_bytes(&pub_bytes, &params).unwrap();
    assert_eq!(pub_back, kp.public);

    let priv_bytes = kp.private.to_bytes();
    assert_eq!(priv_bytes.len(), 2 * (2 * params.df - 1));
    let priv_back = EncryptionPrivateKey::from_bytes(&priv_bytes, &params).unwrap();
    assert_eq!(priv_back.f.ones(), kp.private.f.ones());
    assert_eq!(priv_back.fp, kp.private.fp);
}

#[test]
fn signature_keys_roundtrip_with_perturbation() {
    let params = SignatureParams::s157();
    let mut rng = ChaCha20Rng::seed_from_u64(3002);
    let kp = generate_signature_key_pair(&params, &mut rng).unwrap();

    let pub_back =
        SignaturePublicKey::from_bytes(&kp.public.to_bytes(&params), &params).unwrap();
    assert_eq!(pub_back, kp.public);

    let priv_bytes = kp.private.to_bytes(&params);
    let priv_back =
        SignaturePrivateKey::from_bytes(&priv_bytes, &kp.public, &params).unwrap();
    assert_eq!(priv_back.bases.len(), 2);
    for (a, b) in priv_back.bases.iter().zip(&kp.private.bases) {
        assert_eq!(a.f.ones(), b.f.ones());
        assert_eq!(a.f.neg_ones(), b.f.neg_ones());
        assert_eq!(a.f_prime, b.f_prime);
        assert_eq!(a.h, b.h);
    }
}

#[test]
fn decoded_keys_are_usable() {
    let params = EncryptionParams::test_small();
    let mut rng = ChaCha20Rng::seed_from_u64(3003);
    let kp = generate_encryption_key_pair(&params, &mut rng).unwrap();

    let restored = ntru::encrypt::EncryptionKeyPair {
        public: EncryptionPublicKey::from_bytes(&kp.public.to_bytes(&params), &params)
            .unwrap(),
        private: EncryptionPrivateKey::from_bytes(&kp.private.to_bytes(), &params)
            .unwrap(),
    };
    let ct = ntru::encrypt(b"restored", &restored.public, &params, &mut rng).unwrap();
    assert_eq!(ntru::decrypt(&ct, &restored, &params).unwrap(), b"restored");
}
