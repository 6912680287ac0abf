//! NTRUEncrypt: key generation, encryption, decryption.
//!
//! The public key is h = 3·f⁻¹·g (mod q) for sparse ternary f and g.
//! Messages pass through a salted, padded buffer encoding before entering
//! the ring, and decryption re-derives the blinding polynomial to reject
//! any ciphertext that was not produced honestly under this public key.
//!
//! # Example
//!
//! ```
//! use ntru::{decrypt, encrypt, generate_encryption_key_pair, EncryptionParams};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let params = EncryptionParams::test_small();
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let kp = generate_encryption_key_pair(&params, &mut rng)?;
//!
//! let ciphertext = encrypt(b"plaintext", &kp.public, &params, &mut rng)?;
//! assert_eq!(decrypt(&ciphertext, &kp, &params)?, b"plaintext");
//! # Ok::<(), ntru::NtruError>(())
//! ```

pub mod engine;
pub mod keys;

pub use engine::{decrypt, encrypt, generate_key_pair};
pub use keys::{EncryptionKeyPair, EncryptionPrivateKey, EncryptionPublicKey};
