//! NTRUSign: key generation, signing, verification.
//!
//! A private key holds B + 1 short lattice bases. Signing walks the
//! perturbation bases from the innermost outward, accumulating an
//! approximate closest lattice vector to the hashed message point, and
//! retries with a fresh message representative until the signature lands
//! under the norm bound. Verification is norm checking only and needs
//! nothing but the public polynomial h.
//!
//! # Example
//!
//! ```
//! use ntru::{generate_signature_key_pair, sign, verify, SignatureParams};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let params = SignatureParams::test157();
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let kp = generate_signature_key_pair(&params, &mut rng)?;
//!
//! let sig = sign(b"a signed message", &kp, &params)?;
//! assert!(verify(b"a signed message", &sig, &kp.public, &params));
//! assert!(!verify(b"a forged message", &sig, &kp.public, &params));
//! # Ok::<(), ntru::NtruError>(())
//! ```

pub mod basis;
pub mod engine;
pub mod keys;

pub use basis::Basis;
pub use engine::{generate_key_pair, sign, verify};
pub use keys::{SignatureKeyPair, SignaturePrivateKey, SignaturePublicKey};
