//! NTRU lattice-based public-key primitives.
//!
//! This crate implements the two classical NTRU schemes over the truncated
//! polynomial ring Z[X]/(X^N − 1):
//!
//! - **NTRUEncrypt**: block encryption with a trapdoor public polynomial
//!   h = 3·f⁻¹·g (mod q) and a salted, padded message encoding
//! - **NTRUSign**: hash-and-sign signatures over the NTRU lattice with
//!   multi-level perturbation bases and norm-bound rejection sampling
//!
//! Key components:
//! - Ring arithmetic and modular polynomial inversion (`math`)
//! - Trapdoor key generation with resample-on-failure discipline
//! - Bit-level key/ciphertext/signature encodings (`encode`)
//!
//! Parameter sets are plain values (`params`); all operations take a
//! caller-supplied cryptographic RNG and never touch global state.

pub mod encode;
pub mod encrypt;
pub mod error;
pub mod math;
pub mod params;
pub mod sign;

pub use encrypt::{
    decrypt, encrypt, generate_key_pair as generate_encryption_key_pair, EncryptionKeyPair,
    EncryptionPrivateKey, EncryptionPublicKey,
};
pub use error::{NtruError, Result};
pub use params::{BasisType, EncryptionParams, SignatureParams};
pub use sign::{
    generate_key_pair as generate_signature_key_pair, sign, verify, SignatureKeyPair,
    SignaturePrivateKey, SignaturePublicKey,
};
