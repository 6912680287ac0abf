//! Error taxonomy for NTRU operations.
//!
//! `NotInvertible` is recoverable and only ever observed inside key
//! generation, where it triggers resampling. The remaining variants are
//! surfaced to callers. `DecryptionFailed` deliberately carries no detail:
//! distinguishing padding errors from wrong-key errors would hand an
//! attacker a decryption oracle.

use thiserror::Error;

/// Errors produced by NTRU key generation, encryption and signing.
#[derive(Debug, Error)]
pub enum NtruError {
    /// The sampled polynomial has no inverse under the requested modulus.
    /// Internal to key generation; callers resample and retry.
    #[error("polynomial is not invertible under the requested modulus")]
    NotInvertible,

    /// Key generation exhausted its retry budget. Almost always a sign of
    /// misconfigured weight parameters.
    #[error("key generation failed after {attempts} attempts")]
    KeyGenerationFailed { attempts: u32 },

    /// The salt-resampling loop in encryption exhausted its retry budget.
    #[error("encryption failed after {attempts} attempts")]
    EncryptionFailed { attempts: u32 },

    /// The plaintext does not fit the ring's payload capacity.
    #[error("message of {len} bytes exceeds the maximum of {max} bytes")]
    MessageTooLong { len: usize, max: usize },

    /// Decryption produced an inconsistent result. Covers corrupted
    /// ciphertexts and wrong keys alike, by design.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Signing exhausted its attempt budget without meeting the norm bound.
    #[error("signing failed after {attempts} attempts; norm bound may be unreachable")]
    SigningFailed { attempts: u32 },

    /// A byte encoding could not be parsed under the given parameters.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(&'static str),
}

/// Result type for NTRU operations.
pub type Result<T> = std::result::Result<T, NtruError>;
