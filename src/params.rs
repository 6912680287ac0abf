//! Parameter sets for NTRUEncrypt and NTRUSign.
//!
//! Named presets follow the published APR2011 (encryption) and T-series
//! (signature) tables. Parameters are plain values: construct once, validate,
//! then share read-only across any number of operations.

use serde::{Deserialize, Serialize};

/// Which lattice basis convention NTRUSign key generation uses.
///
/// Both conventions produce keys satisfying f·G − g·F = q; they differ in
/// which short vector plays the role of the second signing polynomial and in
/// how the public polynomial is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BasisType {
    /// f′ = F, h = g·f⁻¹ (mod q).
    Standard,
    /// f′ = g, h = F·f⁻¹ (mod q). Both signing polynomials are ternary,
    /// which is what the published norm bounds assume.
    #[default]
    Transpose,
}

/// Parameters for NTRUEncrypt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptionParams {
    /// Ring degree N (prime).
    pub n: usize,
    /// Large modulus q (power of two).
    pub q: i64,
    /// Small modulus p. Always 3 in the supported sets.
    pub p: i64,
    /// Hamming weight of the private polynomial f: df coefficients at +1,
    /// df − 1 at −1 (so f(1) = 1, a unit condition).
    pub df: usize,
    /// Hamming weight of the auxiliary polynomial g (dg each of +1/−1).
    pub dg: usize,
    /// Hamming weight of the blinding polynomial r (dr each of +1/−1).
    pub dr: usize,
    /// Salt length in bits (multiple of 8).
    pub db: usize,
    /// Minimum number of times each trit value must occur in an encoded
    /// message; tickets below this are resampled with a fresh salt.
    pub dm0: usize,
    /// Maximum plaintext length in bytes.
    pub max_msg_len: usize,
}

impl EncryptionParams {
    /// APR2011 parameter set for N = 439 (128-bit security target).
    pub fn apr2011_439() -> Self {
        Self {
            n: 439,
            q: 2048,
            p: 3,
            df: 146,
            dg: 146,
            dr: 146,
            db: 128,
            dm0: 80,
            max_msg_len: 65,
        }
    }

    /// APR2011 parameter set for N = 743 (256-bit security target).
    pub fn apr2011_743() -> Self {
        Self {
            n: 743,
            q: 2048,
            p: 3,
            df: 248,
            dg: 247,
            dr: 247,
            db: 256,
            dm0: 130,
            max_msg_len: 106,
        }
    }

    /// Small parameter set for fast tests. Not secure.
    pub fn test_small() -> Self {
        Self {
            n: 107,
            q: 1024,
            p: 3,
            df: 15,
            dg: 12,
            dr: 12,
            db: 64,
            dm0: 8,
            max_msg_len: 10,
        }
    }

    /// Length in bytes of the padded message buffer: salt ‖ length octet ‖
    /// message ‖ zero padding.
    pub fn buffer_len_bytes(&self) -> usize {
        self.db / 8 + 1 + self.max_msg_len
    }

    /// Number of ring coefficients consumed by the encoded buffer
    /// (two ternary coefficients per three buffer bits).
    pub fn encoded_coeffs(&self) -> usize {
        2 * (self.buffer_len_bytes() * 8).div_ceil(3)
    }

    /// Check parameter consistency.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.q <= 0 || !(self.q as u64).is_power_of_two() {
            return Err("q must be a power of two");
        }
        if self.p != 3 {
            return Err("only p = 3 is supported");
        }
        if self.db % 8 != 0 {
            return Err("db must be a multiple of 8");
        }
        if 2 * self.df > self.n || 2 * self.dg > self.n || 2 * self.dr > self.n {
            return Err("polynomial weights exceed the ring degree");
        }
        if self.encoded_coeffs() > self.n {
            return Err("padded message buffer does not fit the ring");
        }
        if self.max_msg_len > 255 {
            return Err("max_msg_len must fit in the length octet");
        }
        Ok(())
    }
}

impl Default for EncryptionParams {
    fn default() -> Self {
        Self::apr2011_439()
    }
}

/// Parameters for NTRUSign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureParams {
    /// Ring degree N (prime).
    pub n: usize,
    /// Large modulus q (power of two).
    pub q: i64,
    /// Hamming weight of basis polynomials: d + 1 coefficients at +1,
    /// d at −1.
    pub d: usize,
    /// Number of perturbation bases B. The private key holds B + 1 bases;
    /// basis 0 is the one the public key is derived from.
    pub num_perturbation_bases: usize,
    /// Weight β² applied to the deviation term in the acceptance norm.
    pub beta_sq: f64,
    /// Squared norm acceptance threshold.
    pub norm_bound_sq: f64,
    /// Basis convention for key generation.
    pub basis_type: BasisType,
    /// Reject candidate polynomials whose resultant vanishes mod 2N + 1.
    pub prime_check: bool,
}

impl SignatureParams {
    /// Published 157-parameter set (transpose basis, one perturbation).
    pub fn s157() -> Self {
        Self {
            n: 157,
            q: 256,
            d: 29,
            num_perturbation_bases: 1,
            beta_sq: 0.146279,
            norm_bound_sq: 22506.0,
            basis_type: BasisType::Transpose,
            prime_check: false,
        }
    }

    /// Published 349-parameter set.
    pub fn s349() -> Self {
        Self {
            n: 349,
            q: 512,
            d: 75,
            num_perturbation_bases: 1,
            beta_sq: 0.0961,
            norm_bound_sq: 81225.0,
            basis_type: BasisType::Transpose,
            prime_check: false,
        }
    }

    /// 157-degree set without perturbation bases, for fast tests.
    pub fn test157() -> Self {
        Self {
            num_perturbation_bases: 0,
            ..Self::s157()
        }
    }

    /// Number of bits needed to store one mod-q coefficient.
    pub fn q_bits(&self) -> usize {
        self.q.trailing_zeros() as usize
    }

    /// Check parameter consistency.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.q <= 0 || !(self.q as u64).is_power_of_two() {
            return Err("q must be a power of two");
        }
        if 2 * self.d + 1 > self.n {
            return Err("basis weight exceeds the ring degree");
        }
        if self.norm_bound_sq <= 0.0 || self.beta_sq < 0.0 {
            return Err("norm bound and beta squared must be positive");
        }
        Ok(())
    }
}

impl Default for SignatureParams {
    fn default() -> Self {
        Self::s157()
    }
}
