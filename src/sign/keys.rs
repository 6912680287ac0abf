//! Key material for NTRUSign, with byte encodings.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encode::{pack_coeffs, pack_i16, pack_indices, unpack_coeffs, unpack_i16, unpack_indices};
use crate::error::{NtruError, Result};
use crate::math::{IntPoly, TernaryPoly};
use crate::params::{BasisType, SignatureParams};

use super::basis::Basis;

/// Public key: the polynomial h of basis 0, coefficients in [0, q).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePublicKey {
    pub h: IntPoly,
}

impl SignaturePublicKey {
    pub fn to_bytes(&self, params: &SignatureParams) -> Vec<u8> {
        pack_coeffs(self.h.coeffs(), params.q_bits() as u32)
    }

    pub fn from_bytes(bytes: &[u8], params: &SignatureParams) -> Result<Self> {
        let coeffs = unpack_coeffs(bytes, params.n, params.q_bits() as u32)?;
        Ok(Self {
            h: IntPoly::from_coeffs(coeffs),
        })
    }
}

/// Private key: B + 1 signing bases, basis 0 first. Wiped on drop.
#[derive(Clone, Debug, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SignaturePrivateKey {
    pub bases: Vec<Basis>,
}

impl SignaturePrivateKey {
    /// Per basis: index lists of f, then f′ (index lists under the
    /// transpose convention, 16-bit coefficients under the standard one),
    /// then packed h for every basis except basis 0, whose h is the
    /// public key.
    pub fn to_bytes(&self, params: &SignatureParams) -> Vec<u8> {
        let mut out = Vec::new();
        for (k, basis) in self.bases.iter().enumerate() {
            out.extend_from_slice(&pack_indices(basis.f.ones()));
            out.extend_from_slice(&pack_indices(basis.f.neg_ones()));
            match params.basis_type {
                BasisType::Transpose => {
                    let (ones, neg_ones) = ternary_indices(&basis.f_prime);
                    out.extend_from_slice(&pack_indices(&ones));
                    out.extend_from_slice(&pack_indices(&neg_ones));
                }
                BasisType::Standard => {
                    out.extend_from_slice(&pack_i16(basis.f_prime.coeffs()));
                }
            }
            if k > 0 {
                out.extend_from_slice(&pack_coeffs(
                    basis.h.coeffs(),
                    params.q_bits() as u32,
                ));
            }
        }
        out
    }

    /// Inverse of [`to_bytes`]; basis 0's h is taken from the public key.
    pub fn from_bytes(
        bytes: &[u8],
        public: &SignaturePublicKey,
        params: &SignatureParams,
    ) -> Result<Self> {
        let mut bases = Vec::with_capacity(params.num_perturbation_bases + 1);
        let mut pos = 0usize;
        for k in 0..=params.num_perturbation_bases {
            let f = read_ternary(bytes, &mut pos, params)?;
            let f_prime = match params.basis_type {
                BasisType::Transpose => read_ternary(bytes, &mut pos, params)?.to_int_poly(),
                BasisType::Standard => {
                    let p = IntPoly::from_coeffs(unpack_i16(&bytes[pos..], params.n)?);
                    pos += 2 * params.n;
                    p
                }
            };
            let h = if k == 0 {
                public.h.clone()
            } else {
                let len = (params.n * params.q_bits()).div_ceil(8);
                let coeffs =
                    unpack_coeffs(&bytes[pos..], params.n, params.q_bits() as u32)?;
                pos += len;
                IntPoly::from_coeffs(coeffs)
            };
            bases.push(Basis { f, f_prime, h });
        }
        if pos != bytes.len() {
            return Err(NtruError::InvalidEncoding("trailing private key bytes"));
        }
        Ok(Self { bases })
    }
}

fn ternary_indices(p: &IntPoly) -> (Vec<usize>, Vec<usize>) {
    let mut ones = Vec::new();
    let mut neg_ones = Vec::new();
    for (i, &c) in p.coeffs().iter().enumerate() {
        match c {
            1 => ones.push(i),
            -1 => neg_ones.push(i),
            _ => debug_assert_eq!(c, 0),
        }
    }
    (ones, neg_ones)
}

fn read_ternary(
    bytes: &[u8],
    pos: &mut usize,
    params: &SignatureParams,
) -> Result<TernaryPoly> {
    let slice = &bytes[*pos..];
    let ones = unpack_indices(slice, params.d + 1, params.n)?;
    let neg_ones = unpack_indices(&slice[2 * (params.d + 1)..], params.d, params.n)?;
    *pos += 2 * (2 * params.d + 1);
    Ok(TernaryPoly::from_indices(params.n, ones, neg_ones))
}

/// A matched public/private key pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignatureKeyPair {
    pub public: SignaturePublicKey,
    pub private: SignaturePrivateKey,
}
