//! Key material for NTRUEncrypt, with byte encodings.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encode::{pack_coeffs, pack_indices, unpack_coeffs, unpack_indices};
use crate::error::{NtruError, Result};
use crate::math::{invert_mod_prime, IntPoly, TernaryPoly};
use crate::params::EncryptionParams;

/// Public key: the polynomial h = 3·f⁻¹·g (mod q), coefficients in [0, q).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionPublicKey {
    pub h: IntPoly,
}

impl EncryptionPublicKey {
    /// Bit-packed h, one coefficient per log2(q) bits.
    pub fn to_bytes(&self, params: &EncryptionParams) -> Vec<u8> {
        pack_coeffs(self.h.coeffs(), params.q.trailing_zeros())
    }

    pub fn from_bytes(bytes: &[u8], params: &EncryptionParams) -> Result<Self> {
        let coeffs = unpack_coeffs(bytes, params.n, params.q.trailing_zeros())?;
        Ok(Self {
            h: IntPoly::from_coeffs(coeffs),
        })
    }
}

/// Private key: the ternary polynomial f together with its cached
/// inverse mod 3. Both are wiped on drop.
#[derive(Clone, Debug, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionPrivateKey {
    pub f: TernaryPoly,
    /// f⁻¹ (mod 3), recomputed rather than stored when decoding.
    pub fp: IntPoly,
}

impl EncryptionPrivateKey {
    /// Index lists of f, +1 positions then −1 positions, 16-bit LE each.
    /// fp is cheap to recompute and is not serialized.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = pack_indices(self.f.ones());
        out.extend_from_slice(&pack_indices(self.f.neg_ones()));
        out
    }

    pub fn from_bytes(bytes: &[u8], params: &EncryptionParams) -> Result<Self> {
        let ones = unpack_indices(bytes, params.df, params.n)?;
        let neg_ones =
            unpack_indices(&bytes[2 * params.df..], params.df - 1, params.n)?;
        let f = TernaryPoly::from_indices(params.n, ones, neg_ones);
        let fp = invert_mod_prime(&f.to_int_poly(), params.p)
            .map_err(|_| NtruError::InvalidEncoding("stored f is not invertible"))?;
        Ok(Self { f, fp })
    }
}

/// A matched public/private key pair.
///
/// Decryption needs both halves: the public h is re-used to verify that
/// the ciphertext is consistent with the re-derived blinding polynomial.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptionKeyPair {
    pub public: EncryptionPublicKey,
    pub private: EncryptionPrivateKey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encrypt::generate_key_pair;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn public_key_roundtrip() {
        let params = EncryptionParams::test_small();
        let mut rng = ChaCha20Rng::seed_from_u64(41);
        let kp = generate_key_pair(&params, &mut rng).unwrap();
        let bytes = kp.public.to_bytes(&params);
        assert_eq!(bytes.len(), (params.n * 10).div_ceil(8));
        let back = EncryptionPublicKey::from_bytes(&bytes, &params).unwrap();
        assert_eq!(back, kp.public);
    }

    #[test]
    fn private_key_roundtrip() {
        let params = EncryptionParams::test_small();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let kp = generate_key_pair(&params, &mut rng).unwrap();
        let back =
            EncryptionPrivateKey::from_bytes(&kp.private.to_bytes(), &params).unwrap();
        assert_eq!(back.f.ones(), kp.private.f.ones());
        assert_eq!(back.f.neg_ones(), kp.private.f.neg_ones());
        assert_eq!(back.fp, kp.private.fp);
    }

    #[test]
    fn truncated_keys_rejected() {
        let params = EncryptionParams::test_small();
        assert!(EncryptionPublicKey::from_bytes(&[0u8; 4], &params).is_err());
        assert!(EncryptionPrivateKey::from_bytes(&[0u8; 4], &params).is_err());
    }
}
