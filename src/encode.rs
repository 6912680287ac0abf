//! Byte encodings for keys, ciphertexts, and signatures.
//!
//! Ring elements with coefficients in [0, q) are bit-packed at a fixed
//! width, LSB-first within each byte. Message payloads cross into the
//! ternary world through a 3-bit-to-2-trit table pair whose unused output
//! pair (−1, −1) doubles as a corruption check on the way back.

use crate::error::{NtruError, Result};

/// 3 bits select the first trit of a pair.
const COEFF1_TABLE: [i64; 8] = [0, 0, 0, 1, 1, 1, -1, -1];
/// 3 bits select the second trit of a pair.
const COEFF2_TABLE: [i64; 8] = [0, 1, -1, 0, 1, -1, 0, 1];

/// Packs coefficients in [0, 2^bits) into bytes, LSB-first.
pub fn pack_coeffs(coeffs: &[i64], bits: u32) -> Vec<u8> {
    let total = coeffs.len() * bits as usize;
    let mut out = vec![0u8; total.div_ceil(8)];
    let mut pos = 0usize;
    for &c in coeffs {
        debug_assert!(c >= 0 && c < 1 << bits);
        for b in 0..bits {
            if c >> b & 1 == 1 {
                out[pos / 8] |= 1 << (pos % 8);
            }
            pos += 1;
        }
    }
    out
}

/// Inverse of [`pack_coeffs`]; fails when `bytes` is too short for `n`
/// coefficients of the given width.
pub fn unpack_coeffs(bytes: &[u8], n: usize, bits: u32) -> Result<Vec<i64>> {
    if bytes.len() * 8 < n * bits as usize {
        return Err(NtruError::InvalidEncoding("coefficient block truncated"));
    }
    let mut out = Vec::with_capacity(n);
    let mut pos = 0usize;
    for _ in 0..n {
        let mut c = 0i64;
        for b in 0..bits {
            if bytes[pos / 8] >> (pos % 8) & 1 == 1 {
                c |= 1 << b;
            }
            pos += 1;
        }
        out.push(c);
    }
    Ok(out)
}

/// Expands a byte string into ternary coefficients, two trits per 3 bits.
///
/// The output has `2 * ceil(8·len / 3)` coefficients; trailing bits of the
/// last group are read as zero.
pub fn bits_to_trits(data: &[u8]) -> Vec<i64> {
    let total_bits = data.len() * 8;
    let groups = total_bits.div_ceil(3);
    let bit = |i: usize| {
        if i < total_bits {
            (data[i / 8] >> (i % 8) & 1) as usize
        } else {
            0
        }
    };
    let mut out = Vec::with_capacity(2 * groups);
    for g in 0..groups {
        let idx = bit(3 * g) | bit(3 * g + 1) << 1 | bit(3 * g + 2) << 2;
        out.push(COEFF1_TABLE[idx]);
        out.push(COEFF2_TABLE[idx]);
    }
    out
}

/// Inverse of [`bits_to_trits`], recovering `num_bytes` bytes.
///
/// The trit pair (−1, −1) never occurs in well-formed output and signals
/// a corrupted decryption.
pub fn trits_to_bits(trits: &[i64], num_bytes: usize) -> Result<Vec<u8>> {
    let groups = (num_bytes * 8).div_ceil(3);
    if trits.len() < 2 * groups {
        return Err(NtruError::InvalidEncoding("trit block truncated"));
    }
    let mut out = vec![0u8; num_bytes];
    let mut set = |i: usize| {
        if i < num_bytes * 8 {
            out[i / 8] |= 1 << (i % 8);
        }
    };
    for g in 0..groups {
        let pair = (trits[2 * g], trits[2 * g + 1]);
        let idx = COEFF1_TABLE
            .iter()
            .zip(&COEFF2_TABLE)
            .position(|(&a, &b)| (a, b) == pair)
            .ok_or(NtruError::InvalidEncoding("invalid trit pair"))?;
        for b in 0..3 {
            if idx >> b & 1 == 1 {
                set(3 * g + b);
            }
        }
    }
    Ok(out)
}

/// Packs sparse ternary index lists as 16-bit little-endian values.
pub fn pack_indices(indices: &[usize]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 * indices.len());
    for &i in indices {
        out.extend_from_slice(&(i as u16).to_le_bytes());
    }
    out
}

/// Inverse of [`pack_indices`]; indices must lie below `n`.
pub fn unpack_indices(bytes: &[u8], count: usize, n: usize) -> Result<Vec<usize>> {
    if bytes.len() < 2 * count {
        return Err(NtruError::InvalidEncoding("index block truncated"));
    }
    let mut out = Vec::with_capacity(count);
    for k in 0..count {
        let i = u16::from_le_bytes([bytes[2 * k], bytes[2 * k + 1]]) as usize;
        if i >= n {
            return Err(NtruError::InvalidEncoding("index out of range"));
        }
        out.push(i);
    }
    Ok(out)
}

/// Packs small signed coefficients as 16-bit little-endian values.
pub fn pack_i16(coeffs: &[i64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 * coeffs.len());
    for &c in coeffs {
        debug_assert!(i16::try_from(c).is_ok());
        out.extend_from_slice(&(c as i16).to_le_bytes());
    }
    out
}

/// Inverse of [`pack_i16`].
pub fn unpack_i16(bytes: &[u8], n: usize) -> Result<Vec<i64>> {
    if bytes.len() < 2 * n {
        return Err(NtruError::InvalidEncoding("coefficient block truncated"));
    }
    Ok((0..n)
        .map(|k| i16::from_le_bytes([bytes[2 * k], bytes[2 * k + 1]]) as i64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn coeff_packing_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(31);
        for bits in [8u32, 9, 10, 11] {
            let coeffs: Vec<i64> =
                (0..439).map(|_| rng.gen_range(0..1i64 << bits)).collect();
            let bytes = pack_coeffs(&coeffs, bits);
            assert_eq!(bytes.len(), (439 * bits as usize).div_ceil(8));
            assert_eq!(unpack_coeffs(&bytes, 439, bits).unwrap(), coeffs);
        }
    }

    #[test]
    fn unpack_rejects_short_input() {
        assert!(unpack_coeffs(&[0u8; 10], 100, 11).is_err());
        assert!(unpack_indices(&[0u8; 5], 3, 439).is_err());
        assert!(unpack_i16(&[0u8; 5], 3).is_err());
    }

    #[test]
    fn trit_tables_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(32);
        let data: Vec<u8> = (0..82).map(|_| rng.gen()).collect();
        let trits = bits_to_trits(&data);
        assert_eq!(trits.len(), 2 * (82 * 8usize).div_ceil(3));
        assert!(trits.iter().all(|&t| (-1..=1).contains(&t)));
        assert_eq!(trits_to_bits(&trits, 82).unwrap(), data);
    }

    #[test]
    fn forbidden_trit_pair_is_rejected() {
        let data = [0x5au8; 6];
        let mut trits = bits_to_trits(&data);
        trits[0] = -1;
        trits[1] = -1;
        assert!(matches!(
            trits_to_bits(&trits, 6),
            Err(NtruError::InvalidEncoding("invalid trit pair"))
        ));
    }

    #[test]
    fn index_packing_roundtrip() {
        let indices = vec![0usize, 17, 438, 255, 256];
        let bytes = pack_indices(&indices);
        assert_eq!(unpack_indices(&bytes, 5, 439).unwrap(), indices);
        assert!(unpack_indices(&bytes, 5, 300).is_err());
    }

    #[test]
    fn i16_packing_roundtrip() {
        let coeffs = vec![0i64, -1, 1, 127, -128, 300, -300];
        let bytes = pack_i16(&coeffs);
        assert_eq!(unpack_i16(&bytes, coeffs.len()).unwrap(), coeffs);
    }
}
