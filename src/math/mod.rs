//! Mathematical primitives for the NTRU schemes.
//!
//! Everything here operates in the truncated polynomial ring
//! Z[X]/(X^N − 1) with coefficients reduced modulo q (a power of two),
//! modulo 2, or modulo a small odd prime:
//!
//! - **Ring arithmetic** via cyclic convolution (`poly`)
//! - **Sparse ternary polynomials** and their sampling (`ternary`)
//! - **Modular inversion** mod 2^k and mod small primes (`inverse`)
//! - **Resultants** over Z via CRT, for signing key construction
//!   (`bigpoly`, `resultant`)
//!
//! q is a power of two in every NTRU parameter set, so there is no
//! NTT-friendly structure to exploit; multiplication is coefficient-domain
//! convolution with double-width accumulation.

pub mod bigpoly;
pub mod inverse;
pub mod poly;
pub mod resultant;
pub mod ternary;

pub use bigpoly::BigIntPoly;
pub use inverse::{invert_mod_pow2, invert_mod_prime};
pub use poly::IntPoly;
pub use resultant::{resultant, resultant_mod, Resultant};
pub use ternary::TernaryPoly;
