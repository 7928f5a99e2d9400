//! BN254 algebra for the Quill PLONK prover: Montgomery prime fields and their
//! extension towers, short Weierstrass curves with wNAF and endomorphism-split
//! scalar multiplication, the optimal Ate pairing, Pippenger multi-exponentiation
//! and the Baby Jubjub curve embedded over the scalar field.

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::suspicious_arithmetic_impl)]
#![allow(clippy::suspicious_op_assign_impl)]

/// Module for the BN254 curve
#[macro_use]
pub mod bn254;

/// Module for generic short Weierstrass curve arithmetic
pub mod curve;

/// Module for the twisted Edwards curve over the BN254 scalar field
pub mod ed_on_bn254;

/// Module for error handling
pub mod errors;

/// Module for Montgomery fields and extension towers
pub mod field;

/// Module for multi-exponentiation
pub mod multi_exp;

/// Module for prelude
#[doc(hidden)]
pub mod prelude;

/// Module for test rng
pub mod rand_helper;

/// Module for serialization of scalars and group elements
pub mod serialization;

/// Module for traits
pub mod traits;

/// Module for utils
pub mod utils;

#[doc(hidden)]
pub use ark_std::{
    borrow, cfg_into_iter, cfg_iter, cfg_iter_mut, end_timer, fmt, hash, io, iter, marker, ops,
    rand, start_timer, One, Zero,
};

#[cfg(feature = "parallel")]
#[doc(hidden)]
pub use rayon;
