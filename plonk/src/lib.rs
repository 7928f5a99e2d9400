//! PLONK proofs over BN254: polynomial commitments, the TurboPLONK constraint
//! system with arithmetic, elliptic curve, range and logic gates, and the
//! prover and verifier.
#![allow(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::too_many_arguments)]

#[macro_use]
extern crate serde_derive;

/// Module for error handling.
pub mod errors;

/// Module for the TurboPLONK protocol.
pub mod plonk;

/// Module for polynomial commitment schemes.
pub mod poly_commit;
