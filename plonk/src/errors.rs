use crate::poly_commit::errors::PolyComSchemeError;
use ark_std::{fmt, string::String};
use quill_algebra::prelude::AlgebraError;

/// The result type of the PLONK protocol.
pub type Result<T> = core::result::Result<T, PlonkError>;

#[derive(Debug, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum PlonkError {
    /// Algebra error
    Algebra(AlgebraError),
    /// Polynomial commitment error.
    PolyCom(PolyComSchemeError),
    /// Error with message
    Message(String),
    /// Group not found.
    GroupNotFound(usize),
    /// Error occurred when prove.
    ProofError,
    /// The witness if error when prove.
    ProofErrorInvalidWitness,
    /// Polynomial commitment error.
    CommitmentError,
    /// Error occurred when setup.
    SetupError,
    /// Error occurred when verify.
    VerificationError,
    /// Division by zero.
    DivisionByZero,
    /// Function params error.
    FuncParamsError,
    /// Challenge error
    ChallengeError,
    /// A prover round was run out of order.
    RoundOrderError,
    /// The evaluation claimed for an opening proof does not hold.
    PCSProveEvalError,
    /// The degree of the polynomial is higher than the maximum degree supported.
    DegreeError,
    /// Parameters or proofs could not be encoded or decoded.
    SerializationError,
}

impl fmt::Display for PlonkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PlonkError::*;
        match self {
            Algebra(e) => write!(f, "Algebra: {}", e),
            PolyCom(e) => write!(f, "Polynomial commitment: {}", e),
            Message(e) => f.write_str(e),
            GroupNotFound(n) => write!(f, "Group of order {} not found.", n),
            ProofError => f.write_str("Proof error."),
            ProofErrorInvalidWitness => f.write_str("Proof error invalid witness."),
            CommitmentError => f.write_str("Commitment error."),
            SetupError => f.write_str("Setup error."),
            VerificationError => f.write_str("Verification error."),
            DivisionByZero => f.write_str("Division by zero."),
            FuncParamsError => f.write_str("Function params error."),
            ChallengeError => f.write_str("Challenge error."),
            RoundOrderError => f.write_str("Prover round executed out of order."),
            PCSProveEvalError => f.write_str("The evaluation claimed for an opening proof does not hold."),
            DegreeError => f.write_str(
                "The degree of the polynomial is higher than the maximum degree supported.",
            ),
            SerializationError => f.write_str("Serialization error."),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlonkError {}

impl From<AlgebraError> for PlonkError {
    fn from(e: AlgebraError) -> PlonkError {
        PlonkError::Algebra(e)
    }
}

impl From<PolyComSchemeError> for PlonkError {
    fn from(e: PolyComSchemeError) -> PlonkError {
        match e {
            PolyComSchemeError::DegreeError => PlonkError::DegreeError,
            PolyComSchemeError::PCSProveEvalError => PlonkError::PCSProveEvalError,
            e => PlonkError::PolyCom(e),
        }
    }
}
