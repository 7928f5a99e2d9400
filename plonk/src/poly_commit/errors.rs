use ark_std::fmt;
use quill_algebra::prelude::AlgebraError;

/// Polynomial commitment scheme errors.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PolyComSchemeError {
    /// It is not possible to compute the proof as F(x) != y.
    PCSProveEvalError,
    /// Polynomial degree does not match the public parameters size.
    PCSCommitError,
    /// The degree of the polynomial is higher than the maximum degree allowed.
    DegreeError,
    /// The evaluation domain size is not a power of two or exceeds the two-adicity of the field.
    DomainSizeError,
    /// The reference string bytes are malformed.
    DeserializationError,
    /// An underlying group or field operation failed.
    Algebra(AlgebraError),
}

impl fmt::Display for PolyComSchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolyComSchemeError::PCSProveEvalError => {
                f.write_str("It is not possible to compute the proof as F(x) != y.")
            }
            PolyComSchemeError::PCSCommitError => {
                f.write_str("Polynomial degree does not match the public parameters size.")
            }
            PolyComSchemeError::DegreeError => f.write_str(
                "The degree of the polynomial is higher than the maximum degree allowed.",
            ),
            PolyComSchemeError::DomainSizeError => {
                f.write_str("The evaluation domain size is not supported by the field.")
            }
            PolyComSchemeError::DeserializationError => {
                f.write_str("The reference string bytes are malformed.")
            }
            PolyComSchemeError::Algebra(e) => write!(f, "Algebra: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PolyComSchemeError {}

impl From<AlgebraError> for PolyComSchemeError {
    fn from(e: AlgebraError) -> PolyComSchemeError {
        PolyComSchemeError::Algebra(e)
    }
}
