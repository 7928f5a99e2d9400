use ark_std::{error, fmt};

/// Errors raised by the field, curve and pairing layers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum AlgebraError {
    DecompressElementError,
    DeserializationError,
    SerializationError,
    IndexError,
    ParameterError,
    NotOnCurveError,
    NotInSubgroupError,
    NonCanonicalEncodingError,
    GroupInversionError,
    DomainSizeError,
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AlgebraError::*;
        f.write_str(match self {
            DecompressElementError => "Could not decompress group element",
            DeserializationError => "Could not deserialize object",
            SerializationError => "Could not serialize object",
            IndexError => "Index out of bounds",
            ParameterError => "Unexpected parameter for method or function",
            NotOnCurveError => "Point is not on the curve",
            NotInSubgroupError => "Point is not in the prime order subgroup",
            NonCanonicalEncodingError => "Field element encoding is not below the modulus",
            GroupInversionError => "Element is not invertible",
            DomainSizeError => "Evaluation domain size is not supported by the field",
        })
    }
}

impl error::Error for AlgebraError {}
