pub use crate::borrow::Borrow;
pub use crate::errors::AlgebraError;
pub use crate::fmt::Formatter;
pub use crate::iter::{Product, Sum};
pub use crate::marker::PhantomData;
pub use crate::ops::*;
pub use crate::rand::{CryptoRng, Rng, RngCore, SeedableRng};
pub use crate::rand_helper::test_rng;
pub use crate::serialization::*;
pub use crate::traits::{CurveGroup, Domain, Group, LegendreSymbol, Pairing, Scalar};
pub use crate::utils::*;
pub use crate::{not_matches, serialize_deserialize, One, Zero};
pub use ark_std::{string::String, vec, vec::Vec};
pub use itertools::Itertools;

/// The result type of the algebra crate.
pub type Result<T, E = AlgebraError> = core::result::Result<T, E>;
