use crate::field::{Fp, FpParams};
use crate::prelude::*;
use digest::{consts::U64, Digest};

/// The constants of the BN254 base field `p`.
pub struct FqParameters;

impl FpParams for FqParameters {
    const MODULUS: [u64; 4] = [
        0x3c208c16d87cfd47,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];
    const R: [u64; 4] = [
        0xd35d438dc58f0d9d,
        0x0a78eb28f5c70b3d,
        0x666ea36f7879462c,
        0x0e0a77c19a07df2f,
    ];
    const R2: [u64; 4] = [
        0xf32cfc5b538afa89,
        0xb5e71911d44501fb,
        0x47ab1eff0a417ff6,
        0x06d89f71cab8351f,
    ];
    const INV: u64 = 0x87d20782e4866389;
    const GENERATOR: [u64; 4] = [3, 0, 0, 0];
    const TWO_ADICITY: u32 = 1;
    const ROOT_OF_UNITY: [u64; 4] = [
        0x3c208c16d87cfd46,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];
    const T: [u64; 4] = [
        0x9e10460b6c3e7ea3,
        0xcbc0b548b438e546,
        0xdc2822db40c0ac2e,
        0x183227397098d014,
    ];
    const T_MINUS_ONE_DIV_TWO: [u64; 4] = [
        0x4f082305b61f3f51,
        0x65e05aa45a1c72a3,
        0x6e14116da0605617,
        0x0c19139cb84c680a,
    ];
    const MODULUS_MINUS_ONE_DIV_TWO: [u64; 4] = [
        0x9e10460b6c3e7ea3,
        0xcbc0b548b438e546,
        0xdc2822db40c0ac2e,
        0x183227397098d014,
    ];
    const NUM_BITS: u32 = 254;
}

/// An element of the BN254 base field.
pub type Fq = Fp<FqParameters>;

/// The wrapped struct for the BN254 base field
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct BN254Fq(pub(crate) Fq);

impl_wrapped_prime_field!(BN254Fq, Fq, FqParameters);
