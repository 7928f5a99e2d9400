use crate::bn254::{Fq2, Fq2Parameters};
use crate::field::{Fp6, Fp6Params};

/// The parameters of `Fq6 = Fq2[v] / (v^3 - (9 + u))`.
pub struct Fq6Parameters;

impl Fp6Params for Fq6Parameters {
    type Fp2Params = Fq2Parameters;

    /// `9 + u`
    const NONRESIDUE: Fq2 = Fq2::from_raw([9, 0, 0, 0], [1, 0, 0, 0]);

    const FROBENIUS_COEFF_C1: [Fq2; 6] = [
        Fq2::from_raw([0x0000000000000001, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0x99e39557176f553d, 0xb78cc310c2c3330c, 0x4c0bec3cf559b143, 0x2fb347984f7911f7], [0x1665d51c640fcba2, 0x32ae2a1d0b7c9dce, 0x4ba4cc8bd75a0794, 0x16c9e55061ebae20]),
        Fq2::from_raw([0xe4bd44e5607cfd48, 0xc28f069fbb966e3d, 0x5e6dd9e7e0acccb0, 0x30644e72e131a029], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0x7b746ee87bdcfb6d, 0x805ffd3d5d6942d3, 0xbaff1c77959f25ac, 0x0856e078b755ef0a], [0x380cab2baaa586de, 0x0fdf31bf98ff2631, 0xa9f30e6dec26094f, 0x04f1de41b3d1766f]),
        Fq2::from_raw([0x5763473177fffffe, 0xd4f263f1acdb5c4f, 0x59e26bcea0d48bac, 0x0000000000000000], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0x62e913ee1dada9e4, 0xf71614d4b0b71f3a, 0x699582b87809d9ca, 0x28be74d4bb943f51], [0xedae0bcec9c7aac7, 0x54f40eb4c3f6068d, 0xc2b86abcbe01477a, 0x14a88ae0cb747b99]),
    ];

    const FROBENIUS_COEFF_C2: [Fq2; 6] = [
        Fq2::from_raw([0x0000000000000001, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0x848a1f55921ea762, 0xd33365f7be94ec72, 0x80f3c0b75a181e84, 0x05b54f5e64eea801], [0xc13b4711cd2b8126, 0x3685d2ea1bdec763, 0x9f3a80b03b0b1c92, 0x2c145edbe7fd8aee]),
        Fq2::from_raw([0x5763473177fffffe, 0xd4f263f1acdb5c4f, 0x59e26bcea0d48bac, 0x0000000000000000], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0x0e1a92bc3ccbf066, 0xe633094575b06bcb, 0x19bee0f7b5b2444e, 0x0bc58c6611c08dab], [0x5fe3ed9d730c239f, 0xa44a9e08737f96e5, 0xfeb0f6ef0cd21d04, 0x23d5e999e1910a12]),
        Fq2::from_raw([0xe4bd44e5607cfd48, 0xc28f069fbb966e3d, 0x5e6dd9e7e0acccb0, 0x30644e72e131a029], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0xa97bda050992657f, 0xde1afb54342c724f, 0x1d9da40771b6f589, 0x1ee972ae6a826a7d], [0x5721e37e70c255c9, 0x54326430418536d1, 0xd2b513cdbb257724, 0x10de546ff8d4ab51]),
    ];

    /// `(a + b * u) * (9 + u) = (9a - b) + (a + 9b) * u`
    #[inline]
    fn mul_fp2_by_nonresidue(fe: &Fq2) -> Fq2 {
        let nine_c0 = fe.c0.double().double().double() + &fe.c0;
        let nine_c1 = fe.c1.double().double().double() + &fe.c1;
        Fq2::new(nine_c0 - &fe.c1, nine_c1 + &fe.c0)
    }
}

/// An element of the cubic extension over [`Fq2`].
pub type Fq6 = Fp6<Fq6Parameters>;
