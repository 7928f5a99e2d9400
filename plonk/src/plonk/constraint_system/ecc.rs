use crate::plonk::constraint_system::{TurboCS, VarIndex};
use quill_algebra::{bn254::BN254Scalar, ed_on_bn254::BabyJubjubPoint, prelude::*};

type F = BN254Scalar;

/// Represent a curve point in Affine form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point(F, F);

/// The witness indices for x/y-coordinates of a point
#[derive(Clone, Copy, Debug)]
pub struct PointVar(VarIndex, VarIndex);

/// PointVar plus the corresponding Baby Jubjub point
pub struct ExtendedPointVar(PointVar, BabyJubjubPoint);

impl ExtendedPointVar {
    /// Return the point variable.
    pub fn get_var(&self) -> &PointVar {
        &self.0
    }

    /// Return the point value.
    pub fn get_point(&self) -> &BabyJubjubPoint {
        &self.1
    }

    /// Return the point variable
    pub fn into_point_var(self) -> PointVar {
        self.0
    }
}

impl Point {
    /// Create a point.
    pub fn new(x: F, y: F) -> Point {
        Point(x, y)
    }

    /// Return x-coordinate of the point.
    pub fn get_x(&self) -> &F {
        &self.0
    }

    /// Return y-coordinate of the point.
    pub fn get_y(&self) -> &F {
        &self.1
    }
}

impl From<&BabyJubjubPoint> for Point {
    fn from(point: &BabyJubjubPoint) -> Point {
        Point(point.get_x(), point.get_y())
    }
}

impl PointVar {
    /// Crate a point variable.
    pub fn new(x_var: VarIndex, y_var: VarIndex) -> PointVar {
        PointVar(x_var, y_var)
    }

    /// Return x-coordinate of the point variable.
    pub fn get_x(&self) -> VarIndex {
        self.0
    }

    /// Return y-coordinate of the point variable.
    pub fn get_y(&self) -> VarIndex {
        self.1
    }
}

/// The Baby Jubjub coefficient `a`.
fn edwards_a() -> F {
    F::from(168700u32)
}

/// The Baby Jubjub coefficient `d`.
fn edwards_d() -> F {
    F::from(168696u32)
}

/// Given a base point [G] and a scalar s, denote as s[G] the scalar multiplication
/// The function compute
/// {4^i * [G]}_{i=0..n-1}, {2 * 4^i * [G]}_{i=0..n-1}, and {3 * 4^i * [G]}_{i=0..n-1}
pub(crate) fn compute_base_multiples(
    base: BabyJubjubPoint,
    n: usize,
) -> [Vec<BabyJubjubPoint>; 3] {
    let mut bases = [vec![], vec![], vec![]];
    let mut point = base;
    for i in 0..n {
        let point2 = point.double();
        let point3 = point2.add(&point);
        bases[0].push(point);
        bases[2].push(point3);
        if i < n - 1 {
            point = point2.double();
        }
        bases[1].push(point2);
    }
    bases
}

impl TurboCS<F> {
    /// Create variables for a point.
    pub fn new_point_variable(&mut self, point: Point) -> PointVar {
        let x = self.new_variable(point.0);
        let y = self.new_variable(point.1);
        PointVar(x, y)
    }

    /// Insert constraint for a public IO point to be decided online.
    pub fn prepare_pi_point_variable(&mut self, point_var: PointVar) {
        self.prepare_pi_variable(point_var.0);
        self.prepare_pi_variable(point_var.1);
    }

    /// Insert a curve addition gate: (x1, y1) + (x2, y2) = (x3, y3)
    ///
    /// x-coordinate constraint:
    /// x3 = x1 * y2 + y1 * x2 - d * x1 * y1 * x2 * y2 * x3
    /// wirings: w1 = x1, w2 = y2, w3 = x2, w4 = y1, w_out = x3
    /// selectors: qm1 = 1, qm2 = 1, q_ecc = -d, qo = 1
    ///
    /// y-coordinate constraint:
    /// y3 = y1 * y2 - a * x1 * x2 + d * x1 * y1 * x2 * y2 * y3
    /// wirings: w1 = x1, w2 = x2, w3 = y1, w4 = y2, w_out = y3
    /// selectors: qm1 = -a, qm2 = 1, q_ecc = d, qo = 1
    pub(crate) fn insert_ecc_add_gate(
        &mut self,
        p1_var: &PointVar,
        p2_var: &PointVar,
        p_out_var: &PointVar,
    ) {
        let one = F::one();
        let edwards_d = edwards_d();
        self.insert_ecc_gate(
            [p1_var.0, p2_var.1, p2_var.0, p1_var.1, p_out_var.0],
            one,
            one,
            edwards_d.neg(),
        );
        self.insert_ecc_gate(
            [p1_var.0, p2_var.0, p1_var.1, p2_var.1, p_out_var.1],
            edwards_a().neg(),
            one,
            edwards_d,
        );
    }

    /// Given two elliptic curve point variables `[P1]` and `[P2]`, returns `[P1] + [P2]`
    pub fn ecc_add(
        &mut self,
        p1_var: &PointVar,
        p2_var: &PointVar,
        p1_ext: &BabyJubjubPoint,
        p2_ext: &BabyJubjubPoint,
    ) -> ExtendedPointVar {
        assert!(p1_var.0 < self.num_vars, "p1.x variable index out of bound");
        assert!(p1_var.1 < self.num_vars, "p1.y variable index out of bound");
        assert!(p2_var.0 < self.num_vars, "p2.x variable index out of bound");
        assert!(p2_var.1 < self.num_vars, "p2.y variable index out of bound");
        let p_out_ext = p1_ext.add(p2_ext);
        let p_out_var = self.new_point_variable(Point::from(&p_out_ext));
        self.insert_ecc_add_gate(p1_var, p2_var, &p_out_var);
        ExtendedPointVar(p_out_var, p_out_ext)
    }

    /// Given public base points [G0 = identity, G1, G2, G3] and
    /// 2 boolean variables b0, b1 \in {0, 1}, returns G_{b0 + 2 * b1}
    ///
    /// x-coordinate constraint:
    /// x = b0 * (1-b1) * G1.x + (1-b0) * b1 * G2.x + b0 * b1 * G3.x
    /// wiring: w1 = b0, w2 = b1, w_out = x
    /// selectors: q1 = G1.x, q2 = G2.x, qm1 = G3.x - G2.x - G1.x, qo = 1
    ///
    /// y-coordinate constraint:
    /// y = (1-b0) * (1-b1) + b0 * (1-b1) * G1.y + (1-b0) * b1 * G2.y + b0 * b1 * G3.y
    /// wiring: w1 = b0, w2 = b1, w_out = y
    /// selectors: q1 = G1.y - 1, q2 = G2.y - 1, qm1 = G3.y - G2.y - G1.y + 1, qc = 1, qo = 1
    fn select_constant_points(
        &mut self,
        g1: &BabyJubjubPoint,
        g2: &BabyJubjubPoint,
        g3: &BabyJubjubPoint,
        b0_var: VarIndex,
        b1_var: VarIndex,
    ) -> ExtendedPointVar {
        assert!(b0_var < self.num_vars, "b0 variable index out of bound");
        assert!(b1_var < self.num_vars, "b1 variable index out of bound");
        let one = F::one();
        let p_out_ext: BabyJubjubPoint =
            match (self.witness[b0_var] == one, self.witness[b1_var] == one) {
                (false, false) => BabyJubjubPoint::get_identity(),
                (true, false) => *g1,
                (false, true) => *g2,
                (true, true) => *g3,
            };
        let p_out_var = self.new_point_variable(Point::from(&p_out_ext));

        let g1 = Point::from(g1);
        let g2 = Point::from(g2);
        let g3 = Point::from(g3);
        let zero_var = self.zero_var();

        // x-coordinate constraint
        let q_m1 = g3.0.sub(&g1.0.add(&g2.0));
        self.insert_lc_and_mul_gate(
            [b0_var, b1_var, zero_var, zero_var, p_out_var.0],
            [g1.0, g2.0],
            q_m1,
            F::zero(),
        );

        // y-coordinate constraint
        let q_m1 = g3.1.add(&one).sub(&g1.1.add(&g2.1));
        self.insert_lc_and_mul_gate(
            [b0_var, b1_var, zero_var, zero_var, p_out_var.1],
            [g1.1.sub(&one), g2.1.sub(&one)],
            q_m1,
            one,
        );

        ExtendedPointVar(p_out_var, p_out_ext)
    }

    /// `q1 * w1 + q2 * w2 + qm1 * w1 * w2 + qc = wo`.
    fn insert_lc_and_mul_gate(
        &mut self,
        wires: [VarIndex; 5],
        q_add: [F; 2],
        q_mul: F,
        q_c: F,
    ) {
        use crate::plonk::constraint_system::widget::{Q1, Q2, QC, QM1, QO};
        self.insert_gate(
            wires,
            &[
                (Q1, q_add[0]),
                (Q2, q_add[1]),
                (QM1, q_mul),
                (QC, q_c),
                (QO, F::one()),
            ],
        );
    }

    /// Fixed-base scalar multiplication:
    /// Given a base point `[G]` and an `n_bits`-bit secret scalar `s`, returns `s * [G]`.
    /// `n_bits` should be a positive even number.
    pub fn const_base_scalar_mul(
        &mut self,
        base: BabyJubjubPoint,
        scalar_var: VarIndex,
        n_bits: usize,
    ) -> PointVar {
        assert_eq!(n_bits & 1, 0, "n_bits is odd");
        assert!(n_bits > 0, "n_bits is not positive");

        let b_scalar_var = self.decompose_into_bits(scalar_var, n_bits);
        let [bases1, bases2, bases3] = compute_base_multiples(base, n_bits >> 1);
        self.const_base_scalar_mul_with_bases(&bases1, &bases2, &bases3, &b_scalar_var)
    }

    /// Fixed-base scalar multiplication with precomputed bases.
    /// To compute `s[G]` from base point G and secret scalar s, we set
    /// ```text
    /// bases0 = [identity]_{i=0..n-1},
    /// bases1 = [4^i * G]_{i=0..n-1},
    /// bases2 = [2 * 4^i * G]_{i=0..n-1}
    /// bases3 = [3 * 4^i * G]_{i=0..n-1}
    /// ```
    /// The binary representation of the secret scalar s: `[b0, ..., b_{2*n-1}]`
    /// Then
    /// ```text
    /// s[G] = \sum_{i=0..n-1} (b_{2*i} + 2 * b_{2*i+1}) * [4^i * G]
    ///      = \sum_{i=0..n-1} bases_{b_{2*i} + 2 * b_{2*i+1}}[i]
    /// ```
    pub fn const_base_scalar_mul_with_bases(
        &mut self,
        bases1: &[BabyJubjubPoint],
        bases2: &[BabyJubjubPoint],
        bases3: &[BabyJubjubPoint],
        b_scalar_var: &[VarIndex],
    ) -> PointVar {
        let n_bits = b_scalar_var.len();
        assert_eq!(n_bits & 1, 0, "n_bits is odd");
        assert!(n_bits > 0, "n_bits is not positive");
        let n_bits_half = n_bits >> 1;
        assert_eq!(n_bits_half, bases1.len(), "bases1 has wrong size");
        assert_eq!(n_bits_half, bases2.len(), "bases2 has wrong size");
        assert_eq!(n_bits_half, bases3.len(), "bases3 has wrong size");

        let mut p_var_ext = self.select_constant_points(
            &bases1[0],
            &bases2[0],
            &bases3[0],
            b_scalar_var[0],
            b_scalar_var[1],
        );
        for i in 1..n_bits_half {
            let tmp_var_ext = self.select_constant_points(
                &bases1[i],
                &bases2[i],
                &bases3[i],
                b_scalar_var[2 * i],
                b_scalar_var[2 * i + 1],
            );
            p_var_ext = self.ecc_add(&p_var_ext.0, &tmp_var_ext.0, &p_var_ext.1, &tmp_var_ext.1);
        }
        p_var_ext.0
    }
}

#[cfg(test)]
mod test {
    use crate::plonk::constraint_system::{ecc::Point, TurboCS};
    use quill_algebra::{bn254::BN254Scalar, ed_on_bn254::BabyJubjubPoint, prelude::*};

    #[test]
    fn test_ecc_add() {
        let mut cs = TurboCS::new();
        let p1_ext = BabyJubjubPoint::get_base();
        let p2_ext = p1_ext.double();
        let p3_ext = p1_ext.add(&p2_ext);
        let p1_point = Point::from(&p1_ext);
        let p2_point = Point::from(&p2_ext);
        let p3_point = Point::from(&p3_ext);
        let p1_var = cs.new_point_variable(p1_point);
        let p2_var = cs.new_point_variable(p2_point);
        let p3_var = cs.new_point_variable(p3_point);
        // check that addition works for two identical points.
        cs.insert_ecc_add_gate(&p1_var, &p1_var, &p2_var);
        cs.insert_ecc_add_gate(&p1_var, &p2_var, &p3_var);
        let mut witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness[..], &[]).is_ok());

        let p3_double_point = Point::from(&p3_ext.double());
        witness[p3_var.get_x()] = *p3_double_point.get_x();
        witness[p3_var.get_y()] = *p3_double_point.get_y();
        assert!(cs.verify_witness(&witness[..], &[]).is_err());
    }

    #[test]
    fn test_ecc_add_identity() {
        let mut cs = TurboCS::new();
        let p_ext = BabyJubjubPoint::get_base().double();
        let identity = BabyJubjubPoint::get_identity();
        let p_var = cs.new_point_variable(Point::from(&p_ext));
        let o_var = cs.new_point_variable(Point::from(&identity));
        let res = cs.ecc_add(&p_var, &o_var, &p_ext, &identity);
        assert_eq!(res.get_point(), &p_ext);
        let witness = cs.get_and_clear_witness();
        assert_eq!(witness[res.get_var().get_x()], p_ext.get_x());
        assert!(cs.verify_witness(&witness[..], &[]).is_ok());
    }

    #[test]
    fn test_scalar_mul() {
        let mut cs = TurboCS::new();
        let mut prng = test_rng();

        let scalar = BN254Scalar::random(&mut prng);
        let base_ext = BabyJubjubPoint::get_base();
        let p_out_ext = base_ext.mul_by_fr(&scalar);
        let p_out_plus_ext = p_out_ext.add(&base_ext);

        // build circuit
        let scalar_var = cs.new_variable(scalar);
        let p_out_var = cs.const_base_scalar_mul(base_ext, scalar_var, 254);
        let mut witness = cs.get_and_clear_witness();
        assert_eq!(witness[p_out_var.get_x()], p_out_ext.get_x());
        assert_eq!(witness[p_out_var.get_y()], p_out_ext.get_y());
        assert!(cs.verify_witness(&witness[..], &[]).is_ok());

        // wrong witness: point = GENERATOR * (scalar + 1)
        let p_out_plus_point = Point::from(&p_out_plus_ext);
        witness[p_out_var.get_x()] = *p_out_plus_point.get_x();
        witness[p_out_var.get_y()] = *p_out_plus_point.get_y();
        assert!(cs.verify_witness(&witness[..], &[]).is_err());
    }

    #[test]
    fn test_scalar_mul_with_zero_scalar() {
        let mut cs = TurboCS::new();
        let base_ext = BabyJubjubPoint::get_base();
        let base_point = Point::from(&base_ext);
        let scalar_var = cs.new_variable(BN254Scalar::zero());
        let p_out_var = cs.const_base_scalar_mul(base_ext, scalar_var, 64);
        let mut witness = cs.get_and_clear_witness();

        // check p_out is an identity point
        assert_eq!(witness[p_out_var.get_x()], BN254Scalar::zero());
        assert_eq!(witness[p_out_var.get_y()], BN254Scalar::one());
        assert!(cs.verify_witness(&witness[..], &[]).is_ok());

        // wrong witness: p_out = GENERATOR
        witness[p_out_var.get_x()] = *base_point.get_x();
        witness[p_out_var.get_y()] = *base_point.get_y();
        assert!(cs.verify_witness(&witness[..], &[]).is_err());
    }
}
