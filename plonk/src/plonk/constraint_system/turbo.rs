//! The Turbo PLONK constraint system.
//!
//! Each gate has five wires `(w1, w2, w3, w4, wo)` and twelve selectors.
//! Besides the arithmetic gates it provides base-4 range checks and
//! bitwise AND/XOR gates through the range and logic widgets. The gates
//! for Edwards curve operations are in ecc.rs.
use super::{
    widget::{
        Widget, N_ALPHA_POWERS, Q1, Q2, Q3, Q4, QC, QM1, QM2, QO, Q_AND, Q_ECC, Q_RANGE, Q_XOR,
    },
    ConstraintSystem, CsIndex, VarIndex,
};
use crate::errors::{PlonkError, Result};
use quill_algebra::prelude::*;

/// The wires number of a gate in Turbo CS.
pub const N_WIRES_PER_GATE: usize = 5;

/// The selectors number in Turbo CS.
pub const N_SELECTORS: usize = 12;

/// Turbo PLONK Constraint System.
#[derive(Serialize, Deserialize)]
pub struct TurboCS<F> {
    /// the selectors of the circuit.
    pub selectors: Vec<Vec<F>>,
    /// the wiring of the circuit.
    pub wiring: [Vec<VarIndex>; N_WIRES_PER_GATE],
    /// the number of variable.
    pub num_vars: usize,
    /// the size of circuit.
    pub size: usize,
    /// the public constraint variables indices.
    pub public_vars_constraint_indices: Vec<CsIndex>,
    /// the public witness variables indices.
    pub public_vars_witness_indices: Vec<VarIndex>,
    /// only for verifier use.
    pub verifier_only: bool,
    /// A private witness for the circuit, cleared after computing a proof.
    pub witness: Vec<F>,
}

impl<F: Domain> ConstraintSystem for TurboCS<F> {
    type Field = F;

    fn size(&self) -> usize {
        self.size
    }

    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn wiring(&self) -> &[Vec<usize>] {
        &self.wiring[..]
    }

    /// The quotient numerator has degree at most `6 * size + 10`
    /// once the wires and the permutation polynomial are blinded.
    fn quot_eval_dom_size(&self) -> usize {
        (6 * self.size + 11).next_power_of_two()
    }

    fn n_wires_per_gate() -> usize {
        N_WIRES_PER_GATE
    }

    fn num_selectors(&self) -> usize {
        N_SELECTORS
    }

    fn widgets(&self) -> &[Widget] {
        &Widget::ALL
    }

    fn public_vars_constraint_indices(&self) -> &[CsIndex] {
        &self.public_vars_constraint_indices
    }

    fn public_vars_witness_indices(&self) -> &[VarIndex] {
        &self.public_vars_witness_indices
    }

    fn selector(&self, index: usize) -> Result<&[F]> {
        if index >= self.selectors.len() {
            return Err(PlonkError::FuncParamsError);
        }
        Ok(&self.selectors[index])
    }

    fn is_verifier_only(&self) -> bool {
        self.verifier_only
    }

    fn shrink_to_verifier_only(&self) -> Self {
        Self {
            selectors: vec![],
            wiring: [vec![], vec![], vec![], vec![], vec![]],
            num_vars: self.num_vars,
            size: self.size,
            public_vars_constraint_indices: vec![],
            public_vars_witness_indices: vec![],
            verifier_only: true,
            witness: vec![],
        }
    }
}

/// A helper function that computes the little-endian binary
/// representation of a value. Each bit is represented as a field
/// element.
fn compute_binary_le<F: Scalar>(bytes: &[u8]) -> Vec<F> {
    let mut res = vec![];
    for byte in bytes.iter() {
        let mut tmp = *byte;
        for _ in 0..8 {
            if (tmp & 1) == 0 {
                res.push(F::zero());
            } else {
                res.push(F::one());
            }
            tmp >>= 1;
        }
    }
    res
}

/// The base-4 digits of a value, least significant first.
fn compute_quads_le<F: Scalar>(value: &F, n_quads: usize) -> Vec<u32> {
    let limbs = value.get_little_endian_u64();
    (0..n_quads)
        .map(|i| {
            let bit = 2 * i;
            match limbs.get(bit / 64) {
                Some(limb) => ((limb >> (bit % 64)) & 3) as u32,
                None => 0,
            }
        })
        .collect()
}

impl<F: Domain> Default for TurboCS<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Domain> TurboCS<F> {
    /// Create a TurboPLONK constraint system with a certain field size.
    /// With default witness [F::zero(), F::one()], both pinned by constant gates.
    pub fn new() -> TurboCS<F> {
        let selectors: Vec<Vec<F>> = core::iter::repeat(vec![]).take(N_SELECTORS).collect();
        let mut cs = TurboCS {
            selectors,
            wiring: [vec![], vec![], vec![], vec![], vec![]],
            num_vars: 2,
            size: 0,
            public_vars_constraint_indices: vec![],
            public_vars_witness_indices: vec![],
            verifier_only: false,
            witness: vec![F::zero(), F::one()],
        };
        cs.insert_constant_gate(0, F::zero());
        cs.insert_constant_gate(1, F::one());
        cs
    }

    /// 0-index is Zero
    pub fn zero_var(&self) -> VarIndex {
        0
    }

    /// 1-index is One
    pub fn one_var(&self) -> VarIndex {
        1
    }

    /// Append a gate with the given wires and nonzero selectors.
    pub(crate) fn insert_gate(
        &mut self,
        wires: [VarIndex; N_WIRES_PER_GATE],
        selectors: &[(usize, F)],
    ) {
        assert!(
            wires.iter().all(|&x| x < self.num_vars),
            "wire index out of bound"
        );
        for selector in self.selectors.iter_mut() {
            selector.push(F::zero());
        }
        for (index, value) in selectors.iter() {
            self.selectors[*index][self.size] = *value;
        }
        for (i, wire) in wires.iter().enumerate() {
            self.wiring[i].push(*wire);
        }
        self.finish_new_gate();
    }

    /// Add a linear combination gate: wo = w1 * q1 + w2 * q2 + w3 * q3 + w4 * q4.
    pub fn insert_lc_gate(
        &mut self,
        wires_in: &[VarIndex; 4],
        wire_out: VarIndex,
        q1: F,
        q2: F,
        q3: F,
        q4: F,
    ) {
        self.insert_gate(
            [wires_in[0], wires_in[1], wires_in[2], wires_in[3], wire_out],
            &[(Q1, q1), (Q2, q2), (Q3, q3), (Q4, q4), (QO, F::one())],
        );
    }

    /// Add an Add gate. (left, right, out).
    pub fn insert_add_gate(&mut self, left_var: VarIndex, right_var: VarIndex, out_var: VarIndex) {
        self.insert_lc_gate(
            &[left_var, right_var, 0, 0],
            out_var,
            F::one(),
            F::one(),
            F::zero(),
            F::zero(),
        );
    }

    /// Add a Sub gate. (left, right, out).
    pub fn insert_sub_gate(&mut self, left_var: VarIndex, right_var: VarIndex, out_var: VarIndex) {
        self.insert_lc_gate(
            &[left_var, right_var, 0, 0],
            out_var,
            F::one(),
            F::one().neg(),
            F::zero(),
            F::zero(),
        );
    }

    /// Add a Mul gate. (left, right, out).
    pub fn insert_mul_gate(&mut self, left_var: VarIndex, right_var: VarIndex, out_var: VarIndex) {
        self.insert_gate(
            [left_var, right_var, 0, 0, out_var],
            &[(QM1, F::one()), (QO, F::one())],
        );
    }

    /// Add a variable (with actual value `value`) into the constraint system.
    pub fn new_variable(&mut self, value: F) -> VarIndex {
        self.num_vars += 1;
        self.witness.push(value);
        self.num_vars - 1
    }

    /// Add a vector of variables into the constraint system.
    pub fn add_variables(&mut self, values: &[F]) {
        self.num_vars += values.len();
        self.witness.extend_from_slice(values);
    }

    /// Check if the gate is satisfied.
    /// Gates reading the next row are checked by `verify_witness` only.
    #[cfg(feature = "debug")]
    pub fn finish_new_gate(&mut self) {
        self.size += 1;
        let row = self.size - 1;
        let sel_vals: Vec<F> = self.selectors.iter().map(|s| s[row]).collect();
        let wire_vals: Vec<F> = self
            .wiring
            .iter()
            .map(|w| self.witness.get(w[row]).copied().unwrap_or_default())
            .collect();
        let mut acc = [F::zero(); N_ALPHA_POWERS];
        for widget in Widget::ALL.iter().filter(|w| !w.uses_next_row()) {
            widget.accumulate_identities(&sel_vals, &wire_vals, &wire_vals, &mut acc);
        }
        if !acc[0].is_zero() && !self.public_vars_constraint_indices.contains(&row) {
            println!("cs constraint {} not satisfied.", row);
        }
    }

    #[cfg(not(feature = "debug"))]
    #[inline]
    /// Increase the gate count without checking.
    pub fn finish_new_gate(&mut self) {
        self.size += 1;
    }

    /// Create an output variable and insert a linear combination gate.
    pub fn linear_combine(
        &mut self,
        wires_in: &[VarIndex; 4],
        q1: F,
        q2: F,
        q3: F,
        q4: F,
    ) -> VarIndex {
        assert!(
            wires_in.iter().all(|&x| x < self.num_vars),
            "input wire index out of bound"
        );
        let w0q1 = self.witness[wires_in[0]].mul(&q1);
        let w1q2 = self.witness[wires_in[1]].mul(&q2);
        let w2q3 = self.witness[wires_in[2]].mul(&q3);
        let w3q4 = self.witness[wires_in[3]].mul(&q4);
        let mut lc = w0q1;
        lc.add_assign(&w1q2);
        lc.add_assign(&w2q3);
        lc.add_assign(&w3q4);
        let wire_out = self.new_variable(lc);
        self.insert_lc_gate(wires_in, wire_out, q1, q2, q3, q4);
        wire_out
    }

    /// Create an output variable and insert an addition gate.
    pub fn add(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        assert!(left_var < self.num_vars, "left_var index out of bound");
        assert!(right_var < self.num_vars, "right_var index out of bound");
        let out_var = self.new_variable(self.witness[left_var].add(&self.witness[right_var]));
        self.insert_add_gate(left_var, right_var, out_var);
        out_var
    }

    /// Create an output variable and insert a subraction gate.
    pub fn sub(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        assert!(left_var < self.num_vars, "left_var index out of bound");
        assert!(right_var < self.num_vars, "right_var index out of bound");
        let out_var = self.new_variable(self.witness[left_var].sub(&self.witness[right_var]));
        self.insert_sub_gate(left_var, right_var, out_var);
        out_var
    }

    /// Add a constraint that `left_var` and `right_var` have the same value.
    pub fn equal(&mut self, left_var: VarIndex, right_var: VarIndex) {
        let zero_var = self.zero_var();
        self.insert_sub_gate(left_var, right_var, zero_var);
    }

    /// Create an output variable and insert a multiplication gate.
    pub fn mul(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        assert!(left_var < self.num_vars, "left_var index out of bound");
        assert!(right_var < self.num_vars, "right_var index out of bound");
        let out_var = self.new_variable(self.witness[left_var].mul(&self.witness[right_var]));
        self.insert_mul_gate(left_var, right_var, out_var);
        out_var
    }

    /// Add a Boolean constrain `var` by adding a multiplication gate:
    /// `witness[var] * witness[var] = witness[var]`
    pub fn insert_boolean_gate(&mut self, var: VarIndex) {
        self.insert_mul_gate(var, var, var);
    }

    /// Enforce a range constraint `0 <= witness[var] < 2^n_bits` with the range widget.
    ///
    /// The value is split into base-4 digits, most significant first, and
    /// the accumulators `a_0 = 0, a_{j+1} = 4 * a_j + digit_j` are laid out four
    /// per row, so the last accumulator is read from `w1` of a closing row holding `var`.
    /// Leading digits beyond `n_bits` are wired to the zero variable, and for an odd
    /// `n_bits` the top digit is boolean constrained.
    pub fn range_check(&mut self, var: VarIndex, n_bits: usize) {
        assert!(var < self.num_vars, "var index out of bound");
        assert!(n_bits >= 1, "the number of bits is zero");
        let n_quads = (n_bits + 1) / 2;
        let n_rows = (n_quads + 3) / 4;
        let n_padded = 4 * n_rows - n_quads;

        let quads = compute_quads_le(&self.witness[var], n_quads);
        let zero_var = self.zero_var();
        let four = F::from(4u32);

        // accumulators a_0, ..., a_{4 * n_rows - 1}
        let mut accumulators = vec![zero_var; n_padded + 1];
        let mut acc_value = F::zero();
        for quad in quads.iter().rev().take(n_quads - 1) {
            acc_value = acc_value.mul(&four).add(&F::from(*quad));
            let acc_var = self.new_variable(acc_value);
            accumulators.push(acc_var);
        }
        if n_bits % 2 == 1 {
            let top = if n_quads == 1 { var } else { accumulators[n_padded + 1] };
            self.insert_boolean_gate(top);
        }

        for row in accumulators.chunks(4) {
            self.insert_gate(
                [row[0], row[1], row[2], row[3], zero_var],
                &[(Q_RANGE, F::one())],
            );
        }
        self.insert_gate([var, zero_var, zero_var, zero_var, zero_var], &[]);
    }

    /// Decompose `witness[var]` into `n_bits` boolean constrained variables,
    /// least significant first, and constrain their weighted sum to `var`.
    pub fn decompose_into_bits(&mut self, var: VarIndex, n_bits: usize) -> Vec<VarIndex> {
        assert!(var < self.num_vars, "var index out of bound");
        assert!(n_bits >= 2, "the number of bits is less than two");
        let witness_bytes = self.witness[var].to_bytes();
        let mut binary_repr = compute_binary_le::<F>(&witness_bytes);
        while binary_repr.len() < n_bits {
            binary_repr.push(F::zero());
        }

        let b: Vec<VarIndex> = binary_repr
            .into_iter()
            .take(n_bits)
            .map(|val| self.new_variable(val))
            .collect();
        for bit in b.iter() {
            self.insert_boolean_gate(*bit);
        }

        let one = F::one();
        let two = one.add(&one);
        let four = two.add(&two);
        let eight = four.add(&four);
        let bin = vec![one, two, four, eight];

        let mut acc = b[n_bits - 1];
        let m = (n_bits - 2) / 3;
        for i in 0..m {
            acc = self.linear_combine(
                &[
                    acc,
                    b[n_bits - 1 - i * 3 - 1],
                    b[n_bits - 1 - i * 3 - 2],
                    b[n_bits - 1 - i * 3 - 3],
                ],
                bin[3],
                bin[2],
                bin[1],
                bin[0],
            );
        }
        let zero = F::zero();
        match (n_bits - 1) - 3 * m {
            1 => self.insert_lc_gate(&[acc, b[0], 0, 0], var, bin[1], bin[0], zero, zero),
            2 => self.insert_lc_gate(&[acc, b[1], b[0], 0], var, bin[2], bin[1], bin[0], zero),
            _ => self.insert_lc_gate(
                &[acc, b[2], b[1], b[0]],
                var,
                bin[3],
                bin[2],
                bin[1],
                bin[0],
            ),
        }
        b
    }

    /// Return a variable holding `witness[left] AND witness[right]`.
    /// Both inputs are range checked to `n_bits`, which must be even.
    pub fn and(&mut self, left_var: VarIndex, right_var: VarIndex, n_bits: usize) -> VarIndex {
        self.logic_gate(left_var, right_var, n_bits, true)
    }

    /// Return a variable holding `witness[left] XOR witness[right]`.
    /// Both inputs are range checked to `n_bits`, which must be even.
    pub fn xor(&mut self, left_var: VarIndex, right_var: VarIndex, n_bits: usize) -> VarIndex {
        self.logic_gate(left_var, right_var, n_bits, false)
    }

    /// One row per base-4 digit with wires `(a_j, b_j, c_j, digit_a * digit_b, 0)`,
    /// where `a_j, b_j, c_j` accumulate the digits of the inputs and of the output,
    /// followed by a closing row `(a, b, c, 0, 0)`.
    fn logic_gate(
        &mut self,
        left_var: VarIndex,
        right_var: VarIndex,
        n_bits: usize,
        is_and: bool,
    ) -> VarIndex {
        assert!(left_var < self.num_vars, "left_var index out of bound");
        assert!(right_var < self.num_vars, "right_var index out of bound");
        assert!(n_bits > 0 && n_bits % 2 == 0, "n_bits is not a positive even number");
        let n_quads = n_bits / 2;
        let quads_a = compute_quads_le(&self.witness[left_var], n_quads);
        let quads_b = compute_quads_le(&self.witness[right_var], n_quads);
        let zero_var = self.zero_var();
        let four = F::from(4u32);

        let (mut acc_a, mut acc_b, mut acc_c) = (F::zero(), F::zero(), F::zero());
        let (mut var_a, mut var_b, mut var_c) = (zero_var, zero_var, zero_var);
        let selector = if is_and { Q_AND } else { Q_XOR };
        for (j, (qa, qb)) in quads_a.iter().rev().zip(quads_b.iter().rev()).enumerate() {
            let qc = if is_and { qa & qb } else { qa ^ qb };
            let product = self.new_variable(F::from(qa * qb));
            self.insert_gate(
                [var_a, var_b, var_c, product, zero_var],
                &[(selector, F::one())],
            );

            acc_a = acc_a.mul(&four).add(&F::from(*qa));
            acc_b = acc_b.mul(&four).add(&F::from(*qb));
            acc_c = acc_c.mul(&four).add(&F::from(qc));
            if j + 1 < n_quads {
                var_a = self.new_variable(acc_a);
                var_b = self.new_variable(acc_b);
            }
            var_c = self.new_variable(acc_c);
        }
        self.insert_gate([left_var, right_var, var_c, zero_var, zero_var], &[]);
        var_c
    }

    /// Given two variables `var0` and `var1` and a boolean variable `bit`, return var_bit.
    /// var_bit = (1-bit) * var0 + bit * var1 = - bit * var0 + bit * var1 + var0
    /// Wires: (w1, w2, w3 , w4) = (bit, var0, bit, var1)
    /// Selectors: q2 = qm2 = qo = 1, qm1 = -1
    pub fn select(&mut self, var0: VarIndex, var1: VarIndex, bit: VarIndex) -> VarIndex {
        assert!(var0 < self.num_vars, "var0 index out of bound");
        assert!(var1 < self.num_vars, "var1 index out of bound");
        assert!(bit < self.num_vars, "bit var index out of bound");
        let one = F::one();
        let out = if self.witness[bit].is_zero() {
            self.witness[var0]
        } else {
            self.witness[var1]
        };
        let out_var = self.new_variable(out);
        self.insert_gate(
            [bit, var0, bit, var1, out_var],
            &[(Q2, one), (QM1, one.neg()), (QM2, one), (QO, one)],
        );
        out_var
    }

    /// Return a boolean variable that equals 1 if and
    /// only if `left_var` == `right_var`.
    pub fn is_equal(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        let (is_equal, _) = self.is_equal_or_not_equal(left_var, right_var);
        is_equal
    }

    /// Return a boolean variable that equals 1 if and
    /// only if `left_var` != `right_var`.
    pub fn is_not_equal(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        let (_, is_not_equal) = self.is_equal_or_not_equal(left_var, right_var);
        is_not_equal
    }

    /// Return two boolean variables that equals (1, 0) if and
    /// only if `left_var` == `right_var` and (0, 1) otherwise.
    pub fn is_equal_or_not_equal(
        &mut self,
        left_var: VarIndex,
        right_var: VarIndex,
    ) -> (VarIndex, VarIndex) {
        let diff = self.sub(left_var, right_var);
        // `inv_diff` is arbitrary when `diff` is zero
        let inv_diff_scalar = self.witness[diff].inv().unwrap_or_else(|_| F::zero());
        let inv_diff = self.new_variable(inv_diff_scalar);

        // `diff_is_zero` = 1 - `diff` * `inv_diff`
        let mul_var = self.mul(diff, inv_diff);
        let one_var = self.one_var();
        let diff_is_zero = self.sub(one_var, mul_var);

        // `diff` * `diff_is_zero` = 0
        let zero_var = self.zero_var();
        self.insert_mul_gate(diff, diff_is_zero, zero_var);

        (diff_is_zero, mul_var)
    }

    /// Add a constant constraint: wo = constant.
    pub fn insert_constant_gate(&mut self, var: VarIndex, constant: F) {
        self.insert_gate([var; N_WIRES_PER_GATE], &[(QC, constant), (QO, F::one())]);
    }

    /// Add constraint of a public IO value to be decided online.
    pub fn prepare_pi_variable(&mut self, var: VarIndex) {
        self.public_vars_witness_indices.push(var);
        self.public_vars_constraint_indices.push(self.size);
        self.insert_gate([var; N_WIRES_PER_GATE], &[(QO, F::one())]);
    }

    /// Pad the number of constraints to a power of two.
    pub fn pad(&mut self) {
        let n = self.size.next_power_of_two();
        let diff = n - self.size;
        for selector in self.selectors.iter_mut() {
            selector.extend(vec![F::zero(); diff]);
        }
        for wire in self.wiring.iter_mut() {
            wire.extend(vec![0; diff]);
        }
        self.size += diff;
    }

    /// Add a Turbo gate computing `q_ecc * w1 * w2 * w3 * w4 * wo` alongside
    /// the multiplication selectors, used by the curve addition gates.
    pub(crate) fn insert_ecc_gate(
        &mut self,
        wires: [VarIndex; N_WIRES_PER_GATE],
        q_mul12: F,
        q_mul34: F,
        q_ecc: F,
    ) {
        self.insert_gate(
            wires,
            &[(QM1, q_mul12), (QM2, q_mul34), (Q_ECC, q_ecc), (QO, F::one())],
        );
    }

    /// Return the witness index for given wire and cs index.
    fn get_witness_index(&self, wire_index: usize, cs_index: CsIndex) -> VarIndex {
        assert!(wire_index < N_WIRES_PER_GATE, "wire index out of bound");
        assert!(cs_index < self.size, "constraint index out of bound");
        self.wiring[wire_index][cs_index]
    }

    /// Verify the given witness and publics.
    pub fn verify_witness(&self, witness: &[F], online_vars: &[F]) -> Result<()> {
        if witness.len() != self.num_vars {
            return Err(PlonkError::Message(format!(
                "witness len = {}, num_vars = {}",
                witness.len(),
                self.num_vars
            )));
        }
        if online_vars.len() != self.public_vars_witness_indices.len()
            || online_vars.len() != self.public_vars_constraint_indices.len()
        {
            return Err(PlonkError::Message(
                "wrong number of online variables".to_string(),
            ));
        }
        for cs_index in 0..self.size() {
            let mut public_online = F::zero();
            for ((c_i, w_i), online_var) in self
                .public_vars_constraint_indices
                .iter()
                .zip(self.public_vars_witness_indices.iter())
                .zip(online_vars.iter())
            {
                if *c_i == cs_index {
                    public_online = *online_var;
                    if witness[*w_i] != *online_var {
                        return Err(PlonkError::Message(format!(
                            "cs index {}: online var {:?} does not match witness {:?}",
                            cs_index, *online_var, witness[*w_i]
                        )));
                    }
                }
            }
            let next_index = (cs_index + 1) % self.size;
            let wire_vals: Vec<F> = (0..N_WIRES_PER_GATE)
                .map(|i| witness[self.get_witness_index(i, cs_index)])
                .collect();
            let wire_vals_next: Vec<F> = (0..N_WIRES_PER_GATE)
                .map(|i| witness[self.get_witness_index(i, next_index)])
                .collect();
            let sel_vals: Vec<F> = (0..N_SELECTORS)
                .map(|i| self.selectors[i][cs_index])
                .collect();

            let mut acc = [F::zero(); N_ALPHA_POWERS];
            acc[0] = public_online;
            for widget in self.widgets().iter() {
                widget.accumulate_identities(&sel_vals, &wire_vals, &wire_vals_next, &mut acc);
            }
            if acc.iter().any(|x| !x.is_zero()) {
                return Err(PlonkError::Message(format!(
                    "cs index {}: wire_vals = ({:?}), sel_vals = ({:?})",
                    cs_index, wire_vals, sel_vals
                )));
            }
        }
        Ok(())
    }

    /// Extract and clear the entire witness of the circuit. The witness consists of
    /// secret inputs, public inputs, and the values of intermediate variables.
    pub fn get_and_clear_witness(&mut self) -> Vec<F> {
        let res = self.witness.clone();
        self.witness.clear();
        res
    }
}

#[cfg(test)]
mod test {
    use crate::plonk::{
        constraint_system::{ConstraintSystem, TurboCS},
        indexer::indexer,
        prover::prover,
        verifier::verifier,
    };
    use crate::poly_commit::{kzg_poly_com::KZGCommitmentScheme, pcs::PolyComScheme};
    use merlin::Transcript;
    use quill_algebra::{bn254::BN254Scalar, prelude::*};
    use rand_chacha::ChaChaRng;

    type F = BN254Scalar;

    #[test]
    fn test_select() {
        let mut cs = TurboCS::new();
        let num: Vec<F> = (0..4).map(|x| F::from(x as u32)).collect();
        let index_0 = cs.new_variable(num[0]); // bit0 = 0 -- Variable index 2
        let index_1 = cs.new_variable(num[1]); // bit1 = 1 -- Variable index 3
        let index_2 = cs.new_variable(num[2]); // var0     -- Variable index 4
        let index_3 = cs.new_variable(num[3]); // var1     -- Variable index 5

        // select(var0, var1, bit0)
        let a_idx = cs.select(index_2, index_3, index_0);
        assert_eq!(cs.witness[a_idx], num[2]);
        // select(var0, var1, bit1)
        let b_idx = cs.select(index_2, index_3, index_1);
        assert_eq!(cs.witness[b_idx], num[3]);

        let zero = F::zero();
        let one = F::one();
        assert!(cs
            .verify_witness(&[zero, one, num[0], num[1], num[2], num[3], num[2], num[3]], &[])
            .is_ok());

        // Set bit0 = 1 and bit1 = 0
        assert!(cs
            .verify_witness(&[zero, one, num[1], num[0], num[2], num[3], num[3], num[2]], &[])
            .is_ok());

        assert!(cs
            .verify_witness(&[zero, one, num[0], num[1], num[2], num[3], num[3], num[2]], &[])
            .is_err());
    }

    #[test]
    fn test_sub_and_equal() {
        let mut cs = TurboCS::new();
        let zero = F::zero();
        let one = F::one();
        let two = one.add(&one);
        let three = two.add(&one);
        cs.new_variable(zero);
        cs.new_variable(one);
        cs.new_variable(two);
        cs.new_variable(three);
        let add = cs.add(2, 4);
        let sub = cs.sub(5, 3);
        cs.equal(add, sub);

        let witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness[..], &[]).is_ok());

        assert!(cs
            .verify_witness(&[zero, one, zero, one, two, two, two, one], &[])
            .is_err());
    }

    #[test]
    fn test_constants_are_pinned() {
        let mut cs = TurboCS::<F>::new();
        let a = cs.new_variable(F::from(5u32));
        let _ = cs.add(a, 1);
        let mut witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &[]).is_ok());

        // a consistent assignment with `one_var` = 2 is rejected
        witness[1] = F::from(2u32);
        witness[3] = F::from(7u32);
        assert!(cs.verify_witness(&witness, &[]).is_err());
    }

    #[test]
    fn test_is_equal() {
        let mut cs = TurboCS::new();
        let zero = F::zero();
        let one = F::one();
        let two = one.add(&one);
        let a = cs.new_variable(one);
        let b = cs.new_variable(two);
        let c = cs.new_variable(two);
        let one_equals_two = cs.is_equal(a, b);
        assert_eq!(cs.witness[one_equals_two], zero);
        let two_equals_two = cs.is_equal(b, c);
        assert_eq!(cs.witness[two_equals_two], one);

        let mut witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &[]).is_ok());

        witness[a] = two;
        assert!(cs.verify_witness(&witness, &[]).is_err());
    }

    #[test]
    fn test_range_check() {
        for n_bits in [1usize, 2, 7, 8, 16, 33, 64] {
            let mut cs = TurboCS::<F>::new();
            let max = F::from(2u32).pow(&[n_bits as u64]).sub(&F::one());
            let a = cs.new_variable(max);
            let b = cs.new_variable(F::zero());
            cs.range_check(a, n_bits);
            cs.range_check(b, n_bits);
            let mut witness = cs.get_and_clear_witness();
            assert!(cs.verify_witness(&witness, &[]).is_ok(), "n_bits = {}", n_bits);

            // 2^n_bits does not fit
            witness[a] = max.add(&F::one());
            assert!(cs.verify_witness(&witness, &[]).is_err(), "n_bits = {}", n_bits);
        }
    }

    #[test]
    fn test_range_check_rejects_out_of_range_values() {
        let mut cs = TurboCS::<F>::new();
        let a = cs.new_variable(F::from(300u32));
        cs.range_check(a, 8);
        let witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &[]).is_err());

        let mut cs = TurboCS::<F>::new();
        let a = cs.new_variable(F::from(5u32));
        cs.range_check(a, 3);
        let witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &[]).is_ok());

        let mut cs = TurboCS::<F>::new();
        let a = cs.new_variable(F::from(9u32));
        cs.range_check(a, 3);
        let witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &[]).is_err());
    }

    #[test]
    fn test_decompose_into_bits() {
        let mut cs = TurboCS::<F>::new();
        let a = cs.new_variable(F::from(0b1011_0110u32));
        let bits = cs.decompose_into_bits(a, 10);
        assert_eq!(bits.len(), 10);
        let expected = [0u32, 1, 1, 0, 1, 1, 0, 1, 0, 0];
        for (bit, e) in bits.iter().zip(expected.iter()) {
            assert_eq!(cs.witness[*bit], F::from(*e));
        }
        let mut witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &[]).is_ok());

        witness[bits[0]] = F::from(2u32);
        witness[a] = F::from(0b1011_1000u32);
        assert!(cs.verify_witness(&witness, &[]).is_err());
    }

    #[test]
    fn test_and_xor() {
        let mut cs = TurboCS::<F>::new();
        let a_val = 0xdead_beefu64;
        let b_val = 0x1234_5678u64;
        let a = cs.new_variable(F::from(a_val));
        let b = cs.new_variable(F::from(b_val));
        let c = cs.and(a, b, 32);
        let d = cs.xor(a, b, 32);
        assert_eq!(cs.witness[c], F::from(a_val & b_val));
        assert_eq!(cs.witness[d], F::from(a_val ^ b_val));
        let mut witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &[]).is_ok());

        witness[d] = F::from(a_val | b_val);
        assert!(cs.verify_witness(&witness, &[]).is_err());

        // inputs wider than n_bits are rejected
        let mut cs = TurboCS::<F>::new();
        let a = cs.new_variable(F::from(1u64 << 40));
        let b = cs.new_variable(F::from(3u64));
        cs.and(a, b, 32);
        let witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &[]).is_err());
    }

    #[test]
    fn test_turbo_plonk_kzg() {
        let mut prng = ChaChaRng::from_seed([1u8; 32]);
        let pcs = KZGCommitmentScheme::new(130, &mut prng);
        test_turbo_plonk_with_constant_and_online_values(&pcs, &mut prng);
        test_turbo_plonk_arithmetic_gates(&pcs, &mut prng);
        test_turbo_plonk_range_and_logic_gates(&pcs, &mut prng);
    }

    fn test_turbo_plonk_with_constant_and_online_values<
        PCS: PolyComScheme<Field = F>,
        R: CryptoRng + RngCore,
    >(
        pcs: &PCS,
        prng: &mut R,
    ) {
        let one = F::one();
        let two = one.add(&one);
        let three = two.add(&one);
        let four = three.add(&one);
        let seven = four.add(&three);
        let twenty_one = seven.mul(&three);
        let twenty_five = twenty_one.add(&four);

        // circuit (x_0 + y0) * (x_2 + 4) + x_0 * y1;
        // y0, y1 are online variables
        // witness (1 + 2) * (3 + 4) + 1 * 4 = 25
        let mut cs = TurboCS::<F>::new();
        cs.add_variables(&[
            one,
            two,
            three,
            four,
            three,
            seven,
            twenty_one,
            four,
            four,
            twenty_five,
        ]);
        cs.insert_add_gate(0 + 2, 1 + 2, 4 + 2);
        cs.insert_add_gate(2 + 2, 3 + 2, 5 + 2);
        cs.insert_mul_gate(4 + 2, 5 + 2, 6 + 2);
        cs.insert_mul_gate(0 + 2, 7 + 2, 8 + 2);
        cs.insert_add_gate(6 + 2, 8 + 2, 9 + 2);
        cs.insert_constant_gate(3 + 2, four);
        cs.prepare_pi_variable(1 + 2);
        cs.prepare_pi_variable(7 + 2);
        cs.pad();

        let mut online_vars = [two, four];
        let witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &online_vars).is_ok());
        check_turbo_plonk_proof(pcs, prng, &cs, &witness, &online_vars);

        online_vars[0] = four;
        assert!(cs.verify_witness(&witness, &online_vars).is_err());
    }

    fn test_turbo_plonk_arithmetic_gates<PCS: PolyComScheme<Field = F>, R: CryptoRng + RngCore>(
        pcs: &PCS,
        prng: &mut R,
    ) {
        let mut cs = TurboCS::new();
        let num: Vec<F> = (0..9).map(|x| F::from(x as u32)).collect();

        // The circuit description:
        // 1. a \in {0, 1}
        // 2. c = add(a, b)
        // 3. d = mul(a, b)
        // 4. e = 2 * a + 3 * b + c + d
        // 5. 0 <= e < 16
        // The secret inputs: [a, b] = [1, 2]
        cs.new_variable(num[1]);
        cs.new_variable(num[2]);
        cs.insert_boolean_gate(0 + 2);
        let c_idx = cs.add(0 + 2, 1 + 2);
        let d_idx = cs.mul(0 + 2, 1 + 2);
        let e_idx = cs.linear_combine(
            &[0 + 2, 1 + 2, c_idx, d_idx],
            num[2],
            num[3],
            num[1],
            num[1],
        );
        cs.range_check(e_idx, 4);
        cs.pad();

        let witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness[..], &[]).is_ok());
        check_turbo_plonk_proof(pcs, prng, &cs, &witness, &[]);
    }

    fn test_turbo_plonk_range_and_logic_gates<
        PCS: PolyComScheme<Field = F>,
        R: CryptoRng + RngCore,
    >(
        pcs: &PCS,
        prng: &mut R,
    ) {
        let mut cs = TurboCS::new();
        let a = cs.new_variable(F::from(0xf0f0u32));
        let b = cs.new_variable(F::from(0x3c3cu32));
        let c = cs.and(a, b, 16);
        let d = cs.xor(a, b, 16);
        let e = cs.add(c, d);
        cs.range_check(e, 17);
        cs.prepare_pi_variable(e);
        cs.pad();

        let online_vars = [F::from(0xf0f0u32 | 0x3c3cu32)];
        let witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &online_vars).is_ok());
        check_turbo_plonk_proof(pcs, prng, &cs, &witness, &online_vars);
    }

    fn check_turbo_plonk_proof<PCS: PolyComScheme<Field = F>, R: CryptoRng + RngCore>(
        pcs: &PCS,
        prng: &mut R,
        cs: &TurboCS<F>,
        witness: &[F],
        online_vars: &[F],
    ) {
        let prover_params = indexer(cs, pcs).unwrap();
        let verifier_params_ref = &prover_params.verifier_params;

        let mut transcript = Transcript::new(b"TestTurboPlonk");
        let proof = prover(prng, &mut transcript, pcs, cs, &prover_params, witness).unwrap();

        let mut transcript = Transcript::new(b"TestTurboPlonk");
        assert!(verifier(
            &mut transcript,
            pcs,
            cs,
            verifier_params_ref,
            online_vars,
            &proof
        )
        .is_ok());

        let verifier_cs = cs.shrink_to_verifier_only();

        let mut transcript = Transcript::new(b"TestTurboPlonk");
        assert!(prover(
            prng,
            &mut transcript,
            pcs,
            &verifier_cs,
            &prover_params,
            witness
        )
        .is_err());

        let mut transcript = Transcript::new(b"TestTurboPlonk");
        assert!(verifier(
            &mut transcript,
            pcs,
            &verifier_cs,
            verifier_params_ref,
            online_vars,
            &proof
        )
        .is_ok());
    }
}
