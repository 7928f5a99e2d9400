use crate::errors::{PlonkError, Result};
use quill_algebra::prelude::*;

/// Module for the elliptic curve gadgets over Baby Jubjub.
pub mod ecc;

/// Module for the Merkle membership gadget.
pub mod merkle;

/// Module for the Pedersen compression gadget.
pub mod pedersen;

/// Module for the Turbo constraint system.
pub mod turbo;

/// Module for the gate widgets.
pub mod widget;

/// Default used constraint system.
pub use turbo::TurboCS;
pub use widget::Widget;

/// Variable index
pub type VarIndex = usize;
/// Constraint index
pub type CsIndex = usize;

/// Trait for PLONK constraint systems.
pub trait ConstraintSystem: Sized + Sync {
    /// The field of the circuit.
    type Field: Domain;

    /// Return the number of constraints in the system.
    /// `size` should divide q-1 where q is the size of the prime field.
    /// This enables finding a multiplicative subgroup with order `size`.
    fn size(&self) -> usize;

    /// Return number of variables in the constrain system
    fn num_vars(&self) -> usize;

    /// Return the wiring of the constrain system
    fn wiring(&self) -> &[Vec<usize>];

    /// Return the size of the evaluation domain for computing the quotient polynomial.
    /// `quot_eval_dom_size` divides q-1 where q is the size of the prime field,
    /// is larger than the degree of the quotient numerator,
    /// and is a multiple of `size`.
    fn quot_eval_dom_size(&self) -> usize;

    /// Return the number of wires in a single gate.
    fn n_wires_per_gate() -> usize;

    /// Return the number of selectors.
    fn num_selectors(&self) -> usize;

    /// The widgets whose identities make up a gate.
    fn widgets(&self) -> &[Widget];

    /// Compute the permutation implied by the copy constraints.
    /// Position `column * size + row` is mapped to the next position holding the same variable.
    fn compute_permutation(&self) -> Result<Vec<usize>> {
        let n = self.size();
        let n_wires_per_gate = Self::n_wires_per_gate();
        let mut perm = vec![0usize; n_wires_per_gate * n];
        let mut last = vec![usize::MAX; self.num_vars()];
        let mut first = vec![usize::MAX; self.num_vars()];
        let mut v = Vec::with_capacity(n_wires_per_gate * n);
        for wire_slice in self.wiring().iter() {
            if wire_slice.len() != n {
                return Err(PlonkError::FuncParamsError);
            }
            v.extend_from_slice(wire_slice);
        }
        // link every position to the previous occurrence of its variable,
        // then close each cycle.
        for (i, value) in v.iter().enumerate() {
            if *value >= self.num_vars() {
                return Err(PlonkError::FuncParamsError);
            }
            if last[*value] == usize::MAX {
                first[*value] = i;
            } else {
                perm[last[*value]] = i;
            }
            last[*value] = i;
        }
        for (var, l) in last.iter().enumerate() {
            if *l != usize::MAX {
                perm[*l] = first[var];
            }
        }
        Ok(perm)
    }

    /// Compute the indices of the constraints related to public inputs.
    fn public_vars_constraint_indices(&self) -> &[CsIndex];

    /// Compute the indices of the witnesses related to public inputs.
    fn public_vars_witness_indices(&self) -> &[VarIndex];

    /// Map the witnesses into the wires of the circuit.
    /// The (i * size + j)-th output element is the value of the i-th wire on the j-th gate.
    fn extend_witness(&self, witness: &[Self::Field]) -> Vec<Self::Field> {
        let mut extended = Vec::with_capacity(Self::n_wires_per_gate() * self.size());
        for wire_slice in self.wiring().iter() {
            for index in wire_slice.iter() {
                extended.push(witness[*index]);
            }
        }
        extended
    }

    /// Borrow the (index)-th selector vector.
    fn selector(&self, index: usize) -> Result<&[Self::Field]>;

    /// Evaluate the selector-weighted gate identity, combined with `alpha_pows`,
    /// given public input and the values of the wires on this row and the next one.
    fn eval_gate_func(
        &self,
        wire_vals: &[Self::Field],
        wire_vals_next: &[Self::Field],
        sel_vals: &[Self::Field],
        pub_input: &Self::Field,
        alpha_pows: &[Self::Field],
    ) -> Result<Self::Field> {
        if wire_vals.len() < Self::n_wires_per_gate()
            || wire_vals_next.len() < Self::n_wires_per_gate()
            || sel_vals.len() != self.num_selectors()
        {
            return Err(PlonkError::FuncParamsError);
        }
        let mut res = *pub_input;
        for widget in self.widgets().iter() {
            res += &widget.quotient_contribution(sel_vals, wire_vals, wire_vals_next, alpha_pows);
        }
        Ok(res)
    }

    /// Given the wires values of a gate and of the next gate, evaluate the
    /// coefficients of the selectors in the gate identity combined with `alpha_pows`.
    fn eval_selector_multipliers(
        &self,
        wire_vals: &[Self::Field],
        wire_vals_next: &[Self::Field],
        alpha_pows: &[Self::Field],
    ) -> Result<Vec<Self::Field>> {
        if wire_vals.len() < Self::n_wires_per_gate()
            || wire_vals_next.len() < Self::n_wires_per_gate()
        {
            return Err(PlonkError::FuncParamsError);
        }
        let mut res = vec![Self::Field::zero(); self.num_selectors()];
        for widget in self.widgets().iter() {
            for (sel, m) in widget.selector_multipliers(wire_vals, wire_vals_next, alpha_pows) {
                res[sel] = m;
            }
        }
        Ok(res)
    }

    /// Whether the selectors and wiring have been dropped.
    fn is_verifier_only(&self) -> bool {
        false
    }

    /// Keep only what a verifier needs.
    fn shrink_to_verifier_only(&self) -> Self;
}
