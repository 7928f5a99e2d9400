//! Gate widgets of the Turbo constraint system.
//!
//! Every widget owns a subset of the selectors and, for a gate row, produces
//! terms `(selector, alpha power, value)`. The full gate identity of a row is
//! ```text
//!     sum_{terms} alpha^power * q_selector * value + PI = 0
//! ```
//! where each power of alpha must vanish on its own. Powers 1 and 2 are
//! reserved for the permutation argument.
use quill_algebra::prelude::*;

/// Selector of `w1`.
pub const Q1: usize = 0;
/// Selector of `w2`.
pub const Q2: usize = 1;
/// Selector of `w3`.
pub const Q3: usize = 2;
/// Selector of `w4`.
pub const Q4: usize = 3;
/// Selector of `w1 * w2`.
pub const QM1: usize = 4;
/// Selector of `w3 * w4`.
pub const QM2: usize = 5;
/// Constant selector.
pub const QC: usize = 6;
/// Selector of `w1 * w2 * w3 * w4 * wo`.
pub const Q_ECC: usize = 7;
/// Output selector.
pub const QO: usize = 8;
/// Base-4 accumulator range selector.
pub const Q_RANGE: usize = 9;
/// Base-4 accumulator AND selector.
pub const Q_AND: usize = 10;
/// Base-4 accumulator XOR selector.
pub const Q_XOR: usize = 11;

/// The number of alpha powers used by the gate identities and the permutation.
pub const N_ALPHA_POWERS: usize = 11;

/// The number of leading wires (`w1`, `w2`, `w3`) read on the next row.
pub const N_NEXT_ROW_WIRES: usize = 3;

/// The closed set of gate widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Widget {
    /// `q1*w1 + q2*w2 + q3*w3 + q4*w4 + qm1*w1*w2 + qm2*w3*w4 + qc - qo*wo`.
    Arithmetic,
    /// The degree-5 term `q_ecc*w1*w2*w3*w4*wo`, used by curve addition.
    Turbo,
    /// Four base-4 accumulator steps per row, each delta in `{0, 1, 2, 3}`.
    Range,
    /// Base-4 accumulators of `a`, `b` and `a op b` for `op` in `{AND, XOR}`.
    Logic,
}

impl Widget {
    /// All widgets, in the order their terms are accumulated.
    pub const ALL: [Widget; 4] = [
        Widget::Arithmetic,
        Widget::Turbo,
        Widget::Range,
        Widget::Logic,
    ];

    /// The selectors owned by the widget.
    pub fn selectors(&self) -> &'static [usize] {
        match self {
            Widget::Arithmetic => &[Q1, Q2, Q3, Q4, QM1, QM2, QC, QO],
            Widget::Turbo => &[Q_ECC],
            Widget::Range => &[Q_RANGE],
            Widget::Logic => &[Q_AND, Q_XOR],
        }
    }

    /// The lowest alpha power weighting the widget's identities.
    pub fn alpha_offset(&self) -> usize {
        match self {
            Widget::Arithmetic | Widget::Turbo => 0,
            Widget::Range => 3,
            Widget::Logic => 7,
        }
    }

    /// Whether the widget reads wires of the next row.
    pub fn uses_next_row(&self) -> bool {
        matches!(self, Widget::Range | Widget::Logic)
    }

    /// The terms `(selector, alpha power, value)` of the widget on a row with wires `w`,
    /// followed by the row with wires `w_next`.
    pub fn terms<F: Scalar>(&self, w: &[F], w_next: &[F]) -> Vec<(usize, usize, F)> {
        match self {
            Widget::Arithmetic => vec![
                (Q1, 0, w[0]),
                (Q2, 0, w[1]),
                (Q3, 0, w[2]),
                (Q4, 0, w[3]),
                (QM1, 0, w[0] * &w[1]),
                (QM2, 0, w[2] * &w[3]),
                (QC, 0, F::one()),
                (QO, 0, -w[4]),
            ],
            Widget::Turbo => vec![(Q_ECC, 0, w[0] * &w[1] * &w[2] * &w[3] * &w[4])],
            Widget::Range => {
                let four = F::from(4u32);
                let deltas = [
                    w[1] - &(w[0] * &four),
                    w[2] - &(w[1] * &four),
                    w[3] - &(w[2] * &four),
                    w_next[0] - &(w[3] * &four),
                ];
                deltas
                    .iter()
                    .enumerate()
                    .map(|(i, d)| (Q_RANGE, 3 + i, quad_check(d)))
                    .collect()
            }
            Widget::Logic => {
                let four = F::from(4u32);
                let delta_a = w_next[0] - &(w[0] * &four);
                let delta_b = w_next[1] - &(w[1] * &four);
                let delta_c = w_next[2] - &(w[2] * &four);
                let product = w[3];
                let check_a = quad_check(&delta_a);
                let check_b = quad_check(&delta_b);
                let check_product = product - &(delta_a * &delta_b);
                let and_times_six = and_times_six(&delta_a, &delta_b, &product);

                let three = F::from(3u32);
                let and_identity = delta_c * &F::from(6u32) - &and_times_six;
                let xor_identity = (delta_c - &delta_a - &delta_b) * &three + &and_times_six;

                let mut res = Vec::with_capacity(8);
                for (selector, op_identity) in [(Q_AND, and_identity), (Q_XOR, xor_identity)] {
                    res.push((selector, 7, check_a));
                    res.push((selector, 8, check_b));
                    res.push((selector, 9, check_product));
                    res.push((selector, 10, op_identity));
                }
                res
            }
        }
    }

    /// The coefficients of the widget's selectors in the gate identity combined with
    /// `alpha_pows = [1, alpha, alpha^2, ...]`.
    pub fn selector_multipliers<F: Scalar>(
        &self,
        w: &[F],
        w_next: &[F],
        alpha_pows: &[F],
    ) -> Vec<(usize, F)> {
        let mut res: Vec<(usize, F)> = self
            .selectors()
            .iter()
            .map(|sel| (*sel, F::zero()))
            .collect();
        for (sel, power, value) in self.terms(w, w_next) {
            if let Some(entry) = res.iter_mut().find(|(s, _)| *s == sel) {
                entry.1 += &(value * &alpha_pows[power]);
            }
        }
        res
    }

    /// `sum q_s * m_s` over the widget's selectors, evaluated at one point.
    pub fn quotient_contribution<F: Scalar>(
        &self,
        sel_vals: &[F],
        w: &[F],
        w_next: &[F],
        alpha_pows: &[F],
    ) -> F {
        let mut res = F::zero();
        for (sel, power, value) in self.terms(w, w_next) {
            if !sel_vals[sel].is_zero() {
                res += &(sel_vals[sel] * &value * &alpha_pows[power]);
            }
        }
        res
    }

    /// Add `q_selector * value` of every term into `acc[power]`.
    pub fn accumulate_identities<F: Scalar>(
        &self,
        sel_vals: &[F],
        w: &[F],
        w_next: &[F],
        acc: &mut [F],
    ) {
        for (sel, power, value) in self.terms(w, w_next) {
            acc[power] += &(sel_vals[sel] * &value);
        }
    }
}

/// `d * (d - 1) * (d - 2) * (d - 3)`, zero iff `d` is a base-4 digit.
fn quad_check<F: Scalar>(d: &F) -> F {
    let one = F::one();
    let two = F::from(2u32);
    let three = F::from(3u32);
    *d * &(*d - &one) * &(*d - &two) * &(*d - &three)
}

/// For base-4 digits `a`, `b` and `p = a * b`, returns `6 * (a AND b)`.
fn and_times_six<F: Scalar>(a: &F, b: &F, p: &F) -> F {
    let a_plus_b = *a + b;
    let a_sq_plus_b_sq = a.square() + &b.square();
    let p_sq = p.square();
    let p_cube = p_sq * p;
    let mut res = *p * &F::from(83u32);
    res += &(p_sq * &F::from(81u32));
    res += &(p_cube * &F::from(4u32));
    res -= &(*p * &a_plus_b * &F::from(81u32));
    res -= &(p_sq * &a_plus_b * &F::from(18u32));
    res += &(*p * &a_sq_plus_b_sq * &F::from(18u32));
    res
}
