//! Pauli-string exponentiation and Trotter product formulas.
//!
//! A single term is synthesised as
//!
//!   exp(-i · theta/2 · P) = B† · CNOT_ladder† · Rz(theta) · CNOT_ladder · B
//!
//! where `B` rotates every X position with Ry(-pi/2) and every Y position
//! with Rx(pi/2), mapping the term onto a Z string. Weight-1 terms use a
//! native rotation instead.
//!
//! The X pair is Ry(-pi/2) first and Ry(pi/2) after, which maps Z onto +X.
//! Opening with Ry(pi/2) maps Z onto -X and negates every term with an odd
//! number of X factors.
//!
//! # First-order Trotter (Lie-Trotter)
//!
//!   exp(-i H t) ≈ [∏_k exp(-i c_k P_k t/n)]^n
//!
//! # Second-order Trotter (Suzuki-Trotter)
//!
//!   exp(-i H t) ≈ [S₂(t/n)]^n
//!   S₂(τ) = [∏_k exp(-i c_k P_k τ/2)] · [∏_k exp(-i c_{n-k} P_{n-k} τ/2)]

use std::f64::consts::FRAC_PI_2;

use lcukit_ir::{Circuit, Instruction, QubitId, qubit_range};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SynthError, SynthResult};
use crate::pauli::{PauliOp, PauliString};
use crate::table::PauliTable;

/// Imaginary parts below this are treated as numerical noise.
pub const IMAG_TOLERANCE: f64 = 1e-10;

/// Product-formula order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrotterOrder {
    /// Lie-Trotter: every term once per step.
    #[default]
    First,
    /// Symmetric Suzuki: forward then reverse half-steps.
    Second,
}

/// Append `exp(-i · theta/2 · P)` to `circuit`; character `k` acts on qubit `k`.
///
/// Identity strings are a global phase and emit nothing.
pub fn append_exp_pauli(circuit: &mut Circuit, pauli: &PauliString, theta: f64) -> SynthResult<()> {
    if pauli.len() > circuit.num_qubits() {
        return Err(SynthError::QubitOutOfRange {
            qubit: pauli.len() - 1,
            n_qubits: circuit.num_qubits(),
        });
    }

    let active: Vec<(QubitId, PauliOp)> = pauli
        .active()
        .map(|(q, op)| (QubitId(q as u32), op))
        .collect();

    match active.as_slice() {
        [] => {}
        [(q, op)] => {
            if let Some(axis) = op.axis() {
                circuit.rotation(axis, theta, *q)?;
            }
        }
        _ => {
            let qubits: Vec<QubitId> = active.iter().map(|&(q, _)| q).collect();
            let last = qubits[qubits.len() - 1];

            basis_change(circuit, &active, false)?;
            cnot_ladder(circuit, &qubits)?;
            circuit.rz(theta, last)?;
            cnot_ladder_reverse(circuit, &qubits)?;
            basis_change(circuit, &active, true)?;
        }
    }
    Ok(())
}

/// Instructions for one Trotter sub-step of a single term.
///
/// Emits `exp(-i · coefficient · t / n_steps · P)` on a register as wide as
/// the string; a zero coefficient emits nothing.
pub fn pauli_term_evolution(
    pauli: &PauliString,
    coefficient: f64,
    t: f64,
    n_steps: usize,
) -> SynthResult<Vec<Instruction>> {
    if n_steps == 0 {
        return Err(SynthError::InvalidSteps(0));
    }
    if !t.is_finite() {
        return Err(SynthError::InvalidTime(t));
    }
    if !coefficient.is_finite() {
        return Err(SynthError::NonFiniteCoefficient {
            pauli: pauli.to_string(),
        });
    }
    let mut circuit = Circuit::with_size("exp_h", pauli.len() as u32, 0);
    if coefficient != 0.0 {
        append_exp_pauli(&mut circuit, pauli, 2.0 * coefficient * t / n_steps as f64)?;
    }
    Ok(circuit.into_instructions())
}

// ---------------------------------------------------------------------------
// Trotter assembly
// ---------------------------------------------------------------------------

/// Trotter product-formula time-evolution synthesiser.
pub struct TrotterEvolution<'a> {
    table: &'a PauliTable,
    /// Total evolution time t.
    t: f64,
    /// Number of Trotter steps (repetitions).
    n_steps: usize,
}

impl<'a> TrotterEvolution<'a> {
    /// Construct a synthesiser for `exp(-i H t)` with `n_steps` slices.
    pub fn new(table: &'a PauliTable, t: f64, n_steps: usize) -> Self {
        Self { table, t, n_steps }
    }

    /// Synthesise a first-order Trotter circuit.
    ///
    /// One step applies every non-zero term in table order for `t / n_steps`;
    /// the step is then repeated `n_steps` times.
    pub fn first_order(&self) -> SynthResult<Circuit> {
        let terms = self.validate()?;
        let n_qubits = self.width();
        let step_t = self.t / self.n_steps as f64;
        debug!(
            n_terms = terms.len(),
            n_steps = self.n_steps,
            n_qubits,
            "synthesising first-order Trotter circuit"
        );

        let mut step = Circuit::with_size("trotter_step", n_qubits, 0);
        for (pauli, coeff) in &terms {
            append_exp_pauli(&mut step, pauli, 2.0 * coeff * step_t)?;
        }
        self.repeat(step, "trotter1")
    }

    /// Synthesise a second-order Suzuki-Trotter circuit.
    pub fn second_order(&self) -> SynthResult<Circuit> {
        let terms = self.validate()?;
        let n_qubits = self.width();
        let half_t = self.t / (2.0 * self.n_steps as f64);
        debug!(
            n_terms = terms.len(),
            n_steps = self.n_steps,
            n_qubits,
            "synthesising second-order Trotter circuit"
        );

        let mut step = Circuit::with_size("trotter_step", n_qubits, 0);
        for (pauli, coeff) in terms.iter().chain(terms.iter().rev()) {
            append_exp_pauli(&mut step, pauli, 2.0 * coeff * half_t)?;
        }
        self.repeat(step, "trotter2")
    }

    /// Synthesise with the given order.
    pub fn build(&self, order: TrotterOrder) -> SynthResult<Circuit> {
        match order {
            TrotterOrder::First => self.first_order(),
            TrotterOrder::Second => self.second_order(),
        }
    }

    fn width(&self) -> u32 {
        self.table.num_qubits().unwrap_or(0) as u32
    }

    /// Check inputs and return the real coefficients of the terms that emit gates.
    fn validate(&self) -> SynthResult<Vec<(&'a PauliString, f64)>> {
        if self.table.is_empty() {
            return Err(SynthError::EmptyInput {
                what: "Pauli table",
            });
        }
        if self.n_steps == 0 {
            return Err(SynthError::InvalidSteps(0));
        }
        if !self.t.is_finite() {
            return Err(SynthError::InvalidTime(self.t));
        }

        let mut zero = 0usize;
        let mut terms = Vec::with_capacity(self.table.len());
        for term in self.table.iter() {
            if term.coeff.im.abs() > IMAG_TOLERANCE {
                return Err(SynthError::ComplexCoefficient {
                    pauli: term.pauli.to_string(),
                    im: term.coeff.im,
                });
            }
            // identity terms are a global phase, zeroed or not
            match (term.coeff.re == 0.0, term.pauli.is_identity()) {
                (false, false) => terms.push((&term.pauli, term.coeff.re)),
                (true, false) => zero += 1,
                (_, true) => {}
            }
        }
        if zero > 0 {
            warn!(skipped = zero, "skipping zero-coefficient terms");
        }
        Ok(terms)
    }

    fn repeat(&self, step: Circuit, name: &str) -> SynthResult<Circuit> {
        let n_qubits = step.num_qubits() as u32;
        let wires = qubit_range(0, n_qubits);
        let mut circuit = Circuit::with_size(name, n_qubits, 0);
        for _ in 0..self.n_steps {
            circuit.compose(&step, &wires)?;
        }
        Ok(circuit)
    }
}

/// First-order Trotter evolution `exp(-i H t)` for the table `H`.
pub fn exp_evolution(table: &PauliTable, t: f64, n_steps: usize) -> SynthResult<Circuit> {
    TrotterEvolution::new(table, t, n_steps).first_order()
}

/// Trotter evolution with an explicit product-formula order.
pub fn exp_evolution_with_order(
    table: &PauliTable,
    t: f64,
    n_steps: usize,
    order: TrotterOrder,
) -> SynthResult<Circuit> {
    TrotterEvolution::new(table, t, n_steps).build(order)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rotate X and Y positions into the Z basis, or back with `undo`.
///
///   X → Ry(-pi/2), undone by Ry(pi/2)
///   Y → Rx(pi/2),  undone by Rx(-pi/2)
fn basis_change(circuit: &mut Circuit, ops: &[(QubitId, PauliOp)], undo: bool) -> SynthResult<()> {
    let sign = if undo { -1.0 } else { 1.0 };
    for &(q, op) in ops {
        match op {
            PauliOp::X => {
                circuit.ry(-sign * FRAC_PI_2, q)?;
            }
            PauliOp::Y => {
                circuit.rx(sign * FRAC_PI_2, q)?;
            }
            PauliOp::Z | PauliOp::I => {}
        }
    }
    Ok(())
}

/// Forward CNOT ladder: CX(q[0],q[1]), CX(q[1],q[2]), …, CX(q[k-2], q[k-1]).
fn cnot_ladder(circuit: &mut Circuit, qubits: &[QubitId]) -> SynthResult<()> {
    for window in qubits.windows(2) {
        circuit.cx(window[0], window[1])?;
    }
    Ok(())
}

/// The forward ladder run backwards.
fn cnot_ladder_reverse(circuit: &mut Circuit, qubits: &[QubitId]) -> SynthResult<()> {
    for window in qubits.windows(2).rev() {
        circuit.cx(window[0], window[1])?;
    }
    Ok(())
}
