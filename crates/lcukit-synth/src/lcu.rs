//! Linear-combination-of-unitaries block encoding.
//!
//! `PREPARE · SELECT · PREPARE†` where PREPARE loads `sqrt(|c_i| / λ)` onto
//! the control register. Projecting the controls back onto `|0...0>`
//! leaves `H / λ` applied to the target register, `λ = sum_i |c_i|`.

use lcukit_ir::Circuit;
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::select::{SelectLayout, select_circuit};
use crate::state_prep::state_preparation;
use crate::table::PauliTable;

/// PREPARE for `table`: amplitude encoding of the coefficient magnitudes.
pub fn prepare_circuit(table: &PauliTable) -> SynthResult<Circuit> {
    let weights: Vec<f64> = table.iter().map(|t| t.coeff.norm()).collect();
    if weights.iter().all(|&w| w == 0.0) {
        return Err(SynthError::AllZero {
            what: "Pauli table coefficients",
        });
    }
    let mut prep = state_preparation(&weights, false)?;
    prep.set_name("prepare");
    Ok(prep)
}

/// Block encoding of `table` on `log2(len)` control qubits followed by the
/// target register.
pub fn lcu_circuit(table: &PauliTable) -> SynthResult<Circuit> {
    let layout = SelectLayout::for_table(table)?;
    let prep = prepare_circuit(table)?;
    let select = select_circuit(table)?;
    let unprep = prep.inverse()?;

    debug!(
        n_terms = table.len(),
        n_qubits = layout.num_qubits(),
        lambda = table.lambda(),
        "synthesising LCU block encoding"
    );

    let controls = layout.controls();
    let mut circuit = Circuit::with_size("lcu", layout.num_qubits(), 0);
    circuit.compose(&prep, &controls)?;
    circuit.compose(&select, &lcukit_ir::qubit_range(0, layout.num_qubits()))?;
    circuit.compose(&unprep, &controls)?;
    Ok(circuit)
}
