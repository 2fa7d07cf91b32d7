//! SELECT oracle: `|i>|psi> -> e^{i phi_i} |i> P_i |psi>`.
//!
//! The control register holds `log2(len)` qubits, entry `i` addressed by
//! its binary form with the most significant bit on control qubit 0.
//! Target qubit `c + k` carries character `k` of every Pauli string.

use lcukit_ir::{Circuit, QubitId, UnitaryGate, qubit_range};
use tracing::{debug, trace};

use crate::error::{SynthError, SynthResult, exact_log2};
use crate::pauli::{pauli_matrix, phase_of};
use crate::table::PauliTable;

/// Register sizes of a SELECT circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectLayout {
    /// Control (index) qubits, `0..num_controls`.
    pub num_controls: u32,
    /// Target (system) qubits, after the controls.
    pub num_targets: u32,
}

impl SelectLayout {
    /// Validate `table` for SELECT and derive the register sizes.
    pub fn for_table(table: &PauliTable) -> SynthResult<Self> {
        let num_controls = exact_log2("Pauli table", table.len())?;
        if num_controls == 0 {
            return Err(SynthError::TableTooSmall(table.len()));
        }
        let num_targets = table.num_qubits().unwrap_or(0) as u32;
        Ok(Self {
            num_controls,
            num_targets,
        })
    }

    /// Control qubits.
    pub fn controls(&self) -> Vec<QubitId> {
        qubit_range(0, self.num_controls)
    }

    /// Target qubits.
    pub fn targets(&self) -> Vec<QubitId> {
        qubit_range(self.num_controls, self.num_targets)
    }

    /// Total width.
    pub fn num_qubits(&self) -> u32 {
        self.num_controls + self.num_targets
    }
}

/// Build the SELECT circuit for `table`.
///
/// Every coefficient must classify under [`phase_of`]; all phases are
/// checked before any gate is emitted.
pub fn select_circuit(table: &PauliTable) -> SynthResult<Circuit> {
    let layout = SelectLayout::for_table(table)?;
    let phases = table
        .iter()
        .map(|t| phase_of(t.coeff))
        .collect::<SynthResult<Vec<f64>>>()?;

    debug!(
        n_terms = table.len(),
        n_controls = layout.num_controls,
        n_targets = layout.num_targets,
        "synthesising SELECT oracle"
    );

    let controls = layout.controls();
    let targets = layout.targets();
    let c = layout.num_controls as usize;
    let mut circuit = Circuit::with_size("select", layout.num_qubits(), 0);

    for (i, (term, &phase)) in table.iter().zip(&phases).enumerate() {
        let flips: Vec<QubitId> = controls
            .iter()
            .enumerate()
            .filter(|&(k, _)| i & (1 << (c - 1 - k)) == 0)
            .map(|(_, &q)| q)
            .collect();

        let matrix = pauli_matrix(&term.pauli).into_iter().collect();
        let unitary = UnitaryGate::new(term.pauli.to_string(), layout.num_targets, matrix)?;

        for &q in &flips {
            circuit.x(q)?;
        }
        circuit.mcp(phase, &controls)?;
        circuit.controlled_unitary(unitary, &controls, &targets)?;
        for &q in &flips {
            circuit.x(q)?;
        }
        circuit.barrier_all()?;
        trace!(entry = i, pauli = %term.pauli, phase, "emitted SELECT entry");
    }

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_layout() {
        let t = PauliTable::from_real([("XZ", 1.0), ("ZZ", 1.0), ("II", 1.0), ("YY", 1.0)]).unwrap();
        let l = SelectLayout::for_table(&t).unwrap();
        assert_eq!(l.num_controls, 2);
        assert_eq!(l.num_targets, 2);
        assert_eq!(l.targets(), vec![QubitId(2), QubitId(3)]);
    }

    #[test]
    fn test_entry_block_shape() {
        let t = PauliTable::from_real([("X", 1.0), ("Z", -1.0)]).unwrap();
        let c = select_circuit(&t).unwrap();
        let names: Vec<String> = c.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec![
                "x", "p", "cX", "x", "barrier", // entry 0: control bit 0 flipped
                "p", "cZ", "barrier", // entry 1
            ]
        );
    }

    #[test]
    fn test_rejects_bad_sizes() {
        let one = PauliTable::from_real([("X", 1.0)]).unwrap();
        assert!(matches!(select_circuit(&one), Err(SynthError::TableTooSmall(1))));
        let three = PauliTable::from_real([("X", 1.0), ("Y", 1.0), ("Z", 1.0)]).unwrap();
        assert!(matches!(
            select_circuit(&three),
            Err(SynthError::NotPowerOfTwo { len: 3, .. })
        ));
        assert!(matches!(
            select_circuit(&PauliTable::new()),
            Err(SynthError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_mixed_phase_fails_before_emitting() {
        let mut t = PauliTable::from_real([("X", 1.0)]).unwrap();
        t.insert("Z".parse().unwrap(), Complex64::new(1.0, 1.0)).unwrap();
        let err = select_circuit(&t).unwrap_err();
        assert!(matches!(err, SynthError::MixedPhase { .. }));
    }
}
