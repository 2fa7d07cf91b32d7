//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Measurement of each qubit into the matching classical bit.
    Measure,
    /// Barrier (synchronization point).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on; controls first for gates.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on (for measure).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a gate instruction controlled on `controls`.
    pub fn controlled(gate: impl Into<Gate>, controls: &[QubitId], targets: &[QubitId]) -> Self {
        let gate = gate.into().controlled(controls.len() as u32);
        Self::gate(gate, controls.iter().chain(targets).copied())
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a multi-qubit measurement instruction.
    ///
    /// Returns an error if the number of qubits and classical bits do not match.
    pub fn measure_all(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let clbits: Vec<_> = clbits.into_iter().collect();
        if qubits.len() != clbits.len() {
            return Err(IrError::InvalidCircuit(format!(
                "measure: qubit count ({}) does not match clbit count ({})",
                qubits.len(),
                clbits.len(),
            )));
        }
        Ok(Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        })
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Control qubits of a gate instruction; empty otherwise.
    pub fn controls(&self) -> &[QubitId] {
        match &self.kind {
            InstructionKind::Gate(g) => &self.qubits[..(g.num_controls as usize).min(self.qubits.len())],
            _ => &[],
        }
    }

    /// Target qubits: everything after the controls.
    pub fn targets(&self) -> &[QubitId] {
        &self.qubits[self.controls().len()..]
    }

    /// Get the name of this instruction.
    pub fn name(&self) -> String {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure".to_string(),
            InstructionKind::Barrier => "barrier".to_string(),
        }
    }

    /// Get the number of qubits this instruction operates on.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// The adjoint instruction. Measurements have none.
    pub fn inverse(&self) -> IrResult<Instruction> {
        match &self.kind {
            InstructionKind::Gate(g) => Ok(Instruction {
                kind: InstructionKind::Gate(g.inverse()),
                qubits: self.qubits.clone(),
                clbits: vec![],
            }),
            InstructionKind::Barrier => Ok(self.clone()),
            InstructionKind::Measure => Err(IrError::NonInvertible(self.name())),
        }
    }

    /// Same instruction with qubits and clbits renamed through the maps.
    pub(crate) fn remapped(
        &self,
        qubit_map: impl Fn(QubitId) -> QubitId,
        clbit_map: impl Fn(ClbitId) -> ClbitId,
    ) -> Instruction {
        Instruction {
            kind: self.kind.clone(),
            qubits: self.qubits.iter().map(|&q| qubit_map(q)).collect(),
            clbits: self.clbits.iter().map(|&c| clbit_map(c)).collect(),
        }
    }
}
