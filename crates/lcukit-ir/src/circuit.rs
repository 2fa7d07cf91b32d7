//! High-level circuit builder API.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, RotationAxis, StandardGate, UnitaryGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit.
///
/// An ordered list of instructions over a fixed set of qubits and
/// classical bits. Every instruction is validated when appended, so a
/// `Circuit` never references a qubit it does not own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

/// Unvalidated serialized form.
#[derive(Deserialize)]
struct RawCircuit {
    name: String,
    num_qubits: u32,
    #[serde(default)]
    num_clbits: u32,
    #[serde(default)]
    instructions: Vec<Instruction>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = IrError;

    fn try_from(raw: RawCircuit) -> IrResult<Self> {
        let mut circuit = Circuit::with_size(raw.name, raw.num_qubits, raw.num_clbits);
        for inst in raw.instructions {
            circuit.append(inst)?;
        }
        Ok(circuit)
    }
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0, 0)
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        id
    }

    /// Rename the circuit.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Validate and append an instruction.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name()),
            _ => None,
        };

        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let expected = gate.num_qubits() as usize;
                let got = instruction.qubits.len();
                if expected != got {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name(),
                        expected: expected as u32,
                        got: got as u32,
                    });
                }
                if !instruction.clbits.is_empty() {
                    return Err(IrError::InvalidCircuit(format!(
                        "gate '{}' cannot write classical bits",
                        gate.name()
                    )));
                }
            }
            InstructionKind::Measure => {
                if instruction.qubits.len() != instruction.clbits.len() {
                    return Err(IrError::InvalidCircuit(format!(
                        "measure: qubit count ({}) does not match clbit count ({})",
                        instruction.qubits.len(),
                        instruction.clbits.len(),
                    )));
                }
            }
            InstructionKind::Barrier => {}
        }

        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if clbit.0 >= self.num_clbits {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::P(lambda), qubit))
    }

    /// Apply a rotation about `axis`.
    pub fn rotation(&mut self, axis: RotationAxis, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(axis.gate(theta), qubit))
    }

    // =========================================================================
    // Controlled gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply a rotation about `axis` on `target`, controlled on all of `controls`.
    ///
    /// With no controls this is a bare rotation.
    pub fn mcrotation(
        &mut self,
        axis: RotationAxis,
        theta: f64,
        controls: &[QubitId],
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::controlled(axis.gate(theta), controls, &[target]))
    }

    /// Apply a multi-controlled phase.
    ///
    /// The phase is symmetric in its qubits; the last one is taken as the
    /// target and the rest as controls.
    pub fn mcp(&mut self, lambda: f64, qubits: &[QubitId]) -> IrResult<&mut Self> {
        let Some((&target, controls)) = qubits.split_last() else {
            return Err(IrError::InvalidCircuit(
                "mcp: needs at least one qubit".into(),
            ));
        };
        self.append(Instruction::controlled(StandardGate::P(lambda), controls, &[target]))
    }

    /// Apply a dense unitary on `targets`, controlled on `controls`.
    pub fn controlled_unitary(
        &mut self,
        unitary: UnitaryGate,
        controls: &[QubitId],
        targets: &[QubitId],
    ) -> IrResult<&mut Self> {
        self.append(Instruction::controlled(unitary, controls, targets))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::gate(gate, qubits))
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.append(Instruction::measure(qubit, clbit))
    }

    /// Measure `qubits[i]` into `clbits[i]` as one instruction.
    pub fn measure_into(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::measure_all(qubits, clbits)?)
    }

    /// Measure all qubits to corresponding classical bits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.num_clbits < self.num_qubits {
            self.add_clbit();
        }
        let n = self.num_qubits;
        self.measure_into((0..n).map(QubitId), (0..n).map(ClbitId))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.append(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let n = self.num_qubits;
        self.append(Instruction::barrier((0..n).map(QubitId)))
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append `other` with its qubit `i` wired to `qubit_map[i]`.
    ///
    /// Classical bits map by index and must exist in `self`.
    pub fn compose(&mut self, other: &Circuit, qubit_map: &[QubitId]) -> IrResult<&mut Self> {
        if qubit_map.len() != other.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: other.name.clone(),
                expected: other.num_qubits,
                got: qubit_map.len() as u32,
            });
        }
        if other.num_clbits > self.num_clbits {
            return Err(IrError::InvalidCircuit(format!(
                "compose: '{}' uses {} classical bits, target has {}",
                other.name, other.num_clbits, self.num_clbits
            )));
        }
        for inst in &other.instructions {
            self.append(inst.remapped(|q| qubit_map[q.index()], |c| c))?;
        }
        Ok(self)
    }

    /// The adjoint circuit: instructions reversed, each gate inverted.
    ///
    /// Fails if the circuit contains a measurement.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let instructions = self
            .instructions
            .iter()
            .rev()
            .map(Instruction::inverse)
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Circuit {
            name: format!("{}_dg", self.name),
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            instructions,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Consume the circuit and return its instructions.
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Number of instructions, barriers included.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of gate instructions.
    pub fn num_gates(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Get the circuit depth.
    ///
    /// Barriers align the qubits they touch but do not add a layer.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.num_qubits()];
        let mut clbit_level = vec![0usize; self.num_clbits()];
        let mut depth = 0;

        for inst in &self.instructions {
            let start = inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.index()]))
                .max()
                .unwrap_or(0);
            let level = if inst.is_barrier() { start } else { start + 1 };
            for q in &inst.qubits {
                qubit_level[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.index()] = level;
            }
            depth = depth.max(level);
        }
        depth
    }

    /// Count instructions by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }
}
