//! lcukit Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures every lcukit synthesis
//! routine emits into.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered, validated list of [`Instruction`]s over a
//! fixed number of qubits and classical bits. Gates may carry any number of
//! leading control qubits, which is how multi-controlled rotations, phases
//! and controlled Pauli unitaries are expressed.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] for the built-in gate set and [`UnitaryGate`]
//!   for dense matrices; [`Gate`] adds controls and a label
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder, composition and inversion
//!
//! # Example
//!
//! ```rust
//! use lcukit_ir::{Circuit, QubitId, RotationAxis};
//!
//! let mut circuit = Circuit::with_size("prep", 2, 2);
//! circuit.ry(1.2, QubitId(0)).unwrap();
//! circuit
//!     .mcrotation(RotationAxis::Y, 0.7, &[QubitId(0)], QubitId(1))
//!     .unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X` | 1 | Pauli-X |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `P` | 1 | Phase gate |
//! | `CX` | 2 | Controlled-NOT |
//! | `UnitaryGate` | n | Dense 2^n x 2^n matrix |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind, RotationAxis, StandardGate, UnitaryGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId, qubit_range};
