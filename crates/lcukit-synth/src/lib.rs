//! `lcukit-synth`: circuit synthesis for state preparation, SELECT
//! oracles, LCU block encodings and Hamiltonian time evolution.
//!
//! Every routine is a pure function from classical data (probability
//! vectors, Pauli tables) to an `lcukit_ir::Circuit`:
//!
//! - **State preparation**: binary-tree amplitude encoding with uniformly
//!   controlled Ry rotations ([`gen_angles`], [`state_preparation`])
//! - **SELECT**: `|i>|psi> -> |i> c_i/|c_i| P_i |psi>` ([`select_circuit`])
//! - **LCU**: `PREPARE · SELECT · PREPARE†` ([`lcu_circuit`])
//! - **Trotter-Suzuki** product formulas, first and second order
//!   ([`exp_evolution`], [`TrotterEvolution`])
//! - **Pauli algebra**: matrices, trace decomposition and text import
//!   ([`pauli_matrix`], [`decompose`], [`parse_hamiltonian`])
//!
//! # Quick start
//!
//! ```rust
//! use lcukit_synth::{PauliTable, exp_evolution};
//!
//! // Transverse-field Ising model on two sites
//! let h = PauliTable::from_real([("ZZ", -1.0), ("XI", -0.5), ("IX", -0.5)]).unwrap();
//!
//! let circuit = exp_evolution(&h, 1.0, 10).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! ```

pub mod angles;
pub mod decompose;
pub mod error;
pub mod evolution;
pub mod hamiltonian;
pub mod lcu;
pub mod pauli;
pub mod select;
pub mod state_prep;
pub mod table;

pub use angles::gen_angles;
pub use decompose::{decompose, matrix_from_rows};
pub use error::{ErrorKind, SynthError, SynthResult};
pub use evolution::{
    TrotterEvolution, TrotterOrder, append_exp_pauli, exp_evolution, exp_evolution_with_order,
    pauli_term_evolution,
};
pub use hamiltonian::{MAX_HAMILTONIAN_QUBITS, parse_hamiltonian};
pub use lcu::{lcu_circuit, prepare_circuit};
pub use pauli::{PauliOp, PauliString, pauli_matrix, phase_of};
pub use select::{SelectLayout, select_circuit};
pub use state_prep::state_preparation;
pub use table::{Coefficient, PauliTable, PauliTerm, TableEntry};
