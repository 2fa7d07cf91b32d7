//! Error types for the simulator backend.

use thiserror::Error;

/// Errors produced while simulating a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit is wider than the simulator allows.
    #[error("Circuit has {num_qubits} qubits but simulator only supports {max_qubits}")]
    TooManyQubits {
        /// Qubits in the circuit.
        num_qubits: usize,
        /// Configured limit.
        max_qubits: u32,
    },

    /// Basis index does not fit the register.
    #[error("Basis index {index} out of range for {num_qubits} qubits")]
    BasisIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Register width.
        num_qubits: usize,
    },

    /// Shot count must be positive.
    #[error("Invalid shot count: {0} (must be >= 1)")]
    InvalidShots(u32),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
