//! Error types for the synthesis crate.

use thiserror::Error;

/// Coarse classification of a [`SynthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied data that violates a precondition.
    InvalidInput,
    /// The data is well formed but outside what the synthesizer handles.
    UnsupportedValue,
    /// Circuit construction failed after validation.
    Internal,
}

/// Errors produced by circuit synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// Length that must be a power of two is not.
    #[error("{what} length must be a power of two, got {len}")]
    NotPowerOfTwo {
        /// What was measured.
        what: &'static str,
        /// The offending length.
        len: usize,
    },

    /// Input needs at least one element (or entry, or qubit).
    #[error("{what} is empty")]
    EmptyInput {
        /// What was empty.
        what: &'static str,
    },

    /// Probability entry is negative or not finite.
    #[error("probability at index {index} must be finite and non-negative, got {value}")]
    InvalidProbability {
        /// Index into the input vector.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Amplitude entry is not finite.
    #[error("amplitude at index {index} is not finite: {value}")]
    NonFiniteAmplitude {
        /// Index into the input vector.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Every entry of a vector or table is zero.
    #[error("{what} has no non-zero entry")]
    AllZero {
        /// What was all zero.
        what: &'static str,
    },

    /// Character outside the Pauli alphabet.
    #[error("invalid Pauli character '{ch}' at position {position} (expected I, X, Y or Z)")]
    InvalidPauliChar {
        /// The character.
        ch: char,
        /// Zero-based position in the string.
        position: usize,
    },

    /// Pauli string width differs from the rest of the table.
    #[error("Pauli string '{pauli}' has {got} qubits, table has {expected}")]
    WidthMismatch {
        /// The offending string.
        pauli: String,
        /// Width of the table.
        expected: usize,
        /// Width of the string.
        got: usize,
    },

    /// The same Pauli string appears twice.
    #[error("duplicate Pauli string '{0}' in table")]
    DuplicateTerm(String),

    /// Coefficient is NaN or infinite.
    #[error("coefficient of '{pauli}' is not finite")]
    NonFiniteCoefficient {
        /// The term.
        pauli: String,
    },

    /// SELECT needs at least two entries to have a control register.
    #[error("SELECT needs at least 2 table entries, got {0}")]
    TableTooSmall(usize),

    /// Trotter step count must be at least one.
    #[error("n_steps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// Evolution time is NaN or infinite.
    #[error("evolution time must be finite, got {0}")]
    InvalidTime(f64),

    /// A Pauli operator references a qubit outside the register.
    #[error("Pauli operator references qubit {qubit} but register only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Register width.
        n_qubits: usize,
    },

    /// Register is wider than the synthesizers can address.
    #[error("register of {n_qubits} qubits exceeds the limit of {max}")]
    RegisterTooWide {
        /// Requested width.
        n_qubits: usize,
        /// Largest supported width.
        max: usize,
    },

    /// Matrix is not a square power-of-two matrix of at least 2x2.
    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),

    /// Hamiltonian text could not be parsed.
    #[error("parse error at byte {offset}: {message}")]
    Parse {
        /// Byte offset into the input.
        offset: usize,
        /// What went wrong.
        message: String,
    },

    /// Coefficient has both real and imaginary parts; no discrete phase fits.
    #[error("coefficient {re}{im:+}i has both real and imaginary parts; phase must be 0, pi or +-pi/2")]
    MixedPhase {
        /// Real part.
        re: f64,
        /// Imaginary part.
        im: f64,
    },

    /// Time evolution needs a real coefficient.
    #[error("coefficient of '{pauli}' has imaginary part {im}; evolution needs a Hermitian term")]
    ComplexCoefficient {
        /// The term.
        pauli: String,
        /// Imaginary part.
        im: f64,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] lcukit_ir::IrError),
}

impl SynthError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SynthError::MixedPhase { .. } | SynthError::ComplexCoefficient { .. } => {
                ErrorKind::UnsupportedValue
            }
            SynthError::Ir(_) => ErrorKind::Internal,
            _ => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// `log2(len)` if `len` is a power of two.
pub(crate) fn exact_log2(what: &'static str, len: usize) -> SynthResult<u32> {
    if len == 0 {
        return Err(SynthError::EmptyInput { what });
    }
    if !len.is_power_of_two() {
        return Err(SynthError::NotPowerOfTwo { what, len });
    }
    Ok(len.trailing_zeros())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            SynthError::NotPowerOfTwo { what: "x", len: 3 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            SynthError::MixedPhase { re: 1.0, im: 1.0 }.kind(),
            ErrorKind::UnsupportedValue
        );
        let ir = lcukit_ir::IrError::InvalidCircuit("x".into());
        assert_eq!(SynthError::from(ir).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_exact_log2() {
        assert_eq!(exact_log2("v", 1).unwrap(), 0);
        assert_eq!(exact_log2("v", 8).unwrap(), 3);
        assert!(matches!(exact_log2("v", 0), Err(SynthError::EmptyInput { .. })));
        assert!(matches!(
            exact_log2("v", 6),
            Err(SynthError::NotPowerOfTwo { len: 6, .. })
        ));
    }

    #[test]
    fn test_message_names_offending_value() {
        let msg = SynthError::MixedPhase { re: 0.5, im: -0.25 }.to_string();
        assert!(msg.contains("0.5-0.25i"), "{msg}");
    }
}
