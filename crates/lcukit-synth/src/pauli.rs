//! Pauli operators, Pauli strings and their matrices.
//!
//! A [`PauliString`] is a dense word over `{I, X, Y, Z}`, one symbol per
//! qubit. Character `k` acts on qubit `k` of whatever register the string
//! is applied to. [`pauli_matrix`] composes the single-qubit matrices left
//! to right, so character 0 is the most significant bit of the matrix
//! index.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use lcukit_ir::RotationAxis;
use ndarray::{Array2, array, linalg::kron};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const IMAG: Complex64 = Complex64::new(0.0, 1.0);

static MAT_I: LazyLock<Array2<Complex64>> = LazyLock::new(|| array![[ONE, ZERO], [ZERO, ONE]]);
static MAT_X: LazyLock<Array2<Complex64>> = LazyLock::new(|| array![[ZERO, ONE], [ONE, ZERO]]);
static MAT_Y: LazyLock<Array2<Complex64>> = LazyLock::new(|| array![[ZERO, -IMAG], [IMAG, ZERO]]);
static MAT_Z: LazyLock<Array2<Complex64>> = LazyLock::new(|| array![[ONE, ZERO], [ZERO, -ONE]]);

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// All four operators in lexicographic order.
    pub const ALL: [PauliOp; 4] = [PauliOp::I, PauliOp::X, PauliOp::Y, PauliOp::Z];

    /// Parse a single symbol.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'I' => Some(PauliOp::I),
            'X' => Some(PauliOp::X),
            'Y' => Some(PauliOp::Y),
            'Z' => Some(PauliOp::Z),
            _ => None,
        }
    }

    /// The symbol.
    pub fn as_char(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }

    /// The 2x2 matrix.
    pub fn matrix(self) -> &'static Array2<Complex64> {
        match self {
            PauliOp::I => &MAT_I,
            PauliOp::X => &MAT_X,
            PauliOp::Y => &MAT_Y,
            PauliOp::Z => &MAT_Z,
        }
    }

    /// Rotation axis generated by this operator; `None` for the identity.
    pub fn axis(self) -> Option<RotationAxis> {
        match self {
            PauliOp::I => None,
            PauliOp::X => Some(RotationAxis::X),
            PauliOp::Y => Some(RotationAxis::Y),
            PauliOp::Z => Some(RotationAxis::Z),
        }
    }
}

/// A dense tensor product of Pauli operators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PauliString {
    ops: Vec<PauliOp>,
}

impl PauliString {
    /// Build from operators; fails on an empty list.
    pub fn new(ops: Vec<PauliOp>) -> SynthResult<Self> {
        if ops.is_empty() {
            return Err(SynthError::EmptyInput {
                what: "Pauli string",
            });
        }
        Ok(Self { ops })
    }

    /// The all-identity string on `n` qubits (`n >= 1`).
    pub fn identity(n: usize) -> SynthResult<Self> {
        Self::new(vec![PauliOp::I; n])
    }

    /// Operators in qubit order.
    pub fn ops(&self) -> &[PauliOp] {
        &self.ops
    }

    /// Number of qubits.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Non-identity positions with their operators, ascending.
    pub fn active(&self) -> impl Iterator<Item = (usize, PauliOp)> + '_ {
        self.ops
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, op)| op != PauliOp::I)
    }

    /// Number of non-identity positions.
    pub fn weight(&self) -> usize {
        self.active().count()
    }

    /// True if every position is the identity.
    pub fn is_identity(&self) -> bool {
        self.weight() == 0
    }

    /// Tensor-product matrix; see [`pauli_matrix`].
    pub fn matrix(&self) -> Array2<Complex64> {
        pauli_matrix(self)
    }

    /// All `4^n` strings of width `n` in lexicographic order over `I < X < Y < Z`.
    pub fn all(n: usize) -> impl Iterator<Item = PauliString> {
        let total = 1usize << (2 * n);
        (0..total).map(move |mut idx| {
            let mut ops = vec![PauliOp::I; n];
            for slot in ops.iter_mut().rev() {
                *slot = PauliOp::ALL[idx & 3];
                idx >>= 2;
            }
            PauliString { ops }
        })
    }
}

impl FromStr for PauliString {
    type Err = SynthError;

    fn from_str(s: &str) -> SynthResult<Self> {
        let ops = s
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                PauliOp::from_char(ch).ok_or(SynthError::InvalidPauliChar { ch, position })
            })
            .collect::<SynthResult<Vec<_>>>()?;
        Self::new(ops)
    }
}

impl TryFrom<String> for PauliString {
    type Error = SynthError;

    fn try_from(s: String) -> SynthResult<Self> {
        s.parse()
    }
}

impl From<PauliString> for String {
    fn from(p: PauliString) -> Self {
        p.to_string()
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{}", op.as_char())?;
        }
        Ok(())
    }
}

/// Kronecker product of the single-qubit matrices, left to right.
pub fn pauli_matrix(pauli: &PauliString) -> Array2<Complex64> {
    let mut ops = pauli.ops().iter();
    let Some(first) = ops.next() else {
        return Array2::eye(1);
    };
    ops.fold(first.matrix().clone(), |acc, op| kron(&acc, op.matrix()))
}

/// Classify a coefficient's phase into `{0, pi, pi/2, -pi/2}`.
///
/// Zero and positive reals map to 0, negative reals to pi, positive and
/// negative imaginaries to +-pi/2. Anything with both parts non-zero is
/// rejected.
pub fn phase_of(coeff: Complex64) -> SynthResult<f64> {
    match (coeff.re, coeff.im) {
        (re, im) if im == 0.0 => Ok(if re < 0.0 { PI } else { 0.0 }),
        (re, im) if re == 0.0 => Ok(if im > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 }),
        (re, im) => Err(SynthError::MixedPhase { re, im }),
    }
}
