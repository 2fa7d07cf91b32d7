//! Quantum gate types.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Axis of a single-qubit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationAxis {
    /// Rotation about X.
    X,
    /// Rotation about Y.
    Y,
    /// Rotation about Z.
    Z,
}

impl RotationAxis {
    /// Rotation gate about this axis.
    pub fn gate(self, theta: f64) -> StandardGate {
        match self {
            RotationAxis::X => StandardGate::Rx(theta),
            RotationAxis::Y => StandardGate::Ry(theta),
            RotationAxis::Z => StandardGate::Rz(theta),
        }
    }
}

/// Standard gates with known semantics.
///
/// Rotations follow `R_σ(θ) = exp(-i θ σ / 2)`; the phase gate is
/// `diag(1, e^{iλ})`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Controlled-X (CNOT) gate.
    CX,
}

impl StandardGate {
    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
        }
    }

    /// Get the number of qubits this gate acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX => 2,
            _ => 1,
        }
    }

    /// The angle of a parameterized gate.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(t) | StandardGate::Ry(t) | StandardGate::Rz(t) | StandardGate::P(t) => {
                Some(*t)
            }
            StandardGate::X | StandardGate::CX => None,
        }
    }

    /// Axis and angle if this is a rotation.
    pub fn as_rotation(&self) -> Option<(RotationAxis, f64)> {
        match self {
            StandardGate::Rx(t) => Some((RotationAxis::X, *t)),
            StandardGate::Ry(t) => Some((RotationAxis::Y, *t)),
            StandardGate::Rz(t) => Some((RotationAxis::Z, *t)),
            _ => None,
        }
    }

    /// The adjoint gate.
    pub fn inverse(&self) -> StandardGate {
        match self {
            StandardGate::X => StandardGate::X,
            StandardGate::CX => StandardGate::CX,
            StandardGate::Rx(t) => StandardGate::Rx(-t),
            StandardGate::Ry(t) => StandardGate::Ry(-t),
            StandardGate::Rz(t) => StandardGate::Rz(-t),
            StandardGate::P(t) => StandardGate::P(-t),
        }
    }

    /// Row-major 2x2 matrix of a single-qubit gate; `None` for `CX`.
    pub fn matrix_2x2(&self) -> Option<[Complex64; 4]> {
        let c = |re: f64, im: f64| Complex64::new(re, im);
        let m = match *self {
            StandardGate::X => [c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)],
            StandardGate::Rx(t) => {
                let (s, co) = (t / 2.0).sin_cos();
                [c(co, 0.0), c(0.0, -s), c(0.0, -s), c(co, 0.0)]
            }
            StandardGate::Ry(t) => {
                let (s, co) = (t / 2.0).sin_cos();
                [c(co, 0.0), c(-s, 0.0), c(s, 0.0), c(co, 0.0)]
            }
            StandardGate::Rz(t) => {
                let (s, co) = (t / 2.0).sin_cos();
                [c(co, -s), c(0.0, 0.0), c(0.0, 0.0), c(co, s)]
            }
            StandardGate::P(l) => [
                c(1.0, 0.0),
                c(0.0, 0.0),
                c(0.0, 0.0),
                Complex64::from_polar(1.0, l),
            ],
            StandardGate::CX => return None,
        };
        Some(m)
    }
}

/// Dense unitary on `num_qubits` qubits.
///
/// The matrix is row-major, `2^n x 2^n`. The first target qubit the
/// unitary is applied to is the most significant bit of the row index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitaryGate {
    /// Gate name.
    pub name: String,
    /// Number of qubits.
    pub num_qubits: u32,
    /// Row-major matrix entries.
    pub matrix: Vec<Complex64>,
}

impl UnitaryGate {
    /// Create a unitary, checking the matrix size against the width.
    pub fn new(name: impl Into<String>, num_qubits: u32, matrix: Vec<Complex64>) -> IrResult<Self> {
        let name = name.into();
        let dim = 1usize << num_qubits;
        if num_qubits == 0 || matrix.len() != dim * dim {
            return Err(IrError::MatrixDimensionMismatch {
                name,
                num_qubits,
                expected: dim * dim,
                got: matrix.len(),
            });
        }
        Ok(Self {
            name,
            num_qubits,
            matrix,
        })
    }

    /// Matrix dimension `2^n`.
    pub fn dim(&self) -> usize {
        1 << self.num_qubits
    }

    /// Entry at `(row, col)`.
    #[inline]
    pub fn entry(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dim() + col]
    }

    /// Conjugate transpose, named `<name>_dg`.
    pub fn adjoint(&self) -> Self {
        let dim = self.dim();
        let mut matrix = vec![Complex64::new(0.0, 0.0); dim * dim];
        for r in 0..dim {
            for c in 0..dim {
                matrix[c * dim + r] = self.matrix[r * dim + c].conj();
            }
        }
        Self {
            name: format!("{}_dg", self.name),
            num_qubits: self.num_qubits,
            matrix,
        }
    }
}

/// The kind of gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate.
    Standard(StandardGate),
    /// A dense unitary.
    Unitary(UnitaryGate),
}

impl GateKind {
    /// Get the name of the gate.
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Unitary(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Unitary(g) => g.num_qubits,
        }
    }
}

/// A gate, optionally controlled on additional qubits.
///
/// Control qubits come first in an instruction's qubit list and are
/// active when in `|1>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Number of leading control qubits.
    #[serde(default)]
    pub num_controls: u32,
    /// Optional label for the gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            num_controls: 0,
            label: None,
        }
    }

    /// Create a new unitary gate.
    pub fn unitary(gate: UnitaryGate) -> Self {
        Self {
            kind: GateKind::Unitary(gate),
            num_controls: 0,
            label: None,
        }
    }

    /// Add `n` control qubits.
    #[must_use]
    pub fn controlled(mut self, n: u32) -> Self {
        self.num_controls += n;
        self
    }

    /// Set a label for this gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Name of the gate including its control prefix (`cry`, `mcry`).
    pub fn name(&self) -> String {
        let base = self.kind.name();
        match self.num_controls {
            0 => base.to_string(),
            1 => format!("c{base}"),
            _ => format!("mc{base}"),
        }
    }

    /// Get the number of qubits including controls.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits() + self.num_controls
    }

    /// The adjoint gate with the same controls.
    pub fn inverse(&self) -> Gate {
        let kind = match &self.kind {
            GateKind::Standard(g) => GateKind::Standard(g.inverse()),
            GateKind::Unitary(u) => GateKind::Unitary(u.adjoint()),
        };
        Gate {
            kind,
            num_controls: self.num_controls,
            label: self.label.clone(),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<UnitaryGate> for Gate {
    fn from(gate: UnitaryGate) -> Self {
        Gate::unitary(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::X.name(), "x");
        assert_eq!(StandardGate::X.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::Ry(0.3).angle(), Some(0.3));
        assert_eq!(StandardGate::CX.angle(), None);
    }

    #[test]
    fn test_rotation_axis() {
        assert_eq!(RotationAxis::Y.gate(1.0), StandardGate::Ry(1.0));
        assert_eq!(
            StandardGate::Rz(2.0).as_rotation(),
            Some((RotationAxis::Z, 2.0))
        );
        assert_eq!(StandardGate::P(2.0).as_rotation(), None);
    }

    #[test]
    fn test_controlled_names() {
        let g = Gate::standard(StandardGate::Ry(0.5));
        assert_eq!(g.name(), "ry");
        assert_eq!(g.clone().controlled(1).name(), "cry");
        let mc = g.controlled(3);
        assert_eq!(mc.name(), "mcry");
        assert_eq!(mc.num_qubits(), 4);
    }

    #[test]
    fn test_inverse_negates_angle() {
        let g = Gate::standard(StandardGate::P(PI / 2.0)).controlled(2);
        let inv = g.inverse();
        assert_eq!(inv.kind, GateKind::Standard(StandardGate::P(-PI / 2.0)));
        assert_eq!(inv.num_controls, 2);
    }

    #[test]
    fn test_unitary_dimension_check() {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        assert!(UnitaryGate::new("id", 1, vec![one, zero, zero, one]).is_ok());
        assert!(matches!(
            UnitaryGate::new("bad", 1, vec![one, zero, zero]),
            Err(IrError::MatrixDimensionMismatch { expected: 4, got: 3, .. })
        ));
    }

    #[test]
    fn test_unitary_adjoint() {
        let i = Complex64::new(0.0, 1.0);
        let zero = Complex64::new(0.0, 0.0);
        let u = UnitaryGate::new("s", 1, vec![Complex64::new(1.0, 0.0), zero, zero, i]).unwrap();
        let dg = u.adjoint();
        assert_eq!(dg.name, "s_dg");
        assert_eq!(dg.entry(1, 1), Complex64::new(0.0, -1.0));
    }

    #[test]
    fn test_rotation_matrix() {
        let m = StandardGate::Ry(PI).matrix_2x2().unwrap();
        assert!((m[0].re).abs() < 1e-12);
        assert!((m[1].re + 1.0).abs() < 1e-12);
        assert!((m[2].re - 1.0).abs() < 1e-12);
        assert!(StandardGate::CX.matrix_2x2().is_none());
    }
}
