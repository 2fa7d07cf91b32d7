//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;

use lcukit_ir::{Gate, GateKind, Instruction, InstructionKind, StandardGate, UnitaryGate};

use crate::error::{SimError, SimResult};

/// A statevector representing a quantum state.
///
/// Qubit `q` is bit `q` of the amplitude index.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0>.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Computational basis state `|index>`.
    pub fn basis(num_qubits: usize, index: usize) -> SimResult<Self> {
        let mut sv = Self::new(num_qubits);
        if index >= sv.amplitudes.len() {
            return Err(SimError::BasisIndexOutOfRange { index, num_qubits });
        }
        sv.amplitudes[0] = Complex64::new(0.0, 0.0);
        sv.amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(sv)
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitudes, indexed little-endian.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Inner product `<self|other>`.
    pub fn inner(&self, other: &Statevector) -> Complex64 {
        self.amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum()
    }

    /// State fidelity `|<self|other>|^2`.
    pub fn fidelity(&self, other: &Statevector) -> f64 {
        self.inner(other).norm_sqr()
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements and barriers leave the state untouched; sampling
    /// happens once at the end.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.apply_gate(gate, &qubits);
            }
            InstructionKind::Measure | InstructionKind::Barrier => {}
        }
    }

    /// Apply a gate; the first `num_controls` qubits are controls.
    fn apply_gate(&mut self, gate: &Gate, qubits: &[usize]) {
        let (controls, targets) = qubits.split_at(gate.num_controls as usize);
        let ctrl_mask = controls.iter().fold(0usize, |m, &c| m | (1 << c));

        match &gate.kind {
            GateKind::Standard(StandardGate::CX) => {
                let x = [
                    Complex64::new(0.0, 0.0),
                    Complex64::new(1.0, 0.0),
                    Complex64::new(1.0, 0.0),
                    Complex64::new(0.0, 0.0),
                ];
                self.apply_controlled_1q(ctrl_mask | (1 << targets[0]), targets[1], &x);
            }
            GateKind::Standard(std_gate) => {
                if let Some(m) = std_gate.matrix_2x2() {
                    self.apply_controlled_1q(ctrl_mask, targets[0], &m);
                }
            }
            GateKind::Unitary(u) => self.apply_controlled_unitary(ctrl_mask, targets, u),
        }
    }

    // =========================================================================
    // Gate kernels
    // =========================================================================

    /// Apply a 2x2 matrix on `target` where every bit of `ctrl_mask` is set.
    fn apply_controlled_1q(&mut self, ctrl_mask: usize, target: usize, m: &[Complex64; 4]) {
        let mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 && i & ctrl_mask == ctrl_mask {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0] * a + m[1] * b;
                self.amplitudes[j] = m[2] * a + m[3] * b;
            }
        }
    }

    /// Apply a dense unitary on `targets` (first target is the MSB of the
    /// matrix index) where every bit of `ctrl_mask` is set.
    fn apply_controlled_unitary(&mut self, ctrl_mask: usize, targets: &[usize], u: &UnitaryGate) {
        let k = targets.len();
        let dim = 1 << k;
        let target_mask = targets.iter().fold(0usize, |m, &t| m | (1 << t));

        // offsets[s] is the index offset of sub-state s within one block
        let offsets: Vec<usize> = (0..dim)
            .map(|s| {
                targets
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| s & (1 << (k - 1 - j)) != 0)
                    .fold(0usize, |acc, (_, &t)| acc | (1 << t))
            })
            .collect();

        let mut block = vec![Complex64::new(0.0, 0.0); dim];
        for base in 0..(1 << self.num_qubits) {
            if base & target_mask != 0 || base & ctrl_mask != ctrl_mask {
                continue;
            }
            for (s, &off) in offsets.iter().enumerate() {
                block[s] = self.amplitudes[base | off];
            }
            for (r, &off) in offsets.iter().enumerate() {
                self.amplitudes[base | off] = (0..dim).map(|c| u.entry(r, c) * block[c]).sum();
            }
        }
    }

    /// Sample a basis index from the Born distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the cumulative sum just below 1.
        self.amplitudes.len() - 1
    }
}
