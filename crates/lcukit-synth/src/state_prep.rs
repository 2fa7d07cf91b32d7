//! Amplitude-encoding state preparation.
//!
//! Prepares `sum_i sqrt(p_i / sum_j p_j) |i>` from a probability vector of
//! length `2^n` with one uniformly controlled Ry cascade. Basis index `i`
//! carries its most significant bit on qubit 0.

use lcukit_ir::{Circuit, ClbitId, QubitId, RotationAxis, qubit_range};
use tracing::{debug, trace};

use crate::angles::gen_angles;
use crate::error::{SynthError, SynthResult, exact_log2};

/// Build the state-preparation circuit for `prob`.
///
/// With `measure`, qubit `k` is measured into classical bit `n - 1 - k`, so
/// an outcome bitstring (clbit 0 rightmost) reads as the binary basis index.
pub fn state_preparation(prob: &[f64], measure: bool) -> SynthResult<Circuit> {
    let n = exact_log2("probability vector", prob.len())?;
    if n == 0 {
        return Err(SynthError::NotPowerOfTwo {
            what: "probability vector (needs at least 2 entries)",
            len: prob.len(),
        });
    }
    if let Some((index, &value)) = prob
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0)
    {
        return Err(SynthError::InvalidProbability { index, value });
    }
    let norm = prob.iter().map(|p| p * p).sum::<f64>().sqrt();
    if norm == 0.0 {
        return Err(SynthError::AllZero {
            what: "probability vector",
        });
    }

    let state: Vec<f64> = prob.iter().map(|p| (p / norm).sqrt()).collect();
    let angles = gen_angles(&state)?;
    debug!(
        n_qubits = n,
        n_angles = angles.len(),
        measure,
        "synthesising state preparation"
    );

    let mut circuit = Circuit::with_size("state_preparation", n, if measure { n } else { 0 });
    circuit.ry(angles[0], QubitId(0))?;
    circuit.barrier_all()?;

    for val in 2..=angles.len() {
        let num_controls = (usize::BITS - val.leading_zeros()) as usize;
        let controls = qubit_range(0, num_controls as u32 - 1);
        let target = QubitId(num_controls as u32 - 1);

        // control k reads bit (num_controls - 2 - k) of val; the MSB is dropped
        let flips: Vec<QubitId> = controls
            .iter()
            .enumerate()
            .filter(|&(k, _)| val & (1 << (num_controls - 2 - k)) == 0)
            .map(|(_, &q)| q)
            .collect();

        for &q in &flips {
            circuit.x(q)?;
        }
        circuit.mcrotation(RotationAxis::Y, angles[val - 1], &controls, target)?;
        for &q in &flips {
            circuit.x(q)?;
        }
        circuit.barrier_all()?;
        trace!(node = val, controls = controls.len(), flips = flips.len(), "emitted tree node");
    }

    if measure {
        circuit.measure_into(qubit_range(0, n), (0..n).rev().map(ClbitId))?;
    }
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcukit_ir::InstructionKind;

    #[test]
    fn test_two_qubit_structure() {
        let c = state_preparation(&[0.1, 0.2, 0.3, 0.4], false).unwrap();
        assert_eq!(c.num_qubits(), 2);
        assert_eq!(c.num_clbits(), 0);
        let names: Vec<String> = c.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec![
                "ry", "barrier", // root
                "x", "cry", "x", "barrier", // node 2 (control 0)
                "cry", "barrier", // node 3 (control 1)
            ]
        );
    }

    #[test]
    fn test_gate_count_is_one_rotation_per_node() {
        let c = state_preparation(&[1.0; 16], false).unwrap();
        let ops = c.count_ops();
        let rotations = ops.get("ry").copied().unwrap_or(0)
            + ops.get("cry").copied().unwrap_or(0)
            + ops.get("mcry").copied().unwrap_or(0);
        assert_eq!(rotations, 15);
        assert_eq!(ops.get("barrier"), Some(&15));
    }

    #[test]
    fn test_measure_reverses_clbits() {
        let c = state_preparation(&[0.5, 0.5, 0.0, 0.0], true).unwrap();
        let last = c.instructions().last().unwrap();
        assert!(matches!(last.kind, InstructionKind::Measure));
        assert_eq!(last.qubits, vec![QubitId(0), QubitId(1)]);
        assert_eq!(last.clbits, vec![ClbitId(1), ClbitId(0)]);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(matches!(
            state_preparation(&[0.5, 0.25, 0.25], false),
            Err(SynthError::NotPowerOfTwo { len: 3, .. })
        ));
        assert!(matches!(
            state_preparation(&[1.0], false),
            Err(SynthError::NotPowerOfTwo { len: 1, .. })
        ));
        assert!(matches!(
            state_preparation(&[0.5, -0.5], false),
            Err(SynthError::InvalidProbability { index: 1, .. })
        ));
        assert!(matches!(
            state_preparation(&[0.0, 0.0], false),
            Err(SynthError::AllZero { .. })
        ));
    }
}
