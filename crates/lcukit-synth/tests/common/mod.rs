//! Helpers shared by the integration tests.

#![allow(dead_code)]

use lcukit_adapter_sim::Statevector;
use lcukit_ir::Circuit;
use ndarray::Array2;
use num_complex::Complex64;

/// Run `circuit` on the computational basis state `index`.
pub fn run_from(circuit: &Circuit, index: usize) -> Statevector {
    let mut sv = Statevector::basis(circuit.num_qubits(), index).unwrap();
    for inst in circuit.instructions() {
        sv.apply(inst);
    }
    sv
}

/// Reverse the low `n` bits of `i`.
///
/// Matrix rows put character 0 of a Pauli string on the most significant
/// bit, the simulator puts qubit 0 on the least significant one.
pub fn reverse_bits(i: usize, n: usize) -> usize {
    (0..n).fold(0, |acc, k| acc | (((i >> k) & 1) << (n - 1 - k)))
}

/// Matrix exponential by scaling and squaring with a Taylor series.
pub fn expm(a: &Array2<Complex64>) -> Array2<Complex64> {
    let dim = a.nrows();
    let norm: f64 = a.iter().map(|z| z.norm()).sum();
    let mut squarings = 0;
    while norm / f64::from(1u32 << squarings) > 0.5 {
        squarings += 1;
    }
    let scaled = a.mapv(|z| z / f64::from(1u32 << squarings));

    let mut result = Array2::<Complex64>::eye(dim);
    let mut term = Array2::<Complex64>::eye(dim);
    for k in 1..30 {
        term = term.dot(&scaled).mapv(|z| z / k as f64);
        result = result + &term;
    }
    for _ in 0..squarings {
        result = result.dot(&result);
    }
    result
}

/// `exp(-i H t)` for a dense `H`.
pub fn evolution_operator(h: &Array2<Complex64>, t: f64) -> Array2<Complex64> {
    expm(&h.mapv(|z| z * Complex64::new(0.0, -t)))
}

/// Largest entrywise distance between two complex slices.
pub fn max_diff(a: &[Complex64], b: &[Complex64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).norm()).fold(0.0, f64::max)
}
