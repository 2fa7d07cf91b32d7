//! Trace-based Pauli decomposition of dense matrices.

use ndarray::Array2;
use num_complex::Complex64;
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::pauli::{PauliString, pauli_matrix};
use crate::table::PauliTable;

/// Expand a `2^n x 2^n` matrix as `A = sum_P c_P P`.
///
/// Every one of the `4^n` strings is listed, in lexicographic order, with
/// `c_P = tr(P · A) / 2^n`. Zero coefficients are kept.
pub fn decompose(matrix: &Array2<Complex64>) -> SynthResult<PauliTable> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(SynthError::InvalidMatrix(format!(
            "matrix must be square, got {rows}x{cols}"
        )));
    }
    if rows < 2 || !rows.is_power_of_two() {
        return Err(SynthError::InvalidMatrix(format!(
            "dimension must be a power of two >= 2, got {rows}"
        )));
    }
    if matrix.iter().any(|z| !z.re.is_finite() || !z.im.is_finite()) {
        return Err(SynthError::InvalidMatrix("entries must be finite".into()));
    }

    let n = rows.trailing_zeros() as usize;
    let scale = 1.0 / rows as f64;
    debug!(n_qubits = n, n_strings = 1usize << (2 * n), "decomposing matrix");

    let a_t = matrix.t();
    let mut table = PauliTable::new();
    for pauli in PauliString::all(n) {
        // tr(P A) = sum_{r,c} P[r,c] A[c,r]
        let p = pauli_matrix(&pauli);
        let coeff = (&p * &a_t).sum() * scale;
        table.insert(pauli, coeff)?;
    }
    Ok(table)
}

/// Build an `ndarray` matrix from nested rows.
pub fn matrix_from_rows(rows: Vec<Vec<Complex64>>) -> SynthResult<Array2<Complex64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
        return Err(SynthError::InvalidMatrix(format!(
            "row {i} has {} entries, expected {n_cols}",
            row.len()
        )));
    }
    let flat: Vec<Complex64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| SynthError::InvalidMatrix(e.to_string()))
}
