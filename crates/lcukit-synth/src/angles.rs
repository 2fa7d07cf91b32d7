//! Rotation angles for binary-tree amplitude encoding.
//!
//! The basis states of `n` qubits are the leaves of a complete binary tree.
//! Each internal node splits the weight of its subtree between the left
//! and right child with one Ry rotation. The angles are produced bottom-up
//! and returned root first, breadth-first by level.

use std::f64::consts::PI;

use tracing::trace;

use crate::error::{SynthError, SynthResult, exact_log2};

/// Angle for one node given its children `(a, b)` and their joint norm.
fn node_angle(a: f64, b: f64, norm: f64) -> f64 {
    if norm == 0.0 {
        return 0.0;
    }
    // clamp guards asin against rounding just past +-1
    let half = (b / norm).clamp(-1.0, 1.0).asin();
    if a > 0.0 { 2.0 * half } else { 2.0 * PI - 2.0 * half }
}

/// Compute the `2^n - 1` tree angles for a real amplitude vector of length `2^n`.
///
/// A length-1 vector has no internal nodes and yields no angles.
///
/// ```rust
/// use lcukit_synth::gen_angles;
/// use std::f64::consts::FRAC_PI_2;
///
/// let angles = gen_angles(&[0.5_f64.sqrt(), 0.5_f64.sqrt()]).unwrap();
/// assert!((angles[0] - FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn gen_angles(x: &[f64]) -> SynthResult<Vec<f64>> {
    let depth = exact_log2("amplitude vector", x.len())?;
    if let Some((index, &value)) = x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(SynthError::NonFiniteAmplitude { index, value });
    }

    // levels[d] holds the angles of tree level (depth - 1 - d)
    let mut levels: Vec<Vec<f64>> = Vec::with_capacity(depth as usize);
    let mut current = x.to_vec();
    while current.len() > 1 {
        let (norms, angles): (Vec<f64>, Vec<f64>) = current
            .chunks_exact(2)
            .map(|pair| {
                let norm = pair[0].hypot(pair[1]);
                (norm, node_angle(pair[0], pair[1], norm))
            })
            .unzip();
        trace!(level_size = angles.len(), "computed tree level");
        levels.push(angles);
        current = norms;
    }

    Ok(levels.into_iter().rev().flatten().collect())
}
