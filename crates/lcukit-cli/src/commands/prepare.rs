//! Prepare command implementation.

use anyhow::{Context, Result};

use lcukit_synth::state_preparation;

use super::common::{Settings, emit_circuit};
use crate::cli::OutputArgs;

/// Execute the prepare command.
pub fn execute(probs: &[f64], measure: bool, out: &OutputArgs, settings: &Settings) -> Result<()> {
    let circuit =
        state_preparation(probs, measure).context("State preparation synthesis failed")?;
    emit_circuit(&circuit, out.output.as_deref(), &out.sim, settings)
}
