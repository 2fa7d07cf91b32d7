//! Select command implementation.

use anyhow::{Context, Result};

use lcukit_synth::select_circuit;

use super::common::{Settings, emit_circuit, load_table};
use crate::cli::{OutputArgs, TableArgs};

/// Execute the select command.
pub fn execute(table: &TableArgs, out: &OutputArgs, settings: &Settings) -> Result<()> {
    let table = load_table(table)?;
    let circuit = select_circuit(&table).context("SELECT synthesis failed")?;
    emit_circuit(&circuit, out.output.as_deref(), &out.sim, settings)
}
