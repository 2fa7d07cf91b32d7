//! LCU command implementation.

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use lcukit_synth::lcu_circuit;

use super::common::{Settings, emit_circuit, load_table};
use crate::cli::{OutputArgs, TableArgs};
use crate::config::OutputFormat;

/// Execute the lcu command.
pub fn execute(table: &TableArgs, out: &OutputArgs, settings: &Settings) -> Result<()> {
    let table = load_table(table)?;
    let lambda = table.lambda();
    info!(n_terms = table.len(), lambda, "loaded Pauli table");

    let circuit = lcu_circuit(&table).context("LCU synthesis failed")?;
    if settings.format == OutputFormat::Summary {
        println!("  Normalisation λ = {}", style(lambda).yellow());
    }
    emit_circuit(&circuit, out.output.as_deref(), &out.sim, settings)
}
