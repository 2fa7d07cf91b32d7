//! Evolve command implementation.

use anyhow::{Context, Result};
use tracing::info;

use lcukit_synth::{TrotterOrder, exp_evolution_with_order};

use super::common::{Settings, emit_circuit, load_table};
use crate::cli::{OutputArgs, TableArgs};

/// Execute the evolve command.
pub fn execute(
    table: &TableArgs,
    time: f64,
    steps: usize,
    order: TrotterOrder,
    drop_identity: bool,
    out: &OutputArgs,
    settings: &Settings,
) -> Result<()> {
    let mut table = load_table(table)?;
    if drop_identity {
        table = table.without_identity();
    }
    info!(n_terms = table.len(), time, steps, ?order, "synthesising evolution");

    let circuit = exp_evolution_with_order(&table, time, steps, order)
        .context("Trotter synthesis failed")?;
    emit_circuit(&circuit, out.output.as_deref(), &out.sim, settings)
}
