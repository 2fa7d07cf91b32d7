//! Run command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use super::common::{Settings, load_circuit, print_counts, simulate};
use crate::cli::SimArgs;
use crate::config::OutputFormat;

/// Execute the run command.
pub fn execute(input: &Path, sim: &SimArgs, settings: &Settings) -> Result<()> {
    let shots = sim.shots.unwrap_or(settings.default_shots);
    let circuit = load_circuit(input)?;

    if settings.format == OutputFormat::Summary {
        println!(
            "{} Running {} ({} shots)",
            style("→").cyan().bold(),
            style(input.display()).green(),
            shots
        );
        println!(
            "  Loaded: {} qubits, depth {}",
            circuit.num_qubits(),
            circuit.depth()
        );
    }

    let counts = simulate(&circuit, shots, sim, settings)?;
    print_counts(&counts, settings)
}
