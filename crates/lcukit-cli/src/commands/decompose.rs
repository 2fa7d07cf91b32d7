//! Decompose command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use lcukit_synth::{PauliTable, decompose};

use super::common::{Settings, load_matrix, write_file};
use crate::config::OutputFormat;

/// Execute the decompose command.
pub fn execute(
    matrix: &Path,
    threshold: Option<f64>,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let m = load_matrix(matrix)?;
    let mut table = decompose(&m).context("Pauli decomposition failed")?;

    if let Some(eps) = threshold {
        if eps.is_nan() || eps < 0.0 {
            anyhow::bail!("Threshold must be non-negative, got {eps}");
        }
        table = PauliTable::from_terms(table.iter().filter(|t| t.coeff.norm() >= eps).cloned())?;
    }

    if let Some(path) = output {
        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => {
                serde_yaml_ng::to_string(&table).context("Failed to serialize YAML")?
            }
            _ => settings.to_json(&table)?,
        };
        write_file(path, &contents)?;
        eprintln!(
            "{} Wrote {} terms to {}",
            style("✓").green().bold(),
            table.len(),
            style(path.display()).green()
        );
        return Ok(());
    }

    match settings.format {
        OutputFormat::Json => println!("{}", settings.to_json(&table)?),
        OutputFormat::Summary => {
            println!(
                "{} {} Pauli terms, λ = {}",
                style("✓").green().bold(),
                table.len(),
                style(table.lambda()).yellow()
            );
            for term in &table {
                println!(
                    "  {}  {:+.10} {:+.10}i",
                    style(&term.pauli).cyan(),
                    term.coeff.re,
                    term.coeff.im
                );
            }
        }
    }
    Ok(())
}
