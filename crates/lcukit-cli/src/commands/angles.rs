//! Angles command implementation.

use anyhow::Result;
use console::style;

use lcukit_synth::gen_angles;

use super::common::Settings;
use crate::config::OutputFormat;

/// Execute the angles command.
pub fn execute(values: &[f64], from_probs: bool, settings: &Settings) -> Result<()> {
    let amplitudes: Vec<f64> = if from_probs {
        if let Some(p) = values.iter().find(|p| **p < 0.0) {
            anyhow::bail!("Probabilities must be non-negative, got {p}");
        }
        values.iter().map(|p| p.sqrt()).collect()
    } else {
        values.to_vec()
    };

    let angles = gen_angles(&amplitudes)?;

    match settings.format {
        OutputFormat::Json => println!("{}", settings.to_json(&angles)?),
        OutputFormat::Summary => {
            println!(
                "{} {} angles for {} amplitudes",
                style("✓").green().bold(),
                angles.len(),
                amplitudes.len()
            );
            // breadth-first: node k sits on tree level floor(log2(k + 1))
            for (k, theta) in angles.iter().enumerate() {
                let level = (k + 1).ilog2();
                println!("  level {level} node {k:>4}: {theta:.12}");
            }
        }
    }
    Ok(())
}
