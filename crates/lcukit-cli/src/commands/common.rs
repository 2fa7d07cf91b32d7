//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array2;
use num_complex::Complex64;
use serde::Serialize;

use lcukit_adapter_sim::{Counts, SimulatorBackend};
use lcukit_ir::Circuit;
use lcukit_synth::{Coefficient, PauliTable, matrix_from_rows, parse_hamiltonian};

use crate::cli::{SimArgs, TableArgs};
use crate::config::{Config, OutputFormat};

/// Effective settings after merging configuration and flags.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Result format on stdout.
    pub format: OutputFormat,
    /// Pretty-print JSON.
    pub pretty: bool,
    /// Shots used when a command runs the simulator without `--shots`.
    pub default_shots: u32,
    /// Simulator seed from the configuration.
    pub seed: Option<u64>,
    /// Simulator width limit.
    pub max_qubits: u32,
}

impl Settings {
    /// Merge the loaded configuration with the global `--format` flag.
    pub fn resolve(config: &Config, format: Option<OutputFormat>) -> Self {
        Settings {
            format: format.unwrap_or(config.output.format),
            pretty: config.output.pretty,
            default_shots: config.simulator.shots,
            seed: config.simulator.seed,
            max_qubits: config.simulator.max_qubits,
        }
    }

    /// Simulator honouring `--seed`, then the configured seed.
    pub fn simulator(&self, sim: &SimArgs) -> SimulatorBackend {
        let backend = SimulatorBackend::with_max_qubits(self.max_qubits);
        match sim.seed.or(self.seed) {
            Some(seed) => backend.with_seed(seed),
            None => backend,
        }
    }

    /// Serialize `value` as JSON in the configured style.
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.context("Failed to serialize JSON")
    }
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load a Pauli table from JSON, YAML or Hamiltonian text.
pub fn load_table(args: &TableArgs) -> Result<PauliTable> {
    let path = args.table.as_path();
    let source = read_file(path)?;

    let table = match extension(path).as_str() {
        "json" => serde_json::from_str(&source)
            .with_context(|| format!("Invalid Pauli table: {}", path.display()))?,
        "yaml" | "yml" => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Invalid Pauli table: {}", path.display()))?,
        "txt" => parse_hamiltonian(&source, args.num_qubits)
            .with_context(|| format!("Invalid Hamiltonian: {}", path.display()))?,
        other => anyhow::bail!(
            "Unsupported table format '.{other}'. Available: .json, .yaml, .yml, .txt"
        ),
    };
    Ok(table)
}

/// Load a dense matrix from JSON rows of numbers or `[re, im]` pairs.
pub fn load_matrix(path: &Path) -> Result<Array2<Complex64>> {
    let source = read_file(path)?;
    let rows: Vec<Vec<Coefficient>> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid matrix file: {}", path.display()))?;
    let rows: Vec<Vec<Complex64>> = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|c| match c {
                    Coefficient::Real(re) => Complex64::new(re, 0.0),
                    Coefficient::Complex([re, im]) => Complex64::new(re, im),
                })
                .collect::<Vec<_>>()
        })
        .collect();
    Ok(matrix_from_rows(rows)?)
}

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &Path) -> Result<Circuit> {
    let source = read_file(path)?;
    serde_json::from_str(&source).with_context(|| format!("Invalid circuit file: {}", path.display()))
}

/// Write `contents` to `path`.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// JSON body for a circuit printed together with its counts.
#[derive(Serialize)]
struct SimulatedCircuit<'a> {
    circuit: &'a Circuit,
    counts: &'a Counts,
}

/// Write or print a synthesized circuit, then simulate it if asked.
pub fn emit_circuit(
    circuit: &Circuit,
    output: Option<&Path>,
    sim: &SimArgs,
    settings: &Settings,
) -> Result<()> {
    if let Some(path) = output {
        write_file(path, &settings.to_json(circuit)?)?;
        eprintln!(
            "{} Wrote {} to {}",
            style("✓").green().bold(),
            style(circuit.name()).cyan(),
            style(path.display()).green()
        );
    }

    let counts = match sim.shots {
        Some(shots) => Some(simulate(circuit, shots, sim, settings)?),
        None => None,
    };

    match (settings.format, output, &counts) {
        (OutputFormat::Json, None, None) => println!("{}", settings.to_json(circuit)?),
        (OutputFormat::Json, None, Some(counts)) => {
            println!("{}", settings.to_json(&SimulatedCircuit { circuit, counts })?);
        }
        (OutputFormat::Json, Some(_), Some(counts)) => print_counts(counts, settings)?,
        (OutputFormat::Json, Some(_), None) => {}
        (OutputFormat::Summary, _, counts) => {
            print_summary(circuit);
            if let Some(counts) = counts {
                print_counts(counts, settings)?;
            }
        }
    }
    Ok(())
}

/// Print qubits, depth and op counts.
pub fn print_summary(circuit: &Circuit) {
    println!(
        "{} {}",
        style("Circuit").bold(),
        style(circuit.name()).cyan()
    );
    println!("  Qubits:       {}", circuit.num_qubits());
    println!("  Clbits:       {}", circuit.num_clbits());
    println!("  Instructions: {}", circuit.len());
    println!("  Gates:        {}", circuit.num_gates());
    println!("  Depth:        {}", style(circuit.depth()).yellow());

    let ops = circuit.count_ops();
    if !ops.is_empty() {
        println!("  Operations:");
        for (name, count) in &ops {
            println!("    {:<12} {count:>6}", style(name).cyan());
        }
    }
}

/// Run `circuit` on the statevector simulator behind a spinner.
pub fn simulate(circuit: &Circuit, shots: u32, sim: &SimArgs, settings: &Settings) -> Result<Counts> {
    let backend = settings.simulator(sim);

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!(
        "Simulating {} qubits, {shots} shots...",
        circuit.num_qubits()
    ));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let counts = backend.run(circuit, shots);
    spinner.finish_and_clear();
    Ok(counts?)
}

/// Print counts as JSON or as a histogram.
pub fn print_counts(counts: &Counts, settings: &Settings) -> Result<()> {
    if settings.format == OutputFormat::Json {
        println!("{}", settings.to_json(counts)?);
        return Ok(());
    }

    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        counts.total()
    );

    let mut sorted: Vec<(&str, u64)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let total = counts.total() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings() -> Settings {
        Settings::resolve(&Config::default(), None)
    }

    #[test]
    fn test_resolve_flag_overrides_config() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Json;
        assert_eq!(Settings::resolve(&config, None).format, OutputFormat::Json);
        assert_eq!(
            Settings::resolve(&config, Some(OutputFormat::Summary)).format,
            OutputFormat::Summary
        );
    }

    #[test]
    fn test_load_table_formats() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("h.json");
        fs::write(&json, r#"[{"pauli": "XZ", "coeff": 0.5}, {"pauli": "ZZ", "coeff": [0, 1]}]"#)
            .unwrap();
        let t = load_table(&TableArgs { table: json, num_qubits: None }).unwrap();
        assert_eq!(t.len(), 2);

        let yaml = dir.path().join("h.yml");
        fs::write(&yaml, "- pauli: X\n  coeff: 1.0\n").unwrap();
        assert_eq!(load_table(&TableArgs { table: yaml, num_qubits: None }).unwrap().len(), 1);

        let txt = dir.path().join("h.txt");
        fs::write(&txt, "(0.5) [Z0] + (0.25) [X1]").unwrap();
        let t = load_table(&TableArgs { table: txt, num_qubits: Some(3) }).unwrap();
        assert_eq!(t.num_qubits(), Some(3));

        let bad = dir.path().join("h.csv");
        fs::write(&bad, "").unwrap();
        assert!(load_table(&TableArgs { table: bad, num_qubits: None }).is_err());
    }

    #[test]
    fn test_missing_file() {
        let args = TableArgs {
            table: PathBuf::from("/nonexistent/lcukit/table.json"),
            num_qubits: None,
        };
        let err = load_table(&args).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_load_matrix_mixed_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        fs::write(&path, "[[1, [0, -1]], [[0, 1], 1]]").unwrap();
        let m = load_matrix(&path).unwrap();
        assert_eq!(m[[0, 1]], Complex64::new(0.0, -1.0));
        assert_eq!(m[[1, 1]], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_circuit_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        let circuit = lcukit_synth::state_preparation(&[0.5, 0.5], true).unwrap();
        write_file(&path, &settings().to_json(&circuit).unwrap()).unwrap();
        assert_eq!(load_circuit(&path).unwrap(), circuit);
    }
}
