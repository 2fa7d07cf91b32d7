//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lcukit_synth::TrotterOrder;

use crate::config::OutputFormat;

/// lcukit - state preparation, SELECT, LCU and Trotter circuit synthesis
#[derive(Parser, Debug)]
#[command(name = "lcukit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (YAML)
    #[arg(short, long, global = true, env = "LCUKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (overrides the configuration)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the rotation-angle tree of an amplitude vector
    Angles {
        /// Comma-separated amplitudes (length 2^n)
        #[arg(short, long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        amplitudes: Vec<f64>,

        /// Treat the values as probabilities and take square roots first
        #[arg(long)]
        from_probs: bool,
    },

    /// Synthesize an amplitude-encoding state-preparation circuit
    Prepare {
        /// Comma-separated probabilities (length 2^n)
        #[arg(short, long, value_delimiter = ',', required = true)]
        probs: Vec<f64>,

        /// Measure every qubit at the end
        #[arg(long)]
        measure: bool,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Synthesize the SELECT oracle of a Pauli table
    Select {
        #[command(flatten)]
        table: TableArgs,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Synthesize Trotterized time evolution exp(-iHt)
    Evolve {
        #[command(flatten)]
        table: TableArgs,

        /// Evolution time
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        time: f64,

        /// Number of Trotter steps
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: usize,

        /// Product-formula order
        #[arg(long, value_enum, default_value_t = OrderArg::First)]
        order: OrderArg,

        /// Drop the all-identity term (a global phase) before synthesis
        #[arg(long)]
        drop_identity: bool,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Decompose a dense matrix into a Pauli table
    Decompose {
        /// Matrix file (JSON rows of numbers or [re, im] pairs)
        #[arg(short, long)]
        matrix: PathBuf,

        /// Omit terms whose coefficient is below this magnitude
        #[arg(long)]
        threshold: Option<f64>,

        /// Write the table here (JSON, or YAML for .yaml/.yml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Synthesize the LCU block encoding PREPARE · SELECT · PREPARE†
    Lcu {
        #[command(flatten)]
        table: TableArgs,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Simulate a circuit file and print measurement counts
    Run {
        /// Circuit file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        sim: SimArgs,
    },

    /// Show version information
    Version,
}

/// Pauli-table input.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Pauli table (.json, .yaml, .yml, or .txt Hamiltonian text)
    #[arg(short, long)]
    pub table: PathBuf,

    /// Register width for .txt Hamiltonians (default: largest index + 1)
    #[arg(long)]
    pub num_qubits: Option<usize>,
}

/// Where a synthesized circuit goes, and whether to simulate it.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write the circuit as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub sim: SimArgs,
}

/// Simulator options.
#[derive(Args, Debug, Clone, Default)]
pub struct SimArgs {
    /// Simulate with this many shots and print counts
    #[arg(short, long)]
    pub shots: Option<u32>,

    /// Simulator RNG seed
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Trotter order on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Lie-Trotter
    First,
    /// Symmetric Suzuki-Trotter
    Second,
}

impl From<OrderArg> for TrotterOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::First => TrotterOrder::First,
            OrderArg::Second => TrotterOrder::Second,
        }
    }
}
