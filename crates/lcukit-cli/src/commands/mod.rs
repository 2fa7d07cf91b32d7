//! CLI command implementations.

pub mod angles;
pub mod common;
pub mod decompose;
pub mod evolve;
pub mod lcu;
pub mod prepare;
pub mod run;
pub mod select;
pub mod version;

use anyhow::Result;

use crate::cli::Commands;
use common::Settings;

/// Run one subcommand.
pub fn execute(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Angles {
            amplitudes,
            from_probs,
        } => angles::execute(&amplitudes, from_probs, settings),

        Commands::Prepare {
            probs,
            measure,
            out,
        } => prepare::execute(&probs, measure, &out, settings),

        Commands::Select { table, out } => select::execute(&table, &out, settings),

        Commands::Evolve {
            table,
            time,
            steps,
            order,
            drop_identity,
            out,
        } => evolve::execute(
            &table,
            time,
            steps,
            order.into(),
            drop_identity,
            &out,
            settings,
        ),

        Commands::Decompose {
            matrix,
            threshold,
            output,
        } => decompose::execute(&matrix, threshold, output.as_deref(), settings),

        Commands::Lcu { table, out } => lcu::execute(&table, &out, settings),

        Commands::Run { input, sim } => run::execute(&input, &sim, settings),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}
