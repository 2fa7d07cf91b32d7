//! lcukit command-line interface.
//!
//! The binary is a thin shell over this library: [`cli::Cli`] defines the
//! arguments, [`config::Config`] the YAML/environment configuration and
//! [`commands`] one module per subcommand.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Commands};
pub use commands::common::Settings;
pub use config::{Config, ConfigError, OutputFormat};
