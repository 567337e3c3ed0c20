/// Gurnel CLI: configuration, command dispatch and report rendering.
///
/// The statistics themselves live in `gurnel-core`; this crate turns a
/// command line and a config file into a core run and prints the result.
pub mod commands;
pub mod config;
pub mod report;

pub use commands::{run, run_stats, Cli, Command, StatsArgs};
pub use config::{Config, ConfigError};
