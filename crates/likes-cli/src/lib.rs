//! # likes-cli — Operator CLI for the likes Service
//!
//! ## Subcommands
//!
//! - `likes serve` — run the API server.
//! - `likes verbs` — print the effective verb table.
//! - `likes dispatch` — print which content kinds produce which activity.
//! - `likes check-config` — validate a config file and its fixture.
//!
//! ```bash
//! likes --config likes.yaml serve --port 9000
//! likes --config likes.yaml verbs --format yaml
//! likes check-config likes.yaml
//! ```
//!
//! Every `run_*` function returns the process exit code: `0` on success,
//! `1` when the input was rejected.

pub mod check;
pub mod serve;
pub mod tables;

use clap::ValueEnum;

/// Output format for table-printing subcommands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Yaml,
}
