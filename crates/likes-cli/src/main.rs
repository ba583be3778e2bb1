//! # likes CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use likes_api::config::LogFormat;
use likes_cli::check::{run_check_config, CheckConfigArgs};
use likes_cli::serve::{run_serve, ServeArgs};
use likes_cli::tables::{run_dispatch, run_verbs, TableArgs};

/// likes — like/unlike voting service
///
/// Runs the API server and inspects the configuration it would run with.
#[derive(Parser, Debug)]
#[command(name = "likes", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the YAML configuration file. Falls back to `$LIKES_CONFIG`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the API server.
    Serve(ServeArgs),

    /// Print the effective verb table.
    Verbs(TableArgs),

    /// Print the like/unlike dispatch table.
    Dispatch(TableArgs),

    /// Validate a configuration file and the fixture it references.
    CheckConfig(CheckConfigArgs),
}

/// Log filter for the given `-v` count. `serve` logs at info by default.
fn log_filter(verbose: u8, serving: bool) -> &'static str {
    match verbose {
        0 if serving => "info",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    // `serve` installs tracing itself once it knows the configured log format.
    let serving = matches!(cli.command, Commands::Serve(_));
    if !serving {
        likes_api::init_tracing(LogFormat::Text, log_filter(cli.verbose, false));
    }

    let result = match &cli.command {
        Commands::Serve(args) => run_serve(args, config, log_filter(cli.verbose, true)),
        Commands::Verbs(args) => run_verbs(args, config),
        Commands::Dispatch(args) => run_dispatch(args, config),
        Commands::CheckConfig(args) => run_check_config(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use likes_cli::OutputFormat;

    use super::*;

    #[test]
    fn cli_parse_serve_with_port_and_global_config() {
        let cli = Cli::try_parse_from(["likes", "serve", "--port", "9000", "--config", "l.yaml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("l.yaml")));
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, Some(9000)),
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_verbs_format() {
        let cli = Cli::try_parse_from(["likes", "verbs", "--format", "yaml"]).unwrap();
        match cli.command {
            Commands::Verbs(args) => assert_eq!(args.format, OutputFormat::Yaml),
            other => panic!("expected verbs, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_check_config_requires_path() {
        assert!(Cli::try_parse_from(["likes", "check-config"]).is_err());
        let cli = Cli::try_parse_from(["likes", "check-config", "likes.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::CheckConfig(_)));
    }

    #[test]
    fn verbosity_maps_to_filters() {
        assert_eq!(log_filter(0, false), "warn");
        assert_eq!(log_filter(0, true), "info");
        assert_eq!(log_filter(2, false), "debug");
        assert_eq!(log_filter(5, true), "trace");
    }
}
