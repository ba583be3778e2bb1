//! `likes check-config` — validate a config file without starting the
//! server. The referenced fixture, if any, is loaded too.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use likes_api::config::AppConfig;
use likes_api::state::AppState;

#[derive(Args, Debug)]
pub struct CheckConfigArgs {
    /// YAML config file to validate.
    pub path: PathBuf,
}

/// Validate `path`, returning a one-line summary or the first problem.
pub fn check_config(path: &Path) -> Result<String, String> {
    let config = AppConfig::load(path).map_err(|e| e.to_string())?;
    let summary = format!(
        "port {}, voters chunk {}, batch window {}m, metrics {}",
        config.port,
        config.min_voters_chunk,
        config.batch_time_minutes,
        if config.metrics_enabled { "on" } else { "off" }
    );
    match config.fixture.clone() {
        Some(fixture) => {
            AppState::from_config(config).map_err(|e| e.to_string())?;
            Ok(format!("{summary}, fixture {}", fixture.display()))
        }
        None => Ok(summary),
    }
}

pub fn run_check_config(args: &CheckConfigArgs) -> Result<u8> {
    match check_config(&args.path) {
        Ok(summary) => {
            println!("OK: {} ({summary})", args.path.display());
            Ok(0)
        }
        Err(problem) => {
            println!("FAIL: {}: {problem}", args.path.display());
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn valid_config_passes() {
        let file = write("port: 9000\nmetrics_enabled: false\n");
        let summary = check_config(file.path()).unwrap();
        assert!(summary.contains("port 9000"));
        assert!(summary.contains("metrics off"));
    }

    #[test]
    fn duplicate_verbs_fail() {
        let file = write("verbs:\n  wish_like: liked it\n  deal_like: liked it\n");
        let problem = check_config(file.path()).unwrap_err();
        assert!(problem.contains("share the verb"));
    }

    #[test]
    fn broken_fixture_fails() {
        let fixture = write("objects:\n  - kind: album\n    id: 1\n    parent: { kind: image, id: 2 }\n");
        let config = write(&format!("fixture: {}\n", fixture.path().display()));
        let problem = check_config(config.path()).unwrap_err();
        assert!(problem.contains("not a comment kind"));
    }

    #[test]
    fn run_reports_exit_code() {
        let good = write("{}\n");
        let bad = write("port: not-a-port\n");
        assert_eq!(
            run_check_config(&CheckConfigArgs {
                path: good.path().to_path_buf()
            })
            .unwrap(),
            0
        );
        assert_eq!(
            run_check_config(&CheckConfigArgs {
                path: bad.path().to_path_buf()
            })
            .unwrap(),
            1
        );
    }
}
