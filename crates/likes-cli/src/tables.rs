//! `likes verbs` and `likes dispatch` — print the verb table and the
//! like/unlike dispatch table as the server would use them.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use likes_api::config::AppConfig;
use likes_core::dispatch::{table, Shape};
use likes_core::{VerbKey, VerbTable};

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct TableArgs {
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// One dispatch row with its verb resolved.
#[derive(Debug, Serialize)]
struct DispatchRow {
    voted: &'static str,
    parent: Option<&'static str>,
    verb_key: VerbKey,
    verb: String,
    shape: Shape,
    follows_target: bool,
}

fn dispatch_rows(verbs: &VerbTable) -> Vec<DispatchRow> {
    table()
        .into_iter()
        .map(|row| DispatchRow {
            voted: row.voted.as_str(),
            parent: row.parent.map(|p| p.as_str()),
            verb_key: row.rule.verb,
            verb: verbs.verb(row.rule.verb).to_string(),
            shape: row.rule.shape,
            follows_target: row.rule.follows_target,
        })
        .collect()
}

pub fn render_verbs(verbs: &VerbTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(verbs).context("encoding verb table"),
        OutputFormat::Text => {
            let mut out = String::new();
            for (key, verb) in verbs.iter() {
                writeln!(out, "{:<20} {verb}", key.as_str())?;
            }
            Ok(out)
        }
    }
}

pub fn render_dispatch(verbs: &VerbTable, format: OutputFormat) -> Result<String> {
    let rows = dispatch_rows(verbs);
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(&rows).context("encoding dispatch table"),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(
                out,
                "{:<16} {:<14} {:<20} {:<10} {:<7} VERB",
                "VOTED", "PARENT", "KEY", "SHAPE", "FOLLOW"
            )?;
            for row in &rows {
                let shape = match row.shape {
                    Shape::Direct => "direct",
                    Shape::OnParent => "on_parent",
                };
                writeln!(
                    out,
                    "{:<16} {:<14} {:<20} {:<10} {:<7} {}",
                    row.voted,
                    row.parent.unwrap_or("-"),
                    row.verb_key.as_str(),
                    shape,
                    if row.follows_target { "yes" } else { "no" },
                    row.verb
                )?;
            }
            Ok(out)
        }
    }
}

pub fn run_verbs(args: &TableArgs, config_path: Option<&Path>) -> Result<u8> {
    let config = AppConfig::from_env(config_path).context("loading configuration")?;
    print!("{}", render_verbs(&config.verbs, args.format)?);
    Ok(0)
}

pub fn run_dispatch(args: &TableArgs, config_path: Option<&Path>) -> Result<u8> {
    let config = AppConfig::from_env(config_path).context("loading configuration")?;
    print!("{}", render_dispatch(&config.verbs, args.format)?);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_verbs_list_every_key() {
        let out = render_verbs(&VerbTable::defaults(), OutputFormat::Text).unwrap();
        assert_eq!(out.lines().count(), VerbKey::ALL.len());
        assert!(out.contains("photo_like"));
        assert!(out.contains("liked the photo"));
    }

    #[test]
    fn yaml_verbs_round_trip_to_the_same_table() {
        let table = VerbTable::with_overrides([(VerbKey::DealLike, "grabbed the deal".to_string())].into());
        let out = render_verbs(&table, OutputFormat::Yaml).unwrap();
        let parsed: VerbTable = serde_yaml::from_str(&out).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn dispatch_text_has_header_and_twelve_rows() {
        let out = render_dispatch(&VerbTable::defaults(), OutputFormat::Text).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("VOTED"));
        assert_eq!(lines.len(), 13);
        assert!(out.contains("liked the comment on the deal"));
    }

    #[test]
    fn dispatch_rows_mark_wish_follows() {
        let rows = dispatch_rows(&VerbTable::defaults());
        let wish = rows
            .iter()
            .find(|r| r.voted == "broadcastwish")
            .expect("wish row present");
        assert!(wish.follows_target);
        let album = rows.iter().find(|r| r.voted == "album").expect("album row");
        assert!(!album.follows_target);
    }
}
