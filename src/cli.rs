//! Command-line argument parsing for the input harness
//!
//! Supports:
//! - Replaying a recorded JSON event script through an edit session
//! - Overriding the config file and the field capacity

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::InputConfig;

/// Headless driver for the overlay's chat input
#[derive(Parser, Debug)]
#[command(
    name = "overlay-input",
    version,
    about = "Headless driver for the overlay chat input"
)]
pub struct CliArgs {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the field capacity
    #[arg(long, value_name = "N", global = true)]
    pub max_length: Option<usize>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Apply a JSON array of input events and print what the field did
    Replay {
        /// Event script (JSON array of input events)
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Print the field state after every event
        #[arg(long)]
        print_states: bool,
    },
}

impl CliArgs {
    /// Resolve the effective config: explicit file (must load), else the
    /// default location (falls back to defaults), then CLI overrides
    pub fn resolve_config(&self) -> Result<InputConfig> {
        let mut config = match &self.config {
            Some(path) => InputConfig::load_from(path)?,
            None => InputConfig::load(),
        };

        if let Some(max_length) = self.max_length {
            config.max_length = max_length;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay() {
        let args =
            CliArgs::try_parse_from(["overlay-input", "replay", "events.json", "--print-states"])
                .unwrap();
        let CliCommand::Replay {
            script,
            print_states,
        } = args.command;
        assert_eq!(script, PathBuf::from("events.json"));
        assert!(print_states);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_global_overrides() {
        let args = CliArgs::try_parse_from([
            "overlay-input",
            "replay",
            "events.json",
            "--max-length",
            "10",
        ])
        .unwrap();
        assert_eq!(args.max_length, Some(10));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(CliArgs::try_parse_from(["overlay-input"]).is_err());
    }

    #[test]
    fn test_explicit_config_and_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "max_length: 30\nmodel_name: tiny\n").unwrap();

        let args = CliArgs {
            config: Some(path),
            max_length: Some(12),
            command: CliCommand::Replay {
                script: PathBuf::from("unused.json"),
                print_states: false,
            },
        };
        let config = args.resolve_config().unwrap();
        assert_eq!(config.max_length, 12);
        assert_eq!(config.model_name, "tiny");
    }

    #[test]
    fn test_unreadable_explicit_config_is_an_error() {
        let args = CliArgs {
            config: Some(PathBuf::from("/nonexistent/config.yaml")),
            max_length: None,
            command: CliCommand::Replay {
                script: PathBuf::from("unused.json"),
                print_states: false,
            },
        };
        assert!(args.resolve_config().is_err());
    }
}
