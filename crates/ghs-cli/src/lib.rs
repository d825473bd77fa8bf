// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Command-line interface for the github-scanner dashboard.

use std::path::PathBuf;

pub use clap::Parser;
use clap::Subcommand;
use ghs_logging::CliLoggingArgs;

pub mod config;
pub mod health;
pub mod tui;

#[derive(Debug, Parser)]
#[command(name = "ghs", about = "GitHub repository scanner dashboard", version)]
pub struct Cli {
    /// Base URL of the scanner's repository endpoint
    #[arg(long, global = true, env = "GHS_SERVER_URL")]
    pub server_url: Option<String>,

    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub logging: CliLoggingArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard (the default)
    Tui(tui::TuiArgs),
    /// Check connectivity to the scanner backend
    Health(health::HealthArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_without_arguments() {
        let cli = Cli::parse_from(["ghs"]);
        assert!(cli.command.is_none());
        assert!(cli.server_url.is_none());
    }

    #[test]
    fn server_url_flag_is_global() {
        let cli = Cli::parse_from(["ghs", "health", "--server-url", "https://x.test/repos"]);
        assert_eq!(cli.server_url.as_deref(), Some("https://x.test/repos"));
        assert!(matches!(cli.command, Some(Commands::Health(_))));
    }

    #[test]
    fn tui_flags_parse() {
        let cli = Cli::parse_from(["ghs", "tui", "--no-mouse", "--high-contrast"]);
        let Some(Commands::Tui(args)) = cli.command else {
            panic!("expected tui subcommand");
        };
        assert!(args.no_mouse);
        assert!(args.high_contrast);
    }
}
