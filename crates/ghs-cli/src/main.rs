// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use ghs_cli::config::{resolve_server_url, ConfigFile};
use ghs_cli::{Cli, Commands, Parser};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file.
    let is_tui = !matches!(cli.command, Some(Commands::Health(_)));
    cli.logging.clone().init("ghs", is_tui)?;

    let config = ConfigFile::load(cli.config.as_deref())?;
    let server_url = resolve_server_url(cli.server_url.as_deref(), &config);

    match cli.command {
        Some(Commands::Tui(args)) => args.run(&server_url, &config).await,
        Some(Commands::Health(args)) => args.run(&server_url).await,
        None => ghs_cli::tui::TuiArgs::default().run(&server_url, &config).await,
    }
}
