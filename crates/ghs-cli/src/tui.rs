// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! TUI command handling for the CLI

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use ghs_client_api::ScannerApi;
use ghs_rest_client::RestClient;
use ghs_tui::dashboard_loop::run_dashboard;
use ghs_tui::TuiConfig;
use tracing::info;

use crate::config::ConfigFile;

#[derive(Debug, Clone, Default, Args)]
pub struct TuiArgs {
    /// Disable mouse interaction regardless of configuration
    #[arg(long)]
    pub no_mouse: bool,

    /// Use the high-contrast color palette
    #[arg(long)]
    pub high_contrast: bool,
}

impl TuiArgs {
    pub async fn run(self, server_url: &str, config: &ConfigFile) -> Result<()> {
        let client = RestClient::from_url(server_url)?;
        info!(server_url = %client.base_url(), "starting dashboard");

        let tui_config = self.effective_tui_config(config);
        let client: Arc<dyn ScannerApi> = Arc::new(client);
        run_dashboard(client, tui_config).await
    }

    /// Merge command-line flags over the config file's `[tui]` section.
    fn effective_tui_config(&self, config: &ConfigFile) -> TuiConfig {
        let mut tui_config = config.tui.clone();
        if self.no_mouse {
            tui_config.mouse_interaction = Some(false);
        }
        if self.high_contrast {
            tui_config.high_contrast = Some(true);
        }
        tui_config
    }
}
