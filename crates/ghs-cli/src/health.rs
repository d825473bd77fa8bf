// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Health command: one listing round-trip against the configured backend.

use anyhow::{bail, Result};
use clap::Args;
use ghs_rest_client::RestClient;

#[derive(Debug, Clone, Args)]
pub struct HealthArgs {}

impl HealthArgs {
    pub async fn run(self, server_url: &str) -> Result<()> {
        let client = RestClient::from_url(server_url)?;
        match client.list_repositories().await {
            Ok(repos) => {
                println!("OK: {} ({} repositories)", client.base_url(), repos.len());
                Ok(())
            }
            Err(e) => bail!("{}: {e}", client.base_url()),
        }
    }
}
