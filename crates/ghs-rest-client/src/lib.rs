// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! REST API client for the github-scanner service
//!
//! This crate provides the HTTP client for the scanner backend: the
//! repository list endpoint, the singular detail endpoint and the batch
//! detail endpoint. It implements the [`ScannerApi`] trait so the TUI can be
//! driven against either this client or a mock.

pub mod client;
pub mod error;

pub use client::*;
pub use error::*;

use async_trait::async_trait;
use ghs_api_contract::{RepoDetail, Repository, SelectionEntry};
use ghs_client_api::{ClientApiResult, ScannerApi};

#[async_trait]
impl ScannerApi for client::RestClient {
    async fn list_repositories(&self) -> ClientApiResult<Vec<Repository>> {
        self.list_repositories().await.map_err(Into::into)
    }

    async fn fetch_details(
        &self,
        selection: &[SelectionEntry],
    ) -> ClientApiResult<Vec<RepoDetail>> {
        self.fetch_details(selection).await.map_err(Into::into)
    }
}
