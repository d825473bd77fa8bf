// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client-facing API trait for the github-scanner service
//!
//! The TUI and tests depend on this trait rather than on a concrete HTTP
//! client, so the view-model can be driven headlessly against a mock.

use async_trait::async_trait;
use ghs_api_contract::{RepoDetail, Repository, SelectionEntry};
use thiserror::Error;

/// Errors surfaced to consumers of a [`ScannerApi`] implementation.
///
/// The two HTTP error variants carry the fixed messages the dashboard shows
/// to the user; `Display` is the user-visible string.
#[derive(Debug, Error)]
pub enum ClientApiError {
    /// Detail endpoint answered with a non-success status
    #[error("Repo not found")]
    NotFound,

    /// List endpoint answered with a non-success status
    #[error("Failed to fetch repositories")]
    ListUnavailable,

    /// The request could not complete at the transport level
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not the expected JSON shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The selection violated a contract invariant before any request was made
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

pub type ClientApiResult<T> = Result<T, ClientApiError>;

/// Operations of the github-scanner backend used by the dashboard.
#[async_trait]
pub trait ScannerApi: Send + Sync {
    /// Fetch the full repository collection from the list endpoint.
    async fn list_repositories(&self) -> ClientApiResult<Vec<Repository>>;

    /// Fetch detail records for the given selection. Implementations route to
    /// the single-repo endpoint for a selection of one and to the batch
    /// endpoint otherwise, and return the normalized record sequence.
    async fn fetch_details(
        &self,
        selection: &[SelectionEntry],
    ) -> ClientApiResult<Vec<RepoDetail>>;
}
