// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! In-memory [`ScannerApi`] implementation for headless tests
//!
//! The mock returns preprogrammed responses and records every detail request
//! it receives, so view-model tests can assert both the resulting UI state
//! and the selection that was sent to the backend.

use async_trait::async_trait;
use ghs_api_contract::{RepoDetail, Repository, SelectionEntry};
use ghs_client_api::{ClientApiError, ClientApiResult, ScannerApi};
use std::sync::{Arc, Mutex};

/// Cloneable failure modes; expanded into [`ClientApiError`] on use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    NotFound,
    ListUnavailable,
    Network,
    Decode,
}

impl From<MockFailure> for ClientApiError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::NotFound => ClientApiError::NotFound,
            MockFailure::ListUnavailable => ClientApiError::ListUnavailable,
            MockFailure::Network => ClientApiError::Network("connection refused".to_string()),
            MockFailure::Decode => ClientApiError::Decode("unexpected token".to_string()),
        }
    }
}

#[derive(Debug)]
struct MockState {
    repositories: Result<Vec<Repository>, MockFailure>,
    details: Result<Vec<RepoDetail>, MockFailure>,
    detail_requests: Vec<Vec<SelectionEntry>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            repositories: Ok(Vec::new()),
            details: Ok(Vec::new()),
            detail_requests: Vec::new(),
        }
    }
}

/// Programmable mock scanner client.
#[derive(Debug, Clone, Default)]
pub struct MockScannerClient {
    state: Arc<Mutex<MockState>>,
}

impl MockScannerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program the repository list response.
    pub fn with_repositories(self, repositories: Vec<Repository>) -> Self {
        self.state.lock().unwrap().repositories = Ok(repositories);
        self
    }

    /// Make the list endpoint fail.
    pub fn with_list_failure(self, failure: MockFailure) -> Self {
        self.state.lock().unwrap().repositories = Err(failure);
        self
    }

    /// Program the detail response for any selection.
    pub fn with_details(self, details: Vec<RepoDetail>) -> Self {
        self.state.lock().unwrap().details = Ok(details);
        self
    }

    /// Make the detail endpoints fail.
    pub fn with_detail_failure(self, failure: MockFailure) -> Self {
        self.state.lock().unwrap().details = Err(failure);
        self
    }

    /// Selections received by `fetch_details`, in call order.
    pub fn detail_requests(&self) -> Vec<Vec<SelectionEntry>> {
        self.state.lock().unwrap().detail_requests.clone()
    }

    pub fn detail_request_count(&self) -> usize {
        self.state.lock().unwrap().detail_requests.len()
    }
}

#[async_trait]
impl ScannerApi for MockScannerClient {
    async fn list_repositories(&self) -> ClientApiResult<Vec<Repository>> {
        let state = self.state.lock().unwrap();
        match &state.repositories {
            Ok(repositories) => Ok(repositories.clone()),
            Err(failure) => Err((*failure).into()),
        }
    }

    async fn fetch_details(
        &self,
        selection: &[SelectionEntry],
    ) -> ClientApiResult<Vec<RepoDetail>> {
        let mut state = self.state.lock().unwrap();
        state.detail_requests.push(selection.to_vec());
        match &state.details {
            Ok(details) => Ok(details.clone()),
            Err(failure) => Err((*failure).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_detail_requests_in_order() {
        let mock = MockScannerClient::new().with_details(vec![]);
        let first = vec![SelectionEntry { id: 1, name: "a".to_string() }];
        let second = vec![
            SelectionEntry { id: 1, name: "a".to_string() },
            SelectionEntry { id: 2, name: "b".to_string() },
        ];

        mock.fetch_details(&first).await.unwrap();
        mock.fetch_details(&second).await.unwrap();

        assert_eq!(mock.detail_requests(), vec![first, second]);
    }

    #[tokio::test]
    async fn programmed_failure_maps_to_client_error() {
        let mock = MockScannerClient::new().with_detail_failure(MockFailure::NotFound);
        let selection = vec![SelectionEntry { id: 1, name: "a".to_string() }];
        let err = mock.fetch_details(&selection).await.unwrap_err();
        assert_eq!(err.to_string(), "Repo not found");
    }
}
