// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the REST client

use ghs_api_contract::ApiContractError;
use ghs_client_api::ClientApiError;
use thiserror::Error;

/// Errors that can occur during REST API operations
#[derive(Debug, Error)]
pub enum RestClientError {
    /// The request could not complete (DNS, connect, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A detail endpoint answered with a non-success status
    #[error("Repo not found")]
    NotFound,

    /// The list endpoint answered with a non-success status
    #[error("Failed to fetch repositories")]
    ListFailed,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error(transparent)]
    Contract(#[from] ApiContractError),
}

pub type RestClientResult<T> = Result<T, RestClientError>;

impl From<RestClientError> for ClientApiError {
    fn from(err: RestClientError) -> Self {
        match err {
            RestClientError::NotFound => ClientApiError::NotFound,
            RestClientError::ListFailed => ClientApiError::ListUnavailable,
            RestClientError::Http(e) => ClientApiError::Network(e.to_string()),
            RestClientError::Json(e) => ClientApiError::Decode(e.to_string()),
            RestClientError::UrlParse(e) => ClientApiError::Decode(e.to_string()),
            RestClientError::Contract(e) => ClientApiError::InvalidSelection(e.to_string()),
        }
    }
}
