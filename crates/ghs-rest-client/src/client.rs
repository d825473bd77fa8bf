// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main REST API client implementation

use ghs_api_contract::{validate_selection, DetailResponse, RepoDetail, Repository, SelectionEntry};
use reqwest::{Client as HttpClient, Response};
use tracing::{debug, warn};
use url::Url;

use crate::error::{RestClientError, RestClientResult};

/// Fixed path of the batch detail endpoint, relative to the base URL.
const BATCH_ENDPOINT: &str = "/batch";

/// REST API client for the github-scanner service
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
}

impl RestClient {
    /// Create a new REST client
    pub fn new(base_url: Url) -> Self {
        let http_client = HttpClient::builder()
            .user_agent("ghs-tui/1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url,
        }
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str) -> RestClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self::new(base_url))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the full repository collection.
    ///
    /// A non-success status maps to [`RestClientError::ListFailed`]. A body
    /// that decodes to something other than a JSON array yields an empty
    /// list rather than a decode error; the table simply renders no rows.
    pub async fn list_repositories(&self) -> RestClientResult<Vec<Repository>> {
        let response = self.get(self.base_url.as_str()).await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "repository list request failed");
            return Err(RestClientError::ListFailed);
        }

        let value: serde_json::Value = serde_json::from_str(&response.text().await?)?;
        normalize_repository_list(value)
    }

    /// Fetch detail records for the given selection, routing to the single
    /// or batch endpoint depending on selection size.
    pub async fn fetch_details(
        &self,
        selection: &[SelectionEntry],
    ) -> RestClientResult<Vec<RepoDetail>> {
        validate_selection(selection)?;

        let url = detail_request_url(&self.base_url, selection);
        debug!(%url, repos = selection.len(), "fetching repository details");

        let response = self.get(&url).await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), %url, "detail request failed");
            return Err(RestClientError::NotFound);
        }

        let body = response.text().await?;
        let details: DetailResponse = serde_json::from_str(&body)?;
        Ok(details.into_vec())
    }

    async fn get(&self, url: &str) -> RestClientResult<Response> {
        Ok(self.http_client.get(url).send().await?)
    }
}

/// Build the request URL for a detail fetch.
///
/// A selection of exactly one routes to `{base}/{name}/details`; anything
/// larger routes to `{base}/batch?repos={comma,joined,names}`. The joined
/// name list is built in selection order in both cases.
pub fn detail_request_url(base_url: &Url, selection: &[SelectionEntry]) -> String {
    let base = base_url.as_str().trim_end_matches('/');
    let names: Vec<&str> = selection.iter().map(|entry| entry.name.as_str()).collect();
    let joined = names.join(",");

    if selection.len() == 1 {
        format!("{base}/{joined}/details")
    } else {
        format!("{base}{BATCH_ENDPOINT}?repos={joined}")
    }
}

/// Defensive normalization of the list payload: only a JSON array is treated
/// as a repository collection, anything else becomes an empty list.
fn normalize_repository_list(value: serde_json::Value) -> RestClientResult<Vec<Repository>> {
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, name: &str) -> SelectionEntry {
        SelectionEntry { id, name: name.to_string() }
    }

    fn base() -> Url {
        Url::parse("https://scanner.example.com/repos").unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = RestClient::from_url("http://localhost:3001").unwrap();
        assert_eq!(client.base_url().to_string(), "http://localhost:3001/");
    }

    #[test]
    fn single_selection_routes_to_singular_detail_endpoint() {
        let url = detail_request_url(&base(), &[entry(1, "repo-a")]);
        assert_eq!(url, "https://scanner.example.com/repos/repo-a/details");
    }

    #[test]
    fn multi_selection_routes_to_batch_endpoint() {
        let url = detail_request_url(&base(), &[entry(1, "repo-a"), entry(2, "repo-b")]);
        assert_eq!(url, "https://scanner.example.com/repos/batch?repos=repo-a,repo-b");
    }

    #[test]
    fn batch_url_preserves_selection_order() {
        let url = detail_request_url(&base(), &[entry(3, "c"), entry(1, "a"), entry(2, "b")]);
        assert_eq!(url, "https://scanner.example.com/repos/batch?repos=c,a,b");
    }

    #[test]
    fn trailing_slash_on_base_url_does_not_double_up() {
        let base = Url::parse("https://scanner.example.com/repos/").unwrap();
        let url = detail_request_url(&base, &[entry(1, "repo-a")]);
        assert_eq!(url, "https://scanner.example.com/repos/repo-a/details");
    }

    #[test]
    fn array_payload_parses_into_repositories() {
        let value = serde_json::json!([
            {"id": 1, "name": "x", "owner": "o", "size": 10, "fileCount": 3}
        ]);
        let repos = normalize_repository_list(value).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "x");
    }

    #[test]
    fn non_array_payload_normalizes_to_empty_list() {
        let value = serde_json::json!({"message": "unexpected"});
        let repos = normalize_repository_list(value).unwrap();
        assert!(repos.is_empty());
    }

    #[test]
    fn malformed_array_element_is_a_decode_error() {
        let value = serde_json::json!([{"id": "not-a-number"}]);
        assert!(normalize_repository_list(value).is_err());
    }
}
