// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! API contract types for the github-scanner REST service

use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

/// Repository summary as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub owner: String,
    /// Repository size in kilobytes
    pub size: u64,
    #[serde(rename = "fileCount")]
    pub file_count: u64,
}

/// Reduced `{id, name}` projection of a repository, used to track selected
/// rows and to parameterize detail requests. Set semantics keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SelectionEntry {
    pub id: u64,
    #[validate(length(min = 1, message = "Repository name cannot be empty"))]
    pub name: String,
}

impl From<&Repository> for SelectionEntry {
    fn from(repo: &Repository) -> Self {
        Self {
            id: repo.id,
            name: repo.name.clone(),
        }
    }
}

/// Expanded record for one repository as returned by the detail endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDetail {
    pub name: String,
    pub owner: String,
    /// Repository size in kilobytes
    pub size: u64,
    #[serde(rename = "fileCount")]
    pub file_count: u64,
    #[serde(rename = "isPrivate")]
    pub is_private: bool,
    /// Raw CI configuration file content, if the repository has one
    #[serde(rename = "ymlContent", default)]
    pub yml_content: Option<String>,
    #[serde(rename = "activeHooks", default)]
    pub active_hooks: Vec<WebhookInfo>,
}

/// An active webhook registration on a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookInfo {
    pub id: u64,
    pub url: Url,
    #[serde(default)]
    pub events: Vec<String>,
}

/// Response shape of the detail endpoints.
///
/// The single-repo endpoint returns one object, the batch endpoint returns an
/// array. Decoding the union explicitly at the boundary keeps runtime shape
/// inspection out of the rest of the client; everything downstream consumes
/// the flattened `Vec<RepoDetail>` from [`DetailResponse::into_vec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailResponse {
    Batch(Vec<RepoDetail>),
    Single(RepoDetail),
}

impl DetailResponse {
    /// Flatten both response shapes into one canonical sequence, preserving
    /// the order the server sent.
    pub fn into_vec(self) -> Vec<RepoDetail> {
        match self {
            DetailResponse::Batch(items) => items,
            DetailResponse::Single(item) => vec![item],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_detail_json(name: &str) -> String {
        format!(
            r#"{{
                "name": "{name}",
                "owner": "octocat",
                "size": 2048,
                "fileCount": 41,
                "isPrivate": false,
                "ymlContent": "name: ci\non: push\n",
                "activeHooks": [
                    {{ "id": 7, "url": "https://hooks.example.com/7", "events": ["push", "pull_request"] }}
                ]
            }}"#
        )
    }

    #[test]
    fn decodes_repository_summary() {
        let json = r#"{"id":1,"name":"x","owner":"o","size":10,"fileCount":3}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.id, 1);
        assert_eq!(repo.name, "x");
        assert_eq!(repo.owner, "o");
        assert_eq!(repo.size, 10);
        assert_eq!(repo.file_count, 3);
    }

    #[test]
    fn selection_entry_projects_id_and_name_only() {
        let repo: Repository =
            serde_json::from_str(r#"{"id":5,"name":"api","owner":"o","size":1,"fileCount":1}"#)
                .unwrap();
        let entry = SelectionEntry::from(&repo);
        assert_eq!(entry, SelectionEntry { id: 5, name: "api".to_string() });
    }

    #[test]
    fn single_detail_object_flattens_to_one_element() {
        let response: DetailResponse = serde_json::from_str(&sample_detail_json("repo-a")).unwrap();
        let details = response.into_vec();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].name, "repo-a");
        assert!(!details[0].is_private);
        assert_eq!(details[0].active_hooks[0].events, vec!["push", "pull_request"]);
    }

    #[test]
    fn batch_detail_array_preserves_order() {
        let json = format!("[{},{}]", sample_detail_json("repo-a"), sample_detail_json("repo-b"));
        let response: DetailResponse = serde_json::from_str(&json).unwrap();
        let details = response.into_vec();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].name, "repo-a");
        assert_eq!(details[1].name, "repo-b");
    }

    #[test]
    fn detail_without_hooks_or_ci_config_decodes() {
        let json = r#"{"name":"bare","owner":"o","size":0,"fileCount":0,"isPrivate":true}"#;
        let response: DetailResponse = serde_json::from_str(json).unwrap();
        let details = response.into_vec();
        assert_eq!(details[0].yml_content, None);
        assert!(details[0].active_hooks.is_empty());
        assert!(details[0].is_private);
    }

    #[test]
    fn malformed_detail_body_is_a_decode_error() {
        let result: Result<DetailResponse, _> = serde_json::from_str(r#"{"unexpected": true}"#);
        assert!(result.is_err());
    }
}
