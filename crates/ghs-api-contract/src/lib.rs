// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! github-scanner REST API contract types and validation
//!
//! This crate defines the wire types shared between the REST client, the mock
//! client and the TUI: repository summaries as returned by the list endpoint,
//! detail records as returned by the single and batch detail endpoints, and
//! the selection projection that parameterizes detail requests.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
pub use validation::*;
