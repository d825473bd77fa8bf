// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::SelectionEntry;
use validator::Validate;

/// Validate a selection before it is turned into a detail request.
///
/// The selection must be non-empty (callers gate the detail action on this,
/// but the client boundary re-checks it) and must not contain two entries
/// with the same repository id.
pub fn validate_selection(selection: &[SelectionEntry]) -> Result<(), ApiContractError> {
    if selection.is_empty() {
        return Err(ApiContractError::EmptySelection);
    }

    for entry in selection {
        entry.validate()?;
    }

    let mut seen = Vec::with_capacity(selection.len());
    for entry in selection {
        if seen.contains(&entry.id) {
            return Err(ApiContractError::DuplicateSelection(entry.id));
        }
        seen.push(entry.id);
    }

    Ok(())
}
