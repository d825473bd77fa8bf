// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Selection tracking as a pure reducer
//!
//! The selection is a set of `{id, name}` projections keyed by repository id,
//! kept in first-insertion order. Both the select-all checkbox and per-row
//! toggles funnel through [`apply_selection`], which returns a new snapshot
//! instead of mutating in place so consumers can diff old vs new state.

use ghs_api_contract::{Repository, SelectionEntry};

/// Actions that can change the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction<'a> {
    /// `true` replaces the selection with a projection of every loaded row;
    /// `false` clears it. There is no partial/indeterminate state.
    SelectAll { checked: bool, rows: &'a [Repository] },
    /// Appends the entry if its id is absent, removes exactly that entry
    /// otherwise. The relative order of the rest is preserved.
    Toggle(SelectionEntry),
}

/// Apply an action to the current selection, producing a new snapshot.
pub fn apply_selection(
    selection: &[SelectionEntry],
    action: SelectionAction<'_>,
) -> Vec<SelectionEntry> {
    match action {
        SelectionAction::SelectAll { checked: true, rows } => {
            rows.iter().map(SelectionEntry::from).collect()
        }
        SelectionAction::SelectAll { checked: false, .. } => Vec::new(),
        SelectionAction::Toggle(entry) => {
            if is_selected(selection, entry.id) {
                selection.iter().filter(|e| e.id != entry.id).cloned().collect()
            } else {
                let mut next = selection.to_vec();
                next.push(entry);
                next
            }
        }
    }
}

/// Membership test by repository id.
pub fn is_selected(selection: &[SelectionEntry], id: u64) -> bool {
    selection.iter().any(|entry| entry.id == id)
}
