// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! ViewModel layer: UI state and presentation models.
//!
//! This layer owns all UI state (cursor, selection, overlay) and input
//! processing, and bridges the API contract types to the rendering layer.
//! Unlike classic MVVM we allow network calls directly in the ViewModel;
//! they run on background tasks and report back as [`Msg`] values, which
//! keeps input handling and request plumbing natural while still allowing
//! fully headless tests against a mocked [`ghs_client_api::ScannerApi`].
//!
//! Rendering (widget creation, styling, layout) does NOT belong here; that
//! lives in [`crate::view`].

pub mod dashboard_model;
pub mod selection;

pub use dashboard_model::{LoadState, ModalState, MouseAction, Msg, ViewModel};
pub use selection::{apply_selection, is_selected, SelectionAction};
