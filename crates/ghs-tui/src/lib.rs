// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal User Interface for github-scanner
//!
//! This crate provides a Ratatui-based dashboard that lists the repositories
//! known to a github-scanner backend, tracks a multi-row selection, and shows
//! batch-fetched detail records in a modal overlay.

pub mod dashboard_loop;
pub mod terminal;
pub mod theme;
pub mod tui_config;
pub mod view;
pub mod view_model;

pub use theme::Theme;
pub use tui_config::TuiConfig;
pub use view_model::{
    apply_selection, is_selected, LoadState, ModalState, MouseAction, Msg, SelectionAction,
    ViewModel,
};

use ratatui::{backend::TestBackend, Terminal};

/// Helpers for tests/runners to render with a deterministic backend
pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("test terminal")
}
