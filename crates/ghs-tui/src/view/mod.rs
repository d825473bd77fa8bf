// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! View layer: pure rendering.
//!
//! Transforms ViewModel state into Ratatui widgets. No business logic, no
//! state mutation; the only output besides the frame is the set of hit-test
//! rectangles the dashboard loop uses to route mouse clicks.

pub mod dashboard_view;
pub mod overlay;

pub use dashboard_view::render;
pub use hit_test::HitTestRegistry;
