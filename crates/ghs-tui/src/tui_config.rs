// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! TUI-specific configuration types

use serde::{Deserialize, Serialize};

/// TUI-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct TuiConfig {
    /// Mouse interaction preferences
    pub mouse_interaction: Option<bool>,
    /// High contrast mode toggle
    pub high_contrast: Option<bool>,
}

impl TuiConfig {
    pub fn mouse_enabled(&self) -> bool {
        self.mouse_interaction.unwrap_or(true)
    }

    pub fn high_contrast(&self) -> bool {
        self.high_contrast.unwrap_or(false)
    }
}
