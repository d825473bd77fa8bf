// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared TUI theme definition.
//!
//! The theme maps semantic color roles to concrete Ratatui colors. All view
//! modules receive a `Theme` instance resolved once from configuration to
//! avoid ad-hoc defaults scattered through the render code.

use ratatui::style::{Color, Modifier, Style};

/// Semantic color roles for the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub primary: Color,
    pub selection: Color,
    pub error: Color,
    pub tag: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Reset,
            text: Color::White,
            muted: Color::Gray,
            border: Color::Blue,
            border_focused: Color::Cyan,
            primary: Color::Blue,
            selection: Color::Cyan,
            error: Color::Red,
            tag: Color::Magenta,
        }
    }
}

impl Theme {
    /// High-contrast variant for terminals with washed-out default palettes.
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            text: Color::White,
            muted: Color::DarkGray,
            border: Color::White,
            border_focused: Color::Yellow,
            primary: Color::Yellow,
            selection: Color::Yellow,
            error: Color::LightRed,
            tag: Color::LightMagenta,
        }
    }

    pub fn resolve(high_contrast: bool) -> Self {
        if high_contrast {
            Self::high_contrast()
        } else {
            Self::default()
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn cursor_row_style(&self) -> Style {
        Style::default().fg(self.bg_or_black()).bg(self.selection)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    fn bg_or_black(&self) -> Color {
        match self.bg {
            Color::Reset => Color::Black,
            other => other,
        }
    }
}
