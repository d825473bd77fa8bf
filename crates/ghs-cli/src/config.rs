// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration file support.
//!
//! Settings load from a TOML file, by default
//! `~/.config/github-scanner/config.toml` (platform equivalent elsewhere).
//! Command-line flags and environment variables take precedence over the
//! file; the file takes precedence over built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ghs_tui::TuiConfig;
use serde::Deserialize;

/// Scanner backend used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "https://github-scanner-36faf018c358.herokuapp.com/repos";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Base URL of the scanner's repository endpoint.
    pub server_url: Option<String>,
    /// TUI appearance and interaction settings.
    #[serde(default)]
    pub tui: TuiConfig,
}

impl ConfigFile {
    /// Load from an explicit path, or from the standard location when `None`.
    /// A missing file is not an error; it yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match standard_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// `~/.config/github-scanner/config.toml` or the platform equivalent.
pub fn standard_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("github-scanner").join("config.toml"))
}

/// Resolve the effective server URL: flag/env beats file beats default.
pub fn resolve_server_url(cli_value: Option<&str>, file: &ConfigFile) -> String {
    cli_value
        .map(str::to_string)
        .or_else(|| file.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = ConfigFile::load(Some(Path::new("/nonexistent/config.toml"))).unwrap();
        assert!(config.server_url.is_none());
        assert!(config.tui.mouse_enabled());
    }

    #[test]
    fn parses_server_url_and_tui_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server-url = \"https://scanner.example.com/repos\"\n\n\
             [tui]\nmouse-interaction = false\nhigh-contrast = true"
        )
        .unwrap();
        let config = ConfigFile::load(Some(file.path())).unwrap();
        assert_eq!(config.server_url.as_deref(), Some("https://scanner.example.com/repos"));
        assert!(!config.tui.mouse_enabled());
        assert!(config.tui.high_contrast());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "serverurl = \"typo\"").unwrap();
        assert!(ConfigFile::load(Some(file.path())).is_err());
    }

    #[test]
    fn url_precedence_is_flag_then_file_then_default() {
        let file = ConfigFile {
            server_url: Some("https://from-file/repos".to_string()),
            tui: TuiConfig::default(),
        };
        assert_eq!(resolve_server_url(Some("https://from-flag/repos"), &file), "https://from-flag/repos");
        assert_eq!(resolve_server_url(None, &file), "https://from-file/repos");
        assert_eq!(resolve_server_url(None, &ConfigFile::default()), DEFAULT_SERVER_URL);
    }
}
