// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Centralized logging utilities for github-scanner
//!
//! TUI binaries must log to a file so tracing output does not corrupt the
//! alternate screen; plain CLI invocations log to the console unless a file
//! destination is requested. `RUST_LOG` overrides the configured level.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing::Level;

/// Output format for log messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable plaintext format
    #[default]
    Plaintext,
    /// Structured JSON format
    Json,
}

/// CLI log level enum for clap integration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliLogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

/// Standardized logging arguments, flattened into the binary's clap struct.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct CliLoggingArgs {
    /// Log verbosity level
    #[arg(long, value_enum, help = "Log verbosity level (default: info)")]
    pub log_level: Option<CliLogLevel>,

    /// Log output format
    #[arg(long, value_enum, help = "Log output format (default: plaintext)")]
    pub log_format: Option<LogFormat>,

    /// Directory for log files
    #[arg(long, help = "Directory for log files (default: platform specific)")]
    pub log_dir: Option<String>,

    /// Log filename
    #[arg(long, help = "Log filename")]
    pub log_file: Option<String>,
}

impl CliLoggingArgs {
    /// Initialize logging based on the parsed arguments.
    ///
    /// TUI binaries always log to file; other binaries log to console unless
    /// `--log-file` or `--log-dir` is given.
    pub fn init(self, component: &str, is_tui: bool) -> anyhow::Result<()> {
        let level = self.log_level.unwrap_or_default().into();
        let format = self.log_format.unwrap_or_default();

        let to_file = is_tui || self.log_file.is_some() || self.log_dir.is_some();
        if to_file {
            let path = self.resolve_log_path(component);
            init_to_file(component, level, format, &path)
        } else {
            init(component, level, format)
        }
    }

    fn resolve_log_path(&self, component: &str) -> PathBuf {
        let file_name = self
            .log_file
            .clone()
            .unwrap_or_else(|| format!("{component}.log"));
        match &self.log_dir {
            Some(dir) => PathBuf::from(dir).join(file_name),
            None => {
                let base = standard_log_dir();
                base.join(file_name)
            }
        }
    }
}

/// Platform-standard directory for github-scanner log files.
///
/// Linux: `~/.local/share/github-scanner`, macOS: `~/Library/Logs`, elsewhere
/// the home directory (falling back to `/tmp`).
pub fn standard_log_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        path.push("Library");
        path.push("Logs");
        path
    }

    #[cfg(target_os = "linux")]
    {
        let mut path = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp")));
        path.push("github-scanner");
        path
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"))
    }
}

/// Initialize console logging with the given component name, level and format.
pub fn init(component: &str, default_level: Level, format: LogFormat) -> anyhow::Result<()> {
    init_with_writer(component, default_level, format, io::stdout)
}

/// Initialize logging to a file, creating parent directories as needed.
pub fn init_to_file(
    component: &str,
    default_level: Level,
    format: LogFormat,
    log_path: &std::path::Path,
) -> anyhow::Result<()> {
    use std::fs;

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = fs::OpenOptions::new().create(true).append(true).open(log_path)?;

    init_with_writer(component, default_level, format, log_file)
}

/// Initialize logging to the standard platform-specific log file.
pub fn init_to_standard_file(
    component: &str,
    default_level: Level,
    format: LogFormat,
) -> anyhow::Result<()> {
    let path = standard_log_dir().join(format!("{component}.log"));
    init_to_file(component, default_level, format, &path)
}

/// Initialize logging with a custom writer.
pub fn init_with_writer<W>(
    component: &str,
    default_level: Level,
    format: LogFormat,
    writer: W,
) -> anyhow::Result<()>
where
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{default_level},{component}={default_level}"))
    });

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).json();
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Plaintext => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer);
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_log_level_converts_to_tracing_level() {
        assert_eq!(Level::from(CliLogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(CliLogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(CliLogLevel::Info), Level::INFO);
        assert_eq!(Level::from(CliLogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn default_level_is_info() {
        assert_eq!(CliLogLevel::default(), CliLogLevel::Info);
    }

    #[test]
    fn explicit_log_dir_wins_over_standard_path() {
        let args = CliLoggingArgs {
            log_dir: Some("/tmp/ghs-test-logs".to_string()),
            ..Default::default()
        };
        let path = args.resolve_log_path("ghs");
        assert_eq!(path, PathBuf::from("/tmp/ghs-test-logs/ghs.log"));
    }

    #[test]
    fn log_file_name_is_honored() {
        let args = CliLoggingArgs {
            log_dir: Some("/tmp/ghs-test-logs".to_string()),
            log_file: Some("session.log".to_string()),
            ..Default::default()
        };
        let path = args.resolve_log_path("ghs");
        assert_eq!(path, PathBuf::from("/tmp/ghs-test-logs/session.log"));
    }
}
