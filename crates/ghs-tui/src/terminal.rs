// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal Management - Shared terminal setup and cleanup procedures
//!
//! Raw mode, alternate screen and mouse capture for the dashboard, plus
//! signal and panic handlers that restore the terminal on every exit path.

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use std::{
    io,
    panic,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

// Global flag to ensure cleanup only happens once
static CLEANUP_DONE: AtomicBool = AtomicBool::new(false);

// Track what we modified so we can restore properly
static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static ALTERNATE_SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);
static MOUSE_CAPTURE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Terminal setup configuration
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Enable mouse capture
    pub mouse_capture: bool,
    /// Install signal handlers for graceful shutdown
    pub install_signal_handlers: bool,
    /// Running flag to control application lifecycle (used by signal handlers)
    pub running_flag: Option<Arc<AtomicBool>>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            mouse_capture: true,
            install_signal_handlers: true,
            running_flag: None,
        }
    }
}

impl TerminalConfig {
    /// Set the running flag for signal handlers
    pub fn with_running_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.running_flag = Some(flag);
        self
    }

    /// Disable mouse capture
    pub fn without_mouse_capture(mut self) -> Self {
        self.mouse_capture = false;
        self
    }
}

/// Setup terminal for TUI with the specified configuration
pub fn setup_terminal(config: TerminalConfig) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    crossterm::terminal::enable_raw_mode()?;
    RAW_MODE_ENABLED.store(true, Ordering::SeqCst);

    stdout.execute(EnterAlternateScreen)?;
    ALTERNATE_SCREEN_ACTIVE.store(true, Ordering::SeqCst);

    if config.mouse_capture {
        stdout.execute(EnableMouseCapture)?;
        MOUSE_CAPTURE_ENABLED.store(true, Ordering::SeqCst);
    }

    if config.install_signal_handlers {
        if let Some(running_flag) = &config.running_flag {
            let r = running_flag.clone();
            ctrlc::set_handler(move || {
                cleanup_terminal();
                r.store(false, Ordering::SeqCst);
            })?;
        } else {
            ctrlc::set_handler(|| {
                cleanup_terminal();
            })?;
        }

        // Restore the terminal even when we panic mid-frame
        let default_panic = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            cleanup_terminal();
            default_panic(panic_info);
        }));
    }

    Ok(())
}

/// Cleanup terminal after TUI
pub fn cleanup_terminal() {
    if CLEANUP_DONE.swap(true, Ordering::SeqCst) {
        return; // Already cleaned up
    }

    let mut stdout = io::stdout();

    if MOUSE_CAPTURE_ENABLED.load(Ordering::SeqCst) {
        let _ = stdout.execute(DisableMouseCapture);
        MOUSE_CAPTURE_ENABLED.store(false, Ordering::SeqCst);
    }

    if RAW_MODE_ENABLED.load(Ordering::SeqCst) {
        let _ = crossterm::terminal::disable_raw_mode();
        RAW_MODE_ENABLED.store(false, Ordering::SeqCst);
    }

    // Leave alternate screen last
    if ALTERNATE_SCREEN_ACTIVE.load(Ordering::SeqCst) {
        let _ = stdout.execute(LeaveAlternateScreen);
        ALTERNATE_SCREEN_ACTIVE.store(false, Ordering::SeqCst);
    }
}
