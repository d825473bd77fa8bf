// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main application event loop.
//!
//! Pumps three sources through a biased select so input always beats ticks:
//! terminal events from a reader thread, background messages from network
//! fetches, and a coalescing 16ms tick. Redraws only when the ViewModel
//! flags `needs_redraw`.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    sync::Arc,
    thread,
    time::Duration,
};

use crossbeam_channel as chan;
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::debug;

use crate::{
    terminal::{self, TerminalConfig},
    theme::Theme,
    tui_config::TuiConfig,
    view::{self, HitTestRegistry},
    view_model::{MouseAction, Msg, ViewModel},
};
use ghs_client_api::ScannerApi;

/// Run the dashboard until the user quits or an interrupt arrives.
pub async fn run_dashboard(client: Arc<dyn ScannerApi>, tui_config: TuiConfig) -> anyhow::Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let mut config = TerminalConfig::default().with_running_flag(running.clone());
    if !tui_config.mouse_enabled() {
        config = config.without_mouse_capture();
    }
    terminal::setup_terminal(config)?;
    let result = event_loop(client, tui_config, running).await;
    terminal::cleanup_terminal();
    result
}

async fn event_loop(
    client: Arc<dyn ScannerApi>,
    tui_config: TuiConfig,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
    let theme = Theme::resolve(tui_config.high_contrast());

    // Background fetches report back over this channel.
    let (ui_tx, rx_msg) = chan::unbounded::<Msg>();
    let mut view_model = ViewModel::new(client, tui_config, ui_tx);
    view_model.start_loading_repositories();

    let mut hit_registry: HitTestRegistry<MouseAction> = HitTestRegistry::new();

    let (tx_ev, rx_ev) = chan::unbounded::<Event>();
    // Coalescing tick channel that never builds a backlog.
    let rx_tick = chan::tick(Duration::from_millis(16));

    thread::spawn(move || {
        while let Ok(ev) = crossterm::event::read() {
            if tx_ev.send(ev).is_err() {
                break;
            }
        }
    });

    loop {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        chan::select_biased! {
            recv(rx_ev) -> msg => {
                let event = match msg {
                    Ok(e) => e,
                    Err(_) => break,
                };
                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        debug!(key_code = ?key.code, modifiers = ?key.modifiers, "key event");
                        view_model.update(Msg::Key(key));
                    }
                    Event::Mouse(mouse) => match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            if let Some(action) = hit_registry.hit_test(mouse.column, mouse.row) {
                                view_model.update(Msg::MouseClick { action });
                            }
                        }
                        MouseEventKind::ScrollUp => view_model.update(Msg::MouseScrollUp),
                        MouseEventKind::ScrollDown => view_model.update(Msg::MouseScrollDown),
                        _ => {}
                    },
                    Event::Resize(_, _) => {
                        view_model.needs_redraw = true;
                    }
                    _ => {}
                }
            }
            recv(rx_msg) -> msg => {
                match msg {
                    Ok(m) => view_model.update(m),
                    Err(_) => break,
                }
            }
            recv(rx_tick) -> _ => {
                view_model.update(Msg::Tick);
            }
        }

        if view_model.exit_requested {
            break;
        }
        if view_model.needs_redraw {
            terminal.draw(|frame| {
                view::render(frame, &view_model, &theme, &mut hit_registry);
            })?;
            view_model.needs_redraw = false;
        }
    }

    Ok(())
}
