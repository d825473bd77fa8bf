// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dashboard ViewModel: repository table, selection and the details overlay.
//!
//! All network calls go through the [`ScannerApi`] trait object so the whole
//! model can be driven headlessly in tests with a mock client. Background
//! fetches report back by sending [`Msg`] values over the UI channel that the
//! dashboard loop multiplexes with terminal input.

use std::collections::HashSet;
use std::sync::Arc;

use crossbeam_channel::Sender as UiSender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ghs_api_contract::{RepoDetail, Repository, SelectionEntry};
use ghs_client_api::ScannerApi;
use tracing::{debug, warn};

use crate::tui_config::TuiConfig;
use crate::view_model::selection::{apply_selection, is_selected, SelectionAction};

/// UI-level messages handled by the ViewModel.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User keyboard input.
    Key(KeyEvent),
    /// Mouse click on a registered interactive element.
    MouseClick { action: MouseAction },
    /// Mouse scroll upwards (navigates up).
    MouseScrollUp,
    /// Mouse scroll downwards (navigates down).
    MouseScrollDown,
    /// Periodic timer tick.
    Tick,
    /// Background repository listing completed.
    RepositoriesLoaded(Result<Vec<Repository>, String>),
    /// Background detail fetch completed. `generation` identifies which
    /// request this response belongs to; stale generations are dropped.
    DetailsLoaded {
        generation: u64,
        result: Result<Vec<RepoDetail>, String>,
    },
    /// Application lifecycle.
    Quit,
}

/// Interactive elements the view registers for hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Checkbox (or anywhere on the row) of the repository at this index.
    ToggleRow(usize),
    /// The select-all checkbox in the table header.
    ToggleSelectAll,
    /// The "Show Details" action in the footer.
    ShowDetails,
    /// The dismiss affordance of the details overlay.
    DismissOverlay,
    /// A detail card inside the overlay.
    FocusCard(usize),
    /// The CI config disclosure of a detail card.
    ToggleCiConfig(usize),
}

/// Lifecycle of the repository listing.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(Vec<Repository>),
    Failed(String),
}

/// Which modal surface, if any, is on top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    None,
    Details,
}

pub struct ViewModel {
    client: Arc<dyn ScannerApi>,
    ui_tx: UiSender<Msg>,

    /// TUI configuration (mouse interaction, contrast).
    pub tui_config: TuiConfig,

    // Repository table state
    pub repositories: LoadState,
    pub selection: Vec<SelectionEntry>,
    pub cursor: usize,
    pub last_refreshed: Option<chrono::DateTime<chrono::Utc>>,

    // Details overlay state. `details` and `detail_error` are mutually
    // exclusive: a completed fetch sets exactly one of them.
    pub modal_state: ModalState,
    pub details: Vec<RepoDetail>,
    pub detail_error: Option<String>,
    pub details_loading: bool,
    pub overlay_selected_card: usize,
    pub expanded_ci_cards: HashSet<usize>,

    // Monotonic token matching detail responses to the request that opened
    // the current overlay contents.
    detail_generation: u64,

    pub needs_redraw: bool,
    pub exit_requested: bool,
}

impl ViewModel {
    pub fn new(client: Arc<dyn ScannerApi>, tui_config: TuiConfig, ui_tx: UiSender<Msg>) -> Self {
        Self {
            client,
            ui_tx,
            tui_config,
            repositories: LoadState::Loading,
            selection: Vec::new(),
            cursor: 0,
            last_refreshed: None,
            modal_state: ModalState::None,
            details: Vec::new(),
            detail_error: None,
            details_loading: false,
            overlay_selected_card: 0,
            expanded_ci_cards: HashSet::new(),
            detail_generation: 0,
            needs_redraw: true,
            exit_requested: false,
        }
    }

    /// Kick off the initial repository listing. Requires a Tokio runtime;
    /// headless tests inject `Msg::RepositoriesLoaded` directly instead.
    pub fn start_loading_repositories(&mut self) {
        self.repositories = LoadState::Loading;
        self.needs_redraw = true;
        if tokio::runtime::Handle::try_current().is_err() {
            return;
        }
        let client = Arc::clone(&self.client);
        let ui_tx = self.ui_tx.clone();
        tokio::spawn(async move {
            let result = client.list_repositories().await.map_err(|e| e.to_string());
            if let Err(e) = &result {
                warn!("repository listing failed: {e}");
            }
            let _ = ui_tx.send(Msg::RepositoriesLoaded(result));
        });
    }

    /// Rows currently shown in the table. Empty while loading or failed.
    pub fn rows(&self) -> &[Repository] {
        match &self.repositories {
            LoadState::Loaded(rows) => rows,
            _ => &[],
        }
    }

    /// Listing failure message, if the last fetch failed.
    pub fn list_error(&self) -> Option<&str> {
        match &self.repositories {
            LoadState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Whether the header checkbox should render checked: every loaded row
    /// is currently selected (and there is at least one row).
    pub fn all_selected(&self) -> bool {
        let rows = self.rows();
        !rows.is_empty() && rows.iter().all(|r| is_selected(&self.selection, r.id))
    }

    pub fn row_selected(&self, index: usize) -> bool {
        self.rows().get(index).is_some_and(|r| is_selected(&self.selection, r.id))
    }

    /// Whether the "Show Details" action is available.
    pub fn can_show_details(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::MouseClick { action } => self.handle_mouse_action(action),
            Msg::MouseScrollUp => self.move_cursor_up(),
            Msg::MouseScrollDown => self.move_cursor_down(),
            Msg::Tick => {}
            Msg::RepositoriesLoaded(result) => self.on_repositories_loaded(result),
            Msg::DetailsLoaded { generation, result } => {
                self.on_details_loaded(generation, result)
            }
            Msg::Quit => {
                self.exit_requested = true;
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.exit_requested = true;
            return;
        }
        match self.modal_state {
            ModalState::Details => self.handle_overlay_key(key),
            ModalState::None => self.handle_table_key(key),
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor_down(),
            KeyCode::Char(' ') => self.toggle_row(self.cursor),
            KeyCode::Char('a') => self.toggle_select_all(),
            KeyCode::Enter | KeyCode::Char('d') => self.show_details(),
            KeyCode::Char('r') => self.start_loading_repositories(),
            KeyCode::Esc | KeyCode::Char('q') => {
                self.exit_requested = true;
            }
            _ => {}
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.dismiss_overlay(),
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => {
                if self.overlay_selected_card > 0 {
                    self.overlay_selected_card -= 1;
                    self.needs_redraw = true;
                }
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => {
                if self.overlay_selected_card + 1 < self.details.len() {
                    self.overlay_selected_card += 1;
                    self.needs_redraw = true;
                }
            }
            KeyCode::Char('c') => self.toggle_ci_config(self.overlay_selected_card),
            _ => {}
        }
    }

    fn handle_mouse_action(&mut self, action: MouseAction) {
        match action {
            MouseAction::ToggleRow(index) => {
                self.cursor = index;
                self.toggle_row(index);
            }
            MouseAction::ToggleSelectAll => self.toggle_select_all(),
            MouseAction::ShowDetails => self.show_details(),
            MouseAction::DismissOverlay => self.dismiss_overlay(),
            MouseAction::FocusCard(index) => {
                if index < self.details.len() {
                    self.overlay_selected_card = index;
                    self.needs_redraw = true;
                }
            }
            MouseAction::ToggleCiConfig(index) => self.toggle_ci_config(index),
        }
    }

    fn move_cursor_up(&mut self) {
        if self.modal_state == ModalState::Details {
            if self.overlay_selected_card > 0 {
                self.overlay_selected_card -= 1;
                self.needs_redraw = true;
            }
            return;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
            self.needs_redraw = true;
        }
    }

    fn move_cursor_down(&mut self) {
        if self.modal_state == ModalState::Details {
            if self.overlay_selected_card + 1 < self.details.len() {
                self.overlay_selected_card += 1;
                self.needs_redraw = true;
            }
            return;
        }
        if self.cursor + 1 < self.rows().len() {
            self.cursor += 1;
            self.needs_redraw = true;
        }
    }

    fn toggle_row(&mut self, index: usize) {
        let Some(repo) = self.rows().get(index) else {
            return;
        };
        let entry = SelectionEntry::from(repo);
        self.selection = apply_selection(&self.selection, SelectionAction::Toggle(entry));
        self.needs_redraw = true;
    }

    fn toggle_select_all(&mut self) {
        let rows = match &self.repositories {
            LoadState::Loaded(rows) if !rows.is_empty() => rows.clone(),
            _ => return,
        };
        let checked = !self.all_selected();
        self.selection =
            apply_selection(&self.selection, SelectionAction::SelectAll { checked, rows: &rows });
        self.needs_redraw = true;
    }

    /// Open the details overlay and fetch details for the current selection.
    /// A no-op when nothing is selected or the overlay is already open.
    pub fn show_details(&mut self) {
        if self.selection.is_empty() || self.modal_state == ModalState::Details {
            return;
        }
        self.modal_state = ModalState::Details;
        self.details.clear();
        self.detail_error = None;
        self.details_loading = true;
        self.overlay_selected_card = 0;
        self.expanded_ci_cards.clear();
        self.detail_generation += 1;
        self.needs_redraw = true;

        debug!(
            generation = self.detail_generation,
            count = self.selection.len(),
            "fetching repository details"
        );
        if tokio::runtime::Handle::try_current().is_err() {
            return;
        }
        let client = Arc::clone(&self.client);
        let ui_tx = self.ui_tx.clone();
        let selection = self.selection.clone();
        let generation = self.detail_generation;
        tokio::spawn(async move {
            let result = client.fetch_details(&selection).await.map_err(|e| e.to_string());
            let _ = ui_tx.send(Msg::DetailsLoaded { generation, result });
        });
    }

    /// Current generation token, for tests that inject `Msg::DetailsLoaded`.
    pub fn detail_generation(&self) -> u64 {
        self.detail_generation
    }

    /// Close the overlay. Fetched details stay cached untouched so a later
    /// response matching the current generation can still land.
    pub fn dismiss_overlay(&mut self) {
        if self.modal_state == ModalState::None {
            return;
        }
        self.modal_state = ModalState::None;
        self.needs_redraw = true;
    }

    fn toggle_ci_config(&mut self, card: usize) {
        if card >= self.details.len() {
            return;
        }
        if !self.expanded_ci_cards.remove(&card) {
            self.expanded_ci_cards.insert(card);
        }
        self.needs_redraw = true;
    }

    fn on_repositories_loaded(&mut self, result: Result<Vec<Repository>, String>) {
        match result {
            Ok(rows) => {
                // Drop selection entries whose repository no longer exists.
                self.selection.retain(|entry| rows.iter().any(|r| r.id == entry.id));
                if self.cursor >= rows.len() {
                    self.cursor = rows.len().saturating_sub(1);
                }
                self.repositories = LoadState::Loaded(rows);
                self.last_refreshed = Some(chrono::Utc::now());
            }
            Err(message) => {
                self.repositories = LoadState::Failed(message);
                self.selection.clear();
                self.cursor = 0;
            }
        }
        self.needs_redraw = true;
    }

    fn on_details_loaded(&mut self, generation: u64, result: Result<Vec<RepoDetail>, String>) {
        if generation != self.detail_generation {
            debug!(generation, current = self.detail_generation, "dropping stale detail response");
            return;
        }
        self.details_loading = false;
        // Results reassert the overlay; a no-op when it is already open.
        self.modal_state = ModalState::Details;
        match result {
            Ok(details) => {
                self.details = details;
                self.detail_error = None;
            }
            Err(message) => {
                self.details = Vec::new();
                self.detail_error = Some(message);
            }
        }
        self.overlay_selected_card = 0;
        self.needs_redraw = true;
    }
}
