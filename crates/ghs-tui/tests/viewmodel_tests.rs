// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Headless ViewModel tests driven entirely through messages, with network
//! access mocked at the `ScannerApi` seam.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ghs_api_contract::{RepoDetail, Repository, SelectionEntry};
use ghs_rest_client_mock::{MockFailure, MockScannerClient};
use ghs_tui::{LoadState, ModalState, Msg, TuiConfig, ViewModel};

fn repo(id: u64, name: &str) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        owner: "octocat".to_string(),
        size: 128,
        file_count: 42,
    }
}

fn detail(name: &str) -> RepoDetail {
    RepoDetail {
        name: name.to_string(),
        owner: "octocat".to_string(),
        size: 128,
        file_count: 42,
        is_private: false,
        yml_content: None,
        active_hooks: Vec::new(),
    }
}

fn key(code: KeyCode) -> Msg {
    Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Build a ViewModel around the given mock and synchronously load the
/// repository list through the message channel.
fn loaded_view_model(client: Arc<MockScannerClient>) -> (ViewModel, Receiver<Msg>) {
    let (ui_tx, rx) = crossbeam_channel::unbounded();
    let mut vm = ViewModel::new(client, TuiConfig::default(), ui_tx);
    vm.start_loading_repositories();
    let msg = rx.recv_timeout(Duration::from_secs(5)).expect("listing completion");
    vm.update(msg);
    (vm, rx)
}

/// Wait for the background detail fetch to complete and apply its message.
fn pump_details(vm: &mut ViewModel, rx: &Receiver<Msg>) {
    let msg = rx.recv_timeout(Duration::from_secs(5)).expect("detail completion");
    assert!(matches!(msg, Msg::DetailsLoaded { .. }));
    vm.update(msg);
}

#[tokio::test(flavor = "multi_thread")]
async fn space_toggles_row_membership_with_parity() {
    let client = Arc::new(MockScannerClient::new().with_repositories(vec![
        repo(1, "alpha"),
        repo(2, "beta"),
    ]));
    let (mut vm, _rx) = loaded_view_model(client);

    vm.update(key(KeyCode::Char(' ')));
    assert!(vm.row_selected(0));
    vm.update(key(KeyCode::Char(' ')));
    assert!(!vm.row_selected(0));
    vm.update(key(KeyCode::Char(' ')));
    assert_eq!(vm.selection, vec![SelectionEntry { id: 1, name: "alpha".into() }]);
}

#[tokio::test(flavor = "multi_thread")]
async fn select_all_round_trip() {
    let client = Arc::new(MockScannerClient::new().with_repositories(vec![
        repo(1, "alpha"),
        repo(2, "beta"),
        repo(3, "gamma"),
    ]));
    let (mut vm, _rx) = loaded_view_model(client);

    vm.update(key(KeyCode::Down)); // cursor movement must not affect selection
    vm.update(key(KeyCode::Char('a')));
    assert!(vm.all_selected());
    assert_eq!(vm.selection.len(), 3);

    vm.update(key(KeyCode::Char('a')));
    assert!(vm.selection.is_empty());
    assert!(!vm.all_selected());
}

#[tokio::test(flavor = "multi_thread")]
async fn partial_selection_makes_select_all_check_everything() {
    let client = Arc::new(
        MockScannerClient::new().with_repositories(vec![repo(1, "alpha"), repo(2, "beta")]),
    );
    let (mut vm, _rx) = loaded_view_model(client);

    vm.update(key(KeyCode::Char(' ')));
    assert_eq!(vm.selection.len(), 1);
    vm.update(key(KeyCode::Char('a')));
    assert_eq!(vm.selection.len(), 2);
    assert!(vm.all_selected());
}

#[tokio::test(flavor = "multi_thread")]
async fn show_details_sends_current_selection_in_order() {
    let client = Arc::new(
        MockScannerClient::new()
            .with_repositories(vec![repo(1, "alpha"), repo(2, "beta"), repo(3, "gamma")])
            .with_details(vec![detail("gamma"), detail("alpha")]),
    );
    let (mut vm, rx) = loaded_view_model(Arc::clone(&client));

    // Select gamma then alpha, so insertion order differs from table order.
    vm.update(key(KeyCode::Down));
    vm.update(key(KeyCode::Down));
    vm.update(key(KeyCode::Char(' ')));
    vm.update(key(KeyCode::Up));
    vm.update(key(KeyCode::Up));
    vm.update(key(KeyCode::Char(' ')));

    vm.update(key(KeyCode::Enter));
    assert_eq!(vm.modal_state, ModalState::Details);
    assert!(vm.details_loading);
    pump_details(&mut vm, &rx);

    let requests = client.detail_requests();
    assert_eq!(requests.len(), 1);
    let names: Vec<&str> = requests[0].iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["gamma", "alpha"]);

    // Response order is preserved as delivered by the server.
    let shown: Vec<&str> = vm.details.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(shown, vec!["gamma", "alpha"]);
    assert!(vm.detail_error.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn show_details_with_empty_selection_is_a_no_op() {
    let client =
        Arc::new(MockScannerClient::new().with_repositories(vec![repo(1, "alpha")]));
    let (mut vm, _rx) = loaded_view_model(Arc::clone(&client));

    vm.update(key(KeyCode::Enter));
    assert_eq!(vm.modal_state, ModalState::None);
    assert_eq!(client.detail_request_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn show_details_while_overlay_open_does_not_refetch() {
    let client = Arc::new(
        MockScannerClient::new()
            .with_repositories(vec![repo(1, "alpha")])
            .with_details(vec![detail("alpha")]),
    );
    let (mut vm, rx) = loaded_view_model(Arc::clone(&client));

    vm.update(key(KeyCode::Char(' ')));
    vm.update(key(KeyCode::Enter));
    pump_details(&mut vm, &rx);
    vm.update(key(KeyCode::Enter));
    assert_eq!(client.detail_request_count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_failure_shows_fixed_message_and_clears_rows() {
    let client = Arc::new(MockScannerClient::new().with_list_failure(MockFailure::ListUnavailable));
    let (vm, _rx) = loaded_view_model(client);

    assert!(matches!(vm.repositories, LoadState::Failed(_)));
    assert_eq!(vm.list_error(), Some("Failed to fetch repositories"));
    assert!(vm.rows().is_empty());
    assert!(vm.selection.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn detail_failure_shows_error_instead_of_cards() {
    let client = Arc::new(
        MockScannerClient::new()
            .with_repositories(vec![repo(1, "alpha")])
            .with_detail_failure(MockFailure::NotFound),
    );
    let (mut vm, rx) = loaded_view_model(client);

    vm.update(key(KeyCode::Char(' ')));
    vm.update(key(KeyCode::Enter));
    pump_details(&mut vm, &rx);

    assert_eq!(vm.detail_error.as_deref(), Some("Repo not found"));
    assert!(vm.details.is_empty());
    assert_eq!(vm.modal_state, ModalState::Details);
}

#[tokio::test(flavor = "multi_thread")]
async fn dismissing_the_overlay_keeps_details_intact() {
    let client = Arc::new(
        MockScannerClient::new()
            .with_repositories(vec![repo(1, "alpha")])
            .with_details(vec![detail("alpha")]),
    );
    let (mut vm, rx) = loaded_view_model(client);

    vm.update(key(KeyCode::Char(' ')));
    vm.update(key(KeyCode::Enter));
    pump_details(&mut vm, &rx);
    assert_eq!(vm.details.len(), 1);

    vm.update(key(KeyCode::Esc));
    assert_eq!(vm.modal_state, ModalState::None);
    assert_eq!(vm.details.len(), 1);
    assert!(vm.detail_error.is_none());
    // Esc on the dashboard itself requests exit, not another dismiss.
    assert!(!vm.exit_requested);
}

#[tokio::test(flavor = "multi_thread")]
async fn reopening_refetches_with_a_new_generation() {
    let client = Arc::new(
        MockScannerClient::new()
            .with_repositories(vec![repo(1, "alpha")])
            .with_details(vec![detail("alpha")]),
    );
    let (mut vm, rx) = loaded_view_model(Arc::clone(&client));

    vm.update(key(KeyCode::Char(' ')));
    vm.update(key(KeyCode::Enter));
    pump_details(&mut vm, &rx);
    let first_generation = vm.detail_generation();

    vm.update(key(KeyCode::Esc));
    vm.update(key(KeyCode::Enter));
    pump_details(&mut vm, &rx);

    assert_eq!(client.detail_request_count(), 2);
    assert_eq!(vm.detail_generation(), first_generation + 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn stale_detail_responses_are_dropped() {
    let client = Arc::new(
        MockScannerClient::new()
            .with_repositories(vec![repo(1, "alpha"), repo(2, "beta")])
            .with_details(vec![detail("beta")]),
    );
    let (mut vm, rx) = loaded_view_model(client);

    vm.update(key(KeyCode::Char(' ')));
    vm.update(key(KeyCode::Enter));
    let stale_generation = vm.detail_generation();
    // Drain the in-flight completion without applying it, then reopen.
    let _ = rx.recv_timeout(Duration::from_secs(5)).expect("first completion");
    vm.update(key(KeyCode::Esc));
    vm.update(key(KeyCode::Enter));

    // A late response from the first request must not overwrite anything.
    vm.update(Msg::DetailsLoaded {
        generation: stale_generation,
        result: Ok(vec![detail("stale")]),
    });
    assert!(vm.details_loading);
    assert!(vm.details.is_empty());

    pump_details(&mut vm, &rx);
    let shown: Vec<&str> = vm.details.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(shown, vec!["beta"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn reload_prunes_selection_of_removed_repositories() {
    let client = Arc::new(
        MockScannerClient::new().with_repositories(vec![repo(1, "alpha"), repo(2, "beta")]),
    );
    let (mut vm, _rx) = loaded_view_model(client);

    vm.update(key(KeyCode::Char('a')));
    assert_eq!(vm.selection.len(), 2);

    vm.update(Msg::RepositoriesLoaded(Ok(vec![repo(2, "beta"), repo(3, "gamma")])));
    let ids: Vec<u64> = vm.selection.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test(flavor = "multi_thread")]
async fn ci_config_starts_collapsed_and_toggles_per_card() {
    let detail_with_yml = RepoDetail {
        yml_content: Some("steps:\n  - run: make".to_string()),
        ..detail("alpha")
    };
    let client = Arc::new(
        MockScannerClient::new()
            .with_repositories(vec![repo(1, "alpha")])
            .with_details(vec![detail_with_yml]),
    );
    let (mut vm, rx) = loaded_view_model(client);

    vm.update(key(KeyCode::Char(' ')));
    vm.update(key(KeyCode::Enter));
    pump_details(&mut vm, &rx);

    assert!(vm.expanded_ci_cards.is_empty());
    vm.update(key(KeyCode::Char('c')));
    assert!(vm.expanded_ci_cards.contains(&0));
    vm.update(key(KeyCode::Char('c')));
    assert!(vm.expanded_ci_cards.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn rendering_never_panics_on_small_terminals() {
    let client = Arc::new(
        MockScannerClient::new().with_repositories(vec![repo(1, "alpha"), repo(2, "beta")]),
    );
    let (mut vm, _rx) = loaded_view_model(client);
    vm.update(key(KeyCode::Char('a')));

    let theme = ghs_tui::Theme::default();
    let mut hit = ghs_tui::view::HitTestRegistry::new();
    for (w, h) in [(80, 24), (20, 5), (5, 3)] {
        let mut terminal = ghs_tui::create_test_terminal(w, h);
        terminal
            .draw(|frame| ghs_tui::view::render(frame, &vm, &theme, &mut hit))
            .expect("draw");
    }
}
