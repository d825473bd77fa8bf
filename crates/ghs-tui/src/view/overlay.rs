// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Details overlay: modal surface stacked over the dashboard showing one
//! card per fetched repository detail. An error replaces the cards entirely;
//! the two are never shown together.

use ratatui::{prelude::*, widgets::*};

use crate::theme::Theme;
use crate::view::dashboard_view::format_size;
use crate::view::hit_test::HitTestRegistry;
use crate::view_model::{MouseAction, ViewModel};
use ghs_api_contract::RepoDetail;

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    view_model: &ViewModel,
    theme: &Theme,
    hit_test: &mut HitTestRegistry<MouseAction>,
) {
    let modal = centered_rect(area, 80, 80);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Repository Details ")
        .title(
            Line::from(Span::styled("[Esc to close]", Style::default().fg(theme.muted)))
                .right_aligned(),
        )
        .style(Style::default().bg(theme.bg));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);
    // Clicking the title row dismisses; clicks elsewhere in the modal are
    // swallowed so they never reach the table underneath.
    hit_test.register(modal, MouseAction::FocusCard(view_model.overlay_selected_card));
    hit_test.register(
        Rect { height: 1, ..modal },
        MouseAction::DismissOverlay,
    );

    if let Some(message) = &view_model.detail_error {
        let error = Paragraph::new(Line::from(Span::styled(message.as_str(), theme.error_style())))
            .alignment(Alignment::Center);
        frame.render_widget(error, vertically_centered_line(inner));
        return;
    }
    if view_model.details_loading {
        let loading = Paragraph::new(Line::from(Span::styled(
            "Loading details…",
            Style::default().fg(theme.muted),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(loading, vertically_centered_line(inner));
        return;
    }
    if view_model.details.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No details returned",
            Style::default().fg(theme.muted),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(empty, vertically_centered_line(inner));
        return;
    }

    render_cards(frame, inner, view_model, theme, hit_test);
}

fn render_cards(
    frame: &mut Frame<'_>,
    area: Rect,
    view_model: &ViewModel,
    theme: &Theme,
    hit_test: &mut HitTestRegistry<MouseAction>,
) {
    // Start from the selected card when earlier ones would push it off-screen.
    let mut start = 0;
    let mut height_before_selected = 0u16;
    for (i, detail) in view_model.details.iter().enumerate() {
        if i >= view_model.overlay_selected_card {
            break;
        }
        height_before_selected += card_height(view_model, i, detail);
        if height_before_selected > area.height.saturating_sub(4) {
            start = view_model.overlay_selected_card;
            break;
        }
    }

    let mut y = area.y;
    for (i, detail) in view_model.details.iter().enumerate().skip(start) {
        let height = card_height(view_model, i, detail).min(area.height);
        if y + height > area.y + area.height {
            break;
        }
        let card_area = Rect { x: area.x, y, width: area.width, height };
        render_card(frame, card_area, view_model, i, detail, theme, hit_test);
        y += height;
    }
}

fn render_card(
    frame: &mut Frame<'_>,
    area: Rect,
    view_model: &ViewModel,
    index: usize,
    detail: &RepoDetail,
    theme: &Theme,
    hit_test: &mut HitTestRegistry<MouseAction>,
) {
    let focused = index == view_model.overlay_selected_card;
    let border = if focused { theme.border_focused } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", detail.name));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    hit_test.register(area, MouseAction::FocusCard(index));

    let visibility = if detail.is_private {
        Span::styled("private", Style::default().fg(theme.tag))
    } else {
        Span::styled("public", Style::default().fg(theme.muted))
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(detail.owner.clone(), Style::default().fg(theme.text)),
            Span::raw("  "),
            Span::styled(format_size(detail.size), Style::default().fg(theme.muted)),
            Span::raw("  "),
            Span::styled(
                format!("{} files", detail.file_count),
                Style::default().fg(theme.muted),
            ),
            Span::raw("  "),
            visibility,
        ]),
    ];

    let expanded = view_model.expanded_ci_cards.contains(&index);
    let ci_line_index = lines.len();
    let disclosure = if expanded { "▾" } else { "▸" };
    match &detail.yml_content {
        Some(_) => lines.push(Line::from(Span::styled(
            format!("{disclosure} CI config (c to toggle)"),
            Style::default().fg(theme.primary),
        ))),
        None => lines.push(Line::from(Span::styled(
            "no CI config",
            Style::default().fg(theme.muted),
        ))),
    }
    if expanded {
        if let Some(yml) = &detail.yml_content {
            for raw in yml.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {raw}"),
                    Style::default().fg(theme.text),
                )));
            }
        }
    }

    if detail.active_hooks.is_empty() {
        lines.push(Line::from(Span::styled("no webhooks", Style::default().fg(theme.muted))));
    } else {
        for hook in &detail.active_hooks {
            let mut spans = vec![
                Span::styled("hook ", Style::default().fg(theme.muted)),
                Span::styled(hook.url.to_string(), Style::default().fg(theme.text)),
            ];
            for event in &hook.events {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("[{event}]"),
                    Style::default().fg(theme.tag),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    if detail.yml_content.is_some() && ci_line_index < inner.height as usize {
        hit_test.register(
            Rect {
                x: inner.x,
                y: inner.y + ci_line_index as u16,
                width: inner.width,
                height: 1,
            },
            MouseAction::ToggleCiConfig(index),
        );
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Total height of a card including its borders.
fn card_height(view_model: &ViewModel, index: usize, detail: &RepoDetail) -> u16 {
    let mut lines = 3u16; // summary line + CI disclosure + webhook summary minimum
    if view_model.expanded_ci_cards.contains(&index) {
        if let Some(yml) = &detail.yml_content {
            lines += yml.lines().count() as u16;
        }
    }
    if detail.active_hooks.len() > 1 {
        lines += detail.active_hooks.len() as u16 - 1;
    }
    lines + 2
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn vertically_centered_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..area
    }
}
