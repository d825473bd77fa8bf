// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dashboard rendering: the repository table, status line and footer.
//!
//! Pure ViewModel-to-widgets transformation. The only output besides the
//! frame itself is the hit-test registry the input dispatcher uses to route
//! mouse clicks back to the ViewModel.

use ratatui::{prelude::*, widgets::*};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::Theme;
use crate::view::hit_test::HitTestRegistry;
use crate::view::overlay;
use crate::view_model::{LoadState, ModalState, MouseAction, ViewModel};

const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";

/// Render a full frame of the dashboard.
pub fn render(
    frame: &mut Frame<'_>,
    view_model: &ViewModel,
    theme: &Theme,
    hit_test: &mut HitTestRegistry<MouseAction>,
) {
    hit_test.clear();
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Min(3),    // repository table
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_title(frame, chunks[0], view_model, theme);
    render_table(frame, chunks[1], view_model, theme, hit_test);
    render_footer(frame, chunks[2], view_model, theme, hit_test);

    if view_model.modal_state == ModalState::Details {
        overlay::render(frame, area, view_model, theme, hit_test);
    }
}

fn render_title(frame: &mut Frame<'_>, area: Rect, view_model: &ViewModel, theme: &Theme) {
    let mut spans = vec![Span::styled(
        " GitHub Scanner ",
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
    )];
    match &view_model.repositories {
        LoadState::Loading => {
            spans.push(Span::styled("loading…", Style::default().fg(theme.muted)))
        }
        LoadState::Loaded(rows) => {
            spans.push(Span::styled(
                format!("{} repositories", rows.len()),
                Style::default().fg(theme.muted),
            ));
            if let Some(at) = view_model.last_refreshed {
                spans.push(Span::styled(
                    format!("  refreshed {}", at.format("%H:%M:%S")),
                    Style::default().fg(theme.muted),
                ));
            }
        }
        LoadState::Failed(_) => {}
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    view_model: &ViewModel,
    theme: &Theme,
    hit_test: &mut HitTestRegistry<MouseAction>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Repositories ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(message) = view_model.list_error() {
        let error = Paragraph::new(Line::from(Span::styled(message, theme.error_style())))
            .alignment(Alignment::Center);
        frame.render_widget(error, inner);
        return;
    }
    if matches!(view_model.repositories, LoadState::Loading) {
        let loading =
            Paragraph::new(Line::from(Span::styled("Loading…", Style::default().fg(theme.muted))))
                .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    }

    let rows = view_model.rows();
    if rows.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No repositories",
            Style::default().fg(theme.muted),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    // Header line with the select-all checkbox.
    let header_mark = if view_model.all_selected() { CHECKED } else { UNCHECKED };
    let header = Line::from(vec![
        Span::styled(format!("{header_mark} "), theme.header_style()),
        Span::styled(pad("Name", 28), theme.header_style()),
        Span::styled(pad("Owner", 18), theme.header_style()),
        Span::styled(pad("Size", 10), theme.header_style()),
        Span::styled("Files", theme.header_style()),
    ]);
    let header_area = Rect { height: 1, ..inner };
    frame.render_widget(Paragraph::new(header), header_area);
    if header_area.width >= 3 {
        hit_test.register(
            Rect { width: 3, ..header_area },
            MouseAction::ToggleSelectAll,
        );
    }

    // One row per repository; single-height rows so zones map 1:1 to lines.
    let visible = (inner.height.saturating_sub(1)) as usize;
    let offset = scroll_offset(view_model.cursor, rows.len(), visible);
    for (line_idx, (row_idx, repo)) in
        rows.iter().enumerate().skip(offset).take(visible).enumerate()
    {
        let y = inner.y + 1 + line_idx as u16;
        let row_area = Rect { x: inner.x, y, width: inner.width, height: 1 };
        let selected = view_model.row_selected(row_idx);
        let mark = if selected { CHECKED } else { UNCHECKED };
        let style = if row_idx == view_model.cursor {
            theme.cursor_row_style()
        } else if selected {
            Style::default().fg(theme.selection)
        } else {
            Style::default().fg(theme.text)
        };
        let line = Line::from(vec![
            Span::styled(format!("{mark} "), style),
            Span::styled(pad(&truncate(&repo.name, 27), 28), style),
            Span::styled(pad(&truncate(&repo.owner, 17), 18), style),
            Span::styled(pad(&format_size(repo.size), 10), style),
            Span::styled(repo.file_count.to_string(), style),
        ]);
        frame.render_widget(Paragraph::new(line), row_area);
        hit_test.register(row_area, MouseAction::ToggleRow(row_idx));
    }
}

fn render_footer(
    frame: &mut Frame<'_>,
    area: Rect,
    view_model: &ViewModel,
    theme: &Theme,
    hit_test: &mut HitTestRegistry<MouseAction>,
) {
    let mut spans = vec![Span::styled(
        format!(" {} selected ", view_model.selection.len()),
        Style::default().fg(theme.text),
    )];
    if view_model.can_show_details() {
        let label = " [Show Details] ";
        let x = spans.iter().map(|s| s.content.width() as u16).sum::<u16>();
        spans.push(Span::styled(
            label,
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ));
        let zone = Rect {
            x: area.x + x,
            y: area.y,
            width: (label.width() as u16).min(area.width.saturating_sub(x)),
            height: 1,
        };
        hit_test.register(zone, MouseAction::ShowDetails);
    }
    spans.push(Span::styled(
        " space: toggle  a: all  enter: details  r: reload  q: quit",
        Style::default().fg(theme.muted),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// First visible row index, keeping the cursor within the viewport.
fn scroll_offset(cursor: usize, total: usize, visible: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    let max_offset = total - visible;
    cursor.saturating_sub(visible - 1).min(max_offset)
}

fn pad(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        text.to_string()
    } else {
        format!("{text}{}", " ".repeat(width - current))
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Sizes arrive in kilobytes, matching the GitHub API.
pub(crate) fn format_size(kilobytes: u64) -> String {
    if kilobytes >= 1024 * 1024 {
        format!("{:.1} GB", kilobytes as f64 / (1024.0 * 1024.0))
    } else if kilobytes >= 1024 {
        format!("{:.1} MB", kilobytes as f64 / 1024.0)
    } else {
        format!("{kilobytes} KB")
    }
}
