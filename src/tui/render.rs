use std::borrow::Cow;
use std::time::Instant;

use crate::console::state::{ConsoleState, Panel};
use crate::console::strip::StripGroup;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, state: &ConsoleState, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(34)])
        .split(chunks[1]);

    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(6),
            Constraint::Length(6),
        ])
        .split(body[0]);

    draw_accounts(f, state, panels[0]);
    draw_posts(f, state, panels[1]);
    draw_queue(f, state, panels[2]);
    draw_toasts(f, state, body[1], now);

    draw_logs(f, state, chunks[2]);
    draw_footer(f, state, chunks[3]);
}

fn draw_header(f: &mut Frame, state: &ConsoleState, area: Rect) {
    let in_flight = if state.in_flight > 0 {
        Span::styled(
            format!("{} in flight", state.in_flight),
            Style::default().fg(Color::Cyan),
        )
    } else {
        Span::styled("idle", Style::default().fg(Color::DarkGray))
    };

    let line = Line::from(vec![
        Span::raw(format!(" Server: {} | Up: {} | ", state.base_url, state.uptime())),
        in_flight,
        Span::styled(
            format!(
                " | {} accounts \u{00b7} {} posts \u{00b7} {} queued",
                state.accounts.len(),
                state.posts.len(),
                state.queue.len(),
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default().title(" Foxfeed Admin ").borders(Borders::ALL);
    let para = Paragraph::new(line).block(block);
    f.render_widget(para, area);
}

/// One strip's cells as `(label, selected)` pairs, in display order.
fn strip_cells(
    state: &ConsoleState,
    subject: &str,
    group: StripGroup,
) -> Vec<(&'static str, bool)> {
    let selected = state.strips.selected_value(subject, group);
    group
        .values()
        .iter()
        .map(|&value| (value.as_str(), selected == Some(value)))
        .collect()
}

fn strip_line(state: &ConsoleState, subject: &str, group: StripGroup) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (label, selected)) in strip_cells(state, subject, group).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
    }
    Line::from(spans)
}

fn draw_accounts(f: &mut Frame, state: &ConsoleState, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let focused = state.focus == Panel::Accounts;

    if state.accounts.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No accounts in the roster",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "add [[accounts]] entries to config.toml",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let block = Block::default().title(" Accounts ").borders(Borders::ALL);
        let para = Paragraph::new(lines).alignment(Alignment::Center).block(block);
        f.render_widget(para, area);
        return;
    }

    // Fixed column widths: Fox=16 Vix=16; DID=30 when it fits
    let show_did = inner_width >= 80;
    let fixed: usize = 16 + 16 + if show_did { 30 } else { 0 };
    let handle_w = inner_width.saturating_sub(fixed).max(8);

    let mut headers = vec!["Handle"];
    if show_did {
        headers.push("DID");
    }
    headers.extend_from_slice(&["Fox", "Vix"]);
    let header = Row::new(headers).style(Style::default().add_modifier(Modifier::BOLD));

    let mut constraints = vec![Constraint::Length(handle_w as u16)];
    if show_did {
        constraints.push(Constraint::Length(30));
    }
    constraints.extend_from_slice(&[Constraint::Length(16), Constraint::Length(16)]);

    let rows: Vec<Row> = state
        .accounts
        .iter()
        .map(|acct| {
            let mut cells = vec![Cell::from(
                truncate_with_ellipsis(&acct.handle, handle_w).into_owned(),
            )];
            if show_did {
                cells.push(
                    Cell::from(truncate_with_ellipsis(&acct.did, 30).into_owned())
                        .style(Style::default().fg(Color::DarkGray)),
                );
            }
            cells.push(Cell::from(strip_line(state, &acct.handle, StripGroup::FoxFeed)));
            cells.push(Cell::from(strip_line(state, &acct.handle, StripGroup::VixFeed)));
            Row::new(cells)
        })
        .collect();

    let title = if focused {
        format!(" Accounts [{}/{}] ", state.account_cursor + 1, state.accounts.len())
    } else {
        " Accounts ".to_string()
    };

    let table = Table::new(rows, constraints)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut table_state = TableState::default();
    table_state.select(focused.then_some(state.account_cursor));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_posts(f: &mut Frame, state: &ConsoleState, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let focused = state.focus == Panel::Posts;

    if state.posts.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No posts in the roster",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let block = Block::default().title(" Posts ").borders(Borders::ALL);
        let para = Paragraph::new(lines).alignment(Alignment::Center).block(block);
        f.render_widget(para, area);
        return;
    }

    let uri_w = inner_width.saturating_sub(11).max(8);

    let header = Row::new(vec!["Uri", "Pinned"]).style(Style::default().add_modifier(Modifier::BOLD));
    let constraints = [Constraint::Length(uri_w as u16), Constraint::Length(11)];

    let rows: Vec<Row> = state
        .posts
        .iter()
        .map(|post| {
            Row::new(vec![
                Cell::from(truncate_with_ellipsis(&post.uri, uri_w).into_owned()),
                Cell::from(strip_line(state, &post.uri, StripGroup::Pinned)),
            ])
        })
        .collect();

    let title = if focused {
        format!(" Posts [{}/{}] ", state.post_cursor + 1, state.posts.len())
    } else {
        " Posts ".to_string()
    };

    let table = Table::new(rows, constraints)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut table_state = TableState::default();
    table_state.select(focused.then_some(state.post_cursor));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_queue(f: &mut Frame, state: &ConsoleState, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let focused = state.focus == Panel::Queue;

    if state.queue.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Schedule queue is empty",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let block = Block::default().title(" Scheduled ").borders(Borders::ALL);
        let para = Paragraph::new(lines).alignment(Alignment::Center).block(block);
        f.render_widget(para, area);
        return;
    }

    let label_w = inner_width.saturating_sub(6).max(8);

    let header = Row::new(vec!["Id", "Label"]).style(Style::default().add_modifier(Modifier::BOLD));
    let constraints = [Constraint::Length(6), Constraint::Length(label_w as u16)];

    let rows: Vec<Row> = state
        .queue
        .iter()
        .map(|item| {
            Row::new(vec![
                Cell::from(item.id.clone()),
                Cell::from(truncate_with_ellipsis(&item.label, label_w).into_owned()),
            ])
        })
        .collect();

    let title = if focused {
        format!(" Scheduled [{}/{}] ", state.queue_cursor + 1, state.queue.len())
    } else {
        " Scheduled ".to_string()
    };

    let table = Table::new(rows, constraints)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut table_state = TableState::default();
    table_state.select(focused.then_some(state.queue_cursor));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_toasts(f: &mut Frame, state: &ConsoleState, area: Rect, now: Instant) {
    let block = Block::default().title(" Notifications ").borders(Borders::ALL);

    if state.toasts.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No notifications",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let para = Paragraph::new(lines).alignment(Alignment::Center).block(block);
        f.render_widget(para, area);
        return;
    }

    // Newest first
    let mut lines = Vec::new();
    for toast in state.toasts.iter().rev() {
        lines.push(Line::from(Span::styled(
            format!(" {}", format_remaining(toast.expires_at, now)),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::raw(toast.message.clone())));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(para, area);
}

fn draw_logs(f: &mut Frame, state: &ConsoleState, area: Rect) {
    let max_width = area.width.saturating_sub(2) as usize;
    let visible_lines = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible_lines)
        .map(|l| {
            let color = match l.level.as_str() {
                "ERROR" => Color::Red,
                "WARN" => Color::Yellow,
                _ => Color::DarkGray,
            };
            let prefix = format!(" {} [{}] ", l.time, l.level);
            let prefix_len = prefix.len();
            let msg_max = max_width.saturating_sub(prefix_len);
            let msg = truncate_with_ellipsis(&l.message, msg_max);
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::raw(msg.into_owned()),
            ])
        })
        .collect();

    let block = Block::default().title(" Console Log ").borders(Borders::ALL);
    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, area);
}

fn draw_footer(f: &mut Frame, state: &ConsoleState, area: Rect) {
    let mut spans = vec![
        Span::styled("  [q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit  "),
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" panel  "),
        Span::styled("[j/k]", Style::default().fg(Color::Yellow)),
        Span::raw(" move  "),
    ];

    match state.focus {
        Panel::Accounts => {
            spans.push(Span::styled("[f]", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw("ox verdict  "));
            spans.push(Span::styled("[v]", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw("ix verdict  "));
        }
        Panel::Posts => {
            spans.push(Span::styled("[p]", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw("in toggle  "));
            spans.push(Span::styled("[s]", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw("can likes  "));
        }
        Panel::Queue => {
            spans.push(Span::styled("[c]", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw("ancel  "));
            spans.push(Span::styled("[i]", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw("mmediate  "));
            spans.push(Span::styled("[r]", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw("eschedule  "));
        }
    }

    let para = Paragraph::new(Line::from(spans));
    f.render_widget(para, area);
}

/// Seconds a notification has left, rounded up the way a countdown reads.
fn format_remaining(expires_at: Instant, now: Instant) -> String {
    let left = expires_at.saturating_duration_since(now);
    format!("{}s", left.as_secs_f64().ceil() as u64)
}

fn truncate_with_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    let char_count = s.chars().count();
    if char_count <= max_width {
        Cow::Borrowed(s)
    } else if max_width <= 3 {
        Cow::Owned(".".repeat(max_width))
    } else {
        let end = s
            .char_indices()
            .nth(max_width - 3)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        Cow::Owned(format!("{}...", &s[..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::time::Duration;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_with_ellipsis("vex.pawb.social", 20), "vex.pawb.social");
        assert_eq!(truncate_with_ellipsis("vex.pawb.social", 15), "vex.pawb.social");
    }

    #[test]
    fn test_truncate_long_uri() {
        let uri = "at://did:plc:o5f6fsewachtl3uswlrbhnop/app.bsky.feed.post/3kwajqoembk2k";
        assert_eq!(truncate_with_ellipsis(uri, 20), "at://did:plc:o5f6...");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_with_ellipsis("handle", 3), "...");
        assert_eq!(truncate_with_ellipsis("handle", 2), "..");
        assert_eq!(truncate_with_ellipsis("handle", 0), "");
    }

    #[test]
    fn test_truncate_multibyte_chars() {
        // é is 2 bytes in UTF-8; truncation must not land inside it
        assert_eq!(truncate_with_ellipsis("café posting hour", 10), "café po...");
    }

    #[test]
    fn test_remaining_counts_down() {
        let t0 = Instant::now();
        let expires = t0 + Duration::from_secs(10);

        assert_eq!(format_remaining(expires, t0), "10s");
        assert_eq!(format_remaining(expires, t0 + Duration::from_millis(1500)), "9s");
        assert_eq!(format_remaining(expires, t0 + Duration::from_secs(11)), "0s");
    }

    #[test]
    fn test_strip_cells_mark_the_selected_value() {
        let config: Config = toml::from_str(
            r#"
            [[accounts]]
            handle = "vex.pawb.social"
            did = "did:plc:o5f6fsewachtl3uswlrbhnop"
            fox_feed = true
            "#,
        )
        .unwrap();
        let state = ConsoleState::new(&config);

        let cells = strip_cells(&state, "vex.pawb.social", StripGroup::FoxFeed);
        assert_eq!(cells, vec![("false", false), ("null", false), ("true", true)]);

        let cells = strip_cells(&state, "vex.pawb.social", StripGroup::VixFeed);
        assert_eq!(cells, vec![("false", false), ("null", true), ("true", false)]);
    }
}
