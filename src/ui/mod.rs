// UI module for rendering the TUI.
// Account header, repository list, key hints, and the help popup.

mod list;

use ratatui::layout::Flex;
use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::github::RateLimit;
use crate::state::LoadingState;

const BROWSE_HINTS: &[(&str, &str)] = &[
    ("↑↓", "Navigate"),
    ("/", "Account"),
    ("r", "Refresh"),
    ("?", "Help"),
    ("q", "Quit"),
];

const EDIT_HINTS: &[(&str, &str)] = &[("↵", "Switch"), ("Esc", "Cancel")];

const HELP_ROWS: &[(&str, &str)] = &[
    ("↑/↓  j/k", "Move through repositories"),
    ("/", "Type another account name"),
    ("r", "Refetch, ignoring the cache"),
    ("?", "Toggle this panel"),
    ("q", "Quit"),
];

/// Render the whole screen.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, app, header);
    list::render_repositories_list(frame, &mut app.repos, body);
    draw_status_bar(frame, app, status);

    if app.show_help {
        draw_help(frame);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(input) = &app.input {
        Line::from(vec![
            " account › ".cyan(),
            Span::raw(input.as_str()),
            "▏".cyan().slow_blink(),
        ])
    } else {
        Line::from(vec![" github.com/".dark_gray(), app.account.as_str().bold()])
    };

    let underline = Block::new()
        .borders(Borders::BOTTOM)
        .border_style(Style::new().dark_gray());
    frame.render_widget(Paragraph::new(line).block(underline), area);
}

fn hint_spans(hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    hints
        .iter()
        .flat_map(|(key, label)| [Span::raw(format!(" {} ", key)), label.dark_gray()])
        .collect()
}

fn rate_limit_span(rate: &RateLimit) -> Option<Span<'static>> {
    if rate.limit == 0 {
        return None;
    }
    let color = match rate.remaining {
        0..10 => Color::Red,
        10..30 => Color::Yellow,
        _ => Color::DarkGray,
    };
    Some(Span::styled(
        format!(" api {}/{} ", rate.remaining, rate.limit),
        Style::new().fg(color),
    ))
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.input.is_some() {
        EDIT_HINTS
    } else {
        BROWSE_HINTS
    };
    let mut left = hint_spans(hints);

    if let LoadingState::Loaded(listing) = &app.repos.data {
        if let Some(warning) = &listing.warning {
            left.push(Span::raw("  "));
            left.push(format!("⚠ {}", warning).yellow());
        }
    }

    let right = rate_limit_span(&app.rate_limit);
    let right_width = right.as_ref().map_or(0, |s| s.width() as u16);
    let [hints_area, rate_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(right_width)]).areas(area);

    frame.render_widget(Line::from(left), hints_area);
    if let Some(span) = right {
        frame.render_widget(Line::from(span).right_aligned(), rate_area);
    }
}

fn draw_help(frame: &mut Frame) {
    let key_width = HELP_ROWS.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let mut lines: Vec<Line> = HELP_ROWS
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                format!("  {:<width$}  ", key, width = key_width).cyan(),
                Span::raw(*what),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from("  ? or Esc closes".dark_gray()));

    let height = lines.len() as u16 + 2;
    let area = centered(frame.area(), 44, height);

    let panel = Paragraph::new(lines).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().cyan())
            .title(" Keys ".bold()),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(panel, area);
}

/// A `width` x `height` rectangle in the middle of `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
