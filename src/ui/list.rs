// Repository list rendering.
// One card per repository, plus placeholder text while loading or on failure.

use chrono::{DateTime, Utc};
use ratatui::layout::Flex;
use ratatui::{prelude::*, widgets::*};

use crate::cache::DataSource;
use crate::github::RepositorySummary;
use crate::state::{LoadingState, RepoListState};

/// Coarse age of a push, e.g. "updated 3 weeks ago".
pub fn updated_ago(updated: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = now.signed_duration_since(*updated).num_days();
    let (n, unit) = match days {
        i64::MIN..=0 => return "updated today".to_string(),
        1 => return "updated yesterday".to_string(),
        2..=13 => (days, "day"),
        14..=59 => (days / 7, "week"),
        60..=729 => (days / 30, "month"),
        _ => (days / 365, "year"),
    };
    format!("updated {} {}{} ago", n, unit, if n == 1 { "" } else { "s" })
}

fn title(source: Option<DataSource>) -> Line<'static> {
    match source {
        Some(DataSource::Cached) => Line::from(vec![" Repositories ".into(), "cached ".dark_gray()]),
        Some(DataSource::Stale) => {
            Line::from(vec![" Repositories ".into(), "may be outdated ".yellow()])
        }
        _ => Line::from(" Repositories "),
    }
}

/// Centered single-line placeholder inside the list frame.
fn render_notice(frame: &mut Frame, area: Rect, block: Block, text: String, style: Style) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [middle] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(inner);
    frame.render_widget(Paragraph::new(text).style(style).centered(), middle);
}

fn repo_item(repo: &RepositorySummary, now: DateTime<Utc>) -> ListItem<'static> {
    let mut meta = vec![format!("★ {}", repo.star_count).yellow()];
    if let Some(language) = &repo.primary_language {
        meta.push("  ".into());
        meta.push(language.clone().cyan());
    }
    meta.push("  ".into());
    meta.push(updated_ago(&repo.last_updated, now).dark_gray());

    ListItem::new(vec![
        Line::from(repo.name.clone().bold()),
        Line::from(repo.description.clone().gray()),
        Line::from(meta),
        Line::default(),
    ])
}

/// Render the repository list for the current loading state.
pub fn render_repositories_list(frame: &mut Frame, list: &mut RepoListState, area: Rect) {
    let listing = match &list.data {
        LoadingState::Idle => {
            let block = Block::bordered().title(title(None));
            return render_notice(frame, area, block, "press r to load".into(), Style::new().dark_gray());
        }
        LoadingState::Loading => {
            let block = Block::bordered().title(title(None));
            return render_notice(frame, area, block, "loading repositories…".into(), Style::new().yellow());
        }
        LoadingState::Error(message) => {
            let block = Block::bordered().title(title(None)).border_style(Style::new().red());
            return render_notice(frame, area, block, message.clone(), Style::new().red());
        }
        LoadingState::Loaded(listing) => listing,
    };

    let mut block = Block::bordered().title(title(Some(listing.source)));
    if listing.is_stale() {
        block = block.border_style(Style::new().yellow());
    }

    if listing.repos.is_empty() {
        return render_notice(frame, area, block, "no public repositories".into(), Style::new().dark_gray());
    }

    let now = Utc::now();
    let items: Vec<ListItem> = listing.repos.iter().map(|repo| repo_item(repo, now)).collect();
    let widget = List::new(items)
        .block(block)
        .highlight_symbol("▌ ")
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_style(Style::new().reversed());

    frame.render_stateful_widget(widget, area, &mut list.list_state);
}
