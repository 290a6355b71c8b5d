// State management module.
// Loading state and list selection for the repository view.

use ratatui::widgets::ListState;

use crate::cache::{DataSource, FetchOutcome};
use crate::github::RepositorySummary;

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Repositories ready to render, with how much to trust them.
#[derive(Debug, Clone)]
pub struct RepoListing {
    pub repos: Vec<RepositorySummary>,
    pub source: DataSource,
    /// Set when a refresh failed and older data is shown instead.
    pub warning: Option<String>,
}

impl RepoListing {
    pub fn is_stale(&self) -> bool {
        self.source == DataSource::Stale
    }
}

impl From<FetchOutcome> for LoadingState<RepoListing> {
    /// Data wins over errors: anything previously cached is shown, and only a
    /// failure with nothing to show becomes an error state.
    fn from(outcome: FetchOutcome) -> Self {
        match (outcome.source, outcome.error) {
            (DataSource::Empty, Some(error)) => LoadingState::Error(error.user_message()),
            (source, error) => LoadingState::Loaded(RepoListing {
                repos: outcome.repos,
                source,
                warning: error.map(|e| e.user_message()),
            }),
        }
    }
}

/// Repository list with keyboard selection.
#[derive(Debug, Default)]
pub struct RepoListState {
    pub data: LoadingState<RepoListing>,
    pub list_state: ListState,
}

impl RepoListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the data, keeping the selection in range.
    pub fn set(&mut self, data: LoadingState<RepoListing>) {
        let len = data.data().map_or(0, |listing| listing.repos.len());
        self.data = data;
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn selected(&self) -> Option<&RepositorySummary> {
        let listing = self.data.data()?;
        listing.repos.get(self.list_state.selected()?)
    }

    pub fn len(&self) -> usize {
        self.data.data().map_or(0, |listing| listing.repos.len())
    }

    /// Select the next item in the list.
    pub fn select_next(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= len - 1 => i, // Stay at end
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous item in the list.
    pub fn select_prev(&mut self) {
        if self.len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use chrono::Utc;

    fn summary(name: &str) -> RepositorySummary {
        RepositorySummary {
            name: name.to_string(),
            description: "d".to_string(),
            url: format!("https://github.com/octo/{}", name),
            star_count: 0,
            primary_language: None,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_empty_failure_is_error_state() {
        let outcome = FetchOutcome {
            repos: Vec::new(),
            source: DataSource::Empty,
            error: Some(FetchError::Upstream { status: 500 }),
        };

        let state: LoadingState<RepoListing> = outcome.into();
        assert!(matches!(state, LoadingState::Error(ref msg) if msg.contains("500")));
    }

    #[test]
    fn test_stale_failure_keeps_data() {
        let outcome = FetchOutcome {
            repos: vec![summary("a")],
            source: DataSource::Stale,
            error: Some(FetchError::Timeout { millis: 5000 }),
        };

        let state: LoadingState<RepoListing> = outcome.into();
        let listing = state.data().unwrap();
        assert!(listing.is_stale());
        assert!(listing.warning.is_some());
        assert_eq!(listing.repos.len(), 1);
    }

    #[test]
    fn test_selection_clamps_on_shrink() {
        let mut list = RepoListState::new();
        list.set(LoadingState::Loaded(RepoListing {
            repos: vec![summary("a"), summary("b"), summary("c")],
            source: DataSource::Fresh,
            warning: None,
        }));
        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.list_state.selected(), Some(2));

        list.set(LoadingState::Loaded(RepoListing {
            repos: vec![summary("a")],
            source: DataSource::Cached,
            warning: None,
        }));
        assert_eq!(list.selected().map(|r| r.name.as_str()), Some("a"));

        list.set(LoadingState::Loading);
        assert_eq!(list.list_state.selected(), None);
        list.select_prev();
        assert_eq!(list.list_state.selected(), None);
    }
}
