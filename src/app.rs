// App state and main event loop.
// Loads repositories through the cache in background tasks and handles keys.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cache::{FetchOutcome, RepoCache};
use crate::github::RateLimit;
use crate::state::{LoadingState, RepoListState};
use crate::timing::{Debouncer, Throttle};
use crate::ui;

const ACCOUNT_DEBOUNCE: Duration = Duration::from_millis(400);
const REFRESH_LIMIT: Duration = Duration::from_secs(2);

/// A finished fetch, tagged with the account it was for.
type Loaded = (String, FetchOutcome);

/// Main application state.
pub struct App {
    /// Account whose repositories are shown.
    pub account: String,
    pub repos: RepoListState,
    /// Account being typed, while editing.
    pub input: Option<String>,
    pub show_help: bool,
    pub rate_limit: RateLimit,
    /// Whether the app should exit.
    pub should_quit: bool,
    cache: Arc<RepoCache>,
    account_debounce: Debouncer<String>,
    refresh_throttle: Throttle,
    results_tx: mpsc::UnboundedSender<Loaded>,
    results_rx: mpsc::UnboundedReceiver<Loaded>,
}

impl App {
    pub fn new(cache: Arc<RepoCache>, account: String) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            account,
            repos: RepoListState::new(),
            input: None,
            show_help: false,
            rate_limit: RateLimit::default(),
            should_quit: false,
            cache,
            account_debounce: Debouncer::new(ACCOUNT_DEBOUNCE),
            refresh_throttle: Throttle::new(REFRESH_LIMIT),
            results_tx,
            results_rx,
        }
    }

    /// Main event loop. Must run inside a tokio runtime.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.load(false);
        while !self.should_quit {
            self.drain_results();
            if let Some(account) = self.account_debounce.poll(Instant::now()) {
                self.switch_account(account);
            }
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Start a background fetch for the current account.
    fn load(&mut self, refresh: bool) {
        // A fresh entry answers without a request; skip the loading flash.
        if refresh || !self.cache.is_cached(&self.account) {
            self.repos.set(LoadingState::Loading);
        }

        let cache = Arc::clone(&self.cache);
        let tx = self.results_tx.clone();
        let account = self.account.clone();
        tokio::spawn(async move {
            let outcome = if refresh {
                cache.refresh(&account).await
            } else {
                cache.fetch(&account).await
            };
            // Receiver gone means the app is shutting down.
            let _ = tx.send((account, outcome));
        });
    }

    /// Apply finished fetches, ignoring any for an account no longer shown.
    fn drain_results(&mut self) {
        while let Ok((account, outcome)) = self.results_rx.try_recv() {
            if account != self.account {
                debug!(%account, "dropping result for previous account");
                continue;
            }
            self.rate_limit = self.cache.client().rate_limit();
            self.repos.set(LoadingState::from(outcome));
        }
    }

    fn switch_account(&mut self, account: String) {
        let account = account.trim().to_string();
        if account.is_empty() || account == self.account {
            return;
        }
        info!(%account, "switching account");
        self.account = account;
        self.load(false);
    }

    fn refresh(&mut self) {
        if self.refresh_throttle.allow(Instant::now()) {
            self.load(true);
        } else {
            debug!("refresh throttled");
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if self.input.is_some() {
                        self.handle_input_key(key.code);
                    } else {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Esc => self.show_help = false,
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('/') => self.input = Some(String::new()),
            KeyCode::Down | KeyCode::Char('j') => self.repos.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.repos.select_prev(),
            _ => {}
        }
    }

    /// Keys while typing an account name. Each edit is debounced; Enter
    /// switches immediately.
    fn handle_input_key(&mut self, code: KeyCode) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.input = None;
                self.account_debounce.cancel();
            }
            KeyCode::Enter => {
                let account = input.clone();
                self.input = None;
                self.account_debounce.cancel();
                self.switch_account(account);
            }
            KeyCode::Backspace => {
                input.pop();
                let value = input.clone();
                self.account_debounce.push(value, Instant::now());
            }
            KeyCode::Char(c) => {
                input.push(c);
                let value = input.clone();
                self.account_debounce.push(value, Instant::now());
            }
            _ => {}
        }
    }
}
