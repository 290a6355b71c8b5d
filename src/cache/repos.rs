// Repository listing cache.
// Serves an account's repositories from storage while fresh, refetches when
// expired and falls back to the last stored listing when upstream fails.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::github::{GitHubClient, RawRepository, RepositorySummary};

use super::clock::Clock;
use super::store::{CacheEntry, DEFAULT_TTL, KeyValueStore, read_entry, write_entry};

/// Key prefix for repository listings in the store.
pub const CACHE_NAMESPACE: &str = "github-repos";

/// Most repositories shown for an account.
pub const MAX_REPOS: usize = 6;

const DEFAULT_PER_PAGE: u32 = 10;

/// Where the repositories in a `FetchOutcome` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Just fetched from upstream.
    Fresh,
    /// Served from a fresh cache entry, no request made.
    Cached,
    /// Upstream failed; this is the last stored listing, possibly expired.
    Stale,
    /// Upstream failed and nothing was ever stored.
    Empty,
}

/// Result of a fetch. Failures are reported through `error`, never as a panic
/// or `Err`, so the caller always has something to render.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub repos: Vec<RepositorySummary>,
    pub source: DataSource,
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    fn ok(repos: Vec<RepositorySummary>, source: DataSource) -> Self {
        Self {
            repos,
            source,
            error: None,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.source == DataSource::Stale
    }
}

/// Time-bounded cache of an account's repository listing.
pub struct RepoCache {
    client: GitHubClient,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    per_page: u32,
}

impl RepoCache {
    pub fn new(client: GitHubClient, store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            store,
            clock,
            ttl: DEFAULT_TTL,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// Storage key for an account: `github-repos-<identifier>`.
    pub fn cache_key(identifier: &str) -> String {
        format!("{}-{}", CACHE_NAMESPACE, identifier)
    }

    /// Return cached repositories while fresh, otherwise fetch them.
    pub async fn fetch(&self, identifier: &str) -> FetchOutcome {
        let key = Self::cache_key(identifier);
        let previous = self.read(&key);

        if let Some(entry) = &previous {
            if entry.is_fresh(self.clock.now()) {
                debug!(account = identifier, "repository cache hit");
                return FetchOutcome::ok(entry.data.clone(), DataSource::Cached);
            }
            debug!(account = identifier, fetched_at = %entry.fetched_at, "repository cache expired");
        }

        info!(account = identifier, "fetching repositories");
        match self.client.get_account_repos(identifier, self.per_page).await {
            Ok(raw) => {
                let repos = summarize(raw);
                let entry = CacheEntry::new(repos, self.clock.now(), self.ttl);
                if let Err(e) = write_entry(self.store.as_ref(), &key, &entry) {
                    warn!(account = identifier, error = %e, "failed to store repositories");
                }
                FetchOutcome::ok(entry.data, DataSource::Fresh)
            }
            Err(error) => {
                // Reuse the entry read above rather than going back to storage.
                let (repos, source) = match previous {
                    Some(entry) => (entry.data, DataSource::Stale),
                    None => (Vec::new(), DataSource::Empty),
                };
                warn!(
                    account = identifier,
                    error = %error,
                    fallback = repos.len(),
                    "repository fetch failed"
                );
                FetchOutcome {
                    repos,
                    source,
                    error: Some(error),
                }
            }
        }
    }

    /// Drop the stored entry and fetch again regardless of freshness.
    pub async fn refresh(&self, identifier: &str) -> FetchOutcome {
        let key = Self::cache_key(identifier);
        if let Err(e) = self.store.remove(&key) {
            warn!(account = identifier, error = %e, "failed to clear cached repositories");
        }
        self.fetch(identifier).await
    }

    /// Whether a fresh entry exists. Reads only.
    pub fn is_cached(&self, identifier: &str) -> bool {
        self.read(&Self::cache_key(identifier))
            .is_some_and(|entry| entry.is_fresh(self.clock.now()))
    }

    /// Read an entry; unreadable entries count as missing.
    fn read(&self, key: &str) -> Option<CacheEntry<Vec<RepositorySummary>>> {
        match read_entry(self.store.as_ref(), key) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable cache entry");
                None
            }
        }
    }
}

/// Drop forks, newest-updated first, keep at most `MAX_REPOS`.
pub fn summarize(raw: Vec<RawRepository>) -> Vec<RepositorySummary> {
    let mut repos: Vec<RawRepository> = raw.into_iter().filter(|repo| !repo.fork).collect();
    // Stable, so upstream order survives for equal timestamps.
    repos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    repos
        .into_iter()
        .take(MAX_REPOS)
        .map(RepositorySummary::from)
        .collect()
}
