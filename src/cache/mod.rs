// Cache module for durable client-side caching.
// Stores repository listings with a TTL so reloads don't hit the GitHub API.

pub mod clock;
pub mod paths;
pub mod repos;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use repos::{CACHE_NAMESPACE, DataSource, FetchOutcome, MAX_REPOS, RepoCache, summarize};
pub use store::{CacheEntry, DEFAULT_TTL, FileStore, KeyValueStore, MemoryStore};
