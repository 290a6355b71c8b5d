// GitHub API response types.
// Raw repository listing entries and the trimmed summaries the site displays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown when a repository has no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Repository entry as returned by `GET /users/{account}/repos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRepository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub fork: bool,
}

/// Repository as rendered on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: String,
    pub url: String,
    pub star_count: u64,
    pub primary_language: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl From<RawRepository> for RepositorySummary {
    fn from(raw: RawRepository) -> Self {
        let description = raw
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Self {
            name: raw.name,
            description,
            url: raw.html_url,
            star_count: raw.stargazers_count,
            primary_language: raw.language,
            last_updated: raw.updated_at,
        }
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
