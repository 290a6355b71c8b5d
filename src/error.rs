// Error types for showcase.
// Crate-level errors plus the recoverable fetch failures carried in fetch outcomes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShowcaseError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;

/// Why a repository fetch failed.
///
/// These never escape `RepoCache::fetch` as an `Err`; they ride along in the
/// outcome next to whatever data could still be served.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("GitHub API error: HTTP {status}")]
    Upstream { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed repository listing: {0}")]
    Parse(String),

    #[error("Not a valid account name: {0:?}")]
    InvalidAccount(String),
}

impl FetchError {
    /// Message shown next to the repository list.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Timeout { .. } => {
                "Request timed out. Using cached data if available.".to_string()
            }
            other => format!("Failed to fetch repositories: {}", other),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Upstream {
                status: status.as_u16(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// A declarative animation marker that can't be turned into a trigger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("Malformed {attribute} on element {element}: {reason}")]
    Malformed {
        element: String,
        attribute: &'static str,
        reason: String,
    },
}

/// Why a contact form can't be sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in your {0}")]
    MissingField(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,
}
