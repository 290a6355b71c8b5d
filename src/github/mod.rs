// GitHub API module.
// Provides the client and types for reading public repository listings.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{DEFAULT_TIMEOUT, GITHUB_API_BASE, GitHubClient};
pub use types::*;
