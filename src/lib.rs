// showcase: the behavioral core of a portfolio site.
// Cached GitHub repository listing, project filtering, scroll animations, contact form,
// and a terminal preview of the repository section.

pub mod animation;
pub mod app;
pub mod cache;
pub mod config;
pub mod contact;
pub mod error;
pub mod github;
pub mod logging;
pub mod projects;
pub mod state;
pub mod timing;
pub mod ui;

pub use error::{FetchError, Result, ShowcaseError};
