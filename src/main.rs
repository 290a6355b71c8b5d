// Terminal preview of the portfolio's repository section.

use std::sync::Arc;

use showcase::app::App;
use showcase::cache::{FileStore, RepoCache, SystemClock, paths};
use showcase::config::Config;
use showcase::github::GitHubClient;
use showcase::{Result, ShowcaseError, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    let cache_dir = config
        .cache
        .dir
        .clone()
        .or_else(paths::cache_dir)
        .ok_or_else(|| ShowcaseError::Other("could not determine cache directory".to_string()))?;
    let _log_guard = logging::init(&paths::log_dir(&cache_dir))?;
    tracing::info!(account = %config.github.account, "starting showcase");

    let client = GitHubClient::from_config(&config.github)?;
    let store = Arc::new(FileStore::new(paths::store_dir(&cache_dir)));
    let cache = RepoCache::new(client, store, Arc::new(SystemClock))
        .with_ttl(config.cache.ttl())
        .with_per_page(config.github.per_page);

    let mut app = App::new(Arc::new(cache), config.github.account.clone());

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result.map_err(ShowcaseError::Io)
}
