// GitHub API endpoint functions.
// Typed wrappers over the public listing endpoints the site reads.

use crate::error::FetchError;

use super::client::GitHubClient;
use super::types::RawRepository;

/// An account name must be a single, non-relative path segment.
fn check_account(account: &str) -> Result<(), FetchError> {
    if account.is_empty() || account == "." || account == ".." {
        return Err(FetchError::InvalidAccount(account.to_string()));
    }
    Ok(())
}

impl GitHubClient {
    /// List an account's public repositories, most recently updated first.
    pub async fn get_account_repos(
        &self,
        account: &str,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, FetchError> {
        check_account(account)?;
        let per_page = per_page.to_string();
        let params = [("sort", "updated"), ("per_page", per_page.as_str())];
        self.get_json(&["users", account, "repos"], &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client() -> GitHubClient {
        GitHubClient::new("https://api.example.test/v3/", Duration::from_secs(1), None).unwrap()
    }

    #[test]
    fn test_account_is_one_segment() {
        let url = client().endpoint_url(&["users", "someone/../victim", "repos"]);
        assert_eq!(url.path(), "/v3/users/someone%2F..%2Fvictim/repos");

        let url = client().endpoint_url(&["users", "octocat", "repos"]);
        assert_eq!(url.as_str(), "https://api.example.test/v3/users/octocat/repos");
    }

    #[test]
    fn test_relative_accounts_rejected() {
        for account in ["", ".", ".."] {
            assert_eq!(
                check_account(account),
                Err(FetchError::InvalidAccount(account.to_string()))
            );
        }
        assert!(check_account("some-one").is_ok());
    }
}
