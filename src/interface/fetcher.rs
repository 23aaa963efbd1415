use crate::{Repository, SearchError, UserProfile};

/// A trait for fetching a user profile and its repositories from the API.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileFetcher: Sync + Send {
    /// Fetches the profile of a user.
    async fn fetch_user(&self, username: &str) -> Result<UserProfile, SearchError>;

    /// Fetches the public repositories of a user, most starred first.
    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>, SearchError>;
}
