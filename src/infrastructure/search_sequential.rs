use std::sync::Arc;

use log::{info, warn};

use crate::{Dashboard, ProfileFetcher, ProfileSearch, SearchError};

/// A search that fetches the profile, then the repositories, without retrying.
pub struct SequentialSearch {
    fetcher: Arc<dyn ProfileFetcher>,
}

impl SequentialSearch {
    /// Creates a new `SequentialSearch` instance with the given fetcher.
    pub fn new(fetcher: Arc<dyn ProfileFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl ProfileSearch for SequentialSearch {
    async fn search(&self, username: &str) -> Result<Dashboard, SearchError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SearchError::EmptyUsername);
        }

        let profile = self.fetcher.fetch_user(username).await.inspect_err(|e| {
            warn!("Profile fetch failed for {username}: {e}");
        })?;
        info!("Fetched {profile}");
        let repositories = self
            .fetcher
            .fetch_repositories(username)
            .await
            .inspect_err(|e| {
                warn!("Repositories fetch failed for {username}: {e}");
            })?;
        info!(
            "Fetched {} repositories for {username}",
            repositories.len()
        );

        Ok(Dashboard::build(profile, repositories))
    }
}
