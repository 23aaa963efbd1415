use crate::{Dashboard, SearchError};

/// A trait for searching a user and shaping the result into a dashboard.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileSearch: Sync + Send {
    /// Searches a user by username.
    async fn search(&self, username: &str) -> Result<Dashboard, SearchError>;
}
