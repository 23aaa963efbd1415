use crate::{LanguageCount, RankedRepository, Repository, StdResult, UserProfile};

/// A trait for displaying the search results.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DashboardRenderer: Sync + Send {
    /// Shows the loading indicator.
    async fn show_loading(&self) -> StdResult<()>;

    /// Hides the loading indicator.
    async fn hide_loading(&self) -> StdResult<()>;

    /// Shows an error message.
    async fn show_error(&self, message: &str) -> StdResult<()>;

    /// Hides the error message.
    async fn hide_error(&self) -> StdResult<()>;

    /// Hides the previously displayed profile.
    async fn hide_profile(&self) -> StdResult<()>;

    /// Displays the profile statistics and the top repositories.
    async fn render_profile(
        &self,
        profile: &UserProfile,
        total_stars: u64,
        repositories: &[Repository],
    ) -> StdResult<()>;

    /// Draws the language distribution and the stars ranking charts.
    async fn render_charts(
        &self,
        languages: &[LanguageCount],
        ranking: &[RankedRepository],
    ) -> StdResult<()>;
}
