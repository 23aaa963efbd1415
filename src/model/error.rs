use std::fmt::Display;

use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// The network call a fetch failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    /// The user profile call.
    Profile,
    /// The repository list call.
    Repositories,
}

impl FetchStage {
    fn failure_message(&self) -> &'static str {
        match self {
            FetchStage::Profile => "Failed to fetch user data. Please try again.",
            FetchStage::Repositories => "Failed to fetch repositories data",
        }
    }
}

impl Display for FetchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.failure_message())
    }
}

/// Search error, displayed verbatim to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Blank username
    #[error("Please enter a GitHub username")]
    EmptyUsername,
    /// The API answered 404 on the profile call
    #[error("User not found. Please check the username and try again.")]
    NotFound,
    /// The API answered 403 on the profile call
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,
    /// Any other failure
    #[error("{0}")]
    FetchFailed(FetchStage),
}

/// Color error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    /// The color is not made of exactly 6 hex digits
    #[error("Invalid hex color: {0:?}")]
    Invalid(String),
}
