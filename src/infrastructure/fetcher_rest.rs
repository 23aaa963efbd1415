use std::fmt::Display;

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use reqwest::{
    Client, StatusCode, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Deserialize;

use crate::{FetchStage, ProfileFetcher, Repository, SearchError, StdResult, UserProfile};

/// The REST production endpoint for GitHub.
pub const GITHUB_REST_ENDPOINT: &str = "https://api.github.com";

/// The number of repositories requested in the single repositories page.
pub const REPOSITORIES_PER_PAGE: u16 = 100;

#[derive(Deserialize, Debug)]
struct UserPayload {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    avatar_url: String,
    #[serde(default)]
    public_repos: u32,
    #[serde(default)]
    followers: u32,
    #[serde(default)]
    following: u32,
    html_url: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<UserPayload> for UserProfile {
    fn from(payload: UserPayload) -> Self {
        Self {
            login: payload.login,
            name: payload.name,
            bio: payload.bio,
            avatar_url: payload.avatar_url,
            public_repos: payload.public_repos,
            followers: payload.followers,
            following: payload.following,
            html_url: payload.html_url,
            created_at: payload.created_at,
        }
    }
}

#[derive(Deserialize, Debug)]
struct RepositoryPayload {
    name: String,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u32,
    #[serde(default)]
    forks_count: u32,
    #[serde(default)]
    watchers_count: u32,
    html_url: String,
}

impl From<RepositoryPayload> for Repository {
    fn from(payload: RepositoryPayload) -> Self {
        Repository::new(
            &payload.name,
            payload.language.as_deref(),
            payload.stargazers_count,
        )
        .with_details(
            payload.description,
            payload.forks_count,
            payload.watchers_count,
            &payload.html_url,
        )
    }
}

/// Fetches user profiles and repositories from the GitHub REST API.
#[derive(Debug)]
pub struct RestFetcher {
    client: Client,
    api_base: Url,
}

impl RestFetcher {
    /// Creates a new `RestFetcher` instance querying the given API base URL.
    pub fn try_new(api_base: &str) -> StdResult<Self> {
        let api_base =
            Url::parse(api_base).with_context(|| format!("Invalid API base URL: {api_base}"))?;
        if api_base.cannot_be_a_base() {
            return Err(anyhow!("API base URL cannot be a base: {api_base}"));
        }
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("github-analytics"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self { client, api_base })
    }

    fn endpoint(&self, segments: &[&str]) -> StdResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base URL cannot be a base: {}", self.api_base))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

fn fetch_failed(stage: FetchStage, cause: impl Display) -> SearchError {
    error!("Failed to fetch {stage:?}: {cause}");
    SearchError::FetchFailed(stage)
}

#[async_trait::async_trait]
impl ProfileFetcher for RestFetcher {
    async fn fetch_user(&self, username: &str) -> Result<UserProfile, SearchError> {
        let stage = FetchStage::Profile;
        let url = self
            .endpoint(&["users", username])
            .map_err(|e| fetch_failed(stage, e))?;
        info!("Fetching profile: {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_failed(stage, e))?;
        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(SearchError::NotFound),
            StatusCode::FORBIDDEN => {
                warn!("GitHub API rate limit exceeded while fetching {username}");
                return Err(SearchError::RateLimited);
            }
            status => return Err(fetch_failed(stage, format!("status {status}"))),
        }

        let payload = response
            .json::<UserPayload>()
            .await
            .map_err(|e| fetch_failed(stage, e))?;

        Ok(payload.into())
    }

    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>, SearchError> {
        let stage = FetchStage::Repositories;
        let mut url = self
            .endpoint(&["users", username, "repos"])
            .map_err(|e| fetch_failed(stage, e))?;
        url.query_pairs_mut()
            .append_pair("sort", "stars")
            .append_pair("per_page", &REPOSITORIES_PER_PAGE.to_string());
        info!("Fetching repositories: {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_failed(stage, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(stage, format!("status {status}")));
        }

        let payloads = response
            .json::<Vec<RepositoryPayload>>()
            .await
            .map_err(|e| fetch_failed(stage, e))?;

        Ok(payloads.into_iter().map(Repository::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;

    fn setup_fetcher(server: &MockServer) -> RestFetcher {
        RestFetcher::try_new(&server.url("/")).unwrap()
    }

    fn mock_user_json_value() -> serde_json::Value {
        json!({
            "login": "octocat",
            "id": 583231,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/octocat",
            "name": "The Octocat",
            "bio": null,
            "public_repos": 8,
            "followers": 17000,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z"
        })
    }

    fn mock_repositories_json_value() -> serde_json::Value {
        json!([
            {
                "name": "Spoon-Knife",
                "description": "This repo is for demonstration purposes only.",
                "language": "HTML",
                "stargazers_count": 12000,
                "forks_count": 140000,
                "watchers_count": 12000,
                "html_url": "https://github.com/octocat/Spoon-Knife"
            },
            {
                "name": "linguist",
                "description": null,
                "language": null,
                "html_url": "https://github.com/octocat/linguist"
            }
        ])
    }

    #[test]
    fn try_new_rejects_invalid_api_base() {
        RestFetcher::try_new("not a url").expect_err("Expected an invalid URL error");
        RestFetcher::try_new("mailto:octocat@github.com")
            .expect_err("Expected a cannot-be-a-base error");
    }

    #[test]
    fn endpoint_encodes_username() {
        let fetcher = RestFetcher::try_new("https://api.example.com/v3/").unwrap();

        let url = fetcher.endpoint(&["users", "octo/cat"]).unwrap();

        assert_eq!("https://api.example.com/v3/users/octo%2Fcat", url.as_str());
    }

    #[tokio::test]
    async fn test_fetch_user() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/users/octocat");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(mock_user_json_value());
        });
        let fetcher = setup_fetcher(&server);

        let profile = fetcher.fetch_user("octocat").await.unwrap();

        mock.assert();
        assert_eq!(
            UserProfile {
                login: "octocat".to_string(),
                name: Some("The Octocat".to_string()),
                bio: None,
                avatar_url: "https://avatars.githubusercontent.com/u/583231?v=4".to_string(),
                public_repos: 8,
                followers: 17000,
                following: 9,
                html_url: "https://github.com/octocat".to_string(),
                created_at: Some(
                    DateTime::parse_from_rfc3339("2011-01-25T18:44:36Z")
                        .unwrap()
                        .with_timezone(&Utc)
                ),
            },
            profile
        );
    }

    #[tokio::test]
    async fn fetch_user_maps_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/users/ghost");
            then.status(404);
        });
        let fetcher = setup_fetcher(&server);

        let error = fetcher.fetch_user("ghost").await.unwrap_err();

        assert_eq!(SearchError::NotFound, error);
    }

    #[tokio::test]
    async fn fetch_user_maps_rate_limit() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/users/octocat");
            then.status(403);
        });
        let fetcher = setup_fetcher(&server);

        let error = fetcher.fetch_user("octocat").await.unwrap_err();

        assert_eq!(SearchError::RateLimited, error);
    }

    #[tokio::test]
    async fn fetch_user_maps_other_statuses_to_generic_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/users/octocat");
            then.status(502);
        });
        let fetcher = setup_fetcher(&server);

        let error = fetcher.fetch_user("octocat").await.unwrap_err();

        assert_eq!(SearchError::FetchFailed(FetchStage::Profile), error);
    }

    #[tokio::test]
    async fn fetch_user_rejects_payload_missing_required_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/users/octocat");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "login": "octocat" }));
        });
        let fetcher = setup_fetcher(&server);

        let error = fetcher.fetch_user("octocat").await.unwrap_err();

        assert_eq!(SearchError::FetchFailed(FetchStage::Profile), error);
    }

    #[tokio::test]
    async fn test_fetch_repositories() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/users/octocat/repos")
                .query_param("sort", "stars")
                .query_param("per_page", "100");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(mock_repositories_json_value());
        });
        let fetcher = setup_fetcher(&server);

        let repositories = fetcher.fetch_repositories("octocat").await.unwrap();

        mock.assert();
        assert_eq!(
            vec![
                Repository::new("Spoon-Knife", Some("HTML"), 12000).with_details(
                    Some("This repo is for demonstration purposes only.".to_string()),
                    140000,
                    12000,
                    "https://github.com/octocat/Spoon-Knife",
                ),
                Repository::new("linguist", None, 0).with_details(
                    None,
                    0,
                    0,
                    "https://github.com/octocat/linguist",
                ),
            ],
            repositories
        );
    }

    #[tokio::test]
    async fn fetch_repositories_maps_any_error_status_to_generic_failure() {
        for status in [403, 404, 500] {
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method("GET").path("/users/octocat/repos");
                then.status(status);
            });
            let fetcher = setup_fetcher(&server);

            let error = fetcher.fetch_repositories("octocat").await.unwrap_err();

            assert_eq!(SearchError::FetchFailed(FetchStage::Repositories), error);
        }
    }

    #[tokio::test]
    async fn fetch_repositories_rejects_payload_missing_required_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/users/octocat/repos");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([{ "name": "x" }]));
        });
        let fetcher = setup_fetcher(&server);

        let error = fetcher.fetch_repositories("octocat").await.unwrap_err();

        assert_eq!(SearchError::FetchFailed(FetchStage::Repositories), error);
    }

    #[tokio::test]
    async fn fetch_fails_when_server_is_unreachable() {
        let fetcher = RestFetcher::try_new("http://127.0.0.1:9").unwrap();

        let error = fetcher.fetch_user("octocat").await.unwrap_err();
        assert_eq!(SearchError::FetchFailed(FetchStage::Profile), error);

        let error = fetcher.fetch_repositories("octocat").await.unwrap_err();
        assert_eq!(SearchError::FetchFailed(FetchStage::Repositories), error);
    }
}
