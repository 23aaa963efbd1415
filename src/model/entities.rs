use std::fmt::Display;

use chrono::{DateTime, Utc};

use super::{aggregate_languages, rank_by_stars, total_stars};

/// The number of repositories listed on a dashboard.
pub const TOP_REPOSITORIES_DISPLAYED: usize = 12;

/// A GitHub user profile, as returned by the profile call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// The login of the user.
    pub login: String,

    /// The display name, if the user set one.
    pub name: Option<String>,

    /// The biography, if the user set one.
    pub bio: Option<String>,

    /// The avatar image URL.
    pub avatar_url: String,

    /// The number of public repositories.
    pub public_repos: u32,

    /// The number of followers.
    pub followers: u32,

    /// The number of followed users.
    pub following: u32,

    /// The profile page URL.
    pub html_url: String,

    /// The account creation date.
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Creates a new `UserProfile` with the given login, empty statistics and no avatar.
    pub fn new(login: &str) -> Self {
        Self {
            login: login.to_string(),
            name: None,
            bio: None,
            avatar_url: String::new(),
            public_repos: 0,
            followers: 0,
            following: 0,
            html_url: format!("https://github.com/{login}"),
            created_at: None,
        }
    }

    /// Retrieves the name to display, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.login)
    }

    /// Retrieves the biography to display.
    pub fn display_bio(&self) -> &str {
        self.bio
            .as_deref()
            .filter(|bio| !bio.is_empty())
            .unwrap_or("No bio available")
    }
}

impl Display for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User: {}, Repositories: {}, Followers: {}, Following: {}",
            self.login, self.public_repos, self.followers, self.following
        )
    }
}

/// Metadata of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    name: String,
    description: Option<String>,
    language: Option<String>,
    stars: u32,
    forks: u32,
    watchers: u32,
    html_url: String,
}

impl Repository {
    /// Creates a new `Repository` instance with no description, forks or watchers.
    pub fn new(name: &str, language: Option<&str>, stars: u32) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            language: language.map(str::to_string),
            stars,
            forks: 0,
            watchers: 0,
            html_url: String::new(),
        }
    }

    /// Sets the remaining metadata of the repository.
    pub fn with_details(
        mut self,
        description: Option<String>,
        forks: u32,
        watchers: u32,
        html_url: &str,
    ) -> Self {
        self.description = description;
        self.forks = forks;
        self.watchers = watchers;
        self.html_url = html_url.to_string();
        self
    }

    /// Retrieves the repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retrieves the description to display.
    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|description| !description.is_empty())
            .unwrap_or("No description available")
    }

    /// Retrieves the main language of the repository.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Retrieves the number of stars.
    pub fn stars(&self) -> u32 {
        self.stars
    }

    /// Retrieves the number of forks.
    pub fn forks(&self) -> u32 {
        self.forks
    }

    /// Retrieves the number of watchers.
    pub fn watchers(&self) -> u32 {
        self.watchers
    }

    /// Retrieves the repository page URL.
    pub fn html_url(&self) -> &str {
        &self.html_url
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Repository: {}, Language: {}, Stars: {}",
            self.name,
            self.language.as_deref().unwrap_or("-"),
            self.stars
        )
    }
}

/// The number of repositories written in a language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCount {
    /// The language name.
    pub language: String,

    /// The number of repositories.
    pub count: u32,
}

impl LanguageCount {
    /// Creates a new `LanguageCount`.
    pub fn new(language: &str, count: u32) -> Self {
        Self {
            language: language.to_string(),
            count,
        }
    }
}

/// A repository entry of the stars ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRepository {
    /// The full repository name.
    pub name: String,

    /// The name shortened for chart labels.
    pub label: String,

    /// The number of stars.
    pub stars: u32,
}

/// Everything displayed for one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// The searched user.
    pub profile: UserProfile,

    /// The sum of the stars of all fetched repositories.
    pub total_stars: u64,

    /// The first repositories of the list, in API order.
    pub top_repositories: Vec<Repository>,

    /// The most used languages.
    pub languages: Vec<LanguageCount>,

    /// The most starred repositories.
    pub star_ranking: Vec<RankedRepository>,
}

impl Dashboard {
    /// Shapes the fetched data into a `Dashboard`.
    pub fn build(profile: UserProfile, repositories: Vec<Repository>) -> Self {
        let total_stars = total_stars(&repositories);
        let languages = aggregate_languages(&repositories);
        let star_ranking = rank_by_stars(&repositories);
        let mut top_repositories = repositories;
        top_repositories.truncate(TOP_REPOSITORIES_DISPLAYED);

        Self {
            profile,
            total_stars,
            top_repositories,
            languages,
            star_ranking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_login() {
        let mut profile = UserProfile::new("octocat");
        assert_eq!("octocat", profile.display_name());

        profile.name = Some("The Octocat".to_string());
        assert_eq!("The Octocat", profile.display_name());
    }

    #[test]
    fn new_profile_has_no_avatar() {
        let profile = UserProfile::new("octocat");

        assert_eq!("", profile.avatar_url);
        assert_eq!("https://github.com/octocat", profile.html_url);
    }

    #[test]
    fn display_bio_falls_back_to_placeholder() {
        let mut profile = UserProfile::new("octocat");
        assert_eq!("No bio available", profile.display_bio());

        profile.bio = Some(String::new());
        assert_eq!("No bio available", profile.display_bio());
    }

    #[test]
    fn display_description_falls_back_to_placeholder() {
        let repository = Repository::new("hello-world", None, 1);

        assert_eq!("No description available", repository.display_description());
    }

    #[test]
    fn build_dashboard_from_three_repositories() {
        let repositories = vec![
            Repository::new("repository-1", Some("A"), 5),
            Repository::new("repository-2", Some("B"), 0),
            Repository::new("repository-3", Some("A"), 10),
        ];

        let dashboard = Dashboard::build(UserProfile::new("octocat"), repositories.clone());

        assert_eq!(15, dashboard.total_stars);
        assert_eq!(repositories, dashboard.top_repositories);
        assert_eq!(
            vec![LanguageCount::new("A", 2), LanguageCount::new("B", 1)],
            dashboard.languages
        );
        assert_eq!(
            vec![10, 5],
            dashboard
                .star_ranking
                .iter()
                .map(|entry| entry.stars)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn build_dashboard_keeps_first_twelve_repositories() {
        let repositories = (0..20)
            .map(|i| Repository::new(&format!("repository-{i}"), None, i))
            .collect::<Vec<_>>();

        let dashboard = Dashboard::build(UserProfile::new("octocat"), repositories);

        assert_eq!(TOP_REPOSITORIES_DISPLAYED, dashboard.top_repositories.len());
        assert_eq!("repository-0", dashboard.top_repositories[0].name());
        assert_eq!((0..20).sum::<u64>(), dashboard.total_stars);
    }
}
