use std::collections::HashMap;

use super::{LanguageCount, RankedRepository, Repository};

/// The maximum number of languages in the language distribution.
pub const MAX_LANGUAGES: usize = 8;

/// The maximum number of repositories in the stars ranking.
pub const MAX_RANKED_REPOSITORIES: usize = 10;

/// The maximum number of characters of a ranking label before truncation.
pub const MAX_LABEL_CHARS: usize = 15;

const ELLIPSIS: &str = "...";

/// Counts the repositories per language and keeps the most used ones.
///
/// Repositories without a language are ignored. Languages with the same count
/// keep the order in which they were first encountered.
pub fn aggregate_languages(repositories: &[Repository]) -> Vec<LanguageCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<LanguageCount> = Vec::new();
    for language in repositories.iter().filter_map(Repository::language) {
        match positions.get(language) {
            Some(&position) => counts[position].count += 1,
            None => {
                positions.insert(language, counts.len());
                counts.push(LanguageCount::new(language, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(MAX_LANGUAGES);

    counts
}

/// Ranks the starred repositories by descending number of stars.
pub fn rank_by_stars(repositories: &[Repository]) -> Vec<RankedRepository> {
    let mut starred = repositories
        .iter()
        .filter(|repository| repository.stars() > 0)
        .collect::<Vec<_>>();
    starred.sort_by(|a, b| b.stars().cmp(&a.stars()));

    starred
        .into_iter()
        .take(MAX_RANKED_REPOSITORIES)
        .map(|repository| RankedRepository {
            name: repository.name().to_string(),
            label: truncate_name(repository.name()),
            stars: repository.stars(),
        })
        .collect()
}

/// Shortens a name longer than [`MAX_LABEL_CHARS`] characters.
pub fn truncate_name(name: &str) -> String {
    match name.char_indices().nth(MAX_LABEL_CHARS) {
        Some((end, _)) => format!("{}{ELLIPSIS}", &name[..end]),
        None => name.to_string(),
    }
}

/// Sums the stars of all repositories.
pub fn total_stars(repositories: &[Repository]) -> u64 {
    repositories
        .iter()
        .map(|repository| u64::from(repository.stars()))
        .sum()
}
