//! Language statistics aggregation.
//!
//! Folds per-repository language byte counts into a single profile keyed by
//! language name. The profile keeps first-seen insertion order; display
//! ranking is a separate view so aggregation itself never truncates.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::colors;

/// A single language's aggregated statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    /// Language name as reported by GitHub
    pub name: String,
    /// Canonical `#`-prefixed hex color
    pub color: String,
    /// Total byte count across all contributing repositories
    pub size: u64,
}

/// Ordered mapping from language name to its aggregated record.
///
/// Iteration order is first-seen order during aggregation.
pub type LanguageProfile = IndexMap<String, LanguageRecord>;

/// One language edge of a repository, as returned by the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageEdge {
    /// Byte count of this language within the repository
    pub size: u64,
    /// Language name
    pub name: String,
    /// Language color; GitHub reports `null` for a handful of languages
    pub color: Option<String>,
}

/// A repository's language breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,
    /// Language edges, largest first as the API returns them
    pub languages: Vec<LanguageEdge>,
}

/// Reduces repositories into a single language profile.
///
/// Sizes are summed per exact (case-sensitive) language name. The color is
/// overwritten on every contribution, so the last traversed edge wins when
/// upstream data disagrees with itself. Edges without a color fall back to
/// [`colors::DEFAULT_LANGUAGE_COLOR`].
pub fn aggregate(repositories: &[Repository]) -> LanguageProfile {
    let mut profile = LanguageProfile::new();

    for repository in repositories {
        for edge in &repository.languages {
            let record = profile
                .entry(edge.name.clone())
                .or_insert_with(|| LanguageRecord {
                    name: edge.name.clone(),
                    color: colors::DEFAULT_LANGUAGE_COLOR.to_string(),
                    size: 0,
                });
            record.size += edge.size;
            record.color = colors::normalize_hex(
                edge.color.as_deref().unwrap_or(colors::DEFAULT_LANGUAGE_COLOR),
            );
        }
    }

    profile
}

/// Returns the profile's records ordered by size, largest first.
///
/// The sort is stable, so equal sizes keep their first-seen order.
pub fn ranked(profile: &LanguageProfile) -> Vec<&LanguageRecord> {
    let mut records: Vec<&LanguageRecord> = profile.values().collect();
    records.sort_by(|a, b| b.size.cmp(&a.size));
    records
}

/// Total byte count across the whole profile.
pub fn total_size(profile: &LanguageProfile) -> u64 {
    profile.values().map(|record| record.size).sum()
}
