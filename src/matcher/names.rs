//! Player name normalization and similarity.
//!
//! This module provides:
//! - Nickname resolution through an immutable, loadable alias table
//! - Full name construction from first/last name components
//! - Pluggable string similarity strategies (token sort ratio, exact match)

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::Deserialize;
use tokio::fs;

use super::record::PlayerRecord;
use crate::constants::DEFAULT_NICKNAMES;
use crate::error::AppError;

/// Built-in nickname table shared by every matcher that does not load its own.
pub static DEFAULT_NICKNAME_TABLE: LazyLock<Arc<NicknameTable>> =
    LazyLock::new(|| Arc::new(NicknameTable::with_defaults()));

/// Handle to the built-in nickname table; cloning only bumps a reference count.
pub fn default_aliases() -> Arc<NicknameTable> {
    Arc::clone(&DEFAULT_NICKNAME_TABLE)
}

/// Resolves a first name to the canonical first name it stands for.
pub trait AliasLookup: Send + Sync {
    /// Returns the canonical name, or the input unchanged when it is not an alias.
    fn canonical<'a>(&'a self, first_name: &'a str) -> &'a str;
}

/// Nickname to legal first name mapping.
///
/// Keys are matched exactly, including case and punctuation ("Dr. J").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NicknameTable {
    aliases: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct NicknameFile {
    #[serde(default)]
    nicknames: HashMap<String, String>,
}

impl NicknameTable {
    /// Creates the table of well-known NBA nicknames.
    pub fn with_defaults() -> Self {
        DEFAULT_NICKNAMES
            .iter()
            .map(|(nickname, canonical)| (nickname.to_string(), canonical.to_string()))
            .collect()
    }

    /// Parses a TOML `[nicknames]` table.
    ///
    /// # Errors
    /// * `AppError::TomlDeserialize` - The content is not valid TOML
    /// * `AppError::NicknameTable` - An entry has an empty nickname or canonical name
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, AppError> {
        let file: NicknameFile = toml::from_str(content)?;
        for (nickname, canonical) in &file.nicknames {
            if nickname.trim().is_empty() {
                return Err(AppError::nickname_table(origin, "empty nickname"));
            }
            if canonical.trim().is_empty() {
                return Err(AppError::nickname_table(
                    origin,
                    format!("empty canonical name for '{nickname}'"),
                ));
            }
        }
        Ok(Self {
            aliases: file.nicknames,
        })
    }

    /// Loads a nickname file from disk.
    pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let table = Self::from_toml_str(&content, &path.display().to_string())?;
        tracing::debug!(
            "Loaded {} nickname aliases from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Returns a new table with `other`'s entries layered over this one.
    pub fn merged_with(&self, other: &NicknameTable) -> Self {
        let mut aliases = self.aliases.clone();
        aliases.extend(
            other
                .aliases
                .iter()
                .map(|(nickname, canonical)| (nickname.clone(), canonical.clone())),
        );
        Self { aliases }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl FromIterator<(String, String)> for NicknameTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            aliases: iter.into_iter().collect(),
        }
    }
}

impl AliasLookup for NicknameTable {
    fn canonical<'a>(&'a self, first_name: &'a str) -> &'a str {
        self.aliases
            .get(first_name)
            .map(String::as_str)
            .unwrap_or(first_name)
    }
}

/// Similarity ratio of two names in `[0, 1]`.
pub trait NameSimilarity: Send + Sync {
    fn ratio(&self, a: &str, b: &str) -> f64;

    /// Short identifier used in logs and config listings.
    fn name(&self) -> &'static str;

    /// Whether this strategy is the coarse replacement for fuzzy matching.
    fn is_fallback(&self) -> bool {
        false
    }
}

/// Token-order-insensitive edit distance ratio.
///
/// Both names are split on whitespace, their tokens sorted and re-joined, and
/// the normalized Levenshtein similarity of the results is returned. Two empty
/// names compare as identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSortRatio;

impl NameSimilarity for TokenSortRatio {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        let a = sort_tokens(a);
        let b = sort_tokens(b);
        strsim::normalized_levenshtein(&a, &b).clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "token_sort"
    }
}

/// Case-insensitive equality: 1.0 on match, 0.0 otherwise.
///
/// Much coarser than [`TokenSortRatio`]; any typo or extra middle name is a
/// complete mismatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl NameSimilarity for ExactMatch {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        if a.to_lowercase() == b.to_lowercase() {
            1.0
        } else {
            0.0
        }
    }

    fn name(&self) -> &'static str {
        "exact"
    }

    fn is_fallback(&self) -> bool {
        true
    }
}

fn sort_tokens(name: &str) -> String {
    let mut tokens: Vec<&str> = name.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Builds a comparable full name: first and last name joined by a space, trimmed.
///
/// # Example
/// ```
/// use player_dedup::matcher::names::build_full_name;
///
/// assert_eq!(build_full_name("Earvin", "Johnson"), "Earvin Johnson");
/// assert_eq!(build_full_name("", "Johnson"), "Johnson");
/// assert_eq!(build_full_name("", ""), "");
/// ```
pub fn build_full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}

/// Full name of a record with its first name resolved through `aliases`.
pub fn normalized_full_name(record: &PlayerRecord, aliases: &dyn AliasLookup) -> String {
    build_full_name(aliases.canonical(&record.first_name), &record.last_name)
}

/// Name similarity sub-score of two records.
pub fn name_score(
    p1: &PlayerRecord,
    p2: &PlayerRecord,
    aliases: &dyn AliasLookup,
    similarity: &dyn NameSimilarity,
) -> f64 {
    let full1 = normalized_full_name(p1, aliases);
    let full2 = normalized_full_name(p2, aliases);
    similarity.ratio(&full1, &full2)
}
