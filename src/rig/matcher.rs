//! Candidate matching strategies for pattern-based bone lookup.
//!
//! [`BoneRegistry::find_by_patterns`](super::BoneRegistry::find_by_patterns)
//! walks its entries in insertion order and asks a [`BoneMatcher`] whether
//! an entry satisfies the caller's candidates. Replacing the matcher changes
//! how names are compared without touching the registry walk, the controller
//! or the skeleton map.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Decides whether a registry entry satisfies a set of candidates.
///
/// `key` is the registry key (lower-cased name or identifier string), `name`
/// is the joint's lower-cased display name, and `candidates` are already
/// trimmed, lower-cased and non-empty.
pub trait BoneMatcher: std::fmt::Debug {
    fn matches(&self, key: &str, name: &str, candidates: &[String]) -> bool;
}

/// Case-insensitive substring matching on key or display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl BoneMatcher for SubstringMatcher {
    #[inline]
    fn matches(&self, key: &str, name: &str, candidates: &[String]) -> bool {
        candidates
            .iter()
            .any(|c| key.contains(c.as_str()) || name.contains(c.as_str()))
    }
}

/// Synonym table for [`SynonymMatcher`].
///
/// Maps a canonical fragment to the alternative spellings used by asset
/// sources the default substring rules do not cover. Loadable from JSON:
///
/// ```json
/// { "synonyms": { "jaw": ["mandible", "chin_ctrl"], "spine": ["torso"] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub synonyms: FxHashMap<String, Vec<String>>,
}

impl MatcherConfig {
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds `alias` as a synonym of `canonical`.
    #[must_use]
    pub fn with_synonym(mut self, canonical: &str, alias: &str) -> Self {
        self.synonyms
            .entry(canonical.to_lowercase())
            .or_default()
            .push(alias.to_lowercase());
        self
    }
}

/// Substring matching over candidates expanded through a synonym table.
#[derive(Debug, Clone, Default)]
pub struct SynonymMatcher {
    synonyms: FxHashMap<String, SmallVec<[String; 4]>>,
}

impl SynonymMatcher {
    #[must_use]
    pub fn new(config: &MatcherConfig) -> Self {
        let synonyms = config
            .synonyms
            .iter()
            .map(|(canonical, aliases)| {
                let aliases = aliases
                    .iter()
                    .map(|a| a.trim().to_lowercase())
                    .filter(|a| !a.is_empty())
                    .collect();
                (canonical.trim().to_lowercase(), aliases)
            })
            .collect();
        Self { synonyms }
    }

    fn expand<'a>(&'a self, candidates: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        candidates.iter().flat_map(move |c| {
            std::iter::once(c.as_str()).chain(
                self.synonyms
                    .get(c)
                    .into_iter()
                    .flat_map(|aliases| aliases.iter().map(String::as_str)),
            )
        })
    }
}

impl BoneMatcher for SynonymMatcher {
    fn matches(&self, key: &str, name: &str, candidates: &[String]) -> bool {
        self.expand(candidates)
            .any(|c| key.contains(c) || name.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_checks_key_and_name() {
        let m = SubstringMatcher;
        let cands = vec!["head".to_string()];
        assert!(m.matches("mixamorighead", "", &cands));
        assert!(m.matches("1234", "head_jnt", &cands));
        assert!(!m.matches("neck", "neck", &cands));
    }

    #[test]
    fn synonyms_expand_candidates() {
        let config = MatcherConfig::default().with_synonym("Jaw", "Mandible");
        let m = SynonymMatcher::new(&config);
        let cands = vec!["jaw".to_string()];
        assert!(m.matches("c_mandible_01", "c_mandible_01", &cands));
        assert!(!m.matches("c_tongue", "c_tongue", &cands));
    }
}
