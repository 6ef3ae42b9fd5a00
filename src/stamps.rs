//! Stamp catalog types and the name lookup used by the renderer
//!
//! A stamp is a named image asset. Catalog sources (one per channel) are
//! supplied by an external service; the renderer only needs the flattened
//! name to URL map and a matcher that finds stamp names in literal text.

use std::collections::HashMap;
use std::ops::Range;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single stamp: logical name plus image URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampEntry {
    pub name: String,
    pub url: String,
}

impl StampEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A group of stamps from one origin (e.g. one channel's membership set)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampSource {
    /// Stable identifier used to drop duplicate sources
    #[serde(default)]
    pub source_id: String,
    /// Human-readable source name shown in the picker
    pub source_name: String,
    #[serde(default)]
    pub entries: Vec<StampEntry>,
}

/// Keep usable sources, dropping repeated ids (first occurrence wins)
///
/// A source needs an id and at least one stamp to be kept.
pub fn dedupe_sources(sources: Vec<StampSource>) -> Vec<StampSource> {
    let mut seen = std::collections::HashSet::new();
    sources
        .into_iter()
        .filter(|s| !s.source_id.is_empty() && !s.entries.is_empty())
        .filter(|s| seen.insert(s.source_id.clone()))
        .collect()
}

/// Flattened stamp name → URL map with a longest-name-first matcher
#[derive(Debug, Clone, Default)]
pub struct StampMap {
    urls: HashMap<String, String>,
    matcher: Option<Regex>,
}

impl StampMap {
    /// Create an empty map (no stamps are recognized)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from catalog sources.
    ///
    /// When two sources define the same name, the first one's URL is kept.
    pub fn from_sources(sources: &[StampSource]) -> Self {
        let mut urls = HashMap::new();
        for entry in sources.iter().flat_map(|s| &s.entries) {
            if entry.name.is_empty() {
                continue;
            }
            urls.entry(entry.name.clone())
                .or_insert_with(|| entry.url.clone());
        }
        Self::from_urls(urls)
    }

    /// Build a map from `(name, url)` pairs
    pub fn from_pairs<I, N, U>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, U)>,
        N: Into<String>,
        U: Into<String>,
    {
        let mut urls = HashMap::new();
        for (name, url) in pairs {
            let name = name.into();
            if !name.is_empty() {
                urls.entry(name).or_insert_with(|| url.into());
            }
        }
        Self::from_urls(urls)
    }

    fn from_urls(urls: HashMap<String, String>) -> Self {
        let mut names: Vec<&String> = urls.keys().collect();
        // Longest first so a name that contains another shadows it;
        // ties broken alphabetically to keep matching deterministic
        names.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        let matcher = if names.is_empty() {
            None
        } else {
            let pattern = names
                .iter()
                .map(|n| regex::escape(n))
                .collect::<Vec<_>>()
                .join("|");
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("Failed to build stamp matcher: {}", e);
                    None
                }
            }
        };

        Self { urls, matcher }
    }

    /// Look up the asset URL for a stamp name
    pub fn url(&self, name: &str) -> Option<&str> {
        self.urls.get(name).map(String::as_str)
    }

    /// Check whether a stamp name is known
    pub fn contains(&self, name: &str) -> bool {
        self.urls.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Find all non-overlapping stamp names in `text`, left to right.
    ///
    /// Returns byte ranges into `text`.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        match &self.matcher {
            Some(re) => re.find_iter(text).map(|m| m.range()).collect(),
            None => Vec::new(),
        }
    }
}
