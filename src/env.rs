//! Per-document environment: the abbreviation dictionary and cached matcher.

use std::collections::HashMap;

use crate::error::Result;
use crate::matcher::CompiledMatcher;
use crate::options::{AbbrOptions, MatcherPolicy};

/// Mapping from label to expansion title. The first definition of a label wins.
///
/// Empty labels are never stored, whether inserted directly, collected from
/// an iterator or deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "HashMap<String, String>", into = "HashMap<String, String>")
)]
pub struct AbbreviationDictionary {
    entries: HashMap<String, String>,
}

impl AbbreviationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `label -> title` unless the label is already defined.
    ///
    /// Returns `true` if the entry was inserted. Empty labels are refused.
    pub fn insert_first(&mut self, label: impl Into<String>, title: impl Into<String>) -> bool {
        let label = label.into();
        if label.is_empty() || self.entries.contains_key(&label) {
            return false;
        }
        self.entries.insert(label, title.into());
        true
    }

    /// Expansion title for `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All defined labels, in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All `(label, title)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for AbbreviationDictionary {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (label, title) in iter {
            dict.insert_first(label, title);
        }
        dict
    }
}

impl From<HashMap<String, String>> for AbbreviationDictionary {
    fn from(entries: HashMap<String, String>) -> Self {
        let total = entries.len();
        let dict: Self = entries.into_iter().collect();
        if dict.len() < total {
            log::debug!("dropped {} empty abbreviation labels", total - dict.len());
        }
        dict
    }
}

impl From<AbbreviationDictionary> for HashMap<String, String> {
    fn from(dict: AbbreviationDictionary) -> Self {
        dict.entries
    }
}

/// State shared by the scanner and the rewriter while processing one document.
///
/// Create one per document. Nothing in here is shared across documents, so
/// independent documents can be processed on independent threads.
#[derive(Debug, Clone, Default)]
pub struct DocumentEnv {
    pub options: AbbrOptions,
    pub abbreviations: AbbreviationDictionary,
    matcher: Option<CompiledMatcher>,
}

impl DocumentEnv {
    /// Create an environment with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment with the given options.
    pub fn with_options(options: AbbrOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Record a definition. The first definition of a label wins.
    pub fn define(&mut self, label: impl Into<String>, title: impl Into<String>) -> bool {
        self.abbreviations.insert_first(label, title)
    }

    /// The cached matcher, compiling it on first use.
    ///
    /// Under [`MatcherPolicy::BuildOnce`] a matcher, once built, is reused
    /// for the rest of the document even if more labels are defined later.
    /// Under [`MatcherPolicy::RebuildOnGrowth`] it is rebuilt whenever the
    /// dictionary's label set differs from the one it was compiled from,
    /// including when a host swaps in a different dictionary.
    ///
    /// Returns `Ok(None)` while the dictionary is empty.
    pub fn matcher(&mut self) -> Result<Option<&CompiledMatcher>> {
        self.refresh_matcher()?;
        Ok(self.matcher.as_ref())
    }

    /// The matcher together with the dictionary it resolves titles from.
    pub(crate) fn prepared(
        &mut self,
    ) -> Result<Option<(&CompiledMatcher, &AbbreviationDictionary)>> {
        self.refresh_matcher()?;
        Ok(self.matcher.as_ref().map(|m| (m, &self.abbreviations)))
    }

    fn refresh_matcher(&mut self) -> Result<()> {
        let stale = match &self.matcher {
            None => true,
            Some(m) => {
                self.options.matcher_policy == MatcherPolicy::RebuildOnGrowth
                    && !m.covers(&self.abbreviations)
            }
        };
        if stale {
            self.matcher =
                CompiledMatcher::build(&self.abbreviations, &self.options.boundary_chars)?;
        }
        Ok(())
    }

    /// Drop the cached matcher so the next rewrite recompiles it.
    pub fn invalidate_matcher(&mut self) {
        self.matcher = None;
    }
}
