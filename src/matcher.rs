//! Compiled label matcher.
//!
//! All labels are folded into one pattern of the form
//! `(^|[B])(L1|L2|...)($|[B])`, where `B` is the boundary set. Alternatives
//! are ordered longest-first: the regex engine prefers the earliest
//! alternative at a given start, so `HTML5` wins over `HTML`.

use std::collections::HashSet;
use std::ops::Range;

use regex::Regex;

use crate::env::AbbreviationDictionary;
use crate::error::Result;

/// Capture group holding the label.
const LABEL_GROUP: usize = 2;

/// A pattern matching any label of a dictionary on word boundaries.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    regex: Regex,
    labels: HashSet<String>,
}

impl CompiledMatcher {
    /// Compile a matcher for every label in `dict`.
    ///
    /// Returns `Ok(None)` when the dictionary has no non-empty labels.
    pub fn build(dict: &AbbreviationDictionary, boundary_chars: &str) -> Result<Option<Self>> {
        let mut labels: Vec<&str> = dict.labels().filter(|l| !l.is_empty()).collect();
        if labels.is_empty() {
            return Ok(None);
        }

        labels.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternatives = labels
            .iter()
            .map(|label| regex::escape(label))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            "{}({}){}",
            boundary_group('^', boundary_chars),
            alternatives,
            boundary_group('$', boundary_chars),
        );

        let regex = Regex::new(&pattern)?;
        log::debug!("compiled abbreviation matcher for {} labels", labels.len());

        Ok(Some(Self {
            regex,
            labels: labels.into_iter().map(str::to_string).collect(),
        }))
    }

    /// Number of labels this matcher was built from.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Whether this matcher was built from exactly the labels of `dict`.
    pub fn covers(&self, dict: &AbbreviationDictionary) -> bool {
        dict.len() == self.labels.len() && dict.labels().all(|l| self.labels.contains(l))
    }

    /// Iterate over the byte ranges of matched labels in `text`.
    ///
    /// Matches never overlap. Boundary characters are not part of the
    /// yielded ranges; after each match the search resumes at the end of the
    /// label, so a trailing boundary can lead the next match.
    pub fn find_labels<'m, 't>(&'m self, text: &'t str) -> LabelMatches<'m, 't> {
        LabelMatches {
            regex: &self.regex,
            text,
            pos: 0,
        }
    }
}

/// Build `(^|[...])` or `($|[...])` for the boundary set.
fn boundary_group(anchor: char, boundary_chars: &str) -> String {
    if boundary_chars.is_empty() {
        return format!("({anchor})");
    }
    let class: String = boundary_chars
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    format!("({anchor}|[{class}])")
}

/// Iterator over label ranges, created by [`CompiledMatcher::find_labels`].
pub struct LabelMatches<'m, 't> {
    regex: &'m Regex,
    text: &'t str,
    pos: usize,
}

impl Iterator for LabelMatches<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos <= self.text.len() {
            let caps = self.regex.captures_at(self.text, self.pos)?;
            let label = caps.get(LABEL_GROUP)?.range();
            if !label.is_empty() {
                self.pos = label.end;
                return Some(label);
            }
            // Never yield an empty label; step over one character instead.
            self.pos = match self.text[label.end..].chars().next() {
                Some(c) => label.end + c.len_utf8(),
                None => self.text.len() + 1,
            };
        }
        None
    }
}
