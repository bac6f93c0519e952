//! Configuration for abbreviation processing.

/// Characters that may surround a matched label.
///
/// A label only matches when it sits at the start or end of a text run, or
/// is flanked by one of these characters.
pub const DEFAULT_BOUNDARY_CHARS: &str = " \n()[]'\".,!?-";

/// Element name used for rendered marker spans.
pub const DEFAULT_TAG: &str = "abbr";

/// When the cached matcher is rebuilt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatcherPolicy {
    /// Compile on the first rewrite and keep it for the rest of the document.
    /// Labels defined after that rewrite are not matched.
    #[default]
    BuildOnce,
    /// Recompile whenever the dictionary's labels differ from the ones the
    /// cached matcher was built from.
    RebuildOnGrowth,
}

/// Options controlling scanning, matching and rendering.
///
/// # Examples
///
/// ```
/// use abbrkit::{AbbrOptions, MatcherPolicy};
///
/// let options = AbbrOptions::new()
///     .with_tag("span")
///     .with_matcher_policy(MatcherPolicy::RebuildOnGrowth);
///
/// assert_eq!(options.tag, "span");
/// assert!(options.is_boundary(' '));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbbrOptions {
    /// Boundary characters accepted around a label.
    pub boundary_chars: String,
    /// Element name for rendered spans.
    pub tag: String,
    /// Matcher cache policy.
    pub matcher_policy: MatcherPolicy,
}

impl Default for AbbrOptions {
    fn default() -> Self {
        Self {
            boundary_chars: DEFAULT_BOUNDARY_CHARS.to_string(),
            tag: DEFAULT_TAG.to_string(),
            matcher_policy: MatcherPolicy::default(),
        }
    }
}

impl AbbrOptions {
    /// Create options with the default boundary set, tag and policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the boundary character set.
    pub fn with_boundary_chars(mut self, chars: impl Into<String>) -> Self {
        self.boundary_chars = chars.into();
        self
    }

    /// Set the rendered element name.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the matcher cache policy.
    pub fn with_matcher_policy(mut self, policy: MatcherPolicy) -> Self {
        self.matcher_policy = policy;
        self
    }

    /// Check whether `c` is a boundary character.
    pub fn is_boundary(&self, c: char) -> bool {
        self.boundary_chars.contains(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_boundaries() {
        let options = AbbrOptions::default();
        for c in [' ', '\n', '(', ')', '[', ']', '\'', '"', '.', ',', '!', '?', '-'] {
            assert!(options.is_boundary(c), "{c:?} should be a boundary");
        }
        assert!(!options.is_boundary('a'));
        assert!(!options.is_boundary(':'));
        assert!(!options.is_boundary('\t'));
    }

    #[test]
    fn test_builder() {
        let options = AbbrOptions::new()
            .with_boundary_chars(" ;")
            .with_tag("dfn")
            .with_matcher_policy(MatcherPolicy::RebuildOnGrowth);

        assert!(options.is_boundary(';'));
        assert!(!options.is_boundary('.'));
        assert_eq!(options.tag, "dfn");
        assert_eq!(options.matcher_policy, MatcherPolicy::RebuildOnGrowth);
    }
}
