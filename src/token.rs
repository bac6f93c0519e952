//! Token types for the host's block and inline streams.

/// Kind of an inline token.
///
/// Only text runs and abbreviation markers carry meaning here. Everything
/// else the host produces (emphasis, links, code spans) is passed through
/// as [`TokenKind::Other`] and never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum TokenKind {
    /// Plain text run.
    Text,
    /// Start of an abbreviation span, carrying the expansion.
    AbbrOpen { title: String },
    /// End of an abbreviation span.
    AbbrClose,
    /// Any host token type this crate does not interpret.
    Other { name: String },
}

/// A token in an inline stream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Token kind.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: TokenKind,
    /// Text content (text runs and pass-through tokens).
    pub content: String,
    /// Nesting depth.
    pub level: u32,
}

impl Token {
    /// Create a text run.
    pub fn text(content: impl Into<String>, level: u32) -> Self {
        Self {
            kind: TokenKind::Text,
            content: content.into(),
            level,
        }
    }

    /// Create an abbreviation open marker.
    pub fn abbr_open(title: impl Into<String>, level: u32) -> Self {
        Self {
            kind: TokenKind::AbbrOpen {
                title: title.into(),
            },
            content: String::new(),
            level,
        }
    }

    /// Create an abbreviation close marker.
    pub fn abbr_close(level: u32) -> Self {
        Self {
            kind: TokenKind::AbbrClose,
            content: String::new(),
            level,
        }
    }

    /// Create a pass-through token of a host-defined type.
    pub fn other(name: impl Into<String>, content: impl Into<String>, level: u32) -> Self {
        Self {
            kind: TokenKind::Other { name: name.into() },
            content: content.into(),
            level,
        }
    }

    /// Check if this is a plain text run.
    pub fn is_text(&self) -> bool {
        self.kind == TokenKind::Text
    }

    /// Expansion title, for open markers.
    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::AbbrOpen { title } => Some(title.as_str()),
            _ => None,
        }
    }
}

/// Kind of a block-level token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BlockKind {
    /// Block holding inline content in `children`.
    Inline,
    /// Any other host block token (paragraph_open, heading_close, ...).
    Other { name: String },
}

/// A block-level token. Only `Inline` blocks have children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockToken {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: BlockKind,
    pub children: Vec<Token>,
}

impl BlockToken {
    /// Create an inline block from its children.
    pub fn inline(children: Vec<Token>) -> Self {
        Self {
            kind: BlockKind::Inline,
            children,
        }
    }

    /// Create a childless host block token.
    pub fn other(name: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Other { name: name.into() },
            children: Vec::new(),
        }
    }

    pub fn is_inline(&self) -> bool {
        self.kind == BlockKind::Inline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_only_on_open() {
        assert_eq!(Token::abbr_open("Hyper Text", 0).title(), Some("Hyper Text"));
        assert_eq!(Token::abbr_close(0).title(), None);
        assert_eq!(Token::text("HTML", 1).title(), None);
    }

    #[test]
    fn test_is_text() {
        assert!(Token::text("a", 0).is_text());
        assert!(!Token::other("code_inline", "a", 0).is_text());
    }

    #[test]
    fn test_block_kinds() {
        assert!(BlockToken::inline(vec![]).is_inline());
        assert!(!BlockToken::other("paragraph_open").is_inline());
    }
}
