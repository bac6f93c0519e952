//! Core pass wrapping defined abbreviations in marker spans.
//!
//! Runs once over the whole token stream, after block and inline
//! tokenization. Each matched label in a text run becomes
//! `abbr_open(title)`, `text(label)`, `abbr_close`, with the unmatched text
//! around it kept as plain text runs.

use crate::env::{AbbreviationDictionary, DocumentEnv};
use crate::error::Result;
use crate::matcher::CompiledMatcher;
use crate::token::{BlockToken, Token};

/// Wrap every defined abbreviation in the inline children of `blocks`.
///
/// Returns the number of spans inserted. Does nothing if no abbreviations
/// are defined.
///
/// # Examples
///
/// ```
/// use abbrkit::{BlockToken, DocumentEnv, Token, replace_abbreviations};
///
/// let mut env = DocumentEnv::new();
/// env.define("HTML", "Hyper Text Markup Language");
///
/// let mut blocks = vec![BlockToken::inline(vec![Token::text("I like HTML.", 0)])];
/// let spans = replace_abbreviations(&mut env, &mut blocks).unwrap();
///
/// assert_eq!(spans, 1);
/// assert_eq!(blocks[0].children.len(), 5);
/// assert_eq!(blocks[0].children[1].title(), Some("Hyper Text Markup Language"));
/// ```
pub fn replace_abbreviations(env: &mut DocumentEnv, blocks: &mut [BlockToken]) -> Result<usize> {
    if env.abbreviations.is_empty() {
        return Ok(0);
    }
    let Some((matcher, dict)) = env.prepared()? else {
        return Ok(0);
    };

    let mut spans = 0;
    for block in blocks.iter_mut().filter(|b| b.is_inline()) {
        spans += rewrite_children(&mut block.children, matcher, dict);
    }

    log::debug!("inserted {spans} abbreviation spans");
    Ok(spans)
}

/// Rewrite one inline sequence in place. Returns the number of spans inserted.
fn rewrite_children(
    children: &mut Vec<Token>,
    matcher: &CompiledMatcher,
    dict: &AbbreviationDictionary,
) -> usize {
    let mut spans = 0;

    // Walk backwards so splicing never shifts an index still to be visited.
    for i in (0..children.len()).rev() {
        if !children[i].is_text() {
            continue;
        }
        let Some((nodes, count)) = split_text(&children[i], matcher, dict) else {
            continue;
        };
        spans += count;
        children.splice(i..=i, nodes);
    }

    spans
}

/// Split a text token around matched labels.
///
/// Returns the replacement tokens and the number of spans among them, or
/// `None` when nothing matched so the token is left as is.
fn split_text(
    token: &Token,
    matcher: &CompiledMatcher,
    dict: &AbbreviationDictionary,
) -> Option<(Vec<Token>, usize)> {
    let text = token.content.as_str();
    let level = token.level;
    let mut nodes = Vec::new();
    let mut pos = 0;
    let mut spans = 0;

    for label in matcher.find_labels(text) {
        let matched = &text[label.clone()];
        // The dictionary only grows, so every label the matcher knows has a title.
        let Some(title) = dict.get(matched) else {
            continue;
        };

        if label.start > pos {
            nodes.push(Token::text(&text[pos..label.start], level));
        }
        nodes.push(Token::abbr_open(title, level));
        nodes.push(Token::text(matched, level + 1));
        nodes.push(Token::abbr_close(level));
        pos = label.end;
        spans += 1;
    }

    if nodes.is_empty() {
        return None;
    }
    if pos < text.len() {
        nodes.push(Token::text(&text[pos..], level));
    }

    Some((nodes, spans))
}
