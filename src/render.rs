//! HTML rendering for abbreviation markers.
//!
//! The open marker renders as `<abbr title="...">` and the close marker as
//! `</abbr>`. The title is entity-decoded first, then escaped for use inside a
//! double-quoted attribute, so `&amp;` in a definition shows up as `&` to the
//! reader and is not double-escaped.

use std::borrow::Cow;

use memchr::memchr;
use quick_xml::escape::{escape, resolve_html5_entity, resolve_predefined_entity};

use crate::options::AbbrOptions;
use crate::token::{Token, TokenKind};

/// Render an open marker. Returns an empty string for any other token.
///
/// # Examples
///
/// ```
/// use abbrkit::{AbbrOptions, Token, render_abbr_open};
///
/// let token = Token::abbr_open("Tom &amp; Jerry \"Show\"", 0);
/// assert_eq!(
///     render_abbr_open(&token, &AbbrOptions::default()),
///     r#"<abbr title="Tom &amp; Jerry &quot;Show&quot;">"#
/// );
/// ```
pub fn render_abbr_open(token: &Token, options: &AbbrOptions) -> String {
    let Some(title) = token.title() else {
        return String::new();
    };
    format!(
        "<{} title=\"{}\">",
        options.tag,
        escape(decode_entities(title).as_ref())
    )
}

/// Render a close marker.
pub fn render_abbr_close(options: &AbbrOptions) -> String {
    format!("</{}>", options.tag)
}

/// Render an inline sequence: text is escaped, markers become tags.
///
/// Tokens of other kinds are rendered from their content, escaped like text,
/// so their own markup is lost: a `code_inline` token comes out as bare text
/// without `<code>`. Hosts with their own renderer only need the two marker
/// functions above.
pub fn render_inline(tokens: &[Token], options: &AbbrOptions) -> String {
    let mut out = String::new();
    for token in tokens {
        match &token.kind {
            TokenKind::AbbrOpen { .. } => out.push_str(&render_abbr_open(token, options)),
            TokenKind::AbbrClose => out.push_str(&render_abbr_close(options)),
            TokenKind::Text | TokenKind::Other { .. } => {
                out.push_str(&escape(token.content.as_str()))
            }
        }
    }
    out
}

/// Longest entity name considered, excluding `&` and `;`.
const MAX_REFERENCE_LEN: usize = 32;

/// Decode character references in `title`.
///
/// Each `&name;` reference is resolved on its own: numeric references and
/// named XML/HTML5 entities are replaced, while a malformed or unknown
/// reference is kept as literal text.
fn decode_entities(title: &str) -> Cow<'_, str> {
    let bytes = title.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(title);
    };

    let mut out = String::with_capacity(title.len());
    out.push_str(&title[..first]);
    let mut pos = first;

    while pos < title.len() {
        let Some(offset) = memchr(b'&', &bytes[pos..]) else {
            out.push_str(&title[pos..]);
            break;
        };
        let amp = pos + offset;
        out.push_str(&title[pos..amp]);

        match reference_at(title, amp) {
            Some((decoded, end)) => {
                out.push_str(&decoded);
                pos = end;
            }
            None => {
                out.push('&');
                pos = amp + 1;
            }
        }
    }

    Cow::Owned(out)
}

/// Resolve the reference starting at the `&` at `amp`.
///
/// Returns the replacement text and the offset just past the `;`.
fn reference_at(title: &str, amp: usize) -> Option<(Cow<'static, str>, usize)> {
    let rest = &title.as_bytes()[amp + 1..];
    let window = &rest[..rest.len().min(MAX_REFERENCE_LEN + 1)];
    let semi = memchr(b';', window)?;
    let name = &title[amp + 1..amp + 1 + semi];

    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'#') {
        return None;
    }

    let decoded = match name.strip_prefix('#') {
        Some(number) => Cow::Owned(parse_char_ref(number)?.to_string()),
        None => Cow::Borrowed(
            resolve_predefined_entity(name).or_else(|| resolve_html5_entity(name))?,
        ),
    };
    Some((decoded, amp + semi + 2))
}

/// Parse the digits of `&#...;` / `&#x...;` into a character.
fn parse_char_ref(number: &str) -> Option<char> {
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) if !hex.is_empty() => u32::from_str_radix(hex, 16).ok()?,
        Some(_) => return None,
        None if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) => {
            number.parse().ok()?
        }
        None => return None,
    };
    if code == 0 {
        return None;
    }
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(title: &str) -> String {
        render_abbr_open(&Token::abbr_open(title, 0), &AbbrOptions::default())
    }

    #[test]
    fn test_open_and_close() {
        assert_eq!(
            open("Hyper Text Markup Language"),
            r#"<abbr title="Hyper Text Markup Language">"#
        );
        assert_eq!(render_abbr_close(&AbbrOptions::default()), "</abbr>");
    }

    #[test]
    fn test_title_is_escaped() {
        assert_eq!(open("a < b & \"c\""), r#"<abbr title="a &lt; b &amp; &quot;c&quot;">"#);
    }

    #[test]
    fn test_entities_decoded_before_escaping() {
        assert_eq!(open("&lt;tag&gt;"), r#"<abbr title="&lt;tag&gt;">"#);
        assert_eq!(open("caf&#233;"), r#"<abbr title="café">"#);
        assert_eq!(open("a&nbsp;b"), "<abbr title=\"a\u{a0}b\">");
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(open("R&D"), r#"<abbr title="R&amp;D">"#);
        assert_eq!(open("&bogus;"), r#"<abbr title="&amp;bogus;">"#);
    }

    #[test]
    fn test_multiple_entities() {
        assert_eq!(
            open("&lt;b&gt; &amp; &#x41;&#66;"),
            r#"<abbr title="&lt;b&gt; &amp; AB">"#
        );
    }

    #[test]
    fn test_mixed_valid_and_malformed_references() {
        assert_eq!(open("AT&T &amp; Co"), r#"<abbr title="AT&amp;T &amp; Co">"#);
        assert_eq!(
            open("&bogus; &copy; &#xZZ; &#0; &amp"),
            "<abbr title=\"&amp;bogus; \u{a9} &amp;#xZZ; &amp;#0; &amp;amp\">"
        );
    }

    #[test]
    fn test_decode_leaves_plain_titles_borrowed() {
        assert!(matches!(decode_entities("no references"), Cow::Borrowed(_)));
        assert_eq!(decode_entities("&&amp;"), "&&");
    }

    #[test]
    fn test_custom_tag() {
        let options = AbbrOptions::new().with_tag("span");
        let token = Token::abbr_open("x", 0);
        assert_eq!(render_abbr_open(&token, &options), r#"<span title="x">"#);
        assert_eq!(render_abbr_close(&options), "</span>");
    }

    #[test]
    fn test_non_marker_renders_nothing() {
        assert_eq!(render_abbr_open(&Token::text("HTML", 0), &AbbrOptions::default()), "");
    }

    #[test]
    fn test_render_inline() {
        let tokens = vec![
            Token::text("I <3 ", 0),
            Token::abbr_open("Hyper Text Markup Language", 0),
            Token::text("HTML", 1),
            Token::abbr_close(0),
            Token::text(".", 0),
        ];
        assert_eq!(
            render_inline(&tokens, &AbbrOptions::default()),
            r#"I &lt;3 <abbr title="Hyper Text Markup Language">HTML</abbr>."#
        );
    }

    #[test]
    fn test_render_inline_other_tokens_as_text() {
        let tokens = vec![
            Token::other("code_inline", "a<b", 0),
            Token::text(" HTML", 0),
        ];
        assert_eq!(render_inline(&tokens, &AbbrOptions::default()), "a&lt;b HTML");
    }
}
