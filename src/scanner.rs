//! Block rule recognizing abbreviation definitions.
//!
//! A definition occupies one line:
//!
//! ```text
//! *[HTML]: Hyper Text Markup Language
//! ```
//!
//! Inside the label, a backslash escapes the next character, so `*[A\]B]: T`
//! defines `A]B`. An unescaped `[` inside the label rejects the line.

use crate::env::DocumentEnv;
use crate::source::BlockState;

const MARKER: u8 = b'*';
const LABEL_OPEN: u8 = b'[';
const LABEL_CLOSE: u8 = b']';
const TITLE_SEP: u8 = b':';
const ESCAPE: u8 = b'\\';

/// A definition parsed from one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionDirective<'a> {
    /// Label with backslash escapes removed.
    pub label: String,
    /// Raw title text after the `:`, before trimming.
    pub title: &'a str,
}

/// Try to recognize a definition at `start_line`.
///
/// In `silent` mode only the syntax up to the `:` is checked and nothing is
/// recorded. Otherwise a valid definition is added to `env` (unless the label
/// is already defined), the cursor moves past the line, and `true` is
/// returned. A line that is not a definition returns `false` and is left for
/// the host's other block rules.
pub fn parse_definition(
    state: &mut BlockState<'_>,
    env: &mut DocumentEnv,
    start_line: usize,
    silent: bool,
) -> bool {
    let Some(directive) = state.line_content(start_line).and_then(parse_directive) else {
        return false;
    };

    if silent {
        return true;
    }

    let title = directive.title.trim();
    if title.is_empty() || directive.label.is_empty() {
        log::trace!("line {start_line}: definition without label or title");
        return false;
    }

    if env.define(directive.label.as_str(), title) {
        log::debug!("defined abbreviation {:?}", directive.label);
    } else {
        log::debug!("ignoring duplicate abbreviation {:?}", directive.label);
    }

    state.line = start_line + 1;
    true
}

/// Run [`parse_definition`] over every line of the state, starting at its cursor.
///
/// Lines that are not definitions are skipped. Returns the indices of the
/// lines that were not consumed, in order, for the host to handle.
pub fn collect_definitions(state: &mut BlockState<'_>, env: &mut DocumentEnv) -> Vec<usize> {
    let mut remaining = Vec::new();

    while state.line < state.lines.len() {
        let line = state.line;
        if !parse_definition(state, env, line, false) {
            remaining.push(line);
            state.line = line + 1;
        }
    }

    remaining
}

/// Check the directive syntax of one line, without looking at the title.
///
/// `line` is the line content after indentation, without the newline.
///
/// # Examples
///
/// ```
/// use abbrkit::scanner::parse_directive;
///
/// let directive = parse_directive(r"*[A\]B]: a title ").unwrap();
/// assert_eq!(directive.label, "A]B");
/// assert_eq!(directive.title, " a title ");
/// assert!(parse_directive("*[HTML] : no").is_none());
/// ```
pub fn parse_directive(line: &str) -> Option<DefinitionDirective<'_>> {
    let bytes = line.as_bytes();
    let max = bytes.len();

    if max <= 2 || bytes[0] != MARKER || bytes[1] != LABEL_OPEN {
        return None;
    }

    let label_start = 2;
    let mut label_end = None;
    let mut pos = label_start;
    while pos < max {
        match bytes[pos] {
            LABEL_OPEN => return None,
            LABEL_CLOSE => {
                label_end = Some(pos);
                break;
            }
            ESCAPE => pos += 1,
            _ => {}
        }
        pos += 1;
    }

    let label_end = label_end?;
    if bytes.get(label_end + 1) != Some(&TITLE_SEP) {
        return None;
    }

    Some(DefinitionDirective {
        label: unescape_label(&line[label_start..label_end]),
        title: &line[label_end + 2..],
    })
}

/// Remove backslash escapes: `\x` becomes `x`.
fn unescape_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == char::from(ESCAPE) {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn define(src: &str) -> (bool, DocumentEnv) {
        let mut state = BlockState::new(src);
        let mut env = DocumentEnv::new();
        let ok = parse_definition(&mut state, &mut env, 0, false);
        (ok, env)
    }

    #[test]
    fn test_basic_definition() {
        let (ok, env) = define("*[HTML]: Hyper Text Markup Language");
        assert!(ok);
        assert_eq!(
            env.abbreviations.get("HTML"),
            Some("Hyper Text Markup Language")
        );
    }

    #[test]
    fn test_title_is_trimmed() {
        let (ok, env) = define("*[W3C]:    World Wide Web Consortium   ");
        assert!(ok);
        assert_eq!(env.abbreviations.get("W3C"), Some("World Wide Web Consortium"));
    }

    #[test]
    fn test_escaped_bracket_in_label() {
        let (ok, env) = define(r"*[A\]B]: T");
        assert!(ok);
        assert_eq!(env.abbreviations.get("A]B"), Some("T"));
    }

    #[test]
    fn test_escaped_backslash_in_label() {
        let (ok, env) = define(r"*[A\\]: T");
        assert!(ok);
        assert_eq!(env.abbreviations.get(r"A\"), Some("T"));
    }

    #[test]
    fn test_rejections() {
        for src in [
            "*[",
            "*[]",
            "[HTML]: x",
            "* [HTML]: x",
            "*[HTML: x",
            "*[HT[ML]: x",
            "*[HTML] : x",
            "*[HTML]",
            "*[HTML]:",
            "*[HTML]:    ",
            "*[]: empty label",
            r"*[HTML\]: x",
        ] {
            let (ok, env) = define(src);
            assert!(!ok, "{src:?} should be rejected");
            assert!(env.abbreviations.is_empty(), "{src:?} should not define");
        }
    }

    #[test]
    fn test_escaped_open_bracket_allowed() {
        let (ok, env) = define(r"*[a\[b]: x");
        assert!(ok);
        assert!(env.abbreviations.contains("a[b"));
    }

    #[test]
    fn test_silent_mode_does_not_mutate() {
        let mut state = BlockState::new("*[HTML]: Hyper Text Markup Language");
        let mut env = DocumentEnv::new();

        assert!(parse_definition(&mut state, &mut env, 0, true));
        assert!(env.abbreviations.is_empty());
        assert_eq!(state.line, 0);
    }

    #[test]
    fn test_silent_mode_accepts_empty_title() {
        // The title is only inspected when committing.
        let mut state = BlockState::new("*[HTML]:");
        let mut env = DocumentEnv::new();
        assert!(parse_definition(&mut state, &mut env, 0, true));
        assert!(!parse_definition(&mut state, &mut env, 0, false));
    }

    #[test]
    fn test_cursor_advances() {
        let mut state = BlockState::new("text\n*[A]: alpha\nmore");
        let mut env = DocumentEnv::new();

        assert!(!parse_definition(&mut state, &mut env, 0, false));
        assert!(parse_definition(&mut state, &mut env, 1, false));
        assert_eq!(state.line, 2);
    }

    #[test]
    fn test_indented_definition() {
        let (ok, env) = define("   *[API]: Application Programming Interface");
        assert!(ok);
        assert!(env.abbreviations.contains("API"));
    }

    #[test]
    fn test_collect_definitions() {
        let src = "*[HTML]: Hyper Text Markup Language\n\
                   The HTML standard.\n\
                   *[HTML]: Ignored\n\
                   *[CSS]: Cascading Style Sheets\n\
                   *[bad: nope";
        let mut state = BlockState::new(src);
        let mut env = DocumentEnv::new();

        let remaining = collect_definitions(&mut state, &mut env);

        assert_eq!(remaining, vec![1, 4]);
        assert_eq!(env.abbreviations.len(), 2);
        assert_eq!(
            env.abbreviations.get("HTML"),
            Some("Hyper Text Markup Language")
        );
        assert_eq!(state.line, 5);
    }
}
