//! Line-oriented access to a document's source.
//!
//! Block rules see the source one logical line at a time. For each line the
//! index records where it begins, where its content ends (before the
//! newline), and how much leading indentation precedes the first content
//! character.

use memchr::memchr_iter;

/// Offsets for a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMarks {
    /// Byte offset of the first character of the line.
    pub begin: usize,
    /// Byte offset one past the last content byte (excludes the newline).
    pub end: usize,
    /// Bytes of leading spaces/tabs before content.
    pub shift: usize,
}

impl LineMarks {
    /// Byte offset where content starts, after indentation.
    pub fn content_start(&self) -> usize {
        self.begin + self.shift
    }

    /// Whether the line has no content after indentation.
    pub fn is_blank(&self) -> bool {
        self.content_start() >= self.end
    }
}

/// Line marks for a whole source string.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    lines: Vec<LineMarks>,
}

impl LineIndex {
    /// Build the index for `src`.
    ///
    /// A trailing newline does not start an extra empty line.
    pub fn new(src: &str) -> Self {
        let bytes = src.as_bytes();
        let mut lines = Vec::new();
        let mut begin = 0;

        for nl in memchr_iter(b'\n', bytes) {
            lines.push(Self::marks(bytes, begin, nl));
            begin = nl + 1;
        }
        if begin < bytes.len() {
            lines.push(Self::marks(bytes, begin, bytes.len()));
        }

        Self { lines }
    }

    fn marks(bytes: &[u8], begin: usize, end: usize) -> LineMarks {
        let shift = bytes[begin..end]
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();
        LineMarks { begin, end, shift }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Marks for line `line`, if it exists.
    pub fn get(&self, line: usize) -> Option<LineMarks> {
        self.lines.get(line).copied()
    }
}

/// Block-level scanning state: the source, its line index and a cursor.
///
/// A block rule that consumes lines moves `line` past them; the host reads
/// the cursor to decide where the next rule starts.
#[derive(Debug, Clone)]
pub struct BlockState<'a> {
    pub src: &'a str,
    pub lines: LineIndex,
    /// Next line to be processed.
    pub line: usize,
}

impl<'a> BlockState<'a> {
    /// Create a state positioned at the first line of `src`.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            lines: LineIndex::new(src),
            line: 0,
        }
    }

    /// Content of line `line` after indentation, without the newline.
    pub fn line_content(&self, line: usize) -> Option<&'a str> {
        let marks = self.lines.get(line)?;
        self.src.get(marks.content_start()..marks.end)
    }
}
