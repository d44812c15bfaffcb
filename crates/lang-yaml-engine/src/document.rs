use std::ops::Range;

use xi_rope::{LinesMetric, Rope};

pub const DEFAULT_TAB_SIZE: u32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// A single line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    /// Byte offset of the first character
    pub from: usize,
    /// Byte offset of the end of the line, before the line break
    pub to: usize,
    /// Line text without the line break
    pub text: String,
}

/// Text held in an `xi_rope::Rope` with line and column metrics.
///
/// Columns count characters, with a tab advancing to the next multiple of
/// `tab_size`. All offsets are byte offsets and are clamped to the
/// document length.
#[derive(Debug, Clone)]
pub struct Document {
    buffer: Rope,
    tab_size: u32,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            tab_size: DEFAULT_TAB_SIZE,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn with_tab_size(mut self, tab_size: u32) -> Self {
        self.tab_size = tab_size.max(1);
        self
    }

    pub fn tab_size(&self) -> u32 {
        self.tab_size
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self.buffer.slice_to_cow(start..end).into_owned()
    }

    /// A document for `range`, keeping this document's tab size.
    pub fn sub_document(&self, range: Range<usize>) -> Document {
        Document::new(&self.slice(range)).with_tab_size(self.tab_size)
    }

    /// Number of lines. An empty document, or one ending in a line break,
    /// still has a last (empty) line.
    pub fn line_count(&self) -> usize {
        self.buffer.measure::<LinesMetric>() + 1
    }

    /// The line containing `offset`.
    pub fn line_at(&self, offset: usize) -> Line {
        let offset = offset.min(self.len());
        let index = self.buffer.line_of_offset(offset);
        self.line_by_index(index)
    }

    /// The line with the given 1-based number.
    pub fn line(&self, number: usize) -> Option<Line> {
        (number >= 1 && number <= self.line_count()).then(|| self.line_by_index(number - 1))
    }

    fn line_by_index(&self, index: usize) -> Line {
        let from = self.buffer.offset_of_line(index);
        let next = if index + 1 < self.line_count() {
            self.buffer.offset_of_line(index + 1)
        } else {
            self.len()
        };
        let raw = self.buffer.slice_to_cow(from..next);
        let text = raw
            .strip_suffix('\n')
            .map(|t| t.strip_suffix('\r').unwrap_or(t))
            .unwrap_or(&*raw)
            .to_string();

        Line {
            number: index + 1,
            from,
            to: from + text.len(),
            text,
        }
    }

    /// Indentation width, in columns, of the line containing `offset`.
    pub fn line_indent(&self, offset: usize) -> u32 {
        let line = self.line_at(offset);
        let blank_len = line.text.len() - line.text.trim_start_matches([' ', '\t']).len();
        self.count_columns(&line.text[..blank_len])
    }

    /// Column of `offset` within its line.
    pub fn column(&self, offset: usize) -> u32 {
        let offset = offset.min(self.len());
        let line = self.line_at(offset);
        let within = (offset - line.from).min(line.text.len());
        let prefix = line.text.get(..within).unwrap_or(&line.text);
        self.count_columns(prefix)
    }

    /// The rest of the line after `offset`.
    pub fn text_after(&self, offset: usize) -> String {
        let line = self.line_at(offset);
        let start = offset.clamp(line.from, line.to);
        self.slice(start..line.to)
    }

    fn count_columns(&self, text: &str) -> u32 {
        text.chars().fold(0, |col, ch| {
            if ch == '\t' {
                col + self.tab_size - col % self.tab_size
            } else {
                col + 1
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn lines_exclude_line_breaks() {
        let doc = Document::new("a: 1\r\n  b\nlast");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(
            doc.line_at(7),
            Line {
                number: 2,
                from: 6,
                to: 9,
                text: "  b".to_string(),
            }
        );
        assert_eq!(doc.line(1).map(|l| l.to), Some(4));
        assert_eq!(doc.line(3).map(|l| l.text), Some("last".to_string()));
        assert_eq!(doc.line(4), None);
        assert_eq!(doc.line(0), None);
    }

    #[test]
    fn trailing_line_break_starts_an_empty_line() {
        let doc = Document::new("a\n");
        assert_eq!(doc.line_count(), 2);
        let last = doc.line_at(2);
        assert_eq!((last.number, last.from, last.to), (2, 2, 2));
    }

    #[test]
    fn line_break_offset_belongs_to_its_line() {
        let doc = Document::new("ab\ncd");
        assert_eq!(doc.line_at(2).number, 1);
        assert_eq!(doc.line_at(3).number, 2);
    }

    #[test]
    fn offsets_past_the_end_are_clamped() {
        let doc = Document::new("ab");
        assert_eq!(doc.line_at(99).number, 1);
        assert_eq!(doc.column(99), 2);
        assert_eq!(doc.slice(1..99), "b");
    }

    #[rstest]
    #[case("    x", 4)]
    #[case("\tx", 4)]
    #[case("  \tx", 4)]
    #[case("\t  x", 6)]
    #[case("x", 0)]
    #[case("   ", 3)]
    fn line_indent_expands_tabs(#[case] text: &str, #[case] expected: u32) {
        let doc = Document::new(text);
        assert_eq!(doc.line_indent(0), expected);
    }

    #[test]
    fn column_counts_characters() {
        let doc = Document::new("a:\n  é: 1");
        // "  é: " is 5 characters but 6 bytes
        assert_eq!(doc.column(9), 5);
        assert_eq!(doc.column(3), 0);
    }

    #[test]
    fn tab_size_is_configurable() {
        let doc = Document::new("\tx").with_tab_size(8);
        assert_eq!(doc.column(1), 8);
        assert_eq!(doc.line_indent(1), 8);
    }

    #[test]
    fn text_after_stops_at_line_end() {
        let doc = Document::new("[1,\n  ]  \nz");
        assert_eq!(doc.text_after(4), "  ]  ");
        assert_eq!(doc.text_after(6), "]  ");
        assert_eq!(doc.text_after(3), "");
    }

    #[test]
    fn sub_document_keeps_tab_size() {
        let doc = Document::new("---\n\tb\n---\n").with_tab_size(2);
        let sub = doc.sub_document(4..7);
        assert_eq!(sub.text(), "\tb\n");
        assert_eq!(sub.line_indent(0), 2);
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        let err = Document::from_bytes(&[b'a', 0xff]).unwrap_err();
        assert!(err.to_string().starts_with("Document is not valid UTF-8"));
        assert!(Document::from_bytes(b"ok").is_ok());
    }
}
