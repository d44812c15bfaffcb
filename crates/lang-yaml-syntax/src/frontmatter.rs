//! # Frontmatter - The Outer Document Grammar
//!
//! A document may open with a block of metadata fenced by two lines that
//! consist of exactly `---`:
//!
//! ```text
//! ---              ← DASH_LINE
//! title: Notes     ← FRONTMATTER_CONTENT
//! ---              ← DASH_LINE
//! Body text...     ← BODY
//! ```
//!
//! This grammar only finds the boundaries. The content between the dash lines
//! and the body stay single `TEXT` tokens; a mixed-language host re-parses
//! them with the languages of its choice.
//!
//! The rules are line based:
//!
//! - the opening delimiter must be the very first line
//! - a delimiter line is `---` followed by `\n`, `\r\n` or the end of input,
//!   with nothing else on it (no trailing blanks)
//! - without both delimiters the whole document is the BODY
//!
//! The tree is always `FRONTMATTER_DOCUMENT` and always ends with a BODY
//! node, which may be empty.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::syntax_kind::{SyntaxKind, SyntaxNode};

const DELIMITER: &str = "---";

/// Byte ranges of a recognised frontmatter block.
struct Fences {
    /// End of the opening dash line, line break included
    open_end: usize,
    /// Start of the closing dash line
    close_start: usize,
    /// End of the closing dash line, line break included
    close_end: usize,
}

/// Split a line (with its terminator) into content and line break.
fn split_line_break(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, &line[content.len()..])
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, &line[content.len()..])
    } else {
        (line, "")
    }
}

fn is_delimiter(line: &str) -> bool {
    split_line_break(line).0 == DELIMITER
}

fn find_fences(text: &str) -> Option<Fences> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if !is_delimiter(first) {
        return None;
    }

    let open_end = first.len();
    let mut offset = open_end;
    for line in lines {
        if is_delimiter(line) {
            return Some(Fences {
                open_end,
                close_start: offset,
                close_end: offset + line.len(),
            });
        }
        offset += line.len();
    }
    None
}

fn dash_line(builder: &mut GreenNodeBuilder<'_>, line: &str) {
    let (dashes, line_break) = split_line_break(line);
    builder.start_node(SyntaxKind::DASH_LINE.into());
    builder.token(SyntaxKind::DIRECTIVE_END.into(), dashes);
    if !line_break.is_empty() {
        builder.token(SyntaxKind::NEWLINE.into(), line_break);
    }
    builder.finish_node();
}

fn text_node(builder: &mut GreenNodeBuilder<'_>, kind: SyntaxKind, text: &str) {
    builder.start_node(kind.into());
    if !text.is_empty() {
        builder.token(SyntaxKind::TEXT.into(), text);
    }
    builder.finish_node();
}

/// Build the green tree of the outer frontmatter grammar.
pub fn frontmatter_green(text: &str) -> GreenNode {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::FRONTMATTER_DOCUMENT.into());

    let body_start = match find_fences(text) {
        Some(fences) => {
            dash_line(&mut builder, &text[..fences.open_end]);
            text_node(
                &mut builder,
                SyntaxKind::FRONTMATTER_CONTENT,
                &text[fences.open_end..fences.close_start],
            );
            dash_line(&mut builder, &text[fences.close_start..fences.close_end]);
            fences.close_end
        }
        None => 0,
    };
    text_node(&mut builder, SyntaxKind::BODY, &text[body_start..]);

    builder.finish_node();
    builder.finish()
}

/// Parse a document into `DASH_LINE`, `FRONTMATTER_CONTENT`, `DASH_LINE`
/// and `BODY` nodes.
///
/// ```
/// use lang_yaml_syntax::{SyntaxKind, parse_frontmatter};
///
/// let tree = parse_frontmatter("---\ntitle: x\n---\nBody text");
/// let kinds: Vec<_> = tree.children().map(|n| n.kind()).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         SyntaxKind::DASH_LINE,
///         SyntaxKind::FRONTMATTER_CONTENT,
///         SyntaxKind::DASH_LINE,
///         SyntaxKind::BODY,
///     ]
/// );
/// ```
pub fn parse_frontmatter(text: &str) -> SyntaxNode {
    SyntaxNode::new_root(frontmatter_green(text))
}
