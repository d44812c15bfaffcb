//! # Grammar Rules
//!
//! This module contains the grammar rules that drive parsing. Each function
//! takes a `&mut Parser` and uses its methods to:
//!
//! 1. Inspect the current token (`p.current()`, `p.at()`, `p.nth()`, `p.nth_column()`)
//! 2. Consume tokens (`p.bump()`, `p.eat()`, `p.bump_trivia()`)
//! 3. Build tree structure (`p.start()` → marker → `complete()`/`abandon()`)
//!
//! ## Module Structure
//!
//! - [`block`] - Indentation-based nodes (sequences, mappings, scalars, block literals)
//! - [`flow`] - Bracketed collections (`[a, b]`, `{a: 1}`)
//!
//! ## Tree Shape
//!
//! ```text
//! STREAM
//!   DOCUMENT
//!     BLOCK_MAPPING
//!       PAIR
//!         KEY
//!           LITERAL
//!         COLON
//!         NEWLINE WHITESPACE      ← trivia before a nested value stays in the PAIR
//!         BLOCK_SEQUENCE
//!           ITEM ...
//! ```
//!
//! Structural nodes end at their last significant token. Line breaks,
//! indentation and comments that follow a node belong to its parent, so a
//! node's range never swallows the blank lines below it.
//!
//! ## Error Recovery
//!
//! The grammar never fails. Tokens that fit nowhere are wrapped in an ERROR
//! node and parsing continues on the next line. Every input byte ends up in
//! the tree.

mod block;
mod flow;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root stream.
///
/// A stream is a sequence of documents separated by `---` / `...` markers.
/// Trivia between documents stays directly under STREAM.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    loop {
        p.bump_trivia();
        if p.at_end() {
            break;
        }
        document(p);
    }

    m.complete(p, SyntaxKind::STREAM);
}

/// Parse a single document: an optional `---`, block nodes, an optional `...`.
fn document(p: &mut Parser<'_, '_>) {
    let m = p.start();

    if is_document_marker(p, 0) && p.at(SyntaxKind::DIRECTIVE_END) {
        p.bump();
    }

    loop {
        let n = p.peek_past_trivia();
        match p.nth(n) {
            SyntaxKind::EOF => break,
            SyntaxKind::DIRECTIVE_END if is_document_marker(p, n) => break,
            SyntaxKind::DOCUMENT_END if is_document_marker(p, n) => {
                p.bump_trivia();
                p.bump();
                break;
            }
            _ => {
                p.bump_trivia();
                block::block_node(p, 0);
            }
        }
    }

    m.complete(p, SyntaxKind::DOCUMENT);
}

/// `---` or `...` at column 0, followed by a blank.
pub(super) fn is_document_marker(p: &Parser<'_, '_>, n: usize) -> bool {
    matches!(
        p.nth(n),
        SyntaxKind::DIRECTIVE_END | SyntaxKind::DOCUMENT_END
    ) && p.nth_column(n) == 0
        && matches!(
            p.nth(n + 1),
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        )
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use crate::syntax_kind::SyntaxKind;
    use pretty_assertions::assert_eq;

    fn documents(input: &str) -> Vec<String> {
        parse(input)
            .children()
            .filter(|n| n.kind() == SyntaxKind::DOCUMENT)
            .map(|n| n.text().to_string())
            .collect()
    }

    #[test]
    fn single_implicit_document() {
        assert_eq!(documents("a: 1\n"), vec!["a: 1"]);
    }

    #[test]
    fn explicit_documents_split_on_markers() {
        assert_eq!(
            documents("---\na: 1\n---\nb: 2\n"),
            vec!["---\na: 1", "---\nb: 2"]
        );
    }

    #[test]
    fn document_end_marker_closes_document() {
        assert_eq!(documents("a: 1\n...\nb\n"), vec!["a: 1\n...", "b"]);
    }

    #[test]
    fn indented_dashes_are_not_markers() {
        assert_eq!(documents("a:\n  ---\n"), vec!["a:\n  ---"]);
    }

    #[test]
    fn comment_only_input_has_no_documents() {
        let tree = parse("# just a comment\n");
        assert_eq!(tree.children().count(), 0);
        assert_eq!(tree.text(), "# just a comment\n");
    }
}
