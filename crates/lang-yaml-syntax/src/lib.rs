//! # lang-yaml-syntax
//!
//! A lossless YAML syntax tree using [Rowan] + [Logos], following the
//! [rust-analyzer] architecture model, plus the outer grammar that splits a
//! document into frontmatter and body.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## What is a Lossless CST?
//!
//! Unlike an Abstract Syntax Tree (AST) which discards formatting details, a
//! Concrete Syntax Tree (CST) preserves **every byte** of the original source:
//! whitespace, comments, indentation - everything. Editor services need that:
//! an indentation suggestion is computed from the columns of real tokens, and
//! a fold range is a byte range into the real text.
//!
//! This is not a validating YAML parser. It recognises the structure an
//! editor needs (block sequences and mappings, explicit `?` keys, scalars,
//! block literals, flow collections, anchors, tags and aliases) and degrades
//! gracefully on anything else. Inside flow collections anchors and tags are
//! read as part of the scalar they precede.
//!
//! ## Architecture Overview
//!
//! The parsing pipeline has three stages:
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! ```text
//! "key: [a]\n" → [TEXT("key"), COLON, WHITESPACE, LBRACKET, TEXT("a"), RBRACKET, NEWLINE]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! The parser consumes tokens and emits **events** (Start, Token, Finish).
//! Block structure is decided by token columns; flow collections by
//! brackets. Grammar rules live in `parser::grammar`.
//!
//! ### 3. Sink ([`parser::sink`] module)
//!
//! The sink consumes events and builds a Rowan green tree using
//! `GreenNodeBuilder`.
//!
//! ### Frontmatter ([`frontmatter`] module)
//!
//! A separate, line-based grammar that finds `---` fences at the top of a
//! document. It builds its tree directly; there is nothing to lex.
//!
//! ## Module Structure
//!
//! ```text
//! lang-yaml-syntax/
//! ├── lib.rs           # This file - public API and tree dump tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── frontmatter.rs   # Outer DASH_LINE / FRONTMATTER_CONTENT / BODY grammar
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, public parse() function
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs   # Stream and document parsing
//!         ├── block.rs # Sequences, mappings, scalars, block literals
//!         └── flow.rs  # Bracketed collections
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use lang_yaml_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("a:\n  - b\n");
//!
//! // The tree preserves all text
//! assert_eq!(tree.text().to_string(), "a:\n  - b\n");
//!
//! // Navigate the tree structure
//! assert_eq!(tree.kind(), SyntaxKind::STREAM);
//! let kinds: Vec<_> = tree.descendants().map(|n| n.kind()).collect();
//! assert!(kinds.contains(&SyntaxKind::BLOCK_SEQUENCE));
//! ```

pub mod frontmatter;
pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use frontmatter::{frontmatter_green, parse_frontmatter};
pub use parser::parse;
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, YamlLang};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// Helper to format a syntax tree for snapshot testing.
    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!(
            "{}{:?}@{:?}\n",
            prefix,
            node.kind(),
            node.text_range()
        ));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    let text = t.text().replace('\n', "\\n");
                    result.push_str(&format!(
                        "{}  {:?}@{:?} {:?}\n",
                        prefix,
                        t.kind(),
                        t.text_range(),
                        text
                    ));
                }
            }
        }

        result
    }

    #[test]
    fn snapshot_simple_pair() {
        let tree = parse("a: 1\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        STREAM@0..5
          DOCUMENT@0..4
            BLOCK_MAPPING@0..4
              PAIR@0..4
                KEY@0..1
                  LITERAL@0..1
                    TEXT@0..1 "a"
                COLON@1..2 ":"
                WHITESPACE@2..3 " "
                LITERAL@3..4
                  TEXT@3..4 "1"
          NEWLINE@4..5 "\\n"
        "#);
    }

    #[test]
    fn snapshot_sequence_under_key() {
        let tree = parse("k:\n  - x\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        STREAM@0..9
          DOCUMENT@0..8
            BLOCK_MAPPING@0..8
              PAIR@0..8
                KEY@0..1
                  LITERAL@0..1
                    TEXT@0..1 "k"
                COLON@1..2 ":"
                NEWLINE@2..3 "\\n"
                WHITESPACE@3..5 "  "
                BLOCK_SEQUENCE@5..8
                  ITEM@5..8
                    DASH@5..6 "-"
                    WHITESPACE@6..7 " "
                    LITERAL@7..8
                      TEXT@7..8 "x"
          NEWLINE@8..9 "\\n"
        "#);
    }

    #[test]
    fn snapshot_block_literal() {
        let tree = parse("|\n  t\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        STREAM@0..6
          DOCUMENT@0..5
            BLOCK_LITERAL@0..5
              BLOCK_LITERAL_HEADER@0..1
                PIPE@0..1 "|"
              NEWLINE@1..2 "\\n"
              BLOCK_LITERAL_CONTENT@2..5
                WHITESPACE@2..4 "  "
                TEXT@4..5 "t"
          NEWLINE@5..6 "\\n"
        "#);
    }

    #[test]
    fn snapshot_flow_mapping() {
        let tree = parse("{a: b}");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        STREAM@0..6
          DOCUMENT@0..6
            FLOW_MAPPING@0..6
              LBRACE@0..1 "{"
              PAIR@1..5
                KEY@1..2
                  LITERAL@1..2
                    TEXT@1..2 "a"
                COLON@2..3 ":"
                WHITESPACE@3..4 " "
                LITERAL@4..5
                  TEXT@4..5 "b"
              RBRACE@5..6 "}"
        "#);
    }

    #[test]
    fn snapshot_anchor_before_nested_mapping() {
        let tree = parse("a: &x\n  b: 1\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        STREAM@0..13
          DOCUMENT@0..12
            BLOCK_MAPPING@0..12
              PAIR@0..12
                KEY@0..1
                  LITERAL@0..1
                    TEXT@0..1 "a"
                COLON@1..2 ":"
                WHITESPACE@2..3 " "
                ANCHOR@3..5
                  TEXT@3..5 "&x"
                NEWLINE@5..6 "\\n"
                WHITESPACE@6..8 "  "
                BLOCK_MAPPING@8..12
                  PAIR@8..12
                    KEY@8..9
                      LITERAL@8..9
                        TEXT@8..9 "b"
                    COLON@9..10 ":"
                    WHITESPACE@10..11 " "
                    LITERAL@11..12
                      TEXT@11..12 "1"
          NEWLINE@12..13 "\\n"
        "#);
    }

    #[test]
    fn snapshot_explicit_key() {
        let tree = parse("? a\n: b\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        STREAM@0..8
          DOCUMENT@0..7
            BLOCK_MAPPING@0..7
              PAIR@0..7
                KEY@0..3
                  QUESTION@0..1 "?"
                  WHITESPACE@1..2 " "
                  LITERAL@2..3
                    TEXT@2..3 "a"
                NEWLINE@3..4 "\\n"
                COLON@4..5 ":"
                WHITESPACE@5..6 " "
                LITERAL@6..7
                  TEXT@6..7 "b"
          NEWLINE@7..8 "\\n"
        "#);
    }

    #[test]
    fn snapshot_frontmatter() {
        let tree = parse_frontmatter("---\na: 1\n---\nbody\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        FRONTMATTER_DOCUMENT@0..18
          DASH_LINE@0..4
            DIRECTIVE_END@0..3 "---"
            NEWLINE@3..4 "\\n"
          FRONTMATTER_CONTENT@4..9
            TEXT@4..9 "a: 1\\n"
          DASH_LINE@9..13
            DIRECTIVE_END@9..12 "---"
            NEWLINE@12..13 "\\n"
          BODY@13..18
            TEXT@13..18 "body\\n"
        "#);
    }

    // === Error tolerance / messy input tests ===
    // Half-typed YAML is the normal state of a buffer being edited. These
    // check that we still produce a tree that preserves all bytes.

    #[test]
    fn messy_half_typed_document() {
        let input = r#"server:
  host: "localhost
  ports: [80, 443
  - stray
	tabbed: value
  tls: |
key without colon
: orphan value
{unclosed: [mapping
---
"#;
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn roundtrip_preserves_text() {
        let inputs = [
            "a: 1\n",
            "- a\n- b\n",
            "a:\n  b:\n    c: d\n",
            "text: >\n  folded\n  lines\n",
            "[1, 2, 3]\n",
            "{a: 1, b: [x, y]}\n",
            "'single': \"double\"\n",
            "# comment only\n",
            "---\na: 1\n...\n",
            "a: 1 # trailing\r\nb: 2\r\n",
            "base: &base\n  x: 1\nuse:\n  <<: *base\n",
            "? [a, b]\n: !!set {c}\n",
            "url: http://x#frag#more\n",
        ];

        for input in inputs {
            let tree = parse(input);
            assert_eq!(
                tree.text().to_string(),
                input,
                "Roundtrip failed for: {:?}",
                input
            );
        }
    }
}
