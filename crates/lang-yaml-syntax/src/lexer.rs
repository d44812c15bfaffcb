//! # Lexer - Tokenizing YAML Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! **Every byte in the input appears in exactly one token**. Nothing is
//! skipped, which is what lets the tree reproduce the source:
//!
//! ```
//! use lang_yaml_syntax::lexer::lex;
//!
//! let input = "key: [a, b] # note\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Context-Free Tokens
//!
//! YAML indicators change meaning with context: `-` starts a sequence entry
//! only when followed by a blank, `:` separates a key only when followed by a
//! blank, `[` is plain text inside a block scalar. The lexer does not try to
//! decide any of that. Indicator characters always get their own token and
//! the parser decides whether they are structure or scalar text.
//!
//! Runs of ordinary characters become a single `TEXT` token. Quoted scalars
//! are lexed whole (they may contain indicators and line breaks). Characters
//! that match no rule (a lone `"`, a bare `\r`) become `TEXT` as well.
//!
//! A `#` only starts a comment at the start of a line or after a blank. Glued
//! to other text (`http://x#frag`) it is a `TEXT` token of its own and lexing
//! resumes right after it.
//!
//! ## Public API
//!
//! - [`lex`] - Tokenize input, returning `Vec<Token>`
//! - [`lex_with_spans`] - Tokenize with byte offset spans
//! - [`Token`] - A token with its kind and text slice

use std::ops::Range;

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// Comment up to (not including) the line ending. Only a comment when
    /// a blank or line break comes before it, see [`lex_with_spans`].
    #[regex(r"#[^\r\n]*")]
    Comment,

    /// `---`
    #[token("---")]
    DirectiveEnd,

    /// `...`
    #[token("...")]
    DocumentEnd,

    #[token("-")]
    Dash,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("|")]
    Pipe,

    #[token(">")]
    Gt,

    #[token("?", priority = 3)]
    Question,

    /// Double-quoted (with backslash escapes) or single-quoted (with `''`) scalar
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^']|'')*'")]
    Quoted,

    /// Plain text - anything not matched by other rules
    #[regex(r#"[^\s:,\[\]{}#"'|>-]+"#)]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Comment => SyntaxKind::COMMENT,
            TokenKind::DirectiveEnd => SyntaxKind::DIRECTIVE_END,
            TokenKind::DocumentEnd => SyntaxKind::DOCUMENT_END,
            TokenKind::Dash => SyntaxKind::DASH,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LBrace => SyntaxKind::LBRACE,
            TokenKind::RBrace => SyntaxKind::RBRACE,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Question => SyntaxKind::QUESTION,
            TokenKind::Quoted => SyntaxKind::QUOTED,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, Range<usize>)> {
    let mut tokens: Vec<(Token<'_>, Range<usize>)> = Vec::new();
    let mut base = 0;

    'restart: loop {
        let mut lexer = TokenKind::lexer(&input[base..]);
        while let Some(result) = lexer.next() {
            let span = base + lexer.span().start..base + lexer.span().end;
            let kind = match result {
                Ok(token_kind) => token_kind.to_syntax_kind(),
                // Unrecognized input (unterminated quote, stray `\r`) is scalar text
                Err(()) => SyntaxKind::TEXT,
            };

            if kind == SyntaxKind::COMMENT && follows_text(&tokens) {
                let hash = span.start..span.start + 1;
                tokens.push((
                    Token {
                        kind: SyntaxKind::TEXT,
                        text: &input[hash.clone()],
                    },
                    hash,
                ));
                base = span.start + 1;
                continue 'restart;
            }

            tokens.push((
                Token {
                    kind,
                    text: &input[span.clone()],
                },
                span,
            ));
        }
        break;
    }

    tokens
}

/// Whether the next token would touch the previous one without a blank.
fn follows_text(tokens: &[(Token<'_>, Range<usize>)]) -> bool {
    tokens.last().is_some_and(|(token, _)| {
        !matches!(token.kind, SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE)
    })
}
