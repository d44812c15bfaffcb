//! # Parser - Event-Based Tree Construction
//!
//! This module implements the core parsing logic, transforming a token stream
//! into a syntax tree using the **event-based** architecture from rust-analyzer.
//!
//! ## Why Event-Based Parsing?
//!
//! Instead of building the tree directly, grammar rules emit a flat list of
//! **events** ([`Event`]) that describe the tree structure. The [`Sink`] then
//! builds the actual Rowan tree from events. This keeps grammar code free of
//! Rowan details and makes wrapping an already-parsed node cheap (see
//! [`CompletedMarker::precede`]), which flow mappings need when a scalar
//! turns out to be a key.
//!
//! ## The Marker System
//!
//! When you call `parser.start()`, you get a [`Marker`]. This marker **must** be
//! either:
//!
//! - Completed with `marker.complete(parser, KIND)` → emits Start+Finish
//! - Abandoned with `marker.abandon(parser)` → removes the placeholder
//!
//! If you drop a marker without doing either, **the program panics**.
//!
//! ```ignore
//! let m = parser.start();
//! parser.bump();
//! m.complete(parser, SyntaxKind::LITERAL);
//! ```
//!
//! ## Indentation
//!
//! YAML block structure is decided by columns. The parser precomputes the
//! column of every token so grammar rules can ask "where does the next
//! significant token start?" without rescanning the source.
//!
//! ## Public API
//!
//! The main entry point is [`parse`]:
//!
//! ```
//! use lang_yaml_syntax::parse;
//!
//! let tree = parse("key: value\n");
//! println!("{:#?}", tree);
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `at_end()`, `nth_column()`
/// - Consume tokens: `bump()`, `eat()`, `bump_trivia()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    /// Column (in chars) at which each token starts
    columns: Vec<usize>,
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        let mut columns = Vec::with_capacity(tokens.len());
        let mut column = 0;
        for token in tokens {
            columns.push(column);
            match token.text.rfind('\n') {
                Some(idx) => column = token.text[idx + 1..].chars().count(),
                None => column += token.text.chars().count(),
            }
        }

        Self {
            tokens,
            columns,
            pos: 0,
            events: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        let sink = Sink::new(self.tokens, self.events);
        sink.finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Text of the token n ahead, empty past the end.
    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Column of the token n ahead. Past the end this is 0, which never
    /// continues an indented block.
    pub fn nth_column(&self, n: usize) -> usize {
        self.columns.get(self.pos + n).copied().unwrap_or(0)
    }

    /// Column of the current token.
    pub fn current_column(&self) -> usize {
        self.nth_column(0)
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Number of trivia tokens (whitespace, line breaks, comments) starting
    /// at the current position. `nth(peek_past_trivia())` is the next
    /// significant token.
    pub fn peek_past_trivia(&self) -> usize {
        let mut n = 0;
        while self.nth(n).is_trivia() {
            n += 1;
        }
        n
    }

    /// Consume all trivia at the current position into the open node.
    pub fn bump_trivia(&mut self) {
        while self.current().is_trivia() {
            self.bump();
        }
    }

    /// Whether nothing but trivia remains on the current line.
    pub fn at_line_end(&self) -> bool {
        let n = usize::from(self.at(SyntaxKind::WHITESPACE));
        matches!(
            self.nth(n),
            SyntaxKind::NEWLINE | SyntaxKind::EOF | SyntaxKind::COMMENT
        )
    }

    /// Whether the token n ahead is the first non-blank token of its line.
    pub fn nth_starts_line(&self, n: usize) -> bool {
        let mut idx = self.pos + n;
        while idx > 0 {
            idx -= 1;
            match self.tokens[idx].kind {
                SyntaxKind::WHITESPACE => continue,
                SyntaxKind::NEWLINE => return true,
                _ => return false,
            }
        }
        true
    }
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you get
/// a `Marker` pointing to it. The `#[must_use]` attribute and the `Drop` impl
/// together enforce that every marker is either completed or abandoned.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    ///
    /// This:
    /// 1. Replaces the `Placeholder` at our position with `Start { kind, ... }`
    /// 2. Pushes a `Finish` event
    /// 3. Returns a `CompletedMarker` for potential `precede()` calls
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start {
            kind,
            forward_parent: None,
        };
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Abandon this marker without creating a node.
    ///
    /// **Note**: This only removes the placeholder if it's the last event.
    /// If other events were pushed after `start()`, the placeholder becomes
    /// inert and is ignored by the Sink.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// A marker for a node that has been completed.
///
/// The only thing you can do with a `CompletedMarker` is call `precede()`
/// to wrap the completed node in a new parent. Flow mappings use this to
/// turn an already parsed scalar into the `KEY` of a `PAIR` once the `:`
/// shows up.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    /// Position of the Start event for this completed node
    pos: usize,
}

impl CompletedMarker {
    /// Create a new parent node that will contain this node.
    ///
    /// Returns a new `Marker` that, when completed, will become the parent
    /// of the node at `self.pos`.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let new_pos = p.events.len();
        p.events.push(Event::Placeholder);

        // Update the original Start event to point to this new parent
        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(new_pos);
        }

        Marker {
            pos: new_pos,
            completed: false,
        }
    }
}

/// Parse YAML source into a syntax tree rooted at `STREAM`.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty_input() {
        let tree = parse("");
        assert_eq!(tree.kind(), SyntaxKind::STREAM);
        assert_eq!(tree.children().count(), 0);
    }

    #[test]
    fn parse_preserves_all_text() {
        let input = "a: 1\nb: [2, 3]\n";
        let tree = parse(input);
        assert_eq!(tree.text(), input);
    }

    #[test]
    fn columns_reset_after_newlines() {
        let tokens = lex("a:\n  b");
        let parser = Parser::new(&tokens);
        // a, :, \n, "  ", b
        assert_eq!(parser.nth_column(0), 0);
        assert_eq!(parser.nth_column(3), 0);
        assert_eq!(parser.nth_column(4), 2);
    }

    #[test]
    fn line_start_detection_skips_indentation() {
        let tokens = lex("a:\n  b c");
        let parser = Parser::new(&tokens);
        assert!(parser.nth_starts_line(0));
        assert!(!parser.nth_starts_line(1));
        assert!(parser.nth_starts_line(4));
        assert!(!parser.nth_starts_line(6));
    }

    #[test]
    fn trivia_lookahead() {
        let tokens = lex("  # c\n\nx");
        let parser = Parser::new(&tokens);
        let n = parser.peek_past_trivia();
        assert_eq!(parser.nth(n), SyntaxKind::TEXT);
        assert_eq!(parser.nth_text(n), "x");
    }

    #[test]
    fn marker_must_be_completed() {
        let result = std::panic::catch_unwind(|| {
            let tokens = lex("test");
            let mut parser = Parser::new(&tokens);
            let _marker = parser.start();
            // Marker dropped without completion - should panic
        });
        assert!(result.is_err());
    }

    #[test]
    fn marker_can_be_abandoned() {
        let tokens = lex("test");
        let mut parser = Parser::new(&tokens);
        let marker = parser.start();
        marker.abandon(&mut parser);
    }
}
