//! Parser events.
//!
//! Grammar rules don't touch Rowan. They push a flat list of events that the
//! [`Sink`](super::sink::Sink) replays into a green tree. For `a: 1`:
//!
//! ```text
//! Start(PAIR)
//!   Start(KEY)
//!     Start(LITERAL)
//!       Token(TEXT)       a
//!     Finish
//!   Finish
//!   Token(COLON)
//!   Token(WHITESPACE)
//!   Start(LITERAL)
//!     Token(TEXT)         1
//!   Finish
//! Finish
//! ```
//!
//! Every `Token` event stands for exactly one lexer token, in order, so the
//! sink never has to look at token kinds to stay in step with the source.
//!
//! A flow scalar only becomes a `KEY` once the parser sees the `:` after it.
//! The `KEY` (and its `PAIR`) are then pushed after the scalar's events and
//! the scalar's `Start` gets a `forward_parent` link to them; the sink opens
//! the linked nodes first.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Open a node. `forward_parent` is the index of a later `Start` that
    /// wraps this one.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// Attach the next lexer token to the open node, as `kind`.
    Token { kind: SyntaxKind },

    /// Close the innermost open node.
    Finish,

    /// Reserved slot of a marker that was abandoned, or of a `Start` already
    /// consumed through a forward link. Ignored by the sink.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start {
            kind,
            forward_parent: None,
        }
    }

    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token { kind }
    }
}
