//! Flow collections: `[a, b]` and `{a: 1, b}`.
//!
//! Flow content ignores indentation. A collection runs to its matching
//! closer; an unclosed one runs to the last entry before end of input or a
//! document marker, leaving trailing trivia to the enclosing node.

use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

use super::is_document_marker;

/// Parse a flow sequence or flow mapping. The parser must be on `[` or `{`.
pub(super) fn collection(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let (closer, kind) = if p.at(SyntaxKind::LBRACKET) {
        (SyntaxKind::RBRACKET, SyntaxKind::FLOW_SEQUENCE)
    } else {
        (SyntaxKind::RBRACE, SyntaxKind::FLOW_MAPPING)
    };

    let m = p.start();
    p.bump(); // opener

    loop {
        let n = p.peek_past_trivia();
        let next = p.nth(n);
        if next == SyntaxKind::EOF || is_document_marker(p, n) {
            break;
        }
        if next.is_flow_closer() && next != closer {
            // Belongs to an enclosing collection, or to nobody
            break;
        }

        p.bump_trivia();
        match next {
            SyntaxKind::COMMA => p.bump(),
            k if k == closer => {
                p.bump();
                break;
            }
            _ => entry(p, kind),
        }
    }

    m.complete(p, kind)
}

/// A `:` that separates a flow key from its value. After a quoted or
/// bracketed key the colon may follow directly (`"a":1`).
fn is_flow_colon(p: &Parser<'_, '_>, n: usize, adjacent: bool) -> bool {
    p.nth(n) == SyntaxKind::COLON
        && (adjacent
            || matches!(
                p.nth(n + 1),
                SyntaxKind::WHITESPACE
                    | SyntaxKind::NEWLINE
                    | SyntaxKind::EOF
                    | SyntaxKind::COMMA
                    | SyntaxKind::RBRACKET
                    | SyntaxKind::RBRACE
            ))
}

/// Parse one entry. In a mapping every entry is a PAIR; in a sequence only
/// entries with a `:` are.
fn entry(p: &mut Parser<'_, '_>, parent: SyntaxKind) {
    let json_key = matches!(
        p.current(),
        SyntaxKind::QUOTED | SyntaxKind::LBRACKET | SyntaxKind::LBRACE
    );
    let key = if is_flow_colon(p, 0, false) {
        None
    } else {
        Some(node(p))
    };

    let colon_at = if is_flow_colon(p, 0, json_key && key.is_some()) {
        Some(0)
    } else if p.at(SyntaxKind::WHITESPACE) && is_flow_colon(p, 1, false) {
        Some(1)
    } else {
        None
    };

    if colon_at.is_none() && parent != SyntaxKind::FLOW_MAPPING {
        return;
    }

    let pair = match key {
        Some(key) => key.precede(p).complete(p, SyntaxKind::KEY).precede(p),
        None => p.start(),
    };

    if let Some(offset) = colon_at {
        for _ in 0..=offset {
            p.bump();
        }
        let n = p.peek_past_trivia();
        let value_follows = !matches!(
            p.nth(n),
            SyntaxKind::COMMA | SyntaxKind::RBRACKET | SyntaxKind::RBRACE | SyntaxKind::EOF
        ) && !is_document_marker(p, n);
        if value_follows {
            p.bump_trivia();
            node(p);
        }
    }

    pair.complete(p, SyntaxKind::PAIR);
}

/// Parse a single flow node: a nested collection, a quoted scalar or a
/// plain scalar. Always consumes at least one token.
fn node(p: &mut Parser<'_, '_>) -> CompletedMarker {
    match p.current() {
        SyntaxKind::LBRACKET | SyntaxKind::LBRACE => collection(p),
        SyntaxKind::QUOTED => {
            let m = p.start();
            p.bump();
            m.complete(p, SyntaxKind::QUOTED_LITERAL)
        }
        _ => plain(p),
    }
}

/// Whether a flow plain scalar ends at lookahead `n`.
fn at_plain_end(p: &Parser<'_, '_>, n: usize) -> bool {
    match p.nth(n) {
        SyntaxKind::COMMA
        | SyntaxKind::LBRACKET
        | SyntaxKind::RBRACKET
        | SyntaxKind::LBRACE
        | SyntaxKind::RBRACE
        | SyntaxKind::NEWLINE
        | SyntaxKind::EOF
        | SyntaxKind::COMMENT => true,
        SyntaxKind::COLON => is_flow_colon(p, n, false),
        _ => false,
    }
}

/// A plain scalar inside a flow collection. It stays on one line.
fn plain(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    p.bump();
    loop {
        let stop = if p.at(SyntaxKind::WHITESPACE) {
            at_plain_end(p, 1)
        } else {
            at_plain_end(p, 0)
        };
        if stop {
            break;
        }
        p.bump();
    }
    m.complete(p, SyntaxKind::LITERAL)
}
