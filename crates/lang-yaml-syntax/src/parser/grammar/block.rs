//! Block-level grammar rules.
//!
//! Block structure is decided by columns. Every rule that can span lines
//! takes the column its continuation lines must reach (`min_col`) or the
//! column of its own entries (`indent`).
//!
//! Anchors and tags (`&base`, `!!map`) are parsed as ANCHOR / TAG nodes in
//! front of the node they describe, inside the same parent. When they end a
//! line the node follows on the next lines, so in
//!
//! ```text
//! base: &base
//!   x: 1
//! ```
//!
//! the nested mapping is still the value of `base`.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{flow, is_document_marker};

/// Parse any block node starting at the current (significant) token.
///
/// Always consumes at least one token.
pub(super) fn block_node(p: &mut Parser<'_, '_>, min_col: usize) {
    if is_property(p, 0) && !is_mapping_entry(p, 0) {
        properties(p);
        if p.at_line_end() {
            let n = p.peek_past_trivia();
            if p.nth(n) != SyntaxKind::EOF
                && p.nth_column(n) >= min_col
                && !is_document_marker(p, n)
            {
                p.bump_trivia();
                block_node(p, min_col);
            }
            return;
        }
    }

    let indent = p.current_column();

    if is_sequence_dash(p, 0) {
        block_sequence(p, indent);
    } else if matches!(p.current(), SyntaxKind::PIPE | SyntaxKind::GT) {
        block_literal(p, min_col);
    } else if is_mapping_entry(p, 0) {
        block_mapping(p, indent);
    } else {
        inline_value(p, min_col);
    }
}

/// Parse a node that may follow a key on the same line: a scalar, a block
/// literal or a flow collection. Mappings and sequences can't start here.
fn inline_value(p: &mut Parser<'_, '_>, min_col: usize) {
    match p.current() {
        SyntaxKind::PIPE | SyntaxKind::GT => block_literal(p, min_col),
        SyntaxKind::LBRACKET | SyntaxKind::LBRACE => {
            flow::collection(p);
        }
        SyntaxKind::QUOTED => {
            quoted(p);
        }
        SyntaxKind::TEXT if is_alias(p, 0) => {
            let m = p.start();
            bump_name(p);
            m.complete(p, SyntaxKind::ALIAS);
        }
        SyntaxKind::RBRACKET | SyntaxKind::RBRACE | SyntaxKind::COMMA => {
            let m = p.start();
            p.bump();
            m.complete(p, SyntaxKind::ERROR);
        }
        _ => plain_scalar(p, min_col),
    }
}

/// `-` followed by a blank starts a sequence entry; `-1` is plain text.
fn is_sequence_dash(p: &Parser<'_, '_>, n: usize) -> bool {
    p.nth(n) == SyntaxKind::DASH
        && matches!(
            p.nth(n + 1),
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        )
}

/// `?` followed by a blank starts an explicit key.
fn is_explicit_key(p: &Parser<'_, '_>, n: usize) -> bool {
    p.nth(n) == SyntaxKind::QUESTION
        && matches!(
            p.nth(n + 1),
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        )
}

/// `&anchor`, `!tag` or `!!type`.
fn is_property(p: &Parser<'_, '_>, n: usize) -> bool {
    p.nth(n) == SyntaxKind::TEXT && p.nth_text(n).starts_with(['&', '!'])
}

/// `*anchor`
fn is_alias(p: &Parser<'_, '_>, n: usize) -> bool {
    p.nth(n) == SyntaxKind::TEXT && p.nth_text(n).starts_with('*')
}

/// Bump a property or alias name: its first token and the tokens glued to
/// it (`&my-anchor`, `!python/name:x`), stopping at a blank or an
/// indicator colon.
fn bump_name(p: &mut Parser<'_, '_>) {
    p.bump();
    loop {
        match p.current() {
            SyntaxKind::TEXT | SyntaxKind::DASH | SyntaxKind::GT | SyntaxKind::QUESTION => p.bump(),
            SyntaxKind::COLON if !is_indicator_colon(p, 0) => p.bump(),
            _ => break,
        }
    }
}

/// Parse the anchors and tags in front of a node, with the blanks between
/// them. A blank before a line break or an indicator colon is left alone.
fn properties(p: &mut Parser<'_, '_>) {
    while is_property(p, 0) {
        let kind = if p.nth_text(0).starts_with('&') {
            SyntaxKind::ANCHOR
        } else {
            SyntaxKind::TAG
        };
        let m = p.start();
        bump_name(p);
        m.complete(p, kind);

        if p.at(SyntaxKind::WHITESPACE) && !p.at_line_end() && !is_indicator_colon(p, 1) {
            p.bump();
        }
    }
}

/// A `:` that separates a key from its value.
fn is_indicator_colon(p: &Parser<'_, '_>, n: usize) -> bool {
    p.nth(n) == SyntaxKind::COLON
        && matches!(
            p.nth(n + 1),
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        )
}

/// Whether the line starting at token `n` is a mapping entry: an explicit
/// `? key`, or an indicator colon outside of brackets before the end of the
/// line.
fn is_mapping_entry(p: &Parser<'_, '_>, n: usize) -> bool {
    if is_explicit_key(p, n) {
        return true;
    }
    if is_document_marker(p, n)
        || is_sequence_dash(p, n)
        || matches!(p.nth(n), SyntaxKind::PIPE | SyntaxKind::GT)
    {
        return false;
    }

    let mut depth = 0usize;
    let mut i = n;
    loop {
        match p.nth(i) {
            SyntaxKind::NEWLINE | SyntaxKind::EOF | SyntaxKind::COMMENT => return false,
            SyntaxKind::LBRACKET | SyntaxKind::LBRACE => depth += 1,
            SyntaxKind::RBRACKET | SyntaxKind::RBRACE => depth = depth.saturating_sub(1),
            SyntaxKind::COLON if depth == 0 && is_indicator_colon(p, i) => return true,
            _ => {}
        }
        i += 1;
    }
}

/// Parse a block sequence whose dashes sit at `indent`.
fn block_sequence(p: &mut Parser<'_, '_>, indent: usize) {
    let m = p.start();

    loop {
        item(p, indent);

        let n = p.peek_past_trivia();
        if p.nth_column(n) == indent && p.nth_starts_line(n) && is_sequence_dash(p, n) {
            p.bump_trivia();
        } else {
            break;
        }
    }

    m.complete(p, SyntaxKind::BLOCK_SEQUENCE);
}

/// `- value`
fn item(p: &mut Parser<'_, '_>, indent: usize) {
    let m = p.start();
    p.bump(); // `-`
    block_value(p, indent, false);
    m.complete(p, SyntaxKind::ITEM);
}

/// Parse a block mapping whose keys sit at `indent`.
fn block_mapping(p: &mut Parser<'_, '_>, indent: usize) {
    let m = p.start();

    loop {
        pair(p, indent);

        let n = p.peek_past_trivia();
        if p.nth_column(n) == indent && p.nth_starts_line(n) && is_mapping_entry(p, n) {
            p.bump_trivia();
        } else {
            break;
        }
    }

    m.complete(p, SyntaxKind::BLOCK_MAPPING);
}

/// `key: value`, or `? key` with its `: value` on a later line at the
/// same column.
fn pair(p: &mut Parser<'_, '_>, indent: usize) {
    let m = p.start();

    if is_explicit_key(p, 0) {
        explicit_key(p, indent);
        let n = p.peek_past_trivia();
        if p.nth_column(n) == indent && p.nth_starts_line(n) && is_indicator_colon(p, n) {
            p.bump_trivia();
        } else {
            m.complete(p, SyntaxKind::PAIR);
            return;
        }
    } else if !p.at(SyntaxKind::COLON) {
        key(p);
    }
    if p.at(SyntaxKind::WHITESPACE) && p.nth(1) == SyntaxKind::COLON {
        p.bump();
    }
    p.eat(SyntaxKind::COLON);
    block_value(p, indent, true);

    m.complete(p, SyntaxKind::PAIR);
}

/// Whether the key ends here: at its indicator colon or the end of the line.
fn at_key_end(p: &Parser<'_, '_>) -> bool {
    match p.current() {
        SyntaxKind::NEWLINE | SyntaxKind::EOF | SyntaxKind::COMMENT => true,
        SyntaxKind::COLON => is_indicator_colon(p, 0),
        SyntaxKind::WHITESPACE => {
            matches!(
                p.nth(1),
                SyntaxKind::NEWLINE | SyntaxKind::EOF | SyntaxKind::COMMENT
            ) || is_indicator_colon(p, 1)
        }
        _ => false,
    }
}

fn key(p: &mut Parser<'_, '_>) {
    let m = p.start();

    properties(p);
    match p.current() {
        SyntaxKind::QUOTED => {
            quoted(p);
        }
        SyntaxKind::LBRACKET | SyntaxKind::LBRACE => {
            flow::collection(p);
        }
        _ if at_key_end(p) => {}
        _ => {
            let lit = p.start();
            while !at_key_end(p) {
                p.bump();
            }
            lit.complete(p, SyntaxKind::LITERAL);
        }
    }

    // Anything between a quoted or flow key and its colon
    if !at_key_end(p) {
        let err = p.start();
        while !at_key_end(p) {
            p.bump();
        }
        err.complete(p, SyntaxKind::ERROR);
    }

    m.complete(p, SyntaxKind::KEY);
}

/// `? key`: the key is parsed like the value of an item.
fn explicit_key(p: &mut Parser<'_, '_>, indent: usize) {
    let m = p.start();
    p.bump(); // `?`
    block_value(p, indent, false);
    m.complete(p, SyntaxKind::KEY);
}

/// Parse the value of an item or pair owned by a node at `owner_indent`.
///
/// The value either follows on the same line or starts on a later line
/// indented deeper than the owner. A pair also accepts a sequence at its
/// own column (`key:\n- a`). Properties ending the owner's line stay in
/// the owner and the value is looked for on the next lines.
fn block_value(p: &mut Parser<'_, '_>, owner_indent: usize, is_pair: bool) {
    let min_col = owner_indent + 1;

    if !p.at_line_end() {
        p.eat(SyntaxKind::WHITESPACE);
        if is_pair {
            properties(p);
            if p.at_line_end() {
                nested_value(p, owner_indent, is_pair);
                return;
            }
            inline_value(p, min_col);
        } else {
            block_node(p, min_col);
        }
        if !p.at_line_end() {
            error_rest_of_line(p);
        }
        return;
    }

    nested_value(p, owner_indent, is_pair);
}

/// A value starting on a later line than its owner.
fn nested_value(p: &mut Parser<'_, '_>, owner_indent: usize, is_pair: bool) {
    let min_col = owner_indent + 1;
    let n = p.peek_past_trivia();
    if p.nth(n) == SyntaxKind::EOF {
        return;
    }

    let col = p.nth_column(n);
    if col > owner_indent && !is_document_marker(p, n) {
        p.bump_trivia();
        block_node(p, min_col);
    } else if is_pair && col == owner_indent && is_sequence_dash(p, n) {
        p.bump_trivia();
        block_sequence(p, col);
    }
}

/// Wrap the remainder of the current line in an ERROR node.
fn error_rest_of_line(p: &mut Parser<'_, '_>) {
    p.eat(SyntaxKind::WHITESPACE);
    let m = p.start();
    while !p.at_line_end() {
        p.bump();
    }
    m.complete(p, SyntaxKind::ERROR);
}

fn quoted(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    m.complete(p, SyntaxKind::QUOTED_LITERAL);
}

/// Consume the rest of the line, stopping before trailing blanks and comments.
fn plain_line(p: &mut Parser<'_, '_>) {
    while !p.at_line_end() {
        p.bump();
    }
}

/// Parse a plain scalar. Continuation lines must reach `min_col` and can't
/// be mapping entries, comments or document markers.
fn plain_scalar(p: &mut Parser<'_, '_>, min_col: usize) {
    let m = p.start();

    // The first token is never trivia, so this always makes progress.
    p.bump();
    plain_line(p);

    loop {
        // Only line breaks and indentation may sit between scalar lines.
        let mut n = usize::from(p.at(SyntaxKind::WHITESPACE));
        if p.nth(n) != SyntaxKind::NEWLINE {
            break;
        }
        while matches!(p.nth(n), SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE) {
            n += 1;
        }

        let continues = !matches!(p.nth(n), SyntaxKind::EOF | SyntaxKind::COMMENT)
            && p.nth_column(n) >= min_col
            && !is_document_marker(p, n)
            && !is_mapping_entry(p, n);
        if !continues {
            break;
        }

        for _ in 0..n {
            p.bump();
        }
        plain_line(p);
    }

    m.complete(p, SyntaxKind::LITERAL);
}

/// Parse a `|` or `>` block scalar.
///
/// The header runs to the end of its line. Content lines follow the line
/// break; their indentation is set by the first non-blank one and must reach
/// `min_col`. Content ends at the end of the last non-blank content line.
/// Without content lines the content node is empty and sits at the end of
/// the header.
fn block_literal(p: &mut Parser<'_, '_>, min_col: usize) {
    let m = p.start();

    let header = p.start();
    while !matches!(p.current(), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
        p.bump();
    }
    header.complete(p, SyntaxKind::BLOCK_LITERAL_HEADER);

    match block_literal_extent(p, min_col) {
        Some(end) => {
            p.bump(); // line break after the header
            let content = p.start();
            for _ in 1..end {
                p.bump();
            }
            content.complete(p, SyntaxKind::BLOCK_LITERAL_CONTENT);
        }
        None => {
            p.start().complete(p, SyntaxKind::BLOCK_LITERAL_CONTENT);
        }
    }

    m.complete(p, SyntaxKind::BLOCK_LITERAL);
}

/// With the parser on the header's line break, find the lookahead index one
/// past the last token of the content, or `None` when there is no content.
fn block_literal_extent(p: &Parser<'_, '_>, min_col: usize) -> Option<usize> {
    let mut line_start = 1;
    let mut indent = None;
    let mut end = None;

    loop {
        let mut first = line_start;
        if p.nth(first) == SyntaxKind::WHITESPACE {
            first += 1;
        }
        match p.nth(first) {
            SyntaxKind::EOF => break,
            SyntaxKind::NEWLINE => {
                line_start = first + 1;
                continue;
            }
            _ => {}
        }

        let col = p.nth_column(first);
        let content_indent = *indent.get_or_insert(col);
        if col < content_indent || col < min_col || is_document_marker(p, first) {
            break;
        }

        let mut last = first;
        while !matches!(p.nth(last), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
            last += 1;
        }
        end = Some(last);
        if p.nth(last) == SyntaxKind::EOF {
            break;
        }
        line_start = last + 1;
    }

    end
}
