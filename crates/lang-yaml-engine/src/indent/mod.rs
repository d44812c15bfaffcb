//! Indentation suggestions.
//!
//! A query asks for the column of a new line started at `pos`. The answer
//! comes from the innermost node kind that has an opinion:
//!
//! - an open flow collection (`[` / `{`) answers with [`DelimitedIndent`]
//! - otherwise the stream walker in [`stream_indent`] decides from the
//!   block structure around the cursor
//!
//! `None` means "no opinion"; the caller falls back to its own default
//! (usually the previous line's indentation). It is a normal result, not an
//! error.

mod delimited;
mod stream;

pub use delimited::DelimitedIndent;
pub use stream::stream_indent;

use lang_yaml_syntax::{SyntaxKind, SyntaxNode};

use crate::document::Document;
use crate::resolve::{Side, is_ancestor, node_range, resolve};

/// Everything an indentation rule can look at. Built fresh for every query.
#[derive(Debug, Clone, Copy)]
pub struct IndentContext<'a> {
    root: &'a SyntaxNode,
    doc: &'a Document,
    pos: usize,
    unit: u32,
}

impl<'a> IndentContext<'a> {
    pub fn new(root: &'a SyntaxNode, doc: &'a Document, pos: usize, unit: u32) -> Self {
        Self {
            root,
            doc,
            pos: pos.min(doc.len()),
            unit,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Columns per indentation level.
    pub fn unit(&self) -> u32 {
        self.unit
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// The innermost node ending at or around the cursor.
    pub fn node(&self) -> SyntaxNode {
        resolve(self.root, self.pos, Side::Before)
    }

    pub fn column(&self, offset: usize) -> u32 {
        self.doc.column(offset)
    }

    pub fn line_indent(&self, offset: usize) -> u32 {
        self.doc.line_indent(offset)
    }

    /// The rest of the cursor's line.
    pub fn text_after(&self) -> String {
        self.doc.text_after(self.pos)
    }

    /// Indentation of the line that `node` effectively starts on.
    ///
    /// When the line holding `node`'s start begins inside some other node
    /// (a multi-line key, an earlier item's continuation), that node's first
    /// line is used instead, repeatedly, until the line start belongs to
    /// `node` or one of its ancestors.
    pub fn base_indent_for(&self, node: &SyntaxNode) -> u32 {
        let mut line = self.doc.line_at(node_range(node).start);
        loop {
            let mut at_break = resolve(self.root, line.from, Side::Around);
            while let Some(parent) = at_break.parent() {
                if node_range(&parent).start != node_range(&at_break).start {
                    break;
                }
                at_break = parent;
            }
            if at_break.parent().is_none() || is_ancestor(&at_break, node) {
                break;
            }
            line = self.doc.line_at(node_range(&at_break).start);
        }
        self.doc.line_indent(line.from)
    }
}

/// Whether a flow collection still holds the cursor: either the cursor is
/// before its end, or the collection was never closed.
fn encloses(collection: &SyntaxNode, pos: usize) -> bool {
    if pos < node_range(collection).end {
        return true;
    }
    let closer = match collection.kind() {
        SyntaxKind::FLOW_MAPPING => SyntaxKind::RBRACE,
        _ => SyntaxKind::RBRACKET,
    };
    collection
        .last_child_or_token()
        .is_none_or(|last| last.kind() != closer)
}

/// Suggest the indentation for a line started at the context's position.
pub fn indent_for(cx: &IndentContext<'_>) -> Option<u32> {
    for node in cx.node().ancestors() {
        let closing = match node.kind() {
            SyntaxKind::FLOW_MAPPING => '}',
            SyntaxKind::FLOW_SEQUENCE => ']',
            SyntaxKind::STREAM => return stream_indent(cx),
            _ => continue,
        };
        if encloses(&node, cx.pos()) {
            let indent = DelimitedIndent::new(closing).indent(cx, &node);
            log::trace!("{:?} at {} -> {}", node.kind(), cx.pos(), indent);
            return Some(indent);
        }
    }
    None
}
