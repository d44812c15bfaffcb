//! The block-structure walker.

use lang_yaml_syntax::{SyntaxKind, SyntaxNode};

use super::IndentContext;
use crate::resolve::node_range;

/// What one ancestor says about the indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Decided(u32),
    /// No opinion, and outer nodes don't get a say either
    Stop,
    Continue,
}

fn step(cx: &IndentContext<'_>, node: &SyntaxNode) -> Step {
    let range = node_range(node);
    match node.kind() {
        SyntaxKind::BLOCK_LITERAL_CONTENT if !range.is_empty() => {
            Step::Decided(cx.base_indent_for(node))
        }
        SyntaxKind::BLOCK_LITERAL => Step::Decided(cx.base_indent_for(node) + cx.unit()),
        SyntaxKind::BLOCK_SEQUENCE | SyntaxKind::BLOCK_MAPPING => {
            Step::Decided(cx.column(range.start))
        }
        SyntaxKind::QUOTED_LITERAL => Step::Stop,
        SyntaxKind::LITERAL => {
            let col = cx.column(range.start);
            if col == cx.line_indent(range.start) {
                // Starts its own line
                Step::Decided(col)
            } else if range.end > cx.pos() {
                Step::Stop
            } else {
                Step::Continue
            }
        }
        _ => Step::Continue,
    }
}

/// Indentation from the block structure around the cursor.
///
/// Walks up from the node ending at or around the cursor. Only nodes that
/// reach the cursor are consulted; the first one with an opinion decides.
pub fn stream_indent(cx: &IndentContext<'_>) -> Option<u32> {
    for node in cx.node().ancestors() {
        if node_range(&node).end < cx.pos() {
            break;
        }
        match step(cx, &node) {
            Step::Decided(indent) => {
                log::trace!("{:?} at {} -> {}", node.kind(), cx.pos(), indent);
                return Some(indent);
            }
            Step::Stop => {
                log::trace!("{:?} at {} -> no opinion", node.kind(), cx.pos());
                return None;
            }
            Step::Continue => {}
        }
    }
    None
}
