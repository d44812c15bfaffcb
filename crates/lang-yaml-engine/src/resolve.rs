//! Position to node resolution.

use std::ops::Range;

use lang_yaml_syntax::SyntaxNode;

/// Which nodes count as "at" a position that sits on a node boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Nodes ending at the position: `from < pos <= to`
    Before,
    /// Only nodes strictly around the position: `from < pos < to`
    Around,
    /// Nodes starting at the position: `from <= pos < to`
    After,
}

impl Side {
    fn holds(self, range: &Range<usize>, pos: usize) -> bool {
        match self {
            Side::Before => range.start < pos && pos <= range.end,
            Side::Around => range.start < pos && pos < range.end,
            Side::After => range.start <= pos && pos < range.end,
        }
    }
}

/// Byte range of a node.
pub fn node_range(node: &SyntaxNode) -> Range<usize> {
    let range = node.text_range();
    usize::from(range.start())..usize::from(range.end())
}

/// The innermost node at `pos` under `root`, preferring nodes on `side` of
/// the position. Zero-length nodes are never entered. Returns `root` when
/// no child matches.
pub fn resolve(root: &SyntaxNode, pos: usize, side: Side) -> SyntaxNode {
    let mut node = root.clone();
    'descend: loop {
        for child in node.children() {
            let range = node_range(&child);
            if !range.is_empty() && side.holds(&range, pos) {
                node = child;
                continue 'descend;
            }
        }
        return node;
    }
}

/// Whether `ancestor` is `node` or one of its ancestors.
pub fn is_ancestor(ancestor: &SyntaxNode, node: &SyntaxNode) -> bool {
    node.ancestors().any(|n| n == *ancestor)
}
