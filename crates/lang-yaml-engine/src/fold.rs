//! Fold ranges.
//!
//! Foldable kinds:
//!
//! - `FLOW_MAPPING` / `FLOW_SEQUENCE` fold their inside, between the
//!   brackets
//! - `ITEM`, `PAIR` and `BLOCK_LITERAL` fold from the end of their first
//!   line to their end, so the line introducing them stays visible

use std::ops::Range;

use lang_yaml_syntax::{SyntaxKind, SyntaxNode};

use crate::document::Document;
use crate::resolve::{Side, node_range, resolve};

/// A collapsible byte range. `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoldRange {
    pub from: usize,
    pub to: usize,
}

impl FoldRange {
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// The same range moved `offset` bytes to the right.
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            from: self.from + offset,
            to: self.to + offset,
        }
    }
}

impl From<FoldRange> for Range<usize> {
    fn from(fold: FoldRange) -> Self {
        fold.from..fold.to
    }
}

/// Fold everything between a collection's opening bracket and its closing
/// bracket, or its end when it was never closed.
pub fn fold_inside(node: &SyntaxNode) -> Option<FoldRange> {
    let first = node.first_child_or_token()?;
    let last = node.last_child_or_token()?;
    let from = usize::from(first.text_range().end());
    let to = if last.kind().is_flow_closer() && last.as_token().is_some() {
        usize::from(last.text_range().start())
    } else {
        node_range(node).end
    };
    (from < to).then_some(FoldRange { from, to })
}

/// The fold range of `node`, if its kind folds.
pub fn fold_range(node: &SyntaxNode, doc: &Document) -> Option<FoldRange> {
    match node.kind() {
        SyntaxKind::FLOW_MAPPING | SyntaxKind::FLOW_SEQUENCE => fold_inside(node),
        SyntaxKind::ITEM | SyntaxKind::PAIR | SyntaxKind::BLOCK_LITERAL => {
            let range = node_range(node);
            let from = doc.line_at(range.start).to;
            (from <= range.end).then_some(FoldRange {
                from,
                to: range.end,
            })
        }
        _ => None,
    }
}

/// Every non-empty fold under `root`, in document order. Nested nodes that
/// fold the same span are reported once.
pub fn fold_ranges(root: &SyntaxNode, doc: &Document) -> Vec<FoldRange> {
    let mut folds: Vec<FoldRange> = root
        .descendants()
        .filter_map(|node| fold_range(&node, doc))
        .filter(|fold| !fold.is_empty())
        .collect();
    folds.dedup();
    folds
}

/// The fold offered on line `number` (1-based): the outermost fold that
/// starts on the line and ends after it.
pub fn fold_at_line(root: &SyntaxNode, doc: &Document, number: usize) -> Option<FoldRange> {
    let line = doc.line(number)?;
    let (start, end) = (line.from, line.to);

    let mut found = None;
    for node in resolve(root, end, Side::After).ancestors() {
        let range = node_range(&node);
        if range.end <= end || range.start > end {
            continue;
        }
        if found.is_some() && range.start < start {
            break;
        }
        if let Some(fold) = fold_range(&node, doc) {
            if fold.from >= start && fold.from <= end && fold.to > end {
                found = Some(fold);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use lang_yaml_syntax::parse;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn fold(from: usize, to: usize) -> FoldRange {
        FoldRange { from, to }
    }

    fn folds(text: &str) -> Vec<FoldRange> {
        fold_ranges(&parse(text), &Document::new(text))
    }

    fn first(text: &str, kind: SyntaxKind) -> SyntaxNode {
        parse(text)
            .descendants()
            .find(|n| n.kind() == kind)
            .unwrap()
    }

    #[test]
    fn pair_folds_after_its_first_line() {
        assert_eq!(folds("a:\n  b: 1\n  c: 2\n"), vec![fold(2, 16)]);
    }

    #[test]
    fn anchored_and_tagged_pairs_fold_their_nested_mapping() {
        assert_eq!(
            folds("base: &base\n  x: 1\n  y: 2\nother: 3\n"),
            vec![fold(11, 25)]
        );
        assert_eq!(folds("a: !!map\n  b: 1\n"), vec![fold(8, 15)]);
    }

    #[test]
    fn explicit_key_pair_folds_after_the_key_line() {
        assert_eq!(folds("? a\n: b\n"), vec![fold(3, 7)]);
    }

    #[test]
    fn single_line_nodes_fold_to_nothing() {
        let text = "a: 1";
        let pair = first(text, SyntaxKind::PAIR);
        assert_eq!(fold_range(&pair, &Document::new(text)), Some(fold(4, 4)));
        assert!(folds(text).is_empty());
    }

    #[test]
    fn trailing_comment_makes_a_node_unfoldable() {
        let text = "a: 1 # note";
        let pair = first(text, SyntaxKind::PAIR);
        assert_eq!(fold_range(&pair, &Document::new(text)), None);
    }

    #[test]
    fn nested_nodes_with_the_same_span_fold_once() {
        // The item, the pair and the block literal all end at 16
        assert_eq!(folds("- a\n- b: |\n    x\n"), vec![fold(10, 16)]);
    }

    #[test]
    fn flow_collections_fold_inside_brackets() {
        let text = "key: [\n  1,\n  2\n]\n";
        assert_eq!(folds(text), vec![fold(6, 17), fold(6, 16)]);
    }

    #[rstest]
    #[case("[]", None)]
    #[case("{}", None)]
    #[case("[ ]", Some(fold(1, 2)))]
    #[case("{a: 1}", Some(fold(1, 5)))]
    #[case("[1,\n2", Some(fold(1, 5)))]
    #[case("[", None)]
    fn fold_inside_cases(#[case] text: &str, #[case] expected: Option<FoldRange>) {
        let collection = parse(text)
            .descendants()
            .find(|n| matches!(n.kind(), SyntaxKind::FLOW_SEQUENCE | SyntaxKind::FLOW_MAPPING))
            .unwrap();
        assert_eq!(fold_inside(&collection), expected);
    }

    #[test]
    fn other_kinds_do_not_fold() {
        let text = "a:\n  b: 1\n";
        let doc = Document::new(text);
        let mapping = first(text, SyntaxKind::BLOCK_MAPPING);
        assert_eq!(fold_range(&mapping, &doc), None);
        assert_eq!(fold_range(&parse(text), &doc), None);
    }

    #[test]
    fn fold_at_line_prefers_the_outermost_fold() {
        let text = "key: [\n  1,\n  2\n]\n";
        let root = parse(text);
        let doc = Document::new(text);
        assert_eq!(fold_at_line(&root, &doc, 1), Some(fold(6, 17)));
        assert_eq!(fold_at_line(&root, &doc, 2), None);
        assert_eq!(fold_at_line(&root, &doc, 99), None);
    }

    #[test]
    fn fold_at_line_for_nested_pairs() {
        let text = "a:\n  b:\n    c: 1\nd: 2\n";
        let root = parse(text);
        let doc = Document::new(text);
        assert_eq!(fold_at_line(&root, &doc, 1), Some(fold(2, 16)));
        assert_eq!(fold_at_line(&root, &doc, 2), Some(fold(7, 16)));
        assert_eq!(fold_at_line(&root, &doc, 3), None);
        assert_eq!(fold_at_line(&root, &doc, 4), None);
    }

    #[test]
    fn fold_range_converts_to_a_range() {
        let range: Range<usize> = fold(3, 7).shifted(10).into();
        assert_eq!(range, 13..17);
    }
}
