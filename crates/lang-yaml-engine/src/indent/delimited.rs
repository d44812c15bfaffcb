use lang_yaml_syntax::SyntaxNode;

use super::IndentContext;

/// Indentation inside a bracketed collection.
///
/// Lines inside the collection sit `units` levels deeper than the line
/// holding the opening bracket; a line starting with the closing bracket
/// goes back to that line's indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedIndent {
    closing: char,
    units: u32,
}

impl DelimitedIndent {
    pub const fn new(closing: char) -> Self {
        Self { closing, units: 1 }
    }

    pub fn indent(&self, cx: &IndentContext<'_>, node: &SyntaxNode) -> u32 {
        let base = cx.base_indent_for(node);
        if cx.text_after().trim_start().starts_with(self.closing) {
            base
        } else {
            base + cx.unit() * self.units
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use lang_yaml_syntax::{SyntaxKind, parse};
    use rstest::rstest;

    fn delimited(text: &str, pos: usize, rule: DelimitedIndent) -> u32 {
        let root = parse(text);
        let doc = Document::new(text);
        let cx = IndentContext::new(&root, &doc, pos, 2);
        let collection = root
            .descendants()
            .find(|n| matches!(n.kind(), SyntaxKind::FLOW_SEQUENCE | SyntaxKind::FLOW_MAPPING))
            .unwrap();
        rule.indent(&cx, &collection)
    }

    #[rstest]
    #[case("[1,\n  2\n]", 3, 2)]
    #[case("[1,\n  2\n]", 8, 0)]
    #[case("[1,\n  2\n   ]  ", 8, 0)]
    #[case("  key: [1,\n", 10, 4)]
    #[case("[1, ]", 4, 0)]
    fn bracket_rule(#[case] text: &str, #[case] pos: usize, #[case] expected: u32) {
        assert_eq!(delimited(text, pos, DelimitedIndent::new(']')), expected);
    }

    #[test]
    fn other_closer_does_not_dedent() {
        assert_eq!(delimited("{a: 1,\n]", 7, DelimitedIndent::new('}')), 2);
    }

    #[test]
    fn open_collection_indents_one_unit() {
        assert_eq!(delimited("[1,", 3, DelimitedIndent::new(']')), 2);
    }
}
