//! Replays parser events into a Rowan green tree.

use rowan::GreenNodeBuilder;

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    tokens: std::slice::Iter<'t, Token<'input>>,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens: tokens.iter(),
            events,
        }
    }

    pub fn finish(mut self) -> SyntaxNode {
        let mut kinds = Vec::new();

        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    kinds.push(kind);
                    let mut next = forward_parent;
                    while let Some(idx) = next {
                        match std::mem::replace(&mut self.events[idx], Event::Placeholder) {
                            Event::Start {
                                kind,
                                forward_parent,
                            } => {
                                kinds.push(kind);
                                next = forward_parent;
                            }
                            _ => unreachable!("forward parent must be a Start event"),
                        }
                    }
                    // Outermost wrapper first
                    for kind in kinds.drain(..).rev() {
                        self.builder.start_node(kind.into());
                    }
                }
                Event::Token { kind } => self.token(kind),
                Event::Finish => self.builder.finish_node(),
                Event::Placeholder => {}
            }
        }

        SyntaxNode::new_root(self.builder.finish())
    }

    fn token(&mut self, kind: SyntaxKind) {
        if let Some(token) = self.tokens.next() {
            self.builder.token(kind.into(), token.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokens_are_taken_in_source_order() {
        let input = "a: b";
        let tokens = lex(input);
        let events = vec![
            Event::start(SyntaxKind::STREAM),
            Event::token(SyntaxKind::TEXT),
            Event::token(SyntaxKind::COLON),
            Event::token(SyntaxKind::WHITESPACE),
            Event::start(SyntaxKind::LITERAL),
            Event::token(SyntaxKind::TEXT),
            Event::Finish,
            Event::Finish,
        ];

        let tree = Sink::new(&tokens, events).finish();

        assert_eq!(tree.kind(), SyntaxKind::STREAM);
        assert_eq!(tree.text().to_string(), input);
        assert_eq!(
            tree.first_child().map(|n| n.text().to_string()),
            Some("b".to_string())
        );
    }

    #[test]
    fn forward_parent_wraps_completed_node() {
        let tokens = lex("k");

        // LITERAL at index 1 points at a KEY start pushed later (index 4)
        let events = vec![
            Event::start(SyntaxKind::STREAM),
            Event::Start {
                kind: SyntaxKind::LITERAL,
                forward_parent: Some(4),
            },
            Event::token(SyntaxKind::TEXT),
            Event::Finish,
            Event::start(SyntaxKind::KEY),
            Event::Finish,
            Event::Finish,
        ];

        let tree = Sink::new(&tokens, events).finish();
        let key = tree.first_child();

        assert_eq!(key.as_ref().map(|n| n.kind()), Some(SyntaxKind::KEY));
        assert_eq!(
            key.and_then(|n| n.first_child()).map(|n| n.kind()),
            Some(SyntaxKind::LITERAL)
        );
    }

    #[test]
    fn abandoned_slots_are_skipped() {
        let tokens = lex("x");
        let events = vec![
            Event::start(SyntaxKind::STREAM),
            Event::Placeholder,
            Event::token(SyntaxKind::TEXT),
            Event::Finish,
        ];

        let tree = Sink::new(&tokens, events).finish();

        assert_eq!(tree.children().count(), 0);
        assert_eq!(tree.text().to_string(), "x");
    }
}
