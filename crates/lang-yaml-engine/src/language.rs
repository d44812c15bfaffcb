//! Languages and their bundles.
//!
//! A [`Language`] turns text into a tree and may offer editor services on
//! that tree. A [`LanguageSupport`] bundles a language with auxiliary
//! [`Extension`]s that travel with it.

use std::fmt;
use std::sync::{Arc, OnceLock};

use lang_yaml_syntax::{SyntaxKind, SyntaxNode};
use regex::Regex;
use rowan::{GreenNode, GreenNodeBuilder};

use crate::document::Document;
use crate::fold::{self, FoldRange};
use crate::indent::{IndentContext, indent_for};

/// Comment markers of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommentTokens {
    pub line: Option<&'static str>,
}

/// Declarative facts about a language, for the editing surface.
#[derive(Debug, Clone)]
pub struct LanguageData {
    pub name: &'static str,
    pub comment_tokens: CommentTokens,
    /// Lines matching this should be reindented as soon as they're typed
    pub indent_on_input: Option<Regex>,
}

impl LanguageData {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            comment_tokens: CommentTokens::default(),
            indent_on_input: None,
        }
    }

    /// Whether typing has just completed a line that wants reindenting.
    pub fn should_reindent(&self, line: &str) -> bool {
        self.indent_on_input
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(line))
    }
}

/// A line holding nothing but a closing bracket.
fn closing_bracket_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*[\]\}]$").expect("Invalid closing bracket regex"))
}

/// A grammar plus optional editor services.
pub trait Language: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Parse `text` into a lossless tree.
    fn parse(&self, text: &str) -> GreenNode;

    /// Indentation for a new line at `pos`, `None` for no opinion.
    fn indent(&self, _tree: &SyntaxNode, _doc: &Document, _pos: usize, _unit: u32) -> Option<u32> {
        None
    }

    fn fold_ranges(&self, _tree: &SyntaxNode, _doc: &Document) -> Vec<FoldRange> {
        Vec::new()
    }

    fn data(&self) -> LanguageData {
        LanguageData::new(self.name())
    }
}

/// YAML with indentation and folding.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLanguage;

impl Language for YamlLanguage {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn parse(&self, text: &str) -> GreenNode {
        lang_yaml_syntax::parse(text).green().into_owned()
    }

    fn indent(&self, tree: &SyntaxNode, doc: &Document, pos: usize, unit: u32) -> Option<u32> {
        indent_for(&IndentContext::new(tree, doc, pos, unit))
    }

    fn fold_ranges(&self, tree: &SyntaxNode, doc: &Document) -> Vec<FoldRange> {
        fold::fold_ranges(tree, doc)
    }

    fn data(&self) -> LanguageData {
        LanguageData {
            name: self.name(),
            comment_tokens: CommentTokens { line: Some("#") },
            indent_on_input: Some(closing_bracket_line().clone()),
        }
    }
}

/// Unstructured text: one `BODY` node holding the whole input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl Language for PlainText {
    fn name(&self) -> &'static str {
        "text"
    }

    fn parse(&self, text: &str) -> GreenNode {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(SyntaxKind::BODY.into());
        if !text.is_empty() {
            builder.token(SyntaxKind::TEXT.into(), text);
        }
        builder.finish_node();
        builder.finish()
    }
}

/// Auxiliary behaviour shipped alongside a language (key bindings, lint
/// sources, ...). Opaque to this crate; it only carries them along.
pub trait Extension: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
}

/// A language bundled with its extensions.
#[derive(Debug, Clone)]
pub struct LanguageSupport {
    pub language: Arc<dyn Language>,
    pub extensions: Vec<Arc<dyn Extension>>,
}

impl LanguageSupport {
    pub fn new(language: Arc<dyn Language>) -> Self {
        Self {
            language,
            extensions: Vec::new(),
        }
    }

    pub fn with_extension(mut self, extension: Arc<dyn Extension>) -> Self {
        self.extensions.push(extension);
        self
    }
}

/// The body language of a mixed document: either a bare language or a
/// bundle whose extensions must be kept.
#[derive(Debug, Clone)]
pub enum ContentLanguage {
    Language(Arc<dyn Language>),
    Support(LanguageSupport),
}

impl ContentLanguage {
    pub fn language(language: impl Language + 'static) -> Self {
        Self::Language(Arc::new(language))
    }

    /// Split into the language and the extensions that travel with it.
    pub fn into_parts(self) -> (Arc<dyn Language>, Vec<Arc<dyn Extension>>) {
        match self {
            Self::Language(language) => (language, Vec::new()),
            Self::Support(support) => (support.language, support.extensions),
        }
    }
}

impl From<LanguageSupport> for ContentLanguage {
    fn from(support: LanguageSupport) -> Self {
        Self::Support(support)
    }
}

impl From<Arc<dyn Language>> for ContentLanguage {
    fn from(language: Arc<dyn Language>) -> Self {
        Self::Language(language)
    }
}

impl From<PlainText> for ContentLanguage {
    fn from(language: PlainText) -> Self {
        Self::language(language)
    }
}

impl From<YamlLanguage> for ContentLanguage {
    fn from(language: YamlLanguage) -> Self {
        Self::language(language)
    }
}
