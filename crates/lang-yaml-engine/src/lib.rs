//! # lang-yaml-engine
//!
//! Editor services over the trees built by `lang-yaml-syntax`:
//!
//! - [`indent`]: the column a new line should start at
//! - [`fold`]: collapsible ranges
//! - [`mixed`]: documents with YAML frontmatter and a body in another language
//!
//! Every service is a pure function of a tree, a [`Document`] and a
//! position. "No opinion" and "not foldable" are ordinary `None` results.
//!
//! ```
//! use lang_yaml_engine::{Document, Language, yaml};
//! use lang_yaml_syntax::SyntaxNode;
//!
//! let text = "a:\n  b: 1\n  c: 2";
//! let support = yaml();
//! let tree = SyntaxNode::new_root(support.language.parse(text));
//! let doc = Document::new(text);
//!
//! // A new line after `  b: 1` lines up with `b`
//! assert_eq!(support.language.indent(&tree, &doc, 9, 2), Some(2));
//! ```

pub mod document;
pub mod fold;
pub mod indent;
pub mod language;
pub mod mixed;
pub mod resolve;

use std::sync::Arc;

pub use document::{Document, DocumentError, Line};
pub use fold::{FoldRange, fold_at_line, fold_inside, fold_range, fold_ranges};
pub use indent::{DelimitedIndent, IndentContext, indent_for, stream_indent};
pub use language::{
    CommentTokens, ContentLanguage, Extension, Language, LanguageData, LanguageSupport, PlainText,
    YamlLanguage,
};
pub use mixed::{
    FrontmatterLanguage, FrontmatterSupport, MixedTree, Mount, RegionKind, RegionSpan, parse_mixed,
};
pub use resolve::{Side, resolve};

/// YAML language support.
pub fn yaml() -> LanguageSupport {
    LanguageSupport::new(Arc::new(YamlLanguage))
}

/// Support for documents in `content` with optional YAML frontmatter.
///
/// When `content` is a [`LanguageSupport`], its extensions are passed
/// through unchanged.
pub fn yaml_frontmatter(content: impl Into<ContentLanguage>) -> FrontmatterSupport {
    let (language, extensions) = content.into().into_parts();
    FrontmatterSupport {
        language: FrontmatterLanguage::new(language),
        extensions,
    }
}
