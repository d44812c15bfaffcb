//! Documents made of several languages.
//!
//! An outer grammar decides where the regions are; [`parse_mixed`] hands each
//! region to the language chosen for it and keeps the resulting trees as
//! [`Mount`]s at the region's offsets. Region boundaries always come from the
//! outer tree and are never recomputed here.
//!
//! [`FrontmatterLanguage`] is the one composition this crate ships:
//!
//! ```text
//! ---              ← Metadata (DASH_LINE)
//! title: Notes     ← Frontmatter, parsed as YAML
//! ---              ← Metadata (DASH_LINE)
//! Body text...     ← Body, parsed by the content language
//! ```

use std::ops::Range;
use std::sync::Arc;

use lang_yaml_syntax::{SyntaxKind, SyntaxNode, frontmatter_green};
use rowan::GreenNode;

use crate::document::Document;
use crate::fold::FoldRange;
use crate::language::{Extension, Language, LanguageData, YamlLanguage};
use crate::resolve::node_range;

/// What a region of a frontmatter document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// The YAML between the dash lines
    Frontmatter,
    /// A `---` line
    Metadata,
    /// Everything after the frontmatter
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpan {
    pub kind: RegionKind,
    pub range: Range<usize>,
}

/// A region parsed by a nested language.
#[derive(Debug, Clone)]
pub struct Mount {
    range: Range<usize>,
    language: Arc<dyn Language>,
    tree: GreenNode,
}

impl Mount {
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn language(&self) -> &Arc<dyn Language> {
        &self.language
    }

    /// The nested tree. Its offsets are relative to the region start.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.tree.clone())
    }

    fn holds(&self, pos: usize) -> bool {
        self.range.start <= pos && pos <= self.range.end
    }
}

/// The outer tree plus the trees mounted into it.
#[derive(Debug, Clone)]
pub struct MixedTree {
    outer: SyntaxNode,
    mounts: Vec<Mount>,
}

impl MixedTree {
    pub fn outer(&self) -> &SyntaxNode {
        &self.outer
    }

    /// Mounted regions in document order.
    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    /// The frontmatter regions of the outer tree, in document order.
    pub fn regions(&self) -> Vec<RegionSpan> {
        self.outer
            .children()
            .filter_map(|node| {
                let kind = match node.kind() {
                    SyntaxKind::DASH_LINE => RegionKind::Metadata,
                    SyntaxKind::FRONTMATTER_CONTENT => RegionKind::Frontmatter,
                    SyntaxKind::BODY => RegionKind::Body,
                    _ => return None,
                };
                Some(RegionSpan {
                    kind,
                    range: node_range(&node),
                })
            })
            .collect()
    }

    /// Indentation for a new line at `pos`, answered by the language
    /// mounted where `pos` is. Mounts start at line starts, so the nested
    /// language sees the same columns as the whole document.
    pub fn indent_for(&self, doc: &Document, pos: usize, unit: u32) -> Option<u32> {
        let mount = self.mounts.iter().find(|m| m.holds(pos))?;
        let local = doc.sub_document(mount.range());
        mount
            .language
            .indent(&mount.syntax(), &local, pos - mount.range.start, unit)
    }

    /// Folds of every mounted language, in document coordinates.
    pub fn fold_ranges(&self, doc: &Document) -> Vec<FoldRange> {
        self.mounts
            .iter()
            .flat_map(|mount| {
                let local = doc.sub_document(mount.range());
                mount
                    .language
                    .fold_ranges(&mount.syntax(), &local)
                    .into_iter()
                    .map(|fold| fold.shifted(mount.range.start))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

fn collect_mounts<F>(node: &SyntaxNode, nest: &F, mounts: &mut Vec<Mount>)
where
    F: Fn(&SyntaxNode) -> Option<Arc<dyn Language>>,
{
    if let Some(language) = nest(node) {
        let range = node_range(node);
        let tree = language.parse(&node.text().to_string());
        log::debug!("Mounted {} at {:?}", language.name(), range);
        mounts.push(Mount {
            range,
            language,
            tree,
        });
        return;
    }
    for child in node.children() {
        collect_mounts(&child, nest, mounts);
    }
}

/// Parse `text` with `outer`, then parse every node that `nest` assigns a
/// language to with that language. Nodes inside a mounted node are not
/// visited.
pub fn parse_mixed<F>(text: &str, outer: &dyn Language, nest: F) -> MixedTree
where
    F: Fn(&SyntaxNode) -> Option<Arc<dyn Language>>,
{
    let outer = SyntaxNode::new_root(outer.parse(text));
    let mut mounts = Vec::new();
    collect_mounts(&outer, &nest, &mut mounts);
    MixedTree { outer, mounts }
}

/// The outer grammar: dash lines, frontmatter content, body.
#[derive(Debug, Clone, Copy)]
struct FrontmatterGrammar;

impl Language for FrontmatterGrammar {
    fn name(&self) -> &'static str {
        "frontmatter"
    }

    fn parse(&self, text: &str) -> GreenNode {
        frontmatter_green(text)
    }
}

/// A document in a content language with optional YAML frontmatter.
#[derive(Debug, Clone)]
pub struct FrontmatterLanguage {
    content: Arc<dyn Language>,
    yaml: Arc<dyn Language>,
}

impl FrontmatterLanguage {
    pub fn new(content: Arc<dyn Language>) -> Self {
        Self {
            content,
            yaml: Arc::new(YamlLanguage),
        }
    }

    pub fn name(&self) -> &'static str {
        "yaml-frontmatter"
    }

    /// The language of the body.
    pub fn content(&self) -> &Arc<dyn Language> {
        &self.content
    }

    pub fn data(&self) -> LanguageData {
        LanguageData::new(self.name())
    }

    pub fn parse(&self, text: &str) -> MixedTree {
        parse_mixed(text, &FrontmatterGrammar, |node| match node.kind() {
            SyntaxKind::FRONTMATTER_CONTENT => Some(Arc::clone(&self.yaml)),
            SyntaxKind::BODY => Some(Arc::clone(&self.content)),
            _ => None,
        })
    }
}

/// [`FrontmatterLanguage`] with the extensions that came with its content
/// language.
#[derive(Debug, Clone)]
pub struct FrontmatterSupport {
    pub language: FrontmatterLanguage,
    pub extensions: Vec<Arc<dyn Extension>>,
}

impl FrontmatterSupport {
    pub fn extensions(&self) -> &[Arc<dyn Extension>] {
        &self.extensions
    }
}
