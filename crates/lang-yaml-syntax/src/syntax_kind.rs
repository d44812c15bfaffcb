//! SyntaxKind enum for all tokens and nodes in the YAML and frontmatter CSTs.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the YAML CST and the outer frontmatter tree.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// `#` comment running to the end of the line
    COMMENT,
    /// Plain scalar text
    TEXT,
    /// Single- or double-quoted scalar, quotes included
    QUOTED,
    /// `-` sequence indicator (or part of plain text)
    DASH,
    /// `:` mapping indicator (or part of plain text)
    COLON,
    /// `,` flow entry separator
    COMMA,
    /// `[` opening a flow sequence
    LBRACKET,
    /// `]` closing a flow sequence
    RBRACKET,
    /// `{` opening a flow mapping
    LBRACE,
    /// `}` closing a flow mapping
    RBRACE,
    /// `|` literal block scalar indicator
    PIPE,
    /// `>` folded block scalar indicator
    GT,
    /// `?` explicit key indicator (or part of plain text)
    QUESTION,
    /// `---` document start marker (also the frontmatter delimiter)
    DIRECTIVE_END,
    /// `...` document end marker
    DOCUMENT_END,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root of a YAML tree
    STREAM,
    /// One YAML document inside the stream
    DOCUMENT,
    /// Indentation-based sequence (`- a`)
    BLOCK_SEQUENCE,
    /// Entry of a block sequence
    ITEM,
    /// Indentation-based mapping (`a: 1`)
    BLOCK_MAPPING,
    /// `key: value` entry of a block or flow mapping
    PAIR,
    /// Key half of a pair
    KEY,
    /// Plain (unquoted) scalar, possibly spanning several lines
    LITERAL,
    /// Quoted scalar
    QUOTED_LITERAL,
    /// `|` or `>` block scalar
    BLOCK_LITERAL,
    /// Indicator line of a block scalar
    BLOCK_LITERAL_HEADER,
    /// Body lines of a block scalar, possibly empty
    BLOCK_LITERAL_CONTENT,
    /// `[a, b]`
    FLOW_SEQUENCE,
    /// `{a: 1}`
    FLOW_MAPPING,
    /// `&name` property
    ANCHOR,
    /// `!tag` or `!!type` property
    TAG,
    /// `*name` reference to an anchored node
    ALIAS,

    /// Root of the outer frontmatter tree
    FRONTMATTER_DOCUMENT,
    /// A `---` delimiter line, line break included
    DASH_LINE,
    /// Text between the two delimiter lines
    FRONTMATTER_CONTENT,
    /// Everything after the frontmatter, or the whole document
    BODY,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace, newlines, comments).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::COMMENT)
    }

    /// Returns true for the collection closers `]` and `}`.
    pub fn is_flow_closer(self) -> bool {
        matches!(self, Self::RBRACKET | Self::RBRACE)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YamlLang {}

impl rowan::Language for YamlLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<YamlLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<YamlLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<YamlLang>;
