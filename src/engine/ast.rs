//! Compiled representation of template source

/// One step of a compiled template body
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    /// Literal text, written through unchanged
    Text(String),
    /// An expression whose value is substituted, escaped per dialect
    Expr(Expr),
    /// A named block rendered at this position. The body is looked up in the
    /// block table at render time, so overrides reach nested references.
    Block(String),
}

/// An expression inside an action
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    /// `.`, the whole render datum
    This,
    /// `.a.b`, a key path into the render datum
    Path(Vec<String>),
    /// `name arg ...`, a helper invocation
    Call { name: String, args: Vec<Expr> },
    /// String literal
    Str(String),
    /// Number literal
    Num(f64),
}

pub(crate) type Program = Vec<Step>;

/// Result of parsing one source unit
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ParsedSource {
    /// Top-level steps outside any block
    pub body: Program,
    /// Every block defined in the source, in definition order
    pub blocks: Vec<(String, Program)>,
    /// Whether the top level holds anything beyond whitespace and comments.
    /// Decides whether an extend replaces the receiver's body.
    pub has_body: bool,
}
