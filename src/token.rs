#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

/// How a raw word classifies before any grammar is applied. Classification
/// is purely lexical, so a `Verb` here is only a *candidate* verb; the
/// parser decides whether its exact spelling is one it knows.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    /// A `$`-prefixed variable name.
    Identifier,
    /// One of the statement verbs (`declare_int`, `assign_bool`, `print`, ...).
    Verb,
    /// A `type_*` annotation. Recognized but never consumed downstream.
    TypeTag,
    /// The word `if`.
    Conditional,
    /// The word `loop`.
    Loop,
    /// A statement terminator, `;` or `|`.
    Punctuation,
    /// `is_equal_to`, `is_not_equal_to`, `is_less_than`, `is_greater_than`.
    Comparator,
    /// Anything else: literals, filler keywords (`to`, `by`, `save`, `times`),
    /// loop labels, the `:` body marker, free-text print arguments.
    Unknown,
}
