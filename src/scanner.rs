use crate::token::{Token, TokenKind};
use phf::phf_map;
use std::iter::Enumerate;
use std::str::{Lines, SplitWhitespace};

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "print" => TokenKind::Verb,
    "remainder" => TokenKind::Verb,
    "add" => TokenKind::Verb,
    "subtract" => TokenKind::Verb,
    "if" => TokenKind::Conditional,
    "loop" => TokenKind::Loop,
    ";" => TokenKind::Punctuation,
    "|" => TokenKind::Punctuation,
    "is_less_than" => TokenKind::Comparator,
    "is_greater_than" => TokenKind::Comparator,
    "is_equal_to" => TokenKind::Comparator,
    "is_not_equal_to" => TokenKind::Comparator,
};

/// Splits source text on whitespace and classifies each word. Scanning never
/// fails: a word that matches nothing becomes `TokenKind::Unknown`, since
/// literals and free-text print arguments have to pass through untouched.
pub struct Scanner<'a> {
    lines: Enumerate<Lines<'a>>,
    words: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(word) = self.words.next() {
                return Some(Token {
                    kind: classify(word),
                    lexeme: word.to_string(),
                    line: self.line,
                });
            }
            let (index, line) = self.lines.next()?;
            self.line = index + 1;
            self.words = line.split_whitespace();
        }
    }
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            lines: src.lines().enumerate(),
            words: "".split_whitespace(),
            line: 0,
        }
    }

    pub fn scan_tokens(self) -> Vec<Token> {
        self.collect()
    }
}

// First match wins. `declare`/`assign` match on substring; the
// exact-spelling check happens in the parser.
fn classify(word: &str) -> TokenKind {
    if word.starts_with('$') {
        TokenKind::Identifier
    } else if word.contains("declare") || word.contains("assign") {
        TokenKind::Verb
    } else if let Some(kind) = KEYWORDS.get(word) {
        kind.clone()
    } else if word.contains("type_") {
        TokenKind::TypeTag
    } else {
        TokenKind::Unknown
    }
}
