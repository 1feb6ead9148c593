use std::fmt::{self, Display};
use std::result;

use crate::token::Token;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A statement's shape is violated at a known token.
    Parse { token: Token },
    /// The token stream ended before a statement was terminated.
    UnexpectedEnd,
    /// A read referenced a name absent from both variable mappings.
    UndefinedVariable { name: String },
    /// An integer operation was applied to a boolean name, or vice versa.
    TypeMismatch { name: String },
    /// A literal did not parse as the expected type, or a remainder
    /// divisor was zero.
    Value { lexeme: String },
    Io(std::io::Error),
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn parse<S: Into<String>>(token: Token, message: S) -> Error {
        let kind = ErrorKind::Parse { token };
        Error { kind, message: message.into() }
    }

    pub fn unexpected_end() -> Error {
        let kind = ErrorKind::UnexpectedEnd;
        Error { kind, message: "Unexpected end of input; statement was never terminated.".into() }
    }

    pub fn undefined_variable<S: Into<String>>(name: S) -> Error {
        let name = name.into();
        let message = format!("Undefined variable {}.", name);
        Error { kind: ErrorKind::UndefinedVariable { name }, message }
    }

    pub fn type_mismatch<N: Into<String>, S: Into<String>>(name: N, message: S) -> Error {
        let kind = ErrorKind::TypeMismatch { name: name.into() };
        Error { kind, message: message.into() }
    }

    pub fn value<L: Into<String>, S: Into<String>>(lexeme: L, message: S) -> Error {
        let kind = ErrorKind::Value { lexeme: lexeme.into() };
        Error { kind, message: message.into() }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ErrorKind::*;
        match self.kind() {
            Parse { token } => {
                write!(f, "[line {}] Parse error at '{}': {}", token.line, token.lexeme, self.message)
            }
            UnexpectedEnd => write!(f, "Parse error: {}", self.message),
            UndefinedVariable { .. } => write!(f, "Runtime error: {}", self.message),
            TypeMismatch { name } => write!(f, "Type mismatch at {}: {}", name, self.message),
            Value { lexeme } => write!(f, "Value error at '{}': {}", lexeme, self.message),
            Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error { kind: ErrorKind::Io(e), message: "IO error".into() }
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, e)
    }
}
