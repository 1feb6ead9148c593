use std::fmt::{self, Display};

#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum Value {
    Int(i64),
    Bool(bool),
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}
