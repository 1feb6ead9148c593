/// One case per verb, with names and literals already validated by the
/// parser. Position-encoded word arrays never survive past grouping.
#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    DeclareInt { name: String },
    DeclareBool { name: String },
    AssignInt { value: i64, name: String },
    AssignBool { value: bool, name: String },
    Remainder { source: String, divisor: i64, dest: String },
    Add { source: String, addend: i64, dest: String },
    Subtract { amount: i64, source: String, dest: String },
    Print { target: PrintTarget },
    If { lhs: String, comparator: Comparator, rhs: Operand, action: IfAction },
    Loop { count: i64, body: Vec<Stmt> },
}

/// A print argument is either a variable lookup (the word carried a `$`
/// sigil) or a bare word echoed verbatim.
#[derive(Debug, PartialEq, Clone)]
pub enum PrintTarget {
    Variable(String),
    Literal(String),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Comparator {
    IsEqualTo,
    IsNotEqualTo,
    IsLessThan,
    IsGreaterThan,
}

/// Right-hand side of a conditional, parsed eagerly. Whether it must be the
/// integer or the boolean arm is only known once the left-hand name is
/// resolved at run time.
#[derive(Debug, PartialEq, Clone)]
pub enum Operand {
    Int(i64),
    Bool(bool),
}

/// The single inline consequence of a conditional. `AssignBool` carries no
/// value: the comparator decides it, `false` for `is_not_equal_to` and
/// `true` otherwise.
#[derive(Debug, PartialEq, Clone)]
pub enum IfAction {
    Print(PrintTarget),
    AssignBool { name: String },
}
