use std::io::Write;

use crate::{
    environment::Environment,
    error::{Error, Result},
    stmt::{Comparator, IfAction, Operand, PrintTarget, Stmt},
    value::Value,
};

/// Walks the statement sequence and mutates the environment and/or the
/// output sink. The environment lives for the whole run; loop bodies execute
/// against it directly rather than in a child scope.
pub struct Interpreter<W> {
    environment: Environment,
    writer: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(writer: W) -> Self {
        Interpreter { environment: Environment::new(), writer }
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        for s in statements.iter() {
            self.execute(s)?;
        }
        Ok(())
    }

    fn execute(&mut self, s: &Stmt) -> Result<()> {
        match s {
            Stmt::DeclareInt { name } => {
                self.environment.declare_int(name);
                Ok(())
            }
            Stmt::DeclareBool { name } => {
                self.environment.declare_bool(name);
                Ok(())
            }
            Stmt::AssignInt { value, name } => self.environment.set_int(name, *value),
            Stmt::AssignBool { value, name } => self.environment.set_bool(name, *value),
            Stmt::Remainder { source, divisor, dest } => {
                if *divisor == 0 {
                    return Err(Error::value("0", "Remainder by zero."));
                }
                let value = self.environment.int(source)?;
                self.environment.set_int(dest, value.wrapping_rem(*divisor))
            }
            Stmt::Add { source, addend, dest } => {
                let value = self.environment.int(source)?;
                self.environment.set_int(dest, value.wrapping_add(*addend))
            }
            Stmt::Subtract { amount, source, dest } => {
                let value = self.environment.int(source)?;
                self.environment.set_int(dest, value.wrapping_sub(*amount))
            }
            Stmt::Print { target } => self.print(target),
            Stmt::If { lhs, comparator, rhs, action } => {
                self.conditional(lhs, *comparator, rhs, action)
            }
            // The count was fixed at grouping time; a non-positive count
            // runs the body zero times.
            Stmt::Loop { count, body } => {
                for _ in 0..*count {
                    self.interpret(body)?;
                }
                Ok(())
            }
        }
    }

    fn print(&mut self, target: &PrintTarget) -> Result<()> {
        match target {
            PrintTarget::Variable(name) => {
                let value = self.environment.value(name)?;
                writeln!(self.writer, "{}", value)?;
            }
            PrintTarget::Literal(word) => writeln!(self.writer, "{}", word)?,
        }
        Ok(())
    }

    fn conditional(
        &mut self,
        lhs: &str,
        comparator: Comparator,
        rhs: &Operand,
        action: &IfAction,
    ) -> Result<()> {
        let fired = match (self.environment.value(lhs)?, rhs) {
            (Value::Int(l), Operand::Int(r)) => compare_ints(comparator, l, *r),
            (Value::Bool(l), Operand::Bool(r)) => compare_bools(comparator, lhs, l, *r)?,
            (Value::Int(_), Operand::Bool(_)) => {
                return Err(Error::type_mismatch(
                    lhs,
                    format!("{} holds an integer but was compared to a boolean.", lhs),
                ));
            }
            (Value::Bool(_), Operand::Int(_)) => {
                return Err(Error::type_mismatch(
                    lhs,
                    format!("{} holds a boolean but was compared to an integer.", lhs),
                ));
            }
        };

        if !fired {
            return Ok(());
        }
        match action {
            IfAction::Print(target) => self.print(target),
            IfAction::AssignBool { name } => {
                let value = comparator != Comparator::IsNotEqualTo;
                self.environment.set_bool(name, value)
            }
        }
    }
}

fn compare_ints(comparator: Comparator, l: i64, r: i64) -> bool {
    match comparator {
        Comparator::IsEqualTo => l == r,
        Comparator::IsNotEqualTo => l != r,
        Comparator::IsLessThan => l < r,
        Comparator::IsGreaterThan => l > r,
    }
}

fn compare_bools(comparator: Comparator, name: &str, l: bool, r: bool) -> Result<bool> {
    match comparator {
        Comparator::IsEqualTo => Ok(l == r),
        Comparator::IsNotEqualTo => Ok(l != r),
        _ => Err(Error::type_mismatch(
            name,
            "Booleans only support is_equal_to and is_not_equal_to.",
        )),
    }
}
