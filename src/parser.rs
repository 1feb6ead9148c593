use peekmore::{PeekMore, PeekMoreIterator};

use crate::{
    error::{Error, Result},
    stmt::{Comparator, IfAction, Operand, PrintTarget, Stmt},
    token::{Token, TokenKind},
};

/// Groups the flat token sequence into statements. The same machinery serves
/// the top level and loop bodies, so loop bodies accept the full statement
/// set, nested loops included.
pub struct Parser<T> {
    tokens: T,
}

impl<T: Iterator<Item = Token>> Parser<PeekMoreIterator<T>> {
    pub fn new(tokens: T) -> Self {
        let tokens = tokens.peekmore();
        Parser { tokens }
    }

    /// Collects one `Result` per statement. After a bad statement the parser
    /// skips to the next terminator and keeps going, so a single pass reports
    /// every parse error in the source.
    pub fn parse(&mut self) -> Vec<Result<Stmt>> {
        let mut statements = Vec::new();
        while let Some(statement) = self.next_statement() {
            statements.push(statement);
        }
        statements
    }

    fn next_statement(&mut self) -> Option<Result<Stmt>> {
        // Words outside any statement are skipped, not errors.
        loop {
            match self.tokens.peek() {
                None => return None,
                Some(t) if is_starter(t) => break,
                Some(_) => {
                    self.tokens.next();
                }
            }
        }

        let result = self.statement();
        if result.is_err() {
            self.synchronise();
        }
        Some(result)
    }

    fn statement(&mut self) -> Result<Stmt> {
        let starter = self.advance()?;
        match starter.kind {
            TokenKind::Verb => self.verb_statement(starter),
            TokenKind::Conditional => self.if_statement(),
            TokenKind::Loop => self.loop_statement(starter),
            _ => unreachable!("statement() is only entered on a starter token"),
        }
    }

    // The scanner classifies any word containing `declare`/`assign` as a
    // verb; only the exact spellings survive here.
    fn verb_statement(&mut self, verb: Token) -> Result<Stmt> {
        match verb.lexeme.as_str() {
            "declare_int" => {
                let name = self.identifier()?;
                self.terminator()?;
                Ok(Stmt::DeclareInt { name })
            }
            "declare_bool" => {
                let name = self.identifier()?;
                self.terminator()?;
                Ok(Stmt::DeclareBool { name })
            }
            "assign_int" => {
                let value = self.int_literal()?;
                self.keyword("to")?;
                let name = self.identifier()?;
                self.terminator()?;
                Ok(Stmt::AssignInt { value, name })
            }
            "assign_bool" => {
                let value = self.bool_literal()?;
                self.keyword("to")?;
                let name = self.identifier()?;
                self.terminator()?;
                Ok(Stmt::AssignBool { value, name })
            }
            "remainder" => {
                let source = self.identifier()?;
                self.keyword("by")?;
                let divisor = self.int_literal()?;
                self.keyword("save")?;
                self.keyword("to")?;
                let dest = self.identifier()?;
                self.terminator()?;
                Ok(Stmt::Remainder { source, divisor, dest })
            }
            "add" => {
                let source = self.identifier()?;
                self.keyword("to")?;
                let addend = self.int_literal()?;
                self.keyword("save")?;
                self.keyword("to")?;
                let dest = self.identifier()?;
                self.terminator()?;
                Ok(Stmt::Add { source, addend, dest })
            }
            "subtract" => {
                let amount = self.int_literal()?;
                self.keyword("from")?;
                let source = self.identifier()?;
                self.keyword("save")?;
                self.keyword("to")?;
                let dest = self.identifier()?;
                self.terminator()?;
                Ok(Stmt::Subtract { amount, source, dest })
            }
            "print" => {
                let target = self.print_target()?;
                self.terminator()?;
                Ok(Stmt::Print { target })
            }
            _ => Err(Error::parse(verb, "Unknown verb.")),
        }
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        let lhs = self.identifier()?;
        let comparator = self.comparator()?;
        let rhs = self.operand()?;
        let action = self.if_action()?;
        self.terminator()?;
        Ok(Stmt::If { lhs, comparator, rhs, action })
    }

    fn if_action(&mut self) -> Result<IfAction> {
        let verb = self.advance()?;
        match verb.lexeme.as_str() {
            "print" => Ok(IfAction::Print(self.print_target()?)),
            "assign_bool" => {
                // The written literal is dead weight: the comparator alone
                // decides the assigned value.
                self.advance()?;
                self.keyword("to")?;
                let name = self.identifier()?;
                Ok(IfAction::AssignBool { name })
            }
            _ => Err(Error::parse(verb, "Expected 'print' or 'assign_bool' after the comparison.")),
        }
    }

    fn loop_statement(&mut self, starter: Token) -> Result<Stmt> {
        let count = self.int_literal()?;
        self.keyword("times")?;

        // Words between `times` and `:` are a label for human readers.
        loop {
            let token = self.tokens.next().ok_or_else(Error::unexpected_end)?;
            if token.lexeme == ":" {
                break;
            }
        }

        let mut body = Vec::new();
        loop {
            match self.tokens.peek() {
                None => return Err(Error::parse(starter.clone(), "Loop block was never closed with '|'.")),
                Some(t) if t.lexeme == "|" => {
                    self.tokens.next();
                    break;
                }
                Some(t) if is_starter(t) => body.push(self.statement()?),
                Some(_) => {
                    self.tokens.next();
                }
            }
        }
        Ok(Stmt::Loop { count, body })
    }

    fn advance(&mut self) -> Result<Token> {
        self.tokens.next().ok_or_else(Error::unexpected_end)
    }

    fn identifier(&mut self) -> Result<String> {
        let token = self.advance()?;
        if token.kind == TokenKind::Identifier {
            Ok(token.lexeme)
        } else {
            Err(Error::parse(token, "Expected a '$'-prefixed variable name."))
        }
    }

    fn keyword(&mut self, word: &str) -> Result<()> {
        let token = self.advance()?;
        if token.lexeme == word {
            Ok(())
        } else {
            Err(Error::parse(token, format!("Expected '{}'.", word)))
        }
    }

    fn terminator(&mut self) -> Result<()> {
        let token = self.advance()?;
        if token.lexeme == ";" {
            Ok(())
        } else {
            Err(Error::parse(token, "Expected ';' after statement."))
        }
    }

    fn int_literal(&mut self) -> Result<i64> {
        let token = self.advance()?;
        match token.lexeme.parse() {
            Ok(n) => Ok(n),
            Err(_) => Err(Error::value(token.lexeme, "Expected an integer literal.")),
        }
    }

    fn bool_literal(&mut self) -> Result<bool> {
        let token = self.advance()?;
        match token.lexeme.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(Error::value(token.lexeme, "Expected 'true' or 'false'.")),
        }
    }

    fn comparator(&mut self) -> Result<Comparator> {
        let token = self.advance()?;
        match token.lexeme.as_str() {
            "is_equal_to" => Ok(Comparator::IsEqualTo),
            "is_not_equal_to" => Ok(Comparator::IsNotEqualTo),
            "is_less_than" => Ok(Comparator::IsLessThan),
            "is_greater_than" => Ok(Comparator::IsGreaterThan),
            _ => Err(Error::parse(token, "Expected a comparator.")),
        }
    }

    // Which arm applies depends on the left-hand name's kind, which is only
    // known at run time, so both literal forms are accepted here.
    fn operand(&mut self) -> Result<Operand> {
        let token = self.advance()?;
        if let Ok(n) = token.lexeme.parse() {
            return Ok(Operand::Int(n));
        }
        match token.lexeme.as_str() {
            "true" => Ok(Operand::Bool(true)),
            "false" => Ok(Operand::Bool(false)),
            _ => Err(Error::value(token.lexeme, "Expected an integer, 'true', or 'false'.")),
        }
    }

    fn print_target(&mut self) -> Result<PrintTarget> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Identifier => Ok(PrintTarget::Variable(token.lexeme)),
            TokenKind::Punctuation => Err(Error::parse(token, "Expected something to print.")),
            _ => Ok(PrintTarget::Literal(token.lexeme)),
        }
    }

    fn synchronise(&mut self) {
        while let Some(token) = self.tokens.next() {
            if token.lexeme == ";" || token.lexeme == "|" {
                break;
            }
        }
    }
}

fn is_starter(token: &Token) -> bool {
    match token.kind {
        TokenKind::Verb | TokenKind::Conditional | TokenKind::Loop => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::scanner::Scanner;

    fn parse_source(src: &str) -> Vec<Result<Stmt>> {
        let tokens = Scanner::new(src).scan_tokens();
        Parser::new(tokens.into_iter()).parse()
    }

    fn parse_single(src: &str) -> Stmt {
        let mut statements = parse_source(src);
        assert_eq!(statements.len(), 1, "expected exactly one statement");
        statements.remove(0).unwrap()
    }

    fn parse_error(src: &str) -> Error {
        let mut statements = parse_source(src);
        assert_eq!(statements.len(), 1, "expected exactly one statement");
        statements.remove(0).unwrap_err()
    }

    #[test]
    fn declarations() {
        assert_eq!(parse_single("declare_int $n ;"), Stmt::DeclareInt { name: "$n".into() });
        assert_eq!(parse_single("declare_bool $f ;"), Stmt::DeclareBool { name: "$f".into() });
    }

    #[test]
    fn assignments() {
        assert_eq!(
            parse_single("assign_int 7 to $n ;"),
            Stmt::AssignInt { value: 7, name: "$n".into() }
        );
        assert_eq!(
            parse_single("assign_bool true to $f ;"),
            Stmt::AssignBool { value: true, name: "$f".into() }
        );
    }

    #[test]
    fn arithmetic_shapes() {
        assert_eq!(
            parse_single("remainder $n by 3 save to $r ;"),
            Stmt::Remainder { source: "$n".into(), divisor: 3, dest: "$r".into() }
        );
        assert_eq!(
            parse_single("add $n to 1 save to $t ;"),
            Stmt::Add { source: "$n".into(), addend: 1, dest: "$t".into() }
        );
        assert_eq!(
            parse_single("subtract 3 from $n save to $t ;"),
            Stmt::Subtract { amount: 3, source: "$n".into(), dest: "$t".into() }
        );
    }

    #[test]
    fn print_distinguishes_variables_from_words() {
        assert_eq!(
            parse_single("print $n ;"),
            Stmt::Print { target: PrintTarget::Variable("$n".into()) }
        );
        assert_eq!(
            parse_single("print fizz ;"),
            Stmt::Print { target: PrintTarget::Literal("fizz".into()) }
        );
    }

    #[test]
    fn conditional_with_print_consequence() {
        assert_eq!(
            parse_single("if $r is_equal_to 0 print fizz ;"),
            Stmt::If {
                lhs: "$r".into(),
                comparator: Comparator::IsEqualTo,
                rhs: Operand::Int(0),
                action: IfAction::Print(PrintTarget::Literal("fizz".into())),
            }
        );
    }

    #[test]
    fn conditional_with_assign_consequence_drops_the_literal() {
        assert_eq!(
            parse_single("if $r is_not_equal_to 0 assign_bool false to $flag ;"),
            Stmt::If {
                lhs: "$r".into(),
                comparator: Comparator::IsNotEqualTo,
                rhs: Operand::Int(0),
                action: IfAction::AssignBool { name: "$flag".into() },
            }
        );
    }

    #[test]
    fn conditional_against_a_boolean_literal() {
        assert_eq!(
            parse_single("if $flag is_equal_to true print yes ;"),
            Stmt::If {
                lhs: "$flag".into(),
                comparator: Comparator::IsEqualTo,
                rhs: Operand::Bool(true),
                action: IfAction::Print(PrintTarget::Literal("yes".into())),
            }
        );
    }

    #[test]
    fn loop_header_label_is_skipped() {
        assert_eq!(
            parse_single("loop 3 times over i : print hi ; |"),
            Stmt::Loop {
                count: 3,
                body: vec![Stmt::Print { target: PrintTarget::Literal("hi".into()) }],
            }
        );
        assert_eq!(parse_single("loop 0 times : |"), Stmt::Loop { count: 0, body: vec![] });
    }

    #[test]
    fn loops_nest() {
        assert_eq!(
            parse_single("loop 2 times : loop 3 times : print x ; | |"),
            Stmt::Loop {
                count: 2,
                body: vec![Stmt::Loop {
                    count: 3,
                    body: vec![Stmt::Print { target: PrintTarget::Literal("x".into()) }],
                }],
            }
        );
    }

    #[test]
    fn stray_words_outside_statements_are_skipped() {
        let statements = parse_source("type_int stray ; print ok ;");
        assert_eq!(statements.len(), 1);
        assert_eq!(
            *statements[0].as_ref().unwrap(),
            Stmt::Print { target: PrintTarget::Literal("ok".into()) }
        );
    }

    #[test]
    fn missing_terminator_is_an_error() {
        let err = parse_error("declare_int $n");
        assert!(matches!(err.kind(), ErrorKind::UnexpectedEnd));
    }

    #[test]
    fn unclosed_loop_is_an_error() {
        let err = parse_error("loop 3 times : print hi ;");
        assert!(matches!(err.kind(), ErrorKind::Parse { .. }));
    }

    #[test]
    fn bad_integer_literal_is_a_value_error() {
        let err = parse_error("assign_int ten to $n ;");
        assert!(matches!(err.kind(), ErrorKind::Value { .. }));
    }

    #[test]
    fn unknown_verb_spelling_is_rejected() {
        let err = parse_error("declare_float $n ;");
        assert!(matches!(err.kind(), ErrorKind::Parse { .. }));
    }

    #[test]
    fn parser_recovers_and_reports_every_error() {
        let statements = parse_source("assign_int ten to $n ; print ok ; add $n to x save to $t ;");
        assert_eq!(statements.len(), 3);
        assert!(statements[0].is_err());
        assert!(statements[1].is_ok());
        assert!(statements[2].is_err());
    }

    #[test]
    fn negative_literals_parse() {
        assert_eq!(
            parse_single("assign_int -5 to $n ;"),
            Stmt::AssignInt { value: -5, name: "$n".into() }
        );
    }
}
