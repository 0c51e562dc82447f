//! Boolean expression trees and their parser.
//!
//! The grammar accepts the notation the rest of the crate prints:
//!
//! ```text
//! expression := [name '='] sum
//! sum        := product ('+' product)*
//! product    := factor factor*
//! factor     := primary '\''*
//! primary    := letter | '0' | '1' | '(' sum ')'
//! ```
//!
//! Juxtaposition is AND, `+` is OR and a trailing `'` complements the factor
//! before it. Whitespace is ignored. Any deviation is reported as a
//! [`ParseError`] with the character position where it was found.
//!
//! ```
//! use logic_lab::ast::Expr;
//!
//! let expr = Expr::parse("F = A(B + C')'").unwrap();
//! assert_eq!(expr.to_string(), "A(B + C')'");
//! assert_eq!(expr.variables(), vec!['A', 'B', 'C']);
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::error::ParseError;
use crate::expr::Assignment;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Expr {
    Const(bool),
    Var(char),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(name: char) -> Self {
        Expr::Var(name)
    }

    /// Complement, cancelling a double negation.
    pub fn not(value: Self) -> Self {
        match value {
            Expr::Not(inner) => *inner,
            _ => Expr::Not(Box::new(value)),
        }
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Parses `text`, accepting an optional leading `F =`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Parser::new(text).parse()
    }

    /// Evaluates under `assignment`; missing variables read as false.
    pub fn eval(&self, assignment: &Assignment) -> bool {
        match self {
            Expr::Const(value) => *value,
            Expr::Var(name) => assignment.get(name).copied().unwrap_or(false),
            Expr::Not(inner) => !inner.eval(assignment),
            Expr::And(lhs, rhs) => lhs.eval(assignment) && rhs.eval(assignment),
            Expr::Or(lhs, rhs) => lhs.eval(assignment) || rhs.eval(assignment),
        }
    }

    /// Distinct variable names, sorted.
    pub fn variables(&self) -> Vec<char> {
        let mut acc = BTreeSet::new();
        self.collect_variables(&mut acc);
        acc.into_iter().collect()
    }

    fn collect_variables(&self, acc: &mut BTreeSet<char>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(name) => {
                acc.insert(*name);
            }
            Expr::Not(inner) => inner.collect_variables(acc),
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                lhs.collect_variables(acc);
                rhs.collect_variables(acc);
            }
        }
    }

    fn is_atom(&self) -> bool {
        match self {
            Expr::Const(_) | Expr::Var(_) => true,
            Expr::Not(inner) => inner.is_atom(),
            _ => false,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(value) => write!(f, "{}", u8::from(*value)),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Not(inner) if inner.is_atom() => write!(f, "{}'", inner),
            Expr::Not(inner) => write!(f, "({})'", inner),
            Expr::And(lhs, rhs) => {
                for side in [lhs, rhs] {
                    match side.as_ref() {
                        Expr::Or(..) => write!(f, "({})", side)?,
                        _ => write!(f, "{}", side)?,
                    }
                }
                Ok(())
            }
            Expr::Or(lhs, rhs) => write!(f, "{} + {}", lhs, rhs),
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let pos = match chars.iter().position(|&c| c == '=') {
            Some(eq) => {
                let name: String = chars[..eq].iter().collect();
                let name = name.trim();
                if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()) {
                    eq + 1
                } else {
                    0
                }
            }
            None => 0,
        };
        Self { chars, pos }
    }

    fn peek(&mut self) -> Option<char> {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self, ch: char) -> ParseError {
        ParseError::UnexpectedChar { ch, position: self.pos }
    }

    fn parse(mut self) -> Result<Expr, ParseError> {
        if self.peek().is_none() {
            return Err(ParseError::Empty);
        }
        let expr = self.sum()?;
        match self.peek() {
            None => Ok(expr),
            Some(')') => Err(ParseError::UnbalancedParen { position: self.pos }),
            Some(c) => Err(self.unexpected(c)),
        }
    }

    fn sum(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.product()?;
        while self.peek() == Some('+') {
            self.pos += 1;
            let rhs = self.product()?;
            expr = Expr::or(expr, rhs);
        }
        Ok(expr)
    }

    fn product(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;
        while self.peek().is_some_and(starts_primary) {
            let rhs = self.factor()?;
            expr = Expr::and(expr, rhs);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        while self.peek() == Some('\'') {
            self.pos += 1;
            expr = Expr::not(expr);
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some(c) if c.is_ascii_alphabetic() => {
                self.pos += 1;
                Ok(Expr::Var(c))
            }
            Some(c @ ('0' | '1')) => {
                self.pos += 1;
                Ok(Expr::Const(c == '1'))
            }
            Some('(') => {
                let open = self.pos;
                self.pos += 1;
                let inner = self.sum()?;
                match self.peek() {
                    Some(')') => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    None => Err(ParseError::UnbalancedParen { position: open }),
                    Some(c) => Err(self.unexpected(c)),
                }
            }
            Some(c) => Err(self.unexpected(c)),
        }
    }
}

fn starts_primary(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '0' | '1' | '(')
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::expr::assignment_of;

    #[test]
    fn test_precedence() {
        let expr = Expr::parse("AB + C").unwrap();
        assert_eq!(
            expr,
            Expr::or(Expr::and(Expr::var('A'), Expr::var('B')), Expr::var('C'))
        );
    }

    #[test]
    fn test_left_to_right() {
        let expr = Expr::parse("ABC").unwrap();
        assert_eq!(
            expr,
            Expr::and(Expr::and(Expr::var('A'), Expr::var('B')), Expr::var('C'))
        );
    }

    #[test]
    fn test_complements() {
        assert_eq!(Expr::parse("A'").unwrap(), Expr::not(Expr::var('A')));
        assert_eq!(Expr::parse("A''").unwrap(), Expr::var('A'));
        assert_eq!(
            Expr::parse("(A + B)'").unwrap(),
            Expr::not(Expr::or(Expr::var('A'), Expr::var('B')))
        );
    }

    #[test]
    fn test_function_name_and_whitespace() {
        let a = Expr::parse("F = A B'").unwrap();
        let b = Expr::parse("AB'").unwrap();
        assert_eq!(a, b);
        assert_eq!(Expr::parse("out=1").unwrap(), Expr::Const(true));
    }

    #[test]
    fn test_errors() {
        assert_eq!(Expr::parse(""), Err(ParseError::Empty));
        assert_eq!(Expr::parse("F =  "), Err(ParseError::Empty));
        assert_eq!(Expr::parse("A +"), Err(ParseError::UnexpectedEnd));
        assert_eq!(Expr::parse("(A + B"), Err(ParseError::UnbalancedParen { position: 0 }));
        assert_eq!(Expr::parse("A + B)"), Err(ParseError::UnbalancedParen { position: 5 }));
        assert_eq!(Expr::parse("A & B"), Err(ParseError::UnexpectedChar { ch: '&', position: 2 }));
        assert_eq!(Expr::parse("'A"), Err(ParseError::UnexpectedChar { ch: '\'', position: 0 }));
        assert_eq!(Expr::parse("()"), Err(ParseError::UnexpectedChar { ch: ')', position: 1 }));
        assert_eq!(Expr::parse("A2"), Err(ParseError::UnexpectedChar { ch: '2', position: 1 }));
    }

    #[test]
    fn test_eval() {
        let expr = Expr::parse("A(B + C')'").unwrap();
        let vars = ['A', 'B', 'C'];
        let ones: Vec<u32> = (0..8).filter(|&i| expr.eval(&assignment_of(&vars, i))).collect();
        // A and not (B or not C) = A B' C
        assert_eq!(ones, vec![5]);
    }

    #[test]
    fn test_display_roundtrip() {
        for text in ["A'B + C", "(A + B)(C + D')", "((AB)' + C)'", "A0 + 1"] {
            let expr = Expr::parse(text).unwrap();
            assert_eq!(Expr::parse(&expr.to_string()).unwrap(), expr, "{}", text);
        }
    }
}
