//! Literals and optimization targets shared across the crate.
//!
//! A [`Literal`] is a single-letter variable with a polarity. Product terms
//! (SOP) and sum terms (POS) are both plain lists of literals; the meaning of
//! the list is given by the context that holds it.

use std::fmt;
use std::ops::Neg;

use serde::{Deserialize, Serialize};

/// A possibly complemented variable.
///
/// # Invariants
///
/// - `variable` is an ASCII letter
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Literal {
    pub variable: char,
    pub negated: bool,
}

impl Literal {
    /// Creates the plain (uncomplemented) literal of `variable`.
    pub const fn pos(variable: char) -> Self {
        Literal { variable, negated: false }
    }

    /// Creates the complemented literal of `variable`.
    pub const fn neg(variable: char) -> Self {
        Literal { variable, negated: true }
    }

    /// Creates a literal which is satisfied when `variable` equals `value`.
    pub const fn with_value(variable: char, value: bool) -> Self {
        Literal { variable, negated: !value }
    }

    /// Returns whether the literal holds when its variable has the given value.
    pub const fn is_satisfied_by(self, value: bool) -> bool {
        value != self.negated
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Literal {
            variable: self.variable,
            negated: !self.negated,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}'", self.variable)
        } else {
            write!(f, "{}", self.variable)
        }
    }
}

/// Which canonical form a minimization or grouping targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptimizationType {
    /// Sum-of-Products: cover the 1s.
    #[default]
    Sop,
    /// Product-of-Sums: cover the 0s.
    Pos,
}

impl fmt::Display for OptimizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationType::Sop => write!(f, "SOP"),
            OptimizationType::Pos => write!(f, "POS"),
        }
    }
}

/// Default variable names `A, B, C, ...` for `n` variables.
///
/// # Panics
///
/// Panics if `n > 26`.
pub fn default_variables(n: usize) -> Vec<char> {
    assert!(n <= 26, "At most 26 single-letter variables are available");
    (b'A'..).take(n).map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_creation() {
        let a = Literal::pos('A');
        let na = Literal::neg('A');
        assert!(!a.negated);
        assert!(na.negated);
        assert_eq!(-a, na);
        assert_eq!(-na, a);
        assert_eq!(Literal::with_value('A', true), a);
        assert_eq!(Literal::with_value('A', false), na);
    }

    #[test]
    fn test_literal_satisfaction() {
        assert!(Literal::pos('B').is_satisfied_by(true));
        assert!(!Literal::pos('B').is_satisfied_by(false));
        assert!(Literal::neg('B').is_satisfied_by(false));
        assert!(!Literal::neg('B').is_satisfied_by(true));
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::pos('C').to_string(), "C");
        assert_eq!(Literal::neg('C').to_string(), "C'");
    }

    #[test]
    fn test_default_variables() {
        assert_eq!(default_variables(0), Vec::<char>::new());
        assert_eq!(default_variables(4), vec!['A', 'B', 'C', 'D']);
    }
}
