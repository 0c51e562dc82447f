//! Two-level expressions in textual form.
//!
//! This module reads the flat expressions produced by the minimizer and typed
//! by users: sums of products such as `F = A'B + AB'` and products of sums
//! such as `F = (A + B')(C)`. A literal is a letter, complemented by a
//! directly following `'`. Characters that are neither letters, operators nor
//! parentheses are ignored.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use logic_lab::expr::{evaluate_sop, parse_sop};
//!
//! let terms = parse_sop("F = A'B + AB'");
//! assert_eq!(terms.len(), 2);
//!
//! let assignment = HashMap::from([('A', true), ('B', false)]);
//! assert!(evaluate_sop(&terms, &assignment));
//! ```
//!
//! Nested parentheses are not interpreted here; the circuit synthesizer
//! ([`crate::synth`]) handles arbitrary nesting.

use std::collections::HashMap;
use std::fmt;

use crate::table::TruthTable;
use crate::types::Literal;
use crate::utils::{bit_of, space_size};

/// Variable assignment used for evaluation. Missing variables read as false.
pub type Assignment = HashMap<char, bool>;

/// A conjunction of literals.
///
/// A term without literals is the constant `1`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct ProductTerm {
    pub literals: Vec<Literal>,
}

impl ProductTerm {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    /// The always-true term.
    pub fn one() -> Self {
        Self { literals: Vec::new() }
    }

    pub fn is_one(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        self.literals
            .iter()
            .all(|lit| lit.is_satisfied_by(value_of(assignment, lit.variable)))
    }
}

impl fmt::Display for ProductTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for lit in self.literals.iter() {
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}

/// A disjunction of literals.
///
/// A term without literals is the constant `0`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct SumTerm {
    pub literals: Vec<Literal>,
}

impl SumTerm {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    /// The always-false term.
    pub fn zero() -> Self {
        Self { literals: Vec::new() }
    }

    pub fn is_zero(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        self.literals
            .iter()
            .any(|lit| lit.is_satisfied_by(value_of(assignment, lit.variable)))
    }
}

impl fmt::Display for SumTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        write!(f, "(")?;
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", lit)?;
        }
        write!(f, ")")
    }
}

fn value_of(assignment: &Assignment, variable: char) -> bool {
    assignment.get(&variable).copied().unwrap_or(false)
}

/// Removes an optional leading `F =` (any function name) from `text`.
pub fn strip_function_name(text: &str) -> &str {
    let text = text.trim();
    match text.split_once('=') {
        Some((name, body)) if name.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body.trim(),
        _ => text,
    }
}

/// Splits `text` on `separator` occurrences outside parentheses.
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Collects the literals of `text`, honouring trailing complements.
fn scan_literals(text: &str) -> Vec<Literal> {
    let mut literals: Vec<Literal> = Vec::new();
    let mut last_was_letter = false;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            literals.push(Literal::pos(c));
            last_was_letter = true;
        } else if c == '\'' && last_was_letter {
            if let Some(last) = literals.last_mut() {
                *last = -*last;
            }
        } else {
            last_was_letter = false;
        }
    }
    literals
}

/// Parses a sum-of-products expression into its product terms.
///
/// Terms which yield no literals are dropped, except the constant `1` which
/// becomes [`ProductTerm::one`]. `F = 0` therefore yields no terms.
pub fn parse_sop(text: &str) -> Vec<ProductTerm> {
    let body = strip_function_name(text);
    split_top_level(body, '+')
        .into_iter()
        .filter_map(|term| {
            let term = term.trim();
            if term == "1" {
                return Some(ProductTerm::one());
            }
            let literals = scan_literals(term);
            if literals.is_empty() {
                None
            } else {
                Some(ProductTerm::new(literals))
            }
        })
        .collect()
}

/// Evaluates a sum of products: true iff some term is satisfied.
pub fn evaluate_sop(terms: &[ProductTerm], assignment: &Assignment) -> bool {
    terms.iter().any(|term| term.evaluate(assignment))
}

/// Parses a product-of-sums expression into its sum terms.
///
/// Parenthesized groups are sums; bare literals outside parentheses are
/// single-literal sums. `F = 1` yields no terms and `F = 0` yields one
/// [`SumTerm::zero`].
pub fn parse_pos(text: &str) -> Vec<SumTerm> {
    let body = strip_function_name(text);
    match body {
        "1" => return Vec::new(),
        "0" => return vec![SumTerm::zero()],
        _ => {}
    }

    let mut terms = Vec::new();
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '(' {
            let mut end = body.len();
            for (j, d) in chars.by_ref() {
                if d == ')' {
                    end = j;
                    break;
                }
            }
            let literals = scan_literals(&body[i + 1..end]);
            if !literals.is_empty() {
                terms.push(SumTerm::new(literals));
            }
        } else if c.is_ascii_alphabetic() {
            let mut lit = Literal::pos(c);
            while let Some(&(_, '\'')) = chars.peek() {
                chars.next();
                lit = -lit;
            }
            terms.push(SumTerm::new(vec![lit]));
        }
    }
    terms
}

/// Evaluates a product of sums: true iff every term is satisfied.
pub fn evaluate_pos(terms: &[SumTerm], assignment: &Assignment) -> bool {
    terms.iter().all(|term| term.evaluate(assignment))
}

/// Builds the assignment of `variables` encoded by `index` (first variable is
/// the most significant bit).
pub fn assignment_of(variables: &[char], index: u32) -> Assignment {
    let width = variables.len();
    variables
        .iter()
        .enumerate()
        .map(|(position, &v)| (v, bit_of(index, width, position)))
        .collect()
}

/// Tabulates `function` over every assignment of `variables`.
pub fn tabulate<F>(variables: &[char], function: F) -> TruthTable
where
    F: Fn(&Assignment) -> bool,
{
    let mut headers: Vec<String> = variables.iter().map(|v| v.to_string()).collect();
    headers.push("F".to_string());
    let mut table = TruthTable::new(headers);

    let width = variables.len();
    for index in 0..space_size(width) {
        let assignment = assignment_of(variables, index);
        let mut row: Vec<bool> = (0..width).map(|position| bit_of(index, width, position)).collect();
        row.push(function(&assignment));
        table.push_row(row);
    }
    table
}

/// Truth table of a sum-of-products expression over `variables`.
pub fn generate_truth_table(variables: &[char], expression: &str) -> TruthTable {
    let terms = parse_sop(expression);
    tabulate(variables, |assignment| evaluate_sop(&terms, assignment))
}

/// Truth table of a product-of-sums expression over `variables`.
pub fn generate_pos_truth_table(variables: &[char], expression: &str) -> TruthTable {
    let terms = parse_pos(expression);
    tabulate(variables, |assignment| evaluate_pos(&terms, assignment))
}
