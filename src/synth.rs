//! Expression to circuit synthesis.
//!
//! [`synthesize`] turns an expression such as `F = AB' + (C + D)'` into a
//! gate graph:
//!
//! - one `INPUT` per variable, labelled with the variable name, each feeding
//!   a pre-built `NOT` used by every complemented literal of that variable;
//! - factors of a product are chained through two-input `AND` gates and the
//!   terms of a sum through two-input `OR` gates, pairwise from left to right;
//! - a complemented sub-expression gets its own `NOT` gate, except that a
//!   parenthesized single variable such as `(A)'` parses to the literal `A'`
//!   and so reuses that variable's pre-built `NOT`;
//! - the constants `0` and `1` become `INPUT` gates labelled `0` and `1`,
//!   which hold their value and are skipped by [`Circuit::truth_table`];
//! - the result drives a single `OUTPUT` labelled `F`.
//!
//! Gates are laid out left to right by their distance from the inputs.
//! Malformed expressions are rejected before any gate is built.

use std::collections::HashMap;

use log::debug;

use crate::ast::Expr;
use crate::circuit::Circuit;
use crate::error::{ParseError, Result};
use crate::gate::{GateId, GateKind, Position};

const COLUMN_WIDTH: f64 = 120.0;
const ROW_HEIGHT: f64 = 80.0;
const MARGIN: f64 = 50.0;

/// Label of the synthesized output.
pub const OUTPUT_LABEL: &str = "F";

/// Builds a circuit for `expression` over `variables`.
///
/// Every variable gets an input, in the given order, even when the
/// expression does not use it. A variable missing from `variables` is a
/// [`ParseError::UnknownVariable`].
pub fn synthesize(expression: &str, variables: &[char]) -> Result<Circuit> {
    let expr = Expr::parse(expression)?;
    if let Some(&unknown) = expr.variables().iter().find(|v| !variables.contains(v)) {
        return Err(ParseError::UnknownVariable(unknown).into());
    }
    debug!("synthesize: {} over {:?}", expr, variables);
    Synthesizer::new(variables).build(&expr)
}

/// Builds a circuit for `expression` over the variables it mentions, sorted.
pub fn synthesize_inferred(expression: &str) -> Result<Circuit> {
    let expr = Expr::parse(expression)?;
    let variables = expr.variables();
    Synthesizer::new(&variables).build(&expr)
}

struct Synthesizer {
    circuit: Circuit,
    inputs: HashMap<char, GateId>,
    negations: HashMap<char, GateId>,
    constants: HashMap<bool, GateId>,
    /// Gates placed so far in each column, for vertical stacking.
    column_heights: HashMap<usize, usize>,
    num_variables: usize,
}

impl Synthesizer {
    fn new(variables: &[char]) -> Self {
        let mut synth = Self {
            circuit: Circuit::new(),
            inputs: HashMap::new(),
            negations: HashMap::new(),
            constants: HashMap::new(),
            column_heights: HashMap::new(),
            num_variables: 0,
        };
        for &v in variables {
            if synth.inputs.contains_key(&v) {
                continue;
            }
            let position = synth.next_position(0);
            let id = synth.circuit.add_labeled_gate(GateKind::Input, v.to_string(), position);
            synth.inputs.insert(v, id);
            synth.num_variables += 1;
        }
        synth
    }

    fn next_position(&mut self, column: usize) -> Position {
        let height = self.column_heights.entry(column).or_insert(0);
        let position = Position::new(
            MARGIN + column as f64 * COLUMN_WIDTH,
            MARGIN + *height as f64 * ROW_HEIGHT,
        );
        *height += 1;
        position
    }

    fn add(&mut self, kind: GateKind, column: usize) -> GateId {
        let position = self.next_position(column);
        self.circuit.add_labeled_gate(kind, "", position)
    }

    fn build(mut self, expr: &Expr) -> Result<Circuit> {
        let inputs: Vec<(char, GateId)> = self
            .circuit
            .inputs()
            .filter_map(|g| g.label.chars().next().map(|c| (c, g.id)))
            .collect();
        for (v, input) in inputs {
            let not = self.add(GateKind::Not, 1);
            self.circuit.connect(input, not, 0)?;
            self.negations.insert(v, not);
        }

        let (root, column) = self.node(expr)?;
        let position = self.next_position(column + 1);
        let output = self.circuit.add_labeled_gate(GateKind::Output, OUTPUT_LABEL, position);
        self.circuit.connect(root, output, 0)?;

        self.circuit.set_label_counters(self.num_variables, 1);
        debug!(
            "synthesize: {} gates, {} wires",
            self.circuit.gates().len(),
            self.circuit.wires().len()
        );
        Ok(self.circuit)
    }

    /// Builds `expr` and returns its driving gate and layout column.
    fn node(&mut self, expr: &Expr) -> Result<(GateId, usize)> {
        match expr {
            Expr::Const(value) => {
                if let Some(&id) = self.constants.get(value) {
                    return Ok((id, 0));
                }
                let position = self.next_position(0);
                let label = if *value { "1" } else { "0" };
                let id = self.circuit.add_labeled_gate(GateKind::Input, label, position);
                self.constants.insert(*value, id);
                Ok((id, 0))
            }
            Expr::Var(v) => {
                let id = self.inputs.get(v).copied().ok_or(ParseError::UnknownVariable(*v))?;
                Ok((id, 0))
            }
            Expr::Not(inner) => {
                if let Expr::Var(v) = inner.as_ref() {
                    let id = self.negations.get(v).copied().ok_or(ParseError::UnknownVariable(*v))?;
                    return Ok((id, 1));
                }
                let (source, column) = self.node(inner)?;
                let not = self.add(GateKind::Not, column + 1);
                self.circuit.connect(source, not, 0)?;
                Ok((not, column + 1))
            }
            Expr::And(lhs, rhs) => self.binary(GateKind::And, lhs, rhs),
            Expr::Or(lhs, rhs) => self.binary(GateKind::Or, lhs, rhs),
        }
    }

    fn binary(&mut self, kind: GateKind, lhs: &Expr, rhs: &Expr) -> Result<(GateId, usize)> {
        let (a, col_a) = self.node(lhs)?;
        let (b, col_b) = self.node(rhs)?;
        let column = col_a.max(col_b) + 1;
        let gate = self.add(kind, column);
        self.circuit.connect(a, gate, 0)?;
        self.circuit.connect(b, gate, 1)?;
        Ok((gate, column))
    }
}
