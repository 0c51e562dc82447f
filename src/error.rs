//! Error types for logic-lab.

use thiserror::Error;

use crate::gate::{GateId, WireId};

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-level errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Expression parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Circuit error: {0}")]
    Circuit(#[from] CircuitError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Syntax errors raised while parsing an expression for synthesis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParen { position: usize },

    #[error("unknown variable '{0}'")]
    UnknownVariable(char),
}

/// Rejected structural edits of a circuit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    #[error("no gate with id {0}")]
    UnknownGate(GateId),

    #[error("no wire with id {0}")]
    UnknownWire(WireId),

    #[error("gate {0} has no output port")]
    NoOutputPort(GateId),

    #[error("gate {0} cannot be wired to itself")]
    SelfLoop(GateId),

    #[error("gate {gate} has no input port {port}")]
    InvalidPort { gate: GateId, port: usize },

    #[error("gate {0} is not an input")]
    NotAnInput(GateId),
}
