//! Circuit to DOT (Graphviz) conversion.
//!
//! The generated graph follows these conventions:
//! - **Inputs** are drawn on the left (source rank), **outputs** on the right
//!   (sink rank), logic gates in between
//! - Each wire becomes an edge labelled with the port it enters
//! - Optionally, every node shows its current value
//!
//! # Examples
//!
//! ```
//! use logic_lab::circuit::Circuit;
//! use logic_lab::gate::GateKind;
//!
//! let mut circuit = Circuit::new();
//! let a = circuit.add_gate(GateKind::Input);
//! let z = circuit.add_gate(GateKind::Output);
//! circuit.connect(a, z, 0).unwrap();
//!
//! let dot = circuit.to_dot().unwrap();
//! assert!(dot.starts_with("digraph {"));
//! // Render with: dot -Tpng circuit.dot -o circuit.png
//! ```

use std::fmt::Write as _;

use crate::circuit::Circuit;
use crate::eval::Evaluator;
use crate::gate::{Gate, GateKind};

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings, or override single
/// fields:
///
/// ```
/// use logic_lab::circuit::Circuit;
/// use logic_lab::dot::DotConfig;
///
/// let config = DotConfig {
///     rankdir: "TB",
///     show_values: true,
///     ..DotConfig::default()
/// };
/// let dot = Circuit::new().to_dot_with_config(&config).unwrap();
/// assert!(dot.contains("rankdir=TB"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Layout direction (default: "LR")
    pub rankdir: &'static str,
    /// Shape for INPUT gates (default: "circle")
    pub input_shape: &'static str,
    /// Shape for OUTPUT gates (default: "doublecircle")
    pub output_shape: &'static str,
    /// Shape for logic gates (default: "box")
    pub gate_shape: &'static str,
    /// Whether to annotate every gate with its current value (default: false)
    pub show_values: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            rankdir: "LR",
            input_shape: "circle",
            output_shape: "doublecircle",
            gate_shape: "box",
            show_values: false,
        }
    }
}

fn node_label(gate: &Gate) -> String {
    match gate.kind {
        GateKind::Input | GateKind::Output if !gate.label.is_empty() => gate.label.clone(),
        _ => gate.kind.name().to_string(),
    }
}

impl Circuit {
    /// Converts the circuit to DOT format with the default configuration.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the circuit to DOT format.
    ///
    /// Nodes are named `g<id>`. Wires whose endpoints no longer exist are
    /// skipped.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "rankdir={};", config.rankdir)?;
        writeln!(dot, "node [shape={}];", config.gate_shape)?;

        let mut evaluator = Evaluator::new(self);
        let mut label_of = |gate: &Gate| {
            let label = node_label(gate);
            if config.show_values {
                format!("{}\\n{}", label, u8::from(evaluator.evaluate(gate.id)))
            } else {
                label
            }
        };

        writeln!(dot, "{{ rank=source")?;
        for gate in self.inputs() {
            writeln!(dot, "g{} [shape={}, label=\"{}\"];", gate.id, config.input_shape, label_of(gate))?;
        }
        writeln!(dot, "}}")?;

        for gate in self.gates().iter().filter(|g| !g.is_input() && !g.is_output()) {
            writeln!(dot, "g{} [label=\"{}\"];", gate.id, label_of(gate))?;
        }

        writeln!(dot, "{{ rank=sink")?;
        for gate in self.outputs() {
            writeln!(dot, "g{} [shape={}, label=\"{}\"];", gate.id, config.output_shape, label_of(gate))?;
        }
        writeln!(dot, "}}")?;

        for wire in self.wires() {
            if self.gate(wire.from_gate_id).is_none() || self.gate(wire.to_gate_id).is_none() {
                continue;
            }
            writeln!(
                dot,
                "g{} -> g{} [headlabel=\"{}\"];",
                wire.from_gate_id, wire.to_gate_id, wire.to_port_index
            )?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
