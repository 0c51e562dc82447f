use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

pub type GateId = u32;
pub type WireId = u32;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    Input,
    Output,
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    Buffer,
}

impl GateKind {
    pub const ALL: [GateKind; 10] = [
        GateKind::Input,
        GateKind::Output,
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Xnor,
        GateKind::Buffer,
    ];

    /// Number of input ports.
    pub const fn input_count(self) -> usize {
        match self {
            GateKind::Input => 0,
            GateKind::Output | GateKind::Not | GateKind::Buffer => 1,
            GateKind::And | GateKind::Or | GateKind::Nand | GateKind::Nor | GateKind::Xor | GateKind::Xnor => 2,
        }
    }

    pub const fn has_output_port(self) -> bool {
        !matches!(self, GateKind::Output)
    }

    /// Applies the gate's truth function to its port values.
    ///
    /// Two-input gates yield `false` unless both inputs are present. Single
    /// input gates read port 0 and yield `false` when it is absent. An
    /// `Input` gate has no ports; its value is held by the gate itself.
    pub fn apply(self, inputs: [Option<bool>; 2]) -> bool {
        match self {
            GateKind::Input => false,
            GateKind::Output | GateKind::Buffer => inputs[0].unwrap_or(false),
            GateKind::Not => inputs[0].map_or(false, |a| !a),
            GateKind::And => binary(inputs, |a, b| a && b),
            GateKind::Or => binary(inputs, |a, b| a || b),
            GateKind::Nand => binary(inputs, |a, b| !(a && b)),
            GateKind::Nor => binary(inputs, |a, b| !(a || b)),
            GateKind::Xor => binary(inputs, |a, b| a != b),
            GateKind::Xnor => binary(inputs, |a, b| a == b),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GateKind::Input => "INPUT",
            GateKind::Output => "OUTPUT",
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
            GateKind::Buffer => "BUFFER",
        }
    }
}

fn binary(inputs: [Option<bool>; 2], f: impl Fn(bool, bool) -> bool) -> bool {
    match inputs {
        [Some(a), Some(b)] => f(a, b),
        _ => false,
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Canvas coordinates.
///
/// Whole numbers are written without a fractional part, so a saved circuit
/// reads back and writes out with its numbers unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(serialize_with = "serialize_coordinate")]
    pub x: f64,
    #[serde(serialize_with = "serialize_coordinate")]
    pub y: f64,
}

/// Whole `f64` values up to this magnitude convert to `i64` exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn serialize_coordinate<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A gate placed on the canvas.
///
/// `input_count` and `has_output_port` mirror the kind; they are stored so
/// saved circuits keep their exact layout. `input_values` holds the switch
/// state of `INPUT` gates and is empty for every other kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gate {
    pub id: GateId,
    #[serde(rename = "type")]
    pub kind: GateKind,
    pub label: String,
    pub position: Position,
    pub input_count: usize,
    pub has_output_port: bool,
    #[serde(default)]
    pub input_values: Vec<bool>,
}

impl Gate {
    pub fn new(id: GateId, kind: GateKind, label: impl Into<String>, position: Position) -> Self {
        let input_values = if kind == GateKind::Input { vec![false] } else { Vec::new() };
        Self {
            id,
            kind,
            label: label.into(),
            position,
            input_count: kind.input_count(),
            has_output_port: kind.has_output_port(),
            input_values,
        }
    }

    pub fn is_input(&self) -> bool {
        self.kind == GateKind::Input
    }

    pub fn is_output(&self) -> bool {
        self.kind == GateKind::Output
    }

    /// Value of a constant source: an `INPUT` labelled `0` or `1`.
    pub fn constant_value(&self) -> Option<bool> {
        match (self.kind, self.label.as_str()) {
            (GateKind::Input, "0") => Some(false),
            (GateKind::Input, "1") => Some(true),
            _ => None,
        }
    }

    /// Current value of an `INPUT` gate; `false` when unset.
    pub fn input_value(&self) -> bool {
        self.constant_value()
            .unwrap_or_else(|| self.input_values.first().copied().unwrap_or(false))
    }

    pub fn set_input_value(&mut self, value: bool) {
        match self.input_values.first_mut() {
            Some(v) => *v = value,
            None => self.input_values.push(value),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{}#{}", self.kind, self.id)
        } else {
            write!(f, "{}#{}({})", self.kind, self.id, self.label)
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wire {
    pub id: WireId,
    pub from_gate_id: GateId,
    pub to_gate_id: GateId,
    pub to_port_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_table() {
        for kind in GateKind::ALL {
            let expected = match kind {
                GateKind::Input => 0,
                GateKind::Output | GateKind::Not | GateKind::Buffer => 1,
                _ => 2,
            };
            assert_eq!(kind.input_count(), expected, "{}", kind);
            assert_eq!(kind.has_output_port(), kind != GateKind::Output, "{}", kind);
        }
    }

    #[test]
    fn test_binary_truth_tables() {
        let cases = [
            (GateKind::And, [false, false, false, true]),
            (GateKind::Or, [false, true, true, true]),
            (GateKind::Nand, [true, true, true, false]),
            (GateKind::Nor, [true, false, false, false]),
            (GateKind::Xor, [false, true, true, false]),
            (GateKind::Xnor, [true, false, false, true]),
        ];
        for (kind, expected) in cases {
            for (i, &out) in expected.iter().enumerate() {
                let a = i & 2 != 0;
                let b = i & 1 != 0;
                assert_eq!(kind.apply([Some(a), Some(b)]), out, "{}({}, {})", kind, a, b);
            }
            // Missing inputs evaluate to false.
            assert!(!kind.apply([Some(true), None]));
            assert!(!kind.apply([None, None]));
        }
    }

    #[test]
    fn test_unary_gates() {
        assert!(GateKind::Not.apply([Some(false), None]));
        assert!(!GateKind::Not.apply([Some(true), None]));
        assert!(!GateKind::Not.apply([None, None]));
        assert!(GateKind::Buffer.apply([Some(true), None]));
        assert!(GateKind::Output.apply([Some(true), None]));
        assert!(!GateKind::Output.apply([None, None]));
    }

    #[test]
    fn test_gate_new() {
        let input = Gate::new(1, GateKind::Input, "A", Position::default());
        assert_eq!(input.input_values, vec![false]);
        assert_eq!(input.input_count, 0);
        assert!(input.has_output_port);

        let output = Gate::new(2, GateKind::Output, "Z", Position::default());
        assert!(output.input_values.is_empty());
        assert_eq!(output.input_count, 1);
        assert!(!output.has_output_port);
    }

    #[test]
    fn test_constant_inputs() {
        let one = Gate::new(1, GateKind::Input, "1", Position::default());
        assert_eq!(one.constant_value(), Some(true));
        assert!(one.input_value());
        let a = Gate::new(2, GateKind::Input, "A", Position::default());
        assert_eq!(a.constant_value(), None);
    }

    #[test]
    fn test_coordinates_keep_their_form() {
        let json = |x, y| serde_json::to_string(&Position::new(x, y)).unwrap();
        assert_eq!(json(100.0, 140.0), r#"{"x":100,"y":140}"#);
        assert_eq!(json(-0.0, 20.25), r#"{"x":0,"y":20.25}"#);
        assert_eq!(json(1.5, 0.5), r#"{"x":1.5,"y":0.5}"#);

        let back: Position = serde_json::from_str(r#"{"x":7,"y":-3.5}"#).unwrap();
        assert_eq!(back, Position::new(7.0, -3.5));
    }

    #[test]
    fn test_serde_names() {
        let gate = Gate::new(3, GateKind::Xnor, "", Position::new(10.0, 20.0));
        let json = serde_json::to_value(&gate).unwrap();
        assert_eq!(json["type"], "XNOR");
        assert_eq!(json["inputCount"], 2);
        assert_eq!(json["hasOutputPort"], true);

        let wire = Wire {
            id: 1,
            from_gate_id: 2,
            to_gate_id: 3,
            to_port_index: 1,
        };
        let json = serde_json::to_value(wire).unwrap();
        assert_eq!(json["fromGateId"], 2);
        assert_eq!(json["toPortIndex"], 1);
    }
}
