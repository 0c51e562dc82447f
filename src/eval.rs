//! Circuit evaluation.
//!
//! An [`Evaluator`] computes gate values over a borrowed [`Circuit`]. Values
//! are memoized for the lifetime of the evaluator, so a shared sub-circuit is
//! computed once per pass. Every public entry point on [`Circuit`] builds a
//! fresh evaluator, so results never go stale after an edit.
//!
//! Cycles are legal in the graph but cannot be evaluated. Two guards keep
//! evaluation total:
//!
//! - re-entering a gate that is still being computed yields `false`;
//! - recursion deeper than the depth bound (100 by default) yields `false`.
//!
//! Both log a warning. Wires whose source gate no longer exists, or which
//! target a port the gate does not have, are ignored.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::circuit::Circuit;
use crate::gate::{GateId, GateKind};
use crate::table::TruthTable;
use crate::utils::{bit_of, space_size};

/// Default recursion bound.
pub const MAX_DEPTH: usize = 100;

/// Largest number of free inputs [`Circuit::truth_table`] enumerates.
pub const MAX_TABLE_INPUTS: usize = 16;

pub struct Evaluator<'a> {
    circuit: &'a Circuit,
    /// Source gate of each input port, per gate.
    incoming: HashMap<GateId, [Option<GateId>; 2]>,
    /// Input values substituted for the switches stored in the circuit.
    overrides: HashMap<GateId, bool>,
    memo: HashMap<GateId, bool>,
    visiting: HashSet<GateId>,
    max_depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(circuit: &'a Circuit) -> Self {
        let mut incoming: HashMap<GateId, [Option<GateId>; 2]> = HashMap::new();
        for wire in circuit.wires() {
            if circuit.gate(wire.from_gate_id).is_none() {
                debug!("Evaluator: skipping dangling wire {}", wire.id);
                continue;
            }
            match incoming.entry(wire.to_gate_id).or_default().get_mut(wire.to_port_index) {
                Some(slot) => *slot = Some(wire.from_gate_id),
                None => debug!("Evaluator: skipping wire {} into port {}", wire.id, wire.to_port_index),
            }
        }
        Self {
            circuit,
            incoming,
            overrides: HashMap::new(),
            memo: HashMap::new(),
            visiting: HashSet::new(),
            max_depth: MAX_DEPTH,
        }
    }

    /// Evaluates with the given `INPUT` values instead of the stored ones.
    ///
    /// Constant inputs (labelled `0` or `1`) ignore overrides.
    pub fn with_inputs(mut self, inputs: HashMap<GateId, bool>) -> Self {
        self.overrides = inputs;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Value of the output of gate `id`; `false` for unknown gates.
    pub fn evaluate(&mut self, id: GateId) -> bool {
        self.eval_at(id, 0)
    }

    fn eval_at(&mut self, id: GateId, depth: usize) -> bool {
        if let Some(&value) = self.memo.get(&id) {
            return value;
        }
        if depth > self.max_depth {
            warn!("Evaluation depth exceeded {} at gate {}", self.max_depth, id);
            return false;
        }
        let circuit = self.circuit;
        let Some(gate) = circuit.gate(id) else {
            return false;
        };

        if gate.kind == GateKind::Input {
            let value = match gate.constant_value() {
                Some(constant) => constant,
                None => self.overrides.get(&id).copied().unwrap_or_else(|| gate.input_value()),
            };
            self.memo.insert(id, value);
            return value;
        }

        if !self.visiting.insert(id) {
            warn!("Cycle detected at gate {}", gate);
            return false;
        }

        let kind = gate.kind;
        let sources = self.incoming.get(&id).copied().unwrap_or_default();
        let mut inputs = [None; 2];
        for (port, source) in sources.iter().enumerate().take(kind.input_count()) {
            inputs[port] = source.map(|src| self.eval_at(src, depth + 1));
        }
        let value = kind.apply(inputs);

        self.visiting.remove(&id);
        self.memo.insert(id, value);
        value
    }
}

impl Circuit {
    /// Value of gate `id` under the current input switches.
    pub fn evaluate(&self, id: GateId) -> bool {
        Evaluator::new(self).evaluate(id)
    }

    /// Values of all `OUTPUT` gates, in insertion order.
    pub fn evaluate_outputs(&self) -> Vec<(GateId, bool)> {
        let mut evaluator = Evaluator::new(self);
        self.outputs().map(|g| (g.id, evaluator.evaluate(g.id))).collect()
    }

    /// Tabulates every `OUTPUT` over all combinations of the `INPUT` gates.
    ///
    /// Columns are the input labels in insertion order followed by the output
    /// labels. Rows enumerate the inputs in binary order with the first input
    /// as the most significant bit. Constant inputs are not enumerated. The
    /// circuit's own switches are left untouched.
    ///
    /// Circuits with more than [`MAX_TABLE_INPUTS`] free inputs yield a table
    /// with headers and no rows.
    pub fn truth_table(&self) -> TruthTable {
        let inputs: Vec<GateId> = self
            .inputs()
            .filter(|g| g.constant_value().is_none())
            .map(|g| g.id)
            .collect();
        let outputs: Vec<GateId> = self.outputs().map(|g| g.id).collect();

        let headers = inputs
            .iter()
            .chain(outputs.iter())
            .filter_map(|&id| self.gate(id))
            .map(|g| g.label.clone())
            .collect();
        let mut table = TruthTable::new(headers);

        let width = inputs.len();
        if width > MAX_TABLE_INPUTS {
            warn!("Refusing to tabulate {} inputs (limit is {})", width, MAX_TABLE_INPUTS);
            return table;
        }

        for index in 0..space_size(width) {
            let assignment: HashMap<GateId, bool> = inputs
                .iter()
                .enumerate()
                .map(|(position, &id)| (id, bit_of(index, width, position)))
                .collect();
            let mut row: Vec<bool> = inputs.iter().map(|id| assignment[id]).collect();
            let mut evaluator = Evaluator::new(self).with_inputs(assignment);
            row.extend(outputs.iter().map(|&id| evaluator.evaluate(id)));
            table.push_row(row);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::gate::Position;

    fn two_input(kind: GateKind) -> (Circuit, GateId, GateId, GateId) {
        let mut c = Circuit::new();
        let a = c.add_gate(GateKind::Input);
        let b = c.add_gate(GateKind::Input);
        let g = c.add_gate(kind);
        let z = c.add_gate(GateKind::Output);
        c.connect(a, g, 0).unwrap();
        c.connect(b, g, 1).unwrap();
        c.connect(g, z, 0).unwrap();
        (c, a, b, z)
    }

    #[test]
    fn test_evaluate_and() {
        let (mut c, a, b, z) = two_input(GateKind::And);
        assert!(!c.evaluate(z));
        c.set_input(a, true).unwrap();
        assert!(!c.evaluate(z));
        c.set_input(b, true).unwrap();
        assert!(c.evaluate(z));
    }

    #[test]
    fn test_missing_port_is_false() {
        let mut c = Circuit::new();
        let a = c.add_gate(GateKind::Input);
        let g = c.add_gate(GateKind::Or);
        let n = c.add_gate(GateKind::Not);
        c.connect(a, g, 0).unwrap();
        c.set_input(a, true).unwrap();
        assert!(!c.evaluate(g));
        // NOT with nothing wired in
        assert!(!c.evaluate(n));
    }

    #[test]
    fn test_unknown_gate_is_false() {
        let c = Circuit::new();
        assert!(!c.evaluate(42));
    }

    #[test]
    fn test_cycle_is_false() {
        let mut c = Circuit::new();
        let x = c.add_gate(GateKind::Not);
        let y = c.add_gate(GateKind::Not);
        c.connect(x, y, 0).unwrap();
        c.connect(y, x, 0).unwrap();
        let z = c.add_gate(GateKind::Output);
        c.connect(x, z, 0).unwrap();
        // Re-entry at x reads false, so y = NOT false = true, x = NOT true = false.
        assert!(!c.evaluate(z));
        let mut evaluator = Evaluator::new(&c);
        assert!(!evaluator.evaluate(x));
        assert!(evaluator.evaluate(y));
        // Entering the cycle at y instead cuts it at y.
        assert!(!c.evaluate(y));
    }

    #[test]
    fn test_depth_bound() {
        let mut c = Circuit::new();
        let a = c.add_gate(GateKind::Input);
        c.set_input(a, true).unwrap();
        let mut last = a;
        for _ in 0..10 {
            let buf = c.add_gate(GateKind::Buffer);
            c.connect(last, buf, 0).unwrap();
            last = buf;
        }
        assert!(Evaluator::new(&c).evaluate(last));
        assert!(!Evaluator::new(&c).with_max_depth(5).evaluate(last));
    }

    #[test]
    fn test_overrides_leave_circuit_untouched() {
        let (c, a, b, z) = two_input(GateKind::Xor);
        let inputs = HashMap::from([(a, true), (b, false)]);
        assert!(Evaluator::new(&c).with_inputs(inputs).evaluate(z));
        assert!(!c.gate(a).unwrap().input_value());
    }

    #[test]
    fn test_truth_table_xor() {
        let (c, _, _, _) = two_input(GateKind::Xor);
        let table = c.truth_table();
        assert_eq!(table.headers, vec!["A", "B", "Z"]);
        assert_eq!(table.num_rows(), 4);
        assert_eq!(table.last_column(), vec![false, true, true, false]);
    }

    #[test]
    fn test_truth_table_skips_constants() {
        let mut c = Circuit::new();
        let one = c.add_labeled_gate(GateKind::Input, "1", Position::default());
        let a = c.add_gate(GateKind::Input);
        let g = c.add_gate(GateKind::And);
        let z = c.add_gate(GateKind::Output);
        c.connect(one, g, 0).unwrap();
        c.connect(a, g, 1).unwrap();
        c.connect(g, z, 0).unwrap();

        let table = c.truth_table();
        assert_eq!(table.headers, vec!["A", "Z"]);
        assert_eq!(table.rows, vec![vec![false, false], vec![true, true]]);
    }

    #[test]
    fn test_truth_table_too_wide() {
        let mut c = Circuit::new();
        for _ in 0..=MAX_TABLE_INPUTS {
            c.add_gate(GateKind::Input);
        }
        let table = c.truth_table();
        assert_eq!(table.headers.len(), MAX_TABLE_INPUTS + 1);
        assert!(table.is_empty());
    }

    #[test]
    fn test_evaluate_outputs() {
        let (mut c, a, _, z) = two_input(GateKind::Or);
        c.set_input(a, true).unwrap();
        assert_eq!(c.evaluate_outputs(), vec![(z, true)]);
    }

    #[test]
    fn test_dangling_references_contribute_nothing() {
        // Wire 1 comes from a missing gate, wire 2 goes into one, and wire 3
        // targets port 5 of the output.
        let saved = r#"{
            "gates": [
                {"id": 1, "type": "INPUT", "label": "A", "position": {"x": 0, "y": 0},
                 "inputCount": 0, "hasOutputPort": true, "inputValues": [true]},
                {"id": 2, "type": "NOT", "label": "", "position": {"x": 100, "y": 0},
                 "inputCount": 1, "hasOutputPort": true, "inputValues": []},
                {"id": 3, "type": "OUTPUT", "label": "Z", "position": {"x": 200, "y": 0},
                 "inputCount": 1, "hasOutputPort": false, "inputValues": []}
            ],
            "wires": [
                {"id": 1, "fromGateId": 9, "toGateId": 2, "toPortIndex": 0},
                {"id": 2, "fromGateId": 1, "toGateId": 7, "toPortIndex": 0},
                {"id": 3, "fromGateId": 1, "toGateId": 3, "toPortIndex": 5}
            ],
            "gateIdCounter": 3, "wireIdCounter": 3, "inputCounter": 1, "outputCounter": 1
        }"#;
        let c = crate::persist::from_json(saved).unwrap();

        assert!(c.evaluate(1));
        assert!(!c.evaluate(2));
        assert!(!c.evaluate(3));
        assert!(!c.evaluate(7));
        assert_eq!(c.evaluate_outputs(), vec![(3, false)]);

        let table = c.truth_table();
        assert_eq!(table.headers, vec!["A", "Z"]);
        assert_eq!(table.rows, vec![vec![false, false], vec![true, false]]);

        let dot = c.to_dot().unwrap();
        assert!(!dot.contains("g9"));
        assert!(!dot.contains("g7"));
        assert!(dot.contains("g1 -> g3"));
    }
}
