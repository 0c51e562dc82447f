//! Circuit graphs of gates and wires.
//!
//! A [`Circuit`] owns its gates and wires and enforces the structural rules
//! on every edit:
//!
//! - an input port receives at most one wire: connecting into an occupied
//!   port replaces the previous wire, and connecting into an `OUTPUT` gate
//!   replaces every wire into it;
//! - a wire starts at a gate with an output port and never loops back onto
//!   its own gate;
//! - deleting a gate deletes every wire touching it.
//!
//! Longer cycles are allowed structurally; the evaluator ([`crate::eval`])
//! guards against them.
//!
//! The circuit also carries the counters behind gate ids, wire ids and the
//! automatic input/output names, so a saved circuit resumes numbering where
//! it left off.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::CircuitError;
use crate::gate::{Gate, GateId, GateKind, Position, Wire, WireId};
use crate::label::{input_label, output_label};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    gates: Vec<Gate>,
    wires: Vec<Wire>,
    /// Last issued gate id.
    gate_id_counter: GateId,
    /// Last issued wire id.
    wire_id_counter: WireId,
    /// Index of the next automatic input name.
    #[serde(rename = "inputCounter")]
    input_label_counter: usize,
    /// Index of the next automatic output name.
    #[serde(rename = "outputCounter")]
    output_label_counter: usize,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id == id)
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == id)
    }

    pub fn gate_id_counter(&self) -> GateId {
        self.gate_id_counter
    }

    pub fn wire_id_counter(&self) -> WireId {
        self.wire_id_counter
    }

    pub fn input_label_counter(&self) -> usize {
        self.input_label_counter
    }

    pub fn output_label_counter(&self) -> usize {
        self.output_label_counter
    }

    /// `INPUT` gates in insertion order.
    pub fn inputs(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.gates.iter().filter(|g| g.is_input())
    }

    /// `OUTPUT` gates in insertion order.
    pub fn outputs(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.gates.iter().filter(|g| g.is_output())
    }

    /// Wires ending at `gate`.
    pub fn wires_into(&self, gate: GateId) -> impl Iterator<Item = &Wire> + '_ {
        self.wires.iter().filter(move |w| w.to_gate_id == gate)
    }

    /// Wires starting at `gate`.
    pub fn wires_from(&self, gate: GateId) -> impl Iterator<Item = &Wire> + '_ {
        self.wires.iter().filter(move |w| w.from_gate_id == gate)
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    fn gate_mut(&mut self, id: GateId) -> Result<&mut Gate, CircuitError> {
        self.gates
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(CircuitError::UnknownGate(id))
    }

    fn label_in_use(&self, label: &str) -> bool {
        self.gates.iter().any(|g| g.label == label)
    }

    fn next_label(&mut self, kind: GateKind) -> String {
        loop {
            let label = match kind {
                GateKind::Input => {
                    let label = input_label(self.input_label_counter);
                    self.input_label_counter += 1;
                    label
                }
                GateKind::Output => {
                    let label = output_label(self.output_label_counter);
                    self.output_label_counter += 1;
                    label
                }
                _ => return String::new(),
            };
            if !self.label_in_use(&label) {
                return label;
            }
            debug!("next_label: {} already taken, skipping", label);
        }
    }

    fn default_position(&self) -> Position {
        let offset = (self.gates.len() % 10) as f64 * 20.0;
        Position::new(100.0 + offset, 100.0 + offset)
    }

    /// Adds a gate at the default position and returns its id.
    ///
    /// `INPUT` and `OUTPUT` gates receive the next automatic name.
    pub fn add_gate(&mut self, kind: GateKind) -> GateId {
        let position = self.default_position();
        self.add_gate_at(kind, position)
    }

    /// Adds a gate at `position` and returns its id.
    pub fn add_gate_at(&mut self, kind: GateKind, position: Position) -> GateId {
        let label = self.next_label(kind);
        self.add_labeled_gate(kind, label, position)
    }

    /// Adds a gate with an explicit label, leaving the name counters alone.
    pub fn add_labeled_gate(&mut self, kind: GateKind, label: impl Into<String>, position: Position) -> GateId {
        self.gate_id_counter += 1;
        let gate = Gate::new(self.gate_id_counter, kind, label, position);
        debug!("add_gate: {}", gate);
        self.gates.push(gate);
        self.gate_id_counter
    }

    pub(crate) fn set_label_counters(&mut self, inputs: usize, outputs: usize) {
        self.input_label_counter = inputs;
        self.output_label_counter = outputs;
    }

    pub fn move_gate(&mut self, id: GateId, position: Position) -> Result<(), CircuitError> {
        self.gate_mut(id)?.position = position;
        Ok(())
    }

    /// Deletes a gate together with every wire touching it.
    ///
    /// Deleting an automatically named `INPUT` or `OUTPUT` steps its name
    /// counter back, so the next gate of that kind reuses the freed name.
    pub fn delete_gate(&mut self, id: GateId) -> Result<Gate, CircuitError> {
        let index = self
            .gates
            .iter()
            .position(|g| g.id == id)
            .ok_or(CircuitError::UnknownGate(id))?;
        let gate = self.gates.remove(index);

        let before = self.wires.len();
        self.wires.retain(|w| w.from_gate_id != id && w.to_gate_id != id);
        debug!("delete_gate: {} with {} wires", gate, before - self.wires.len());

        match gate.kind {
            GateKind::Input if gate.constant_value().is_none() => {
                self.input_label_counter = self.input_label_counter.saturating_sub(1);
            }
            GateKind::Output => {
                self.output_label_counter = self.output_label_counter.saturating_sub(1);
            }
            _ => {}
        }
        Ok(gate)
    }

    /// Wires the output of `from` into input port `port` of `to`.
    ///
    /// Any wire already occupying that port is replaced. For an `OUTPUT`
    /// target every existing wire into it is replaced.
    pub fn connect(&mut self, from: GateId, to: GateId, port: usize) -> Result<WireId, CircuitError> {
        let source = self.gate(from).ok_or(CircuitError::UnknownGate(from))?;
        let target = self.gate(to).ok_or(CircuitError::UnknownGate(to))?;
        if from == to {
            return Err(CircuitError::SelfLoop(from));
        }
        if !source.has_output_port {
            return Err(CircuitError::NoOutputPort(from));
        }
        if port >= target.input_count {
            return Err(CircuitError::InvalidPort { gate: to, port });
        }

        if target.is_output() {
            self.wires.retain(|w| w.to_gate_id != to);
        } else {
            self.wires.retain(|w| !(w.to_gate_id == to && w.to_port_index == port));
        }

        self.wire_id_counter += 1;
        let wire = Wire {
            id: self.wire_id_counter,
            from_gate_id: from,
            to_gate_id: to,
            to_port_index: port,
        };
        debug!("connect: {:?}", wire);
        self.wires.push(wire);
        Ok(wire.id)
    }

    pub fn delete_wire(&mut self, id: WireId) -> Result<Wire, CircuitError> {
        let index = self
            .wires
            .iter()
            .position(|w| w.id == id)
            .ok_or(CircuitError::UnknownWire(id))?;
        Ok(self.wires.remove(index))
    }

    /// Sets the switch of an `INPUT` gate.
    pub fn set_input(&mut self, id: GateId, value: bool) -> Result<(), CircuitError> {
        let gate = self.gate_mut(id)?;
        if !gate.is_input() {
            return Err(CircuitError::NotAnInput(id));
        }
        gate.set_input_value(value);
        Ok(())
    }

    /// Flips the switch of an `INPUT` gate and returns the new value.
    pub fn toggle_input(&mut self, id: GateId) -> Result<bool, CircuitError> {
        let gate = self.gate(id).ok_or(CircuitError::UnknownGate(id))?;
        let value = !gate.input_value();
        self.set_input(id, value)?;
        Ok(value)
    }

    /// Removes every gate and wire and resets all counters.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
