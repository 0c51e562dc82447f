//! An undoable editing session over a circuit.
//!
//! [`Editor`] forwards every edit to its [`Circuit`] and, when the edit
//! succeeds, records a snapshot of the whole circuit (gates, wires and all
//! counters) in a bounded [`History`]. Undo and redo replace the live circuit
//! with a snapshot wholesale. Rejected edits record nothing.

use log::debug;

use crate::circuit::Circuit;
use crate::error::CircuitError;
use crate::gate::{Gate, GateId, GateKind, Position, Wire, WireId};
use crate::history::{History, HISTORY_CAPACITY};

#[derive(Debug, Clone)]
pub struct Editor {
    circuit: Circuit,
    history: History<Circuit>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_capacity(Circuit::new(), HISTORY_CAPACITY)
    }

    /// Starts a session on `circuit`, keeping up to `capacity` snapshots.
    pub fn with_capacity(circuit: Circuit, capacity: usize) -> Self {
        let history = History::with_capacity(circuit.clone(), capacity);
        Self { circuit, history }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn history(&self) -> &History<Circuit> {
        &self.history
    }

    /// Replaces the circuit, e.g. after loading a project, and forgets the
    /// previous history.
    pub fn load(&mut self, circuit: Circuit) {
        self.history.reset(circuit.clone());
        self.circuit = circuit;
    }

    fn commit(&mut self) {
        self.history.record(self.circuit.clone());
    }

    fn commit_if_ok<T>(&mut self, result: Result<T, CircuitError>) -> Result<T, CircuitError> {
        if result.is_ok() {
            self.commit();
        }
        result
    }

    pub fn add_gate(&mut self, kind: GateKind) -> GateId {
        let id = self.circuit.add_gate(kind);
        self.commit();
        id
    }

    pub fn add_gate_at(&mut self, kind: GateKind, position: Position) -> GateId {
        let id = self.circuit.add_gate_at(kind, position);
        self.commit();
        id
    }

    pub fn move_gate(&mut self, id: GateId, position: Position) -> Result<(), CircuitError> {
        let result = self.circuit.move_gate(id, position);
        self.commit_if_ok(result)
    }

    pub fn delete_gate(&mut self, id: GateId) -> Result<Gate, CircuitError> {
        let result = self.circuit.delete_gate(id);
        self.commit_if_ok(result)
    }

    pub fn connect(&mut self, from: GateId, to: GateId, port: usize) -> Result<WireId, CircuitError> {
        let result = self.circuit.connect(from, to, port);
        self.commit_if_ok(result)
    }

    pub fn delete_wire(&mut self, id: WireId) -> Result<Wire, CircuitError> {
        let result = self.circuit.delete_wire(id);
        self.commit_if_ok(result)
    }

    pub fn set_input(&mut self, id: GateId, value: bool) -> Result<(), CircuitError> {
        let result = self.circuit.set_input(id, value);
        self.commit_if_ok(result)
    }

    pub fn toggle_input(&mut self, id: GateId) -> Result<bool, CircuitError> {
        let result = self.circuit.toggle_input(id);
        self.commit_if_ok(result)
    }

    pub fn clear(&mut self) {
        self.circuit.clear();
        self.commit();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the previous snapshot; `false` when there is none.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.circuit = snapshot.clone();
                debug!("undo: {} gates, {} wires", self.circuit.gates().len(), self.circuit.wires().len());
                true
            }
            None => false,
        }
    }

    /// Restores the next snapshot; `false` when there is none.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.circuit = snapshot.clone();
                debug!("redo: {} gates, {} wires", self.circuit.gates().len(), self.circuit.wires().len());
                true
            }
            None => false,
        }
    }
}
