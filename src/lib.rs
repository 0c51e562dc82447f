//! # logic-lab: Boolean functions and logic circuits
//!
//! **`logic-lab`** is a small toolkit for teaching and exploring Boolean logic.
//! It covers the two halves of a digital logic course:
//!
//! - **Functions**: minimize a set of minterms (with don't-cares) to a minimal
//!   Sum-of-Products or Product-of-Sums with the Quine–McCluskey method, lay
//!   the function out on a Karnaugh map and find its rectangular groups.
//! - **Circuits**: build graphs of gates and wires, evaluate them safely even
//!   when they contain cycles, tabulate them, undo and redo edits, save them
//!   as JSON, and synthesize circuits from expressions.
//!
//! ## Minimization
//!
//! ```rust
//! use logic_lab::function::BooleanFunction;
//!
//! let f = BooleanFunction::new(3).with_minterms(&[0, 1, 2, 5, 6, 7]);
//! let expression = f.minimize();
//! assert!(expression.starts_with("F = "));
//!
//! // The same function on a K-map, with its grouping guide.
//! let groups = f.groups();
//! assert!(groups.iter().all(|g| g.size.is_power_of_two()));
//! ```
//!
//! ## Circuits
//!
//! ```rust
//! use logic_lab::circuit::Circuit;
//! use logic_lab::gate::GateKind;
//!
//! let mut circuit = Circuit::new();
//! let a = circuit.add_gate(GateKind::Input); // labelled "A"
//! let b = circuit.add_gate(GateKind::Input); // labelled "B"
//! let and = circuit.add_gate(GateKind::And);
//! let out = circuit.add_gate(GateKind::Output); // labelled "Z"
//! circuit.connect(a, and, 0).unwrap();
//! circuit.connect(b, and, 1).unwrap();
//! circuit.connect(and, out, 0).unwrap();
//!
//! let table = circuit.truth_table();
//! assert_eq!(table.last_column(), vec![false, false, false, true]);
//! ```
//!
//! ## Synthesis
//!
//! ```rust
//! use logic_lab::synth::synthesize;
//!
//! let circuit = synthesize("F = AB' + (A + B)'", &['A', 'B']).unwrap();
//! assert_eq!(circuit.truth_table().last_column(), vec![true, false, true, false]);
//! ```
//!
//! ## Core Components
//!
//! - **[`qm`]**: the Quine–McCluskey minimizer.
//! - **[`kmap`]** and **[`groups`]**: Karnaugh maps and their grouping guide.
//! - **[`circuit`]** and **[`eval`]**: the circuit graph and its evaluator.
//! - **[`editor`]**: undo/redo over circuit edits.
//! - **[`persist`]**: JSON save/load and versioned projects.
//! - **[`synth`]**: expression to circuit synthesis.

pub mod ast;
pub mod circuit;
pub mod dot;
pub mod editor;
pub mod error;
pub mod eval;
pub mod expr;
pub mod function;
pub mod gate;
pub mod groups;
pub mod history;
pub mod kmap;
pub mod label;
pub mod persist;
pub mod qm;
pub mod synth;
pub mod table;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
