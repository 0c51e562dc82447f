//! Boolean functions given by their minterms.
//!
//! A [`BooleanFunction`] gathers everything the minimizer, the K-map and the
//! grouping guide need about one 2 to 4 variable function: variable names,
//! minterms, don't-cares and the requested form (SOP or POS). Its setters
//! normalize their input, so the sets are always sorted, in range and
//! disjoint.
//!
//! ```
//! use logic_lab::function::BooleanFunction;
//! use logic_lab::types::OptimizationType;
//!
//! let f = BooleanFunction::new(3)
//!     .with_minterms(&[1, 3, 5, 7])
//!     .with_dont_cares(&[0]);
//! assert_eq!(f.minimize(), "F = C");
//! assert_eq!(f.maxterms(), vec![2, 4, 6]);
//!
//! let f = f.with_optimization(OptimizationType::Pos);
//! assert_eq!(f.minimize(), "F = (C)");
//! ```

use std::collections::BTreeSet;

use log::warn;

use crate::expr::tabulate;
use crate::groups::{detect_groups, Group};
use crate::kmap::{Cell, KMap};
use crate::qm::{Minimization, Minimizer};
use crate::table::TruthTable;
use crate::types::{default_variables, OptimizationType};
use crate::utils::space_size;

/// Parses a comma-separated list of indices such as `"0, 2, 5"`.
///
/// Tokens which are not decimal numbers, and numbers outside the space of
/// `num_variables` variables, are skipped. The result is sorted and free of
/// duplicates.
pub fn parse_indices(text: &str, num_variables: usize) -> Vec<u32> {
    let size = space_size(num_variables);
    let mut indices = BTreeSet::new();
    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<u32>() {
            Ok(index) if index < size => {
                indices.insert(index);
            }
            Ok(index) => warn!("Skipping out-of-range index {} for {} variables", index, num_variables),
            Err(_) => warn!("Skipping non-numeric index {:?}", token),
        }
    }
    indices.into_iter().collect()
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BooleanFunction {
    variables: Vec<char>,
    minterms: Vec<u32>,
    dont_cares: Vec<u32>,
    optimization: OptimizationType,
}

impl BooleanFunction {
    /// The constant-0 function of `num_variables` variables named `A, B, ...`.
    ///
    /// # Panics
    ///
    /// Panics unless `num_variables` is 2, 3 or 4.
    pub fn new(num_variables: usize) -> Self {
        assert!(
            (2..=4).contains(&num_variables),
            "Boolean functions support 2 to 4 variables, got {}",
            num_variables
        );
        Self {
            variables: default_variables(num_variables),
            minterms: Vec::new(),
            dont_cares: Vec::new(),
            optimization: OptimizationType::default(),
        }
    }

    /// Renames the variables; `variables[0]` is the most significant bit.
    pub fn with_variables(mut self, variables: Vec<char>) -> Self {
        assert_eq!(
            variables.len(),
            self.num_variables(),
            "Variable count should match the function"
        );
        self.variables = variables;
        self
    }

    /// Sets the minterms; don't-cares listed again here become minterms.
    pub fn with_minterms(mut self, minterms: &[u32]) -> Self {
        self.minterms = self.normalize(minterms);
        self.dont_cares.retain(|i| self.minterms.binary_search(i).is_err());
        self
    }

    /// Sets the don't-cares, ignoring indices that are already minterms.
    pub fn with_dont_cares(mut self, dont_cares: &[u32]) -> Self {
        let mut dont_cares = self.normalize(dont_cares);
        dont_cares.retain(|i| self.minterms.binary_search(i).is_err());
        self.dont_cares = dont_cares;
        self
    }

    pub fn with_optimization(mut self, optimization: OptimizationType) -> Self {
        self.optimization = optimization;
        self
    }

    fn normalize(&self, indices: &[u32]) -> Vec<u32> {
        let size = space_size(self.num_variables());
        let set: BTreeSet<u32> = indices.iter().copied().filter(|&i| i < size).collect();
        set.into_iter().collect()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[char] {
        &self.variables
    }

    pub fn minterms(&self) -> &[u32] {
        &self.minterms
    }

    pub fn dont_cares(&self) -> &[u32] {
        &self.dont_cares
    }

    pub fn optimization(&self) -> OptimizationType {
        self.optimization
    }

    /// Indices where the function is 0: neither minterms nor don't-cares.
    pub fn maxterms(&self) -> Vec<u32> {
        (0..space_size(self.num_variables()))
            .filter(|i| self.value(*i) == Cell::Zero)
            .collect()
    }

    /// Value at `index`.
    pub fn value(&self, index: u32) -> Cell {
        if self.minterms.binary_search(&index).is_ok() {
            Cell::One
        } else if self.dont_cares.binary_search(&index).is_ok() {
            Cell::DontCare
        } else {
            Cell::Zero
        }
    }

    fn minimizer(&self) -> Minimizer {
        Minimizer::new(self.variables.clone())
    }

    /// Minimized expression in the requested form, as `F = ...`.
    pub fn minimize(&self) -> String {
        match self.optimization {
            OptimizationType::Sop => self.minimizer().simplify(&self.minterms, &self.dont_cares),
            OptimizationType::Pos => self.minimizer().simplify_pos(&self.maxterms(), &self.dont_cares),
        }
    }

    /// Prime implicants, essentials and cover behind [`BooleanFunction::minimize`].
    ///
    /// For POS the implicants range over the maxterms.
    pub fn minimization(&self) -> Minimization {
        match self.optimization {
            OptimizationType::Sop => self.minimizer().minimize(&self.minterms, &self.dont_cares),
            OptimizationType::Pos => self.minimizer().minimize(&self.maxterms(), &self.dont_cares),
        }
    }

    pub fn kmap(&self) -> KMap {
        KMap::build(self.num_variables(), &self.minterms, &self.dont_cares)
    }

    /// K-map groups for the requested form.
    pub fn groups(&self) -> Vec<Group> {
        detect_groups(&self.kmap(), self.optimization)
    }

    /// Truth table with `F` true on minterms; don't-care rows read as 0.
    ///
    /// Use [`BooleanFunction::value`] to tell don't-care rows apart.
    pub fn truth_table(&self) -> TruthTable {
        let width = self.num_variables();
        tabulate(&self.variables, |assignment| {
            let index = self
                .variables
                .iter()
                .fold(0u32, |acc, v| (acc << 1) | u32::from(assignment[v]));
            debug_assert!(index < space_size(width));
            self.value(index) == Cell::One
        })
    }
}
