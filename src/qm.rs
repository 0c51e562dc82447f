//! Quine–McCluskey minimization.
//!
//! This module reduces a set of minterms (plus optional don't-cares) to a
//! small sum of products, or a set of maxterms to a small product of sums.
//!
//! # Algorithm
//!
//! 1. Every minterm and don't-care seeds an [`Implicant`] whose pattern is its
//!    binary index, most significant bit first.
//! 2. Each round groups the current implicants by their number of `1` bits.
//!    Implicants from adjacent groups whose patterns differ in exactly one
//!    fixed position combine into a new implicant with a `-` there.
//! 3. Implicants which took part in no combination during a round are prime.
//!    Rounds repeat until nothing combines.
//! 4. A prime implicant is *essential* when it is the only prime covering some
//!    minterm. All essentials are selected.
//! 5. Remaining minterms are covered greedily, always taking the prime which
//!    covers the most still-uncovered minterms.
//!
//! Don't-cares take part in combination but never need to be covered.
//! Step 5 is a heuristic: the result is always equivalent to the input
//! function, but not guaranteed to have the fewest terms.
//!
//! # Example
//!
//! ```
//! use logic_lab::qm::Minimizer;
//!
//! let minimizer = Minimizer::with_width(3);
//! assert_eq!(minimizer.simplify(&[0, 1, 2, 3], &[]), "F = A'");
//! assert_eq!(minimizer.simplify(&[], &[]), "F = 0");
//! assert_eq!(minimizer.simplify_pos(&[0], &[]), "F = (A + B + C)");
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::debug;

use crate::types::{default_variables, Literal};
use crate::utils::{bit_of, space_size};

/// One position of an implicant pattern.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Bit {
    Zero,
    One,
    /// Eliminated position (`-`): the implicant holds for both values.
    Free,
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bit::Zero => write!(f, "0"),
            Bit::One => write!(f, "1"),
            Bit::Free => write!(f, "-"),
        }
    }
}

/// A cube over the input space together with the indices it covers.
///
/// # Invariants
///
/// - `covered` is exactly the set of indices matching `bits`
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Implicant {
    bits: Vec<Bit>,
    covered: BTreeSet<u32>,
}

impl Implicant {
    /// The implicant covering the single assignment `index`.
    pub fn from_index(index: u32, width: usize) -> Self {
        let bits = (0..width)
            .map(|position| if bit_of(index, width, position) { Bit::One } else { Bit::Zero })
            .collect();
        Self {
            bits,
            covered: BTreeSet::from([index]),
        }
    }

    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// Covered indices, in ascending order. May include don't-cares.
    pub fn covered(&self) -> &BTreeSet<u32> {
        &self.covered
    }

    pub fn covers(&self, index: u32) -> bool {
        self.covered.contains(&index)
    }

    /// The pattern as a string over `0`, `1` and `-`.
    pub fn pattern(&self) -> String {
        self.bits.iter().map(|b| b.to_string()).collect()
    }

    /// Number of `1` positions.
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == Bit::One).count()
    }

    /// Number of eliminated positions.
    pub fn free(&self) -> usize {
        self.bits.iter().filter(|&&b| b == Bit::Free).count()
    }

    /// Combines two implicants differing in exactly one fixed position.
    ///
    /// Returns `None` when the patterns differ in zero or several positions,
    /// or when they disagree on an eliminated position.
    pub fn combine(&self, other: &Implicant) -> Option<Implicant> {
        assert_eq!(self.bits.len(), other.bits.len(), "Implicant widths differ");

        let mut diff = None;
        for (i, (&a, &b)) in self.bits.iter().zip(other.bits.iter()).enumerate() {
            if a == b {
                continue;
            }
            if a == Bit::Free || b == Bit::Free || diff.is_some() {
                return None;
            }
            diff = Some(i);
        }

        let i = diff?;
        let mut bits = self.bits.clone();
        bits[i] = Bit::Free;
        let covered = self.covered.union(&other.covered).copied().collect();
        Some(Implicant { bits, covered })
    }

    /// Literals of the product term for this implicant: `1` gives the plain
    /// variable, `0` the complemented one.
    pub fn product_literals(&self, variables: &[char]) -> Vec<Literal> {
        self.literals(variables, false)
    }

    /// Literals of the sum term for this implicant of maxterms: `0` gives the
    /// plain variable, `1` the complemented one.
    pub fn sum_literals(&self, variables: &[char]) -> Vec<Literal> {
        self.literals(variables, true)
    }

    fn literals(&self, variables: &[char], inverted: bool) -> Vec<Literal> {
        assert_eq!(variables.len(), self.bits.len(), "Variable count should match implicant width");
        self.bits
            .iter()
            .zip(variables.iter())
            .filter_map(|(&bit, &v)| match bit {
                Bit::One => Some(Literal::with_value(v, !inverted)),
                Bit::Zero => Some(Literal::with_value(v, inverted)),
                Bit::Free => None,
            })
            .collect()
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.pattern(), self.covered)
    }
}

/// Full outcome of one minimization, kept for step-by-step explanations.
#[derive(Debug, Clone, Default)]
pub struct Minimization {
    /// Every prime implicant, in discovery order.
    pub primes: Vec<Implicant>,
    /// Indices into `primes` of the essential prime implicants.
    pub essentials: Vec<usize>,
    /// Indices into `primes` of the chosen cover: essentials first, then the
    /// greedy picks in the order they were taken.
    pub selected: Vec<usize>,
}

impl Minimization {
    pub fn essential_implicants(&self) -> impl Iterator<Item = &Implicant> + '_ {
        self.essentials.iter().map(move |&i| &self.primes[i])
    }

    pub fn selected_implicants(&self) -> impl Iterator<Item = &Implicant> + '_ {
        self.selected.iter().map(move |&i| &self.primes[i])
    }
}

/// Quine–McCluskey minimizer over a fixed list of variables.
#[derive(Debug, Clone)]
pub struct Minimizer {
    variables: Vec<char>,
}

impl Minimizer {
    /// Creates a minimizer; `variables[0]` is the most significant bit.
    ///
    /// # Panics
    ///
    /// Panics if there are no variables or more than 16.
    pub fn new(variables: Vec<char>) -> Self {
        assert!(
            (1..=16).contains(&variables.len()),
            "Minimizer supports 1 to 16 variables, got {}",
            variables.len()
        );
        Self { variables }
    }

    /// Creates a minimizer over the default variables `A, B, C, ...`.
    pub fn with_width(width: usize) -> Self {
        Self::new(default_variables(width))
    }

    pub fn width(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[char] {
        &self.variables
    }

    /// Drops indices outside the input space.
    fn normalize(&self, indices: &[u32]) -> BTreeSet<u32> {
        let size = space_size(self.width());
        indices
            .iter()
            .copied()
            .filter(|&i| {
                if i >= size {
                    debug!("normalize: dropping out-of-range index {}", i);
                }
                i < size
            })
            .collect()
    }

    /// Normalizes a (terms, don't-cares) pair; indices in both lists count as terms.
    fn normalize_pair(&self, terms: &[u32], dont_cares: &[u32]) -> (BTreeSet<u32>, BTreeSet<u32>) {
        let terms = self.normalize(terms);
        let dont_cares = self.normalize(dont_cares).difference(&terms).copied().collect();
        (terms, dont_cares)
    }

    /// Computes every prime implicant of `minterms ∪ dont_cares`.
    pub fn prime_implicants(&self, minterms: &[u32], dont_cares: &[u32]) -> Vec<Implicant> {
        let (minterms, dont_cares) = self.normalize_pair(minterms, dont_cares);
        self.primes_of(&minterms, &dont_cares)
    }

    fn primes_of(&self, minterms: &BTreeSet<u32>, dont_cares: &BTreeSet<u32>) -> Vec<Implicant> {
        let width = self.width();
        let mut current: Vec<Implicant> = minterms
            .union(dont_cares)
            .map(|&i| Implicant::from_index(i, width))
            .collect();
        let mut primes: Vec<Implicant> = Vec::new();

        let mut round = 0;
        while !current.is_empty() {
            debug!("primes: round {} with {} implicants", round, current.len());

            let mut groups = BTreeMap::<usize, Vec<usize>>::new();
            for (i, implicant) in current.iter().enumerate() {
                groups.entry(implicant.ones()).or_default().push(i);
            }

            let mut used = vec![false; current.len()];
            let mut next: Vec<Implicant> = Vec::new();
            for (&ones, group) in groups.iter() {
                let Some(upper) = groups.get(&(ones + 1)) else {
                    continue;
                };
                for &i in group.iter() {
                    for &j in upper.iter() {
                        if let Some(combined) = current[i].combine(&current[j]) {
                            used[i] = true;
                            used[j] = true;
                            if !next.contains(&combined) {
                                next.push(combined);
                            }
                        }
                    }
                }
            }

            for (implicant, used) in current.into_iter().zip(used) {
                if !used && !primes.contains(&implicant) {
                    debug!("primes: prime {}", implicant);
                    primes.push(implicant);
                }
            }

            current = next;
            round += 1;
        }

        primes
    }

    /// Runs the full minimization and reports every intermediate result.
    pub fn minimize(&self, minterms: &[u32], dont_cares: &[u32]) -> Minimization {
        let (minterms, dont_cares) = self.normalize_pair(minterms, dont_cares);
        self.minimize_sets(&minterms, &dont_cares)
    }

    fn minimize_sets(&self, minterms: &BTreeSet<u32>, dont_cares: &BTreeSet<u32>) -> Minimization {
        let primes = self.primes_of(minterms, dont_cares);

        let mut coverage = BTreeMap::<u32, Vec<usize>>::new();
        for &m in minterms.iter() {
            let coverers = primes
                .iter()
                .enumerate()
                .filter(|(_, p)| p.covers(m))
                .map(|(i, _)| i)
                .collect();
            coverage.insert(m, coverers);
        }

        let essentials: Vec<usize> = coverage
            .values()
            .filter(|coverers| coverers.len() == 1)
            .map(|coverers| coverers[0])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        for &i in essentials.iter() {
            debug!("minimize: essential {}", primes[i]);
        }

        let mut uncovered: BTreeSet<u32> = minterms.clone();
        for &i in essentials.iter() {
            for m in primes[i].covered() {
                uncovered.remove(m);
            }
        }

        let mut selected = essentials.clone();
        while !uncovered.is_empty() {
            let gain = |i: usize| primes[i].covered().intersection(&uncovered).count();
            let best = (0..primes.len())
                .filter(|i| !selected.contains(i))
                .max_by_key(|&i| (gain(i), primes[i].free(), Reverse(i)));
            let Some(best) = best.filter(|&i| gain(i) > 0) else {
                // Unreachable: every minterm is covered by at least its own prime.
                break;
            };
            debug!("minimize: greedy pick {}", primes[best]);
            for m in primes[best].covered() {
                uncovered.remove(m);
            }
            selected.push(best);
        }

        Minimization {
            primes,
            essentials,
            selected,
        }
    }

    /// Minimal sum of products as literal lists, after absorption.
    ///
    /// An empty list means no minterms (constant 0); a list holding one empty
    /// term means constant 1.
    pub fn product_terms(&self, minterms: &[u32], dont_cares: &[u32]) -> Vec<Vec<Literal>> {
        let (minterms, dont_cares) = self.normalize_pair(minterms, dont_cares);
        if minterms.is_empty() {
            return Vec::new();
        }
        if minterms.len() as u32 == space_size(self.width()) {
            return vec![Vec::new()];
        }
        let minimization = self.minimize_sets(&minterms, &dont_cares);
        let terms = minimization
            .selected_implicants()
            .map(|implicant| implicant.product_literals(&self.variables))
            .collect();
        absorb(terms)
    }

    /// Minimal product of sums as literal lists, after absorption.
    ///
    /// An empty list means no maxterms (constant 1); a list holding one empty
    /// term means constant 0.
    pub fn sum_terms(&self, maxterms: &[u32], dont_cares: &[u32]) -> Vec<Vec<Literal>> {
        let (maxterms, dont_cares) = self.normalize_pair(maxterms, dont_cares);
        if maxterms.is_empty() {
            return Vec::new();
        }
        if maxterms.len() as u32 == space_size(self.width()) {
            return vec![Vec::new()];
        }
        let minimization = self.minimize_sets(&maxterms, &dont_cares);
        let terms = minimization
            .selected_implicants()
            .map(|implicant| implicant.sum_literals(&self.variables))
            .collect();
        absorb(terms)
    }

    /// Minimal sum of products rendered as `F = ...`.
    pub fn simplify(&self, minterms: &[u32], dont_cares: &[u32]) -> String {
        let terms = self.product_terms(minterms, dont_cares);
        format!("F = {}", render_sop(&terms))
    }

    /// Minimal product of sums rendered as `F = (..)(..)`.
    pub fn simplify_pos(&self, maxterms: &[u32], dont_cares: &[u32]) -> String {
        let terms = self.sum_terms(maxterms, dont_cares);
        format!("F = {}", render_pos(&terms))
    }
}

/// Drops every term absorbed by a strictly shorter term whose literals it
/// contains (`A + AB` becomes `A`, and dually `A(A + B)` becomes `A`).
/// Duplicate terms are kept once.
pub fn absorb(terms: Vec<Vec<Literal>>) -> Vec<Vec<Literal>> {
    let mut kept: Vec<Vec<Literal>> = Vec::new();
    for (i, term) in terms.iter().enumerate() {
        let absorbed = terms.iter().enumerate().any(|(j, other)| {
            j != i && other.len() < term.len() && other.iter().all(|lit| term.contains(lit))
        });
        if absorbed {
            debug!("absorb: dropping {:?}", term);
        } else if !kept.contains(term) {
            kept.push(term.clone());
        }
    }
    kept
}

/// Renders product terms joined by ` + `; see [`Minimizer::product_terms`]
/// for the constant conventions.
pub fn render_sop(terms: &[Vec<Literal>]) -> String {
    if terms.is_empty() {
        return "0".to_string();
    }
    if terms.iter().any(|t| t.is_empty()) {
        return "1".to_string();
    }
    terms
        .iter()
        .map(|t| t.iter().map(|lit| lit.to_string()).collect::<String>())
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Renders sum terms as a product of parenthesized sums; see
/// [`Minimizer::sum_terms`] for the constant conventions.
pub fn render_pos(terms: &[Vec<Literal>]) -> String {
    if terms.is_empty() {
        return "1".to_string();
    }
    if terms.iter().any(|t| t.is_empty()) {
        return "0".to_string();
    }
    terms
        .iter()
        .map(|t| {
            let sum = t.iter().map(|lit| lit.to_string()).collect::<Vec<_>>().join(" + ");
            format!("({})", sum)
        })
        .collect()
}
