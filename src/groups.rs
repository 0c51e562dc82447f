//! Grouping guide for Karnaugh maps.
//!
//! [`detect_groups`] finds rectangles of adjacent target cells whose sides
//! are powers of two. Rectangles may wrap around the grid edges. Shapes are
//! tried from the largest (`4×4`) to the single cell, and a rectangle is kept
//! only when it covers at least one required cell no earlier group covers.
//!
//! The search is greedy. It yields valid, maximal-first groups for
//! explanation purposes, but neither the fewest groups nor necessarily the
//! same terms as [`crate::qm`].
//!
//! Target cells are `1` and `X` for SOP, and `0` only for POS. Don't-cares
//! are never grouped into POS groups even though the minimizer lets them
//! help in both forms.

use std::collections::BTreeSet;

use log::debug;

use crate::kmap::{Cell, KMap};
use crate::types::{Literal, OptimizationType};
use crate::utils::bit_of;

/// Display palette; group `i` uses `PALETTE[i % 8]`.
pub const PALETTE: [&str; 8] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6", "#bfef45",
];

/// Candidate rectangle shapes `(height, width)`, largest first.
const SHAPES: [(usize, usize); 9] = [(4, 4), (4, 2), (2, 4), (4, 1), (1, 4), (2, 2), (2, 1), (1, 2), (1, 1)];

/// A rectangle of K-map cells.
///
/// # Invariants
///
/// - `size == cells.len() == minterms.len()`, and `size` is a power of two
/// - every cell holds the target value of the grouping
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Group {
    /// Member cells `(row, col)` in scan order from the top-left corner.
    pub cells: Vec<(usize, usize)>,
    /// Indices of the member cells, ascending.
    pub minterms: Vec<u32>,
    pub size: usize,
    pub color_index: usize,
}

impl Group {
    pub fn color(&self) -> &'static str {
        PALETTE[self.color_index % PALETTE.len()]
    }

    /// Literals shared by every member cell.
    ///
    /// For SOP a variable constantly `1` gives the plain literal; for POS the
    /// polarity is inverted, so a constant `0` gives the plain literal.
    pub fn literals(&self, variables: &[char], optimization: OptimizationType) -> Vec<Literal> {
        let width = variables.len();
        variables
            .iter()
            .enumerate()
            .filter_map(|(position, &v)| {
                let first = bit_of(self.minterms[0], width, position);
                let constant = self.minterms.iter().all(|&m| bit_of(m, width, position) == first);
                if !constant {
                    return None;
                }
                Some(match optimization {
                    OptimizationType::Sop => Literal::with_value(v, first),
                    OptimizationType::Pos => Literal::with_value(v, !first),
                })
            })
            .collect()
    }

    /// The group's term: a product for SOP (`AB'`), a sum for POS (`(A' + B)`).
    pub fn term(&self, variables: &[char], optimization: OptimizationType) -> String {
        let literals = self.literals(variables, optimization);
        match optimization {
            OptimizationType::Sop if literals.is_empty() => "1".to_string(),
            OptimizationType::Sop => literals.iter().map(|lit| lit.to_string()).collect(),
            OptimizationType::Pos if literals.is_empty() => "0".to_string(),
            OptimizationType::Pos => {
                let sum = literals.iter().map(|lit| lit.to_string()).collect::<Vec<_>>().join(" + ");
                format!("({})", sum)
            }
        }
    }
}

fn is_target(cell: Cell, optimization: OptimizationType) -> bool {
    match optimization {
        OptimizationType::Sop => matches!(cell, Cell::One | Cell::DontCare),
        OptimizationType::Pos => cell == Cell::Zero,
    }
}

fn is_required(cell: Cell, optimization: OptimizationType) -> bool {
    match optimization {
        OptimizationType::Sop => cell == Cell::One,
        OptimizationType::Pos => cell == Cell::Zero,
    }
}

/// Scans `kmap` for groups of target cells.
pub fn detect_groups(kmap: &KMap, optimization: OptimizationType) -> Vec<Group> {
    let (rows, cols) = (kmap.rows(), kmap.cols());
    let n = kmap.num_variables();

    let mut groups: Vec<Group> = Vec::new();
    let mut covered = BTreeSet::<u32>::new();

    for &(height, width) in SHAPES.iter().filter(|&&(h, w)| h <= rows && w <= cols) {
        for top in 0..rows {
            for left in 0..cols {
                let cells: Vec<(usize, usize)> = (0..height)
                    .flat_map(|dr| (0..width).map(move |dc| ((top + dr) % rows, (left + dc) % cols)))
                    .collect();

                if !cells.iter().all(|&(r, c)| is_target(kmap.get(r, c), optimization)) {
                    continue;
                }

                let adds_coverage = cells.iter().any(|&(r, c)| {
                    is_required(kmap.get(r, c), optimization) && !covered.contains(&KMap::minterm_at(n, r, c))
                });
                if !adds_coverage {
                    continue;
                }

                let mut minterms: Vec<u32> = cells.iter().map(|&(r, c)| KMap::minterm_at(n, r, c)).collect();
                minterms.sort_unstable();

                for &(r, c) in cells.iter() {
                    if is_required(kmap.get(r, c), optimization) {
                        covered.insert(KMap::minterm_at(n, r, c));
                    }
                }

                let group = Group {
                    size: cells.len(),
                    cells,
                    minterms,
                    color_index: groups.len() % PALETTE.len(),
                };
                debug!("detect_groups: {}x{} at ({}, {}) -> {:?}", height, width, top, left, group.minterms);
                groups.push(group);
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_full_map() {
        let kmap = KMap::build(4, &(0..16).collect::<Vec<_>>(), &[]);
        let groups = detect_groups(&kmap, OptimizationType::Sop);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].size, 16);
        assert_eq!(groups[0].term(&['A', 'B', 'C', 'D'], OptimizationType::Sop), "1");
    }

    #[test]
    fn test_empty_map() {
        let kmap = KMap::build(3, &[], &[]);
        assert!(detect_groups(&kmap, OptimizationType::Sop).is_empty());
    }

    #[test]
    fn test_corners_wrap() {
        // The four corners of a 4x4 map are adjacent: m0, m2, m8, m10 = B'D'
        let kmap = KMap::build(4, &[0, 2, 8, 10], &[]);
        let groups = detect_groups(&kmap, OptimizationType::Sop);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].minterms, vec![0, 2, 8, 10]);
        assert_eq!(groups[0].term(&['A', 'B', 'C', 'D'], OptimizationType::Sop), "B'D'");
    }

    #[test]
    fn test_edge_wrap_3vars() {
        // Columns 00 and 10 are adjacent: m0, m2, m4, m6 = C'
        let kmap = KMap::build(3, &[0, 2, 4, 6], &[]);
        let groups = detect_groups(&kmap, OptimizationType::Sop);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].size, 4);
        assert_eq!(groups[0].term(&['A', 'B', 'C'], OptimizationType::Sop), "C'");
    }

    #[test]
    fn test_dont_cares_extend_sop_groups() {
        let kmap = KMap::build(2, &[0, 1], &[2, 3]);
        let groups = detect_groups(&kmap, OptimizationType::Sop);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].size, 4);
    }

    #[test]
    fn test_dont_cares_excluded_from_pos() {
        // Zeros at m2, m3; don't-care at m1 must not join a POS group.
        let kmap = KMap::build(2, &[0], &[1]);
        let groups = detect_groups(&kmap, OptimizationType::Pos);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].minterms, vec![2, 3]);
        assert_eq!(groups[0].term(&['A', 'B'], OptimizationType::Pos), "(A')");
    }

    #[test]
    fn test_only_dont_cares_form_no_group() {
        let kmap = KMap::build(2, &[], &[0, 1, 2, 3]);
        assert!(detect_groups(&kmap, OptimizationType::Sop).is_empty());
    }

    #[test]
    fn test_group_invariants() {
        let kmap = KMap::build(4, &[0, 1, 2, 5, 6, 7, 8, 9, 10, 14], &[]);
        for optimization in [OptimizationType::Sop, OptimizationType::Pos] {
            let groups = detect_groups(&kmap, optimization);
            assert!(!groups.is_empty());
            for (i, group) in groups.iter().enumerate() {
                assert_eq!(group.cells.len(), group.size);
                assert_eq!(group.minterms.len(), group.size);
                assert!(group.size.is_power_of_two());
                assert_eq!(group.color_index, i % PALETTE.len());
                for &(r, c) in group.cells.iter() {
                    assert!(is_target(kmap.get(r, c), optimization));
                }
            }
        }
    }

    #[test]
    fn test_every_required_cell_grouped() {
        let kmap = KMap::build(4, &[1, 3, 4, 6, 9, 11, 12, 14], &[]);
        let groups = detect_groups(&kmap, OptimizationType::Sop);
        for m in [1, 3, 4, 6, 9, 11, 12, 14] {
            assert!(groups.iter().any(|g| g.minterms.contains(&m)), "minterm {} not grouped", m);
        }
    }

    #[test]
    fn test_palette_cycles() {
        // Checkerboard: every 1 is isolated, giving 8 single-cell groups.
        let kmap = KMap::build(4, &[0, 3, 5, 6, 9, 10, 12, 15], &[]);
        let groups = detect_groups(&kmap, OptimizationType::Sop);
        assert_eq!(groups.len(), 8);
        assert!(groups.iter().all(|g| g.size == 1));
        assert_eq!(groups[7].color(), PALETTE[7]);
    }
}
