//! Karnaugh map grids.
//!
//! A K-map lays the truth table of a 2, 3 or 4 variable function on a grid
//! whose axes follow the reflected Gray code, so that neighbouring cells
//! (including across the edges) differ in exactly one variable.
//!
//! | variables | grid | rows      | columns   |
//! |-----------|------|-----------|-----------|
//! | 2         | 2×2  | `A`       | `B`       |
//! | 3         | 2×4  | `A`       | `BC`      |
//! | 4         | 4×4  | `AB`      | `CD`      |
//!
//! # Example
//!
//! ```
//! use logic_lab::kmap::{Cell, KMap};
//!
//! let kmap = KMap::build(3, &[0, 5], &[7]);
//! assert_eq!(kmap.get(0, 0), Cell::One);
//! assert_eq!(kmap.get(1, 1), Cell::One); // minterm 5 = 101
//! assert_eq!(kmap.get(1, 2), Cell::DontCare); // minterm 7 = 111
//! assert_eq!(KMap::minterm_at(3, 1, 3), 6);
//! ```

use std::fmt;

use crate::utils::{gray_code, gray_decode, space_size, to_binary};

/// Content of one K-map cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Cell {
    Zero,
    One,
    DontCare,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Zero => write!(f, "0"),
            Cell::One => write!(f, "1"),
            Cell::DontCare => write!(f, "X"),
        }
    }
}

/// A filled Karnaugh map.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct KMap {
    num_variables: usize,
    cells: Vec<Vec<Cell>>,
}

impl KMap {
    /// Grid dimensions `(rows, cols)` for `num_variables`.
    ///
    /// # Panics
    ///
    /// Panics unless `num_variables` is 2, 3 or 4.
    pub fn dimensions(num_variables: usize) -> (usize, usize) {
        match num_variables {
            2 => (2, 2),
            3 => (2, 4),
            4 => (4, 4),
            _ => panic!("K-maps support 2 to 4 variables, got {}", num_variables),
        }
    }

    /// Minterm index shown at `(row, col)`.
    pub fn minterm_at(num_variables: usize, row: usize, col: usize) -> u32 {
        let (rows, cols) = Self::dimensions(num_variables);
        assert!(row < rows && col < cols, "Cell ({}, {}) is outside the grid", row, col);
        let index = match num_variables {
            2 => row * 2 + col,
            3 => row * 4 + gray_code(col),
            _ => gray_code(row) * 4 + gray_code(col),
        };
        index as u32
    }

    /// Grid position `(row, col)` of `minterm`.
    pub fn position_of(num_variables: usize, minterm: u32) -> (usize, usize) {
        assert!(
            minterm < space_size(num_variables),
            "Minterm {} is out of range for {} variables",
            minterm,
            num_variables
        );
        let m = minterm as usize;
        match Self::dimensions(num_variables) {
            (2, 2) => (m / 2, m % 2),
            (2, 4) => (m / 4, gray_decode(m % 4)),
            _ => (gray_decode(m / 4), gray_decode(m % 4)),
        }
    }

    /// Builds the grid: minterms are `1`, don't-cares `X`, the rest `0`.
    ///
    /// Out-of-range indices are ignored; an index listed as both a minterm and
    /// a don't-care is a minterm.
    pub fn build(num_variables: usize, minterms: &[u32], dont_cares: &[u32]) -> Self {
        let (rows, cols) = Self::dimensions(num_variables);
        let cells = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        let m = Self::minterm_at(num_variables, row, col);
                        if minterms.contains(&m) {
                            Cell::One
                        } else if dont_cares.contains(&m) {
                            Cell::DontCare
                        } else {
                            Cell::Zero
                        }
                    })
                    .collect()
            })
            .collect();
        Self { num_variables, cells }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Content of the cell holding `minterm`.
    pub fn cell_of(&self, minterm: u32) -> Cell {
        let (row, col) = Self::position_of(self.num_variables, minterm);
        self.get(row, col)
    }

    fn axis_bits(&self) -> (usize, usize) {
        match self.num_variables {
            2 => (1, 1),
            3 => (1, 2),
            _ => (2, 2),
        }
    }

    /// Gray-code labels of the rows, e.g. `["00", "01", "11", "10"]`.
    pub fn row_labels(&self) -> Vec<String> {
        axis_labels(self.rows(), self.axis_bits().0)
    }

    /// Gray-code labels of the columns.
    pub fn col_labels(&self) -> Vec<String> {
        axis_labels(self.cols(), self.axis_bits().1)
    }

    /// Splits `variables` into the row-axis and column-axis variables.
    pub fn axis_variables<'a>(&self, variables: &'a [char]) -> (&'a [char], &'a [char]) {
        assert_eq!(variables.len(), self.num_variables, "Variable count should match the K-map");
        variables.split_at(self.axis_bits().0)
    }
}

fn axis_labels(len: usize, bits: usize) -> Vec<String> {
    (0..len).map(|i| to_binary(gray_code(i) as u32, bits)).collect()
}

impl fmt::Display for KMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_labels = self.row_labels();
        let col_labels = self.col_labels();
        write!(f, "{:w$}", "", w = row_labels[0].len())?;
        for label in col_labels.iter() {
            write!(f, " {}", label)?;
        }
        writeln!(f)?;
        for (row, label) in row_labels.iter().enumerate() {
            write!(f, "{}", label)?;
            for (col, col_label) in col_labels.iter().enumerate() {
                write!(f, " {:>w$}", self.get(row, col).to_string(), w = col_label.len())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        assert_eq!(KMap::dimensions(2), (2, 2));
        assert_eq!(KMap::dimensions(3), (2, 4));
        assert_eq!(KMap::dimensions(4), (4, 4));
    }

    #[test]
    #[should_panic(expected = "K-maps support 2 to 4 variables")]
    fn test_dimensions_unsupported() {
        KMap::dimensions(5);
    }

    #[test]
    fn test_minterm_layout() {
        // 4 variables:
        //        CD=00 01 11 10
        // AB=00     0  1  3  2
        // AB=01     4  5  7  6
        // AB=11    12 13 15 14
        // AB=10     8  9 11 10
        let expected = [[0, 1, 3, 2], [4, 5, 7, 6], [12, 13, 15, 14], [8, 9, 11, 10]];
        for (row, values) in expected.iter().enumerate() {
            for (col, &m) in values.iter().enumerate() {
                assert_eq!(KMap::minterm_at(4, row, col), m);
            }
        }

        assert_eq!(KMap::minterm_at(3, 0, 2), 3);
        assert_eq!(KMap::minterm_at(3, 1, 3), 6);
        assert_eq!(KMap::minterm_at(2, 1, 0), 2);
    }

    #[test]
    fn test_position_roundtrip() {
        for n in 2..=4 {
            for m in 0..space_size(n) {
                let (row, col) = KMap::position_of(n, m);
                assert_eq!(KMap::minterm_at(n, row, col), m);
            }
        }
    }

    #[test]
    fn test_build() {
        let kmap = KMap::build(2, &[0, 3], &[1]);
        assert_eq!(kmap.cells(), &[vec![Cell::One, Cell::DontCare], vec![Cell::Zero, Cell::One]]);
        assert_eq!(kmap.cell_of(2), Cell::Zero);
    }

    #[test]
    fn test_labels() {
        let kmap = KMap::build(4, &[], &[]);
        assert_eq!(kmap.row_labels(), vec!["00", "01", "11", "10"]);
        assert_eq!(kmap.col_labels(), vec!["00", "01", "11", "10"]);

        let kmap = KMap::build(3, &[], &[]);
        assert_eq!(kmap.row_labels(), vec!["0", "1"]);
        assert_eq!(kmap.col_labels(), vec!["00", "01", "11", "10"]);
        let (rows, cols) = kmap.axis_variables(&['A', 'B', 'C']);
        assert_eq!(rows, &['A']);
        assert_eq!(cols, &['B', 'C']);
    }

    #[test]
    fn test_display() {
        let kmap = KMap::build(2, &[1, 2], &[]);
        assert_eq!(kmap.to_string(), "  0 1\n0 0 1\n1 1 0\n");
    }
}
