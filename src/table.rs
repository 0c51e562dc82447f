//! Truth tables produced by expressions and circuits.

use std::fmt;

/// A rendered truth table.
///
/// Each row holds the input values (in header order) followed by the output
/// values. Rows are in standard binary order with the first input as the
/// most significant bit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruthTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<bool>>,
}

impl TruthTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    pub fn push_row(&mut self, row: Vec<bool>) {
        assert_eq!(
            row.len(),
            self.headers.len(),
            "Row width should match the number of headers"
        );
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column titled `header`.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// All values of the column titled `header`, top to bottom.
    pub fn column(&self, header: &str) -> Option<Vec<bool>> {
        let index = self.column_index(header)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Values of the last column, which holds the function value for
    /// single-output tables.
    pub fn last_column(&self) -> Vec<bool> {
        self.rows.iter().filter_map(|row| row.last().copied()).collect()
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self.headers.iter().map(|h| h.len().max(1)).collect();

        for (i, header) in self.headers.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:>w$}", header, w = widths[i])?;
        }
        writeln!(f)?;

        for row in self.rows.iter() {
            for (i, &value) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>w$}", value as u8, w = widths[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
