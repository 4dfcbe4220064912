// SPDX-License-Identifier: Apache-2.0

//! Lightweight table printer for consistent formatting.
//!
//! Widths are measured by display width, so cells may carry ANSI styling.

use std::fmt::Write;

use console::{Alignment, measure_text_width, pad_str};

/// A simple table printer with a header row and a dashed rule under it.
pub struct TablePrinter {
    /// Column headers.
    headers: Vec<String>,
    /// Column widths for alignment.
    column_widths: Vec<usize>,
    /// Rows of data.
    rows: Vec<Vec<String>>,
}

impl TablePrinter {
    /// Create a new table printer with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(ToString::to_string).collect(),
            column_widths: headers.iter().map(|h| measure_text_width(h)).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row to the table, updating column widths as needed.
    pub fn add_row(&mut self, cells: Vec<String>) {
        for (i, cell) in cells.iter().enumerate() {
            if let Some(width) = self.column_widths.get_mut(i) {
                *width = (*width).max(measure_text_width(cell));
            }
        }
        self.rows.push(cells);
    }

    /// Render the table as a formatted string.
    pub fn render(&self) -> String {
        let mut output = String::new();

        self.render_row(&mut output, &self.headers);
        let rule: Vec<String> = self.column_widths.iter().map(|w| "-".repeat(*w)).collect();
        self.render_row(&mut output, &rule);

        for row in &self.rows {
            self.render_row(&mut output, row);
        }

        output
    }

    fn render_row(&self, output: &mut String, row: &[String]) {
        let last = row.len().saturating_sub(1);
        for (i, cell) in row.iter().enumerate() {
            match self.column_widths.get(i) {
                // The last column is not padded
                Some(&width) if i < last => {
                    let _ = write!(output, "{}  ", pad_str(cell, width, Alignment::Left, None));
                }
                _ => output.push_str(cell),
            }
        }
        output.push('\n');
    }
}
