//! Table of rows with an inferred column schema

use serde::Serialize;

use super::row::Row;
use crate::error::ModelError;

/// A named, ordered collection of rows.
///
/// The column names are taken once from the first added row that has at least one
/// column. The same names, with empty values, form the default row returned by
/// [`Table::get_row`] for any index outside the table.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    /// Table identifier, e.g. `CHARACTER`
    name: String,
    /// Inferred column names
    #[serde(rename = "columns")]
    column_names: Vec<String>,
    /// All rows in insertion order
    rows: Vec<Row>,
    /// Placeholder for out-of-range access
    default_row: Row,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_names: Vec::new(),
            rows: Vec::new(),
            default_row: Row::new(),
        }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a row and return the new row count.
    ///
    /// No check is made that the row matches the inferred columns.
    pub fn add_row(&mut self, row: Row) -> usize {
        if self.column_names.is_empty() && row.column_count() > 0 {
            for name in row.names() {
                self.default_row.add_column(name.clone(), "");
                self.column_names.push(name.clone());
            }
        }

        self.rows.push(row);
        self.rows.len()
    }

    /// Append a row only if its column names match the inferred ones.
    ///
    /// Before any columns are inferred every row is accepted.
    pub fn add_checked_row(&mut self, row: Row) -> Result<usize, ModelError> {
        if !self.column_names.is_empty() && row.names() != self.column_names.as_slice() {
            return Err(ModelError::ColumnMismatch {
                table: self.name.clone(),
                row: self.rows.len(),
                expected: self.column_names.join(", "),
                found: row.names().join(", "),
            });
        }

        Ok(self.add_row(row))
    }

    /// Row at `index`, or the default row when `index` is negative or past the end
    pub fn get_row(&self, index: isize) -> &Row {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.rows.get(i))
            .unwrap_or(&self.default_row)
    }

    /// All rows in insertion order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Inferred column names
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of inferred columns
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// Row with every inferred column set to the empty string
    pub fn default_row(&self) -> &Row {
        &self.default_row
    }
}
