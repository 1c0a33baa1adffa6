//! Error types for the data model

use thiserror::Error;

/// Errors raised by the checked (strict) model operations.
///
/// The lenient operations never fail; these only surface when a caller opts in
/// through [`Table::add_checked_row`](crate::model::Table::add_checked_row) or
/// [`Schema::add_checked_table`](crate::model::Schema::add_checked_table).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A row's columns differ from the ones inferred from the table's first row
    #[error("table `{table}` row {row}: expected columns [{expected}], found [{found}]")]
    ColumnMismatch {
        table: String,
        row: usize,
        expected: String,
        found: String,
    },

    /// A table with the same name is already part of the schema
    #[error("duplicate table name `{0}`")]
    DuplicateTable(String),
}
