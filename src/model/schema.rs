//! Schema: the ordered set of tables handed to templates

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::table::Table;
use crate::error::ModelError;

/// Root container holding tables in insertion order.
///
/// Lookup by name is left to callers, which iterate [`Schema::tables`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table and return the new table count
    pub fn add_table(&mut self, table: Table) -> usize {
        self.tables.push(table);
        self.tables.len()
    }

    /// Append a table unless one with the same name is already present
    pub fn add_checked_table(&mut self, table: Table) -> Result<usize, ModelError> {
        if self.tables.iter().any(|t| t.name() == table.name()) {
            return Err(ModelError::DuplicateTable(table.name().to_string()));
        }
        Ok(self.add_table(table))
    }

    /// Names that appear on more than one table
    pub fn duplicate_table_names(&self) -> Vec<&str> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut duplicates = Vec::new();
        for table in &self.tables {
            if !seen.insert(table.name()) && !duplicates.contains(&table.name()) {
                duplicates.push(table.name());
            }
        }
        duplicates
    }

    /// Number of tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Tables in insertion order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Table;
    type IntoIter = std::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
