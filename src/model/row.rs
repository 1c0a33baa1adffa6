//! Row of named column values

use log::warn;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One record: column names and values kept in insertion order.
///
/// Names are not required to be unique; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    names: Vec<String>,
    values: Vec<String>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, keeping any earlier column with the same name
    pub fn add_column(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.names.push(name.into());
        self.values.push(value.into());
    }

    /// Builder form of [`Row::add_column`]
    pub fn with_column(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_column(name, value);
        self
    }

    /// Value of the first column named `name`, without any diagnostic
    pub fn find_value(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i].as_str())
    }

    /// Value of the first column named `name`.
    ///
    /// A missing column is logged and yields the empty string.
    pub fn get_value(&self, name: &str) -> &str {
        match self.find_value(name) {
            Some(value) => value,
            None => {
                warn!("Column not found : {}", name);
                ""
            }
        }
    }

    /// Number of columns, duplicates included
    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    /// Column names in insertion order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Column values in insertion order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Ordered `(name, value)` pairs
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

// Serialized as a name -> value map; a repeated name keeps its first value.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (i, (name, value)) in self.columns().enumerate() {
            if !self.names[..i].iter().any(|n| n == name) {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_value() {
        let row = Row::new()
            .with_column("FirstName", "Bilbo")
            .with_column("LastName", "Baggins");

        assert_eq!(row.column_count(), 2);
        assert_eq!(row.get_value("FirstName"), "Bilbo");
        assert_eq!(row.get_value("LastName"), "Baggins");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let row = Row::new().with_column("Name", "Frodo");

        assert_eq!(row.find_value("name"), None);
        assert_eq!(row.get_value("name"), "");
    }

    #[test]
    fn test_missing_column_returns_empty() {
        let row = Row::new();
        assert_eq!(row.get_value("anything"), "");
        assert_eq!(row.find_value("anything"), None);
    }

    #[test]
    fn test_duplicate_name_first_wins() {
        let mut row = Row::new();
        row.add_column("X", "first");
        row.add_column("X", "second");

        assert_eq!(row.column_count(), 2);
        assert_eq!(row.get_value("X"), "first");
        assert_eq!(row.values(), &["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_columns_keep_insertion_order() {
        let row = Row::new()
            .with_column("C", "3")
            .with_column("A", "1")
            .with_column("B", "2");

        let pairs: Vec<_> = row.columns().collect();
        assert_eq!(pairs, vec![("C", "3"), ("A", "1"), ("B", "2")]);
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let row = Row::new()
            .with_column("B", "2")
            .with_column("A", "1")
            .with_column("B", "ignored");

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"B":"2","A":"1"}"#);
    }
}
