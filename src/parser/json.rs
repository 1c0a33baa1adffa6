//! JSON parser
//!
//! Accepts either an object mapping table names to arrays of records, or a bare
//! array of records named after the file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexSet;
use serde_json::Value;

use crate::config::Config;
use crate::model::{Row, Table};

use super::{push_row, table_name_from_path, Parser};

/// Parser for JSON files
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Vec<Table>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        let reader = BufReader::new(file);

        let value: Value =
            serde_json::from_reader(reader).context("Failed to parse JSON file")?;

        match value {
            Value::Array(records) => Ok(vec![build_table(
                table_name_from_path(path),
                &records,
                config,
            )?]),
            Value::Object(tables) => tables
                .iter()
                .map(|(name, records)| match records {
                    Value::Array(records) => build_table(name.clone(), records, config),
                    _ => bail!("Table `{}` must be an array of records", name),
                })
                .collect(),
            _ => bail!("JSON must be an array or object"),
        }
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("json")
    }
}

fn build_table(name: String, records: &[Value], config: &Config) -> Result<Table> {
    // Collect all unique keys across all objects to build column list
    let mut column_names: IndexSet<&str> = IndexSet::new();
    for record in records {
        if let Value::Object(obj) = record {
            column_names.extend(obj.keys().map(String::as_str));
        }
    }

    let mut table = Table::new(name);

    for (index, record) in records.iter().enumerate() {
        let Value::Object(obj) = record else {
            bail!("Table `{}` record {} is not an object", table.name(), index);
        };

        let mut row = Row::new();
        for key in &column_names {
            row.add_column(*key, json_value_to_text(obj.get(*key)));
        }

        push_row(&mut table, row, config)?;
    }

    Ok(table)
}

fn json_value_to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        // Nested values are kept as compact JSON
        Some(nested) => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn test_parse_named_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("world.json");
        fs::write(
            &path,
            r#"{
                "RACE": [{"Name": "Hobbit"}, {"Name": "Elf"}],
                "CHARACTER": [
                    {"Id": 1, "FirstName": "Bilbo", "Ring": true},
                    {"Id": 2, "FirstName": "Frodo", "Tags": ["brave"], "Comment": null}
                ]
            }"#,
        )
        .unwrap();

        let tables = JsonParser.parse(&path, &Config::default()).unwrap();
        let names: Vec<_> = tables.iter().map(Table::name).collect();
        assert_eq!(names, vec!["RACE", "CHARACTER"]);

        let character = &tables[1];
        assert_eq!(
            character.column_names(),
            &["Id", "FirstName", "Ring", "Tags", "Comment"]
        );
        let bilbo = character.get_row(0);
        assert_eq!(bilbo.get_value("Id"), "1");
        assert_eq!(bilbo.get_value("Ring"), "true");
        assert_eq!(bilbo.get_value("Tags"), "");
        let frodo = character.get_row(1);
        assert_eq!(frodo.get_value("Tags"), r#"["brave"]"#);
        assert_eq!(frodo.get_value("Comment"), "");
    }

    #[test]
    fn test_parse_bare_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("race.json");
        fs::write(&path, r#"[{"Name": "Dwarf"}]"#).unwrap();

        let tables = JsonParser.parse(&path, &Config::default()).unwrap();
        assert_eq!(tables[0].name(), "RACE");
        assert_eq!(tables[0].get_row(0).get_value("Name"), "Dwarf");
    }

    #[test]
    fn test_rejects_scalar_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"T": [1, 2]}"#).unwrap();

        assert!(JsonParser.parse(&path, &Config::default()).is_err());
    }
}
