//! Parser layer: builds tables from CSV, JSON and spreadsheet files

mod csv;
mod excel;
mod json;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{debug, info};

use crate::config::Config;
use crate::model::{Row, Schema, Table};

pub use self::csv::CsvParser;
pub use self::excel::ExcelParser;
pub use self::json::JsonParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file into one or more tables
    fn parse(&self, path: &Path, config: &Config) -> Result<Vec<Table>>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(CsvParser),
                Box::new(ExcelParser),
                Box::new(JsonParser),
            ],
        }
    }

    /// Find the parser for a path, if any
    pub fn find_parser(&self, path: &Path) -> Option<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        self.parsers
            .iter()
            .find(|p| p.supports_extension(&ext))
            .map(|p| p.as_ref())
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        match self.find_parser(path) {
            Some(parser) => Ok(parser),
            None => bail!(
                "Unsupported file format: {}",
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
            ),
        }
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Vec<Table>> {
        let parser = self.get_parser(path)?;
        parser.parse(path, config)
    }

    /// Supported files directly inside `dir`, sorted by name
    fn directory_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to read directory: {}", dir.display()))?
                .path();
            if path.is_file() && self.find_parser(&path).is_some() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Load every configured input into a single schema.
///
/// Directories contribute their supported files in name order.
pub fn load_schema(config: &Config) -> Result<Schema> {
    let factory = ParserFactory::new();
    let mut schema = Schema::new();

    for input in &config.inputs {
        let files = if input.is_dir() {
            factory.directory_files(input)?
        } else {
            vec![input.clone()]
        };

        for file in files {
            let tables = factory
                .parse(&file, config)
                .with_context(|| format!("Failed to parse file: {}", file.display()))?;
            info!("Loaded {} table(s) from {}", tables.len(), file.display());

            for table in tables {
                debug!(
                    "Table {}: {} rows, columns [{}]",
                    table.name(),
                    table.row_count(),
                    table.column_names().join(", ")
                );
                if config.strict {
                    schema
                        .add_checked_table(table)
                        .with_context(|| format!("Invalid table in {}", file.display()))?;
                } else {
                    schema.add_table(table);
                }
            }
        }
    }

    Ok(schema)
}

/// Append a row, checking its columns when strict mode is on
fn push_row(table: &mut Table, row: Row, config: &Config) -> Result<()> {
    if config.strict {
        table.add_checked_row(row)?;
    } else {
        table.add_row(row);
    }
    Ok(())
}

/// Build a row from a header and a record, padding missing fields with empty values
fn record_row<'a>(headers: &[String], fields: impl IntoIterator<Item = &'a str>) -> Row {
    let mut row = Row::new();
    let mut fields = fields.into_iter();

    for name in headers {
        row.add_column(name.clone(), fields.next().unwrap_or(""));
    }
    for (i, extra) in fields.enumerate() {
        row.add_column(format!("Column{}", headers.len() + i + 1), extra);
    }
    row
}

/// Table name derived from a file name: `character.csv` becomes `CHARACTER`
fn table_name_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("TABLE")
        .to_uppercase()
}
