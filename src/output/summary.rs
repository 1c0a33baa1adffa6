//! Plain text report of every table

use std::fmt::Write;
use std::sync::Arc;

use anyhow::Result;

use crate::model::{Schema, Table};
use crate::text::TextTransformer;

use super::{RenderedFile, Template};

/// Lists each table's columns followed by its rows as `Name = Value` lines
pub struct SummaryTemplate;

impl SummaryTemplate {
    pub fn new() -> Self {
        Self
    }

    fn write_table(
        &self,
        table: &Table,
        text: &dyn TextTransformer,
        out: &mut String,
    ) -> Result<()> {
        writeln!(
            out,
            "{}: {} rows, {} columns",
            table.name(),
            table.row_count(),
            table.column_count()
        )?;
        writeln!(out, "    columns: {}", table.column_names().join(", "))?;

        for (index, row) in table.rows().iter().enumerate() {
            writeln!(out)?;
            writeln!(out, "    row {}", index)?;
            for (name, value) in row.columns() {
                writeln!(out, "        {} = {}", name, text.basil_text(value))?;
            }
        }
        Ok(())
    }
}

impl Default for SummaryTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Template for SummaryTemplate {
    fn name(&self) -> &str {
        "summary"
    }

    fn render(
        &self,
        schema: &Schema,
        text: &Arc<dyn TextTransformer>,
    ) -> Result<Vec<RenderedFile>> {
        let mut out = String::new();
        writeln!(out, "{} tables", schema.table_count())?;

        for table in schema {
            writeln!(out)?;
            self.write_table(table, text.as_ref(), &mut out)?;
        }

        Ok(vec![RenderedFile::new("summary.txt", out)])
    }
}
