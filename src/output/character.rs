//! Basil listing of the CHARACTER table

use std::fmt::Write;
use std::sync::Arc;

use anyhow::Result;

use crate::model::Schema;
use crate::text::TextTransformer;

use super::{RenderedFile, Template};

const TABLE_NAME: &str = "CHARACTER";
const FILE_NAME: &str = "character.bd";
const HEADER: &str = "CHARACTER\n\n    Id Slug FirstName LastName Description Race Comment\n";
const VALUE_INDENT: &str = "             ~ ";

/// Writes every CHARACTER row as a Basil record keyed by its slug
pub struct CharacterTemplate;

impl CharacterTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CharacterTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Template for CharacterTemplate {
    fn name(&self) -> &str {
        "character"
    }

    fn render(
        &self,
        schema: &Schema,
        text: &Arc<dyn TextTransformer>,
    ) -> Result<Vec<RenderedFile>> {
        let mut out = String::new();

        for table in schema.tables().iter().filter(|t| t.name() == TABLE_NAME) {
            out.push_str(HEADER);

            for row in table.rows() {
                let slug = text.slug_case(&format!(
                    "{}-{}-character",
                    row.get_value("FirstName"),
                    row.get_value("LastName")
                ));

                writeln!(out)?;
                writeln!(out, "        %{}", slug)?;
                writeln!(out, "{}{}", VALUE_INDENT, slug)?;
                for column in ["FirstName", "LastName", "Description", "Comment"] {
                    let value = text.basil_text(row.get_value(column));
                    writeln!(out, "{}{}", VALUE_INDENT, value)?;
                }
            }
        }

        Ok(vec![RenderedFile::new(FILE_NAME, out)])
    }
}
