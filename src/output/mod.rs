//! Output generation: templates that turn a schema into text files

mod character;
mod engine;
mod summary;
mod writer;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::{BuiltinTemplate, TemplateSource};
use crate::model::Schema;
use crate::text::TextTransformer;

pub use character::CharacterTemplate;
pub use engine::FileTemplate;
pub use summary::SummaryTemplate;
pub use writer::{DirectoryWriter, FileWriter, StdoutWriter};

/// A generated file, relative to the output location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub text: String,
}

impl RenderedFile {
    pub fn new(path: impl Into<PathBuf>, text: String) -> Self {
        Self {
            path: path.into(),
            text,
        }
    }
}

/// Trait for templates
pub trait Template {
    /// Name shown in logs
    fn name(&self) -> &str;

    /// Render the schema into one or more files
    fn render(
        &self,
        schema: &Schema,
        text: &Arc<dyn TextTransformer>,
    ) -> Result<Vec<RenderedFile>>;
}

/// Factory for creating templates
pub struct TemplateFactory;

impl TemplateFactory {
    /// Create a template from its source
    pub fn create(source: &TemplateSource) -> Result<Box<dyn Template>> {
        Ok(match source {
            TemplateSource::Builtin(BuiltinTemplate::Summary) => Box::new(SummaryTemplate::new()),
            TemplateSource::Builtin(BuiltinTemplate::Character) => {
                Box::new(CharacterTemplate::new())
            }
            TemplateSource::File(path) => Box::new(FileTemplate::load(path)?),
        })
    }
}

/// Render a schema and hand every file to the writer
pub fn generate(
    schema: &Schema,
    template: &dyn Template,
    text: &Arc<dyn TextTransformer>,
    writer: &mut dyn FileWriter,
) -> Result<usize> {
    let files = template.render(schema, text)?;
    writer.begin(files.len())?;
    for file in &files {
        writer.write_text(&file.path, &file.text)?;
    }
    Ok(files.len())
}
