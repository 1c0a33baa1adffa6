//! Configuration handling for tablescript

use std::path::PathBuf;

/// Templates compiled into the binary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuiltinTemplate {
    /// Plain text report of every table
    #[default]
    Summary,
    /// Basil listing of the CHARACTER table
    Character,
}

impl BuiltinTemplate {
    /// Name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            BuiltinTemplate::Summary => "summary",
            BuiltinTemplate::Character => "character",
        }
    }
}

impl std::str::FromStr for BuiltinTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(BuiltinTemplate::Summary),
            "character" => Ok(BuiltinTemplate::Character),
            _ => Err(format!("Unknown template: {}", s)),
        }
    }
}

/// Where the template comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin(BuiltinTemplate),
    /// Tera template file
    File(PathBuf),
}

impl Default for TemplateSource {
    fn default() -> Self {
        TemplateSource::Builtin(BuiltinTemplate::default())
    }
}

impl TemplateSource {
    /// Interpret a command-line value: a built-in name, otherwise a file path
    pub fn parse(value: &str) -> Self {
        match value.parse::<BuiltinTemplate>() {
            Ok(builtin) => TemplateSource::Builtin(builtin),
            Err(_) => TemplateSource::File(PathBuf::from(value)),
        }
    }
}

/// Configuration for a generation run
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Data files or directories to load, in order
    pub inputs: Vec<PathBuf>,
    /// Template to render
    pub template: TemplateSource,
    /// Directory receiving generated files; stdout when unset
    pub output_dir: Option<PathBuf>,
    /// Reject rows and tables that break the inferred layout
    pub strict: bool,
    /// For spreadsheets: only load this sheet
    pub sheet_name: Option<String>,
}

impl Config {
    /// Create a new Config with input paths
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            ..Default::default()
        }
    }

    /// Set the template
    pub fn with_template(mut self, template: TemplateSource) -> Self {
        self.template = template;
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    /// Enable strict column and table checks
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set spreadsheet sheet name
    pub fn with_sheet_name(mut self, name: String) -> Self {
        self.sheet_name = Some(name);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_source_parse() {
        assert_eq!(
            TemplateSource::parse("Character"),
            TemplateSource::Builtin(BuiltinTemplate::Character)
        );
        assert_eq!(
            TemplateSource::parse("templates/race.bd.tera"),
            TemplateSource::File(PathBuf::from("templates/race.bd.tera"))
        );
    }

    #[test]
    fn test_builder() {
        let config = Config::new(vec![PathBuf::from("data")])
            .with_strict(true)
            .with_sheet_name("CHARACTER".to_string());

        assert!(config.strict);
        assert_eq!(config.sheet_name.as_deref(), Some("CHARACTER"));
        assert_eq!(config.template, TemplateSource::default());
        assert!(config.output_dir.is_none());
    }
}
