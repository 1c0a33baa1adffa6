//! User templates rendered with Tera
//!
//! The context holds `schema.tables`, each with `name`, `columns`, `row_count`,
//! `default_row` and `rows`. Every row exposes `index`, `values`, `previous` and
//! `next`; the neighbours come from [`Table::get_row`], so the first and last rows
//! see the table's default row.
//!
//! Direct access such as `row.values.Name` fails the render when the column is
//! absent. The lenient accessor `row.values | get_value(name="Name")` goes through
//! [`Row::get_value`]: a missing column is logged and renders as the empty string.
//!
//! Text service operations are registered as filters (`slug_case`,
//! `replace_text(old=, new=)`, `get_prefix(separator=)`, `integer`, ...) and the
//! predicates as testers (`is has_prefix("Bil")`).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::model::{Row, Schema, Table};
use crate::text::TextTransformer;

use super::{RenderedFile, Template};

type TextFn = fn(&dyn TextTransformer, &str) -> String;
type ArgsFn = fn(&dyn TextTransformer, &str, &HashMap<String, Value>) -> tera::Result<String>;
type TestFn = fn(&dyn TextTransformer, &str, &str) -> bool;

/// A Tera template loaded from a file
pub struct FileTemplate {
    name: String,
    source: String,
    output: PathBuf,
}

impl FileTemplate {
    /// Create a template from its source and output file name
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            output: output.into(),
        }
    }

    /// Load a template file; `race.bd.tera` renders to `race.bd`
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template: {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid template path: {}", path.display()))?;
        let output = file_name.strip_suffix(".tera").unwrap_or(file_name);

        Ok(Self::new(file_name, source, output))
    }

    /// Output file name
    pub fn output(&self) -> &Path {
        &self.output
    }

    fn engine(&self, text: &Arc<dyn TextTransformer>) -> Result<Tera> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.register_filter("get_value", get_value_filter);
        register_text_filters(&mut tera, text);
        register_text_testers(&mut tera, text);

        tera.add_raw_template(&self.name, &self.source)
            .with_context(|| format!("Failed to compile template: {}", self.name))?;
        Ok(tera)
    }
}

/// `row | get_value(name="Column")`: lenient column lookup on a row map
fn get_value_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = string_arg(args, "get_value", "name")?;
    let Value::Object(columns) = value else {
        return Err(tera::Error::msg("Filter `get_value` expects a row"));
    };

    let mut row = Row::new();
    for (column, cell) in columns {
        row.add_column(column.clone(), value_text(cell));
    }
    Ok(Value::String(row.get_value(&name).to_string()))
}

fn register_text_filters(tera: &mut Tera, text: &Arc<dyn TextTransformer>) {
    let filters: [(&str, TextFn); 13] = [
        ("minor_case", |t, s| t.minor_case(s)),
        ("major_case", |t, s| t.major_case(s)),
        ("lower_case", |t, s| t.lower_case(s)),
        ("upper_case", |t, s| t.upper_case(s)),
        ("pascal_case", |t, s| t.pascal_case(s)),
        ("camel_case", |t, s| t.camel_case(s)),
        ("snake_case", |t, s| t.snake_case(s)),
        ("slug_case", |t, s| t.slug_case(s)),
        ("basil", |t, s| t.basil_text(s)),
        ("csv", |t, s| t.csv_text(s)),
        ("stripped", |t, s| t.stripped(s)),
        ("left_stripped", |t, s| t.left_stripped(s)),
        ("right_stripped", |t, s| t.right_stripped(s)),
    ];
    for (name, apply) in filters {
        let text = Arc::clone(text);
        tera.register_filter(
            name,
            move |value: &Value, _: &HashMap<String, Value>| -> tera::Result<Value> {
                Ok(Value::String(apply(text.as_ref(), &value_text(value))))
            },
        );
    }

    let filters: [(&str, ArgsFn); 7] = [
        ("get_prefix", |t, s, args| {
            Ok(t.get_prefix(s, &string_arg(args, "get_prefix", "separator")?))
        }),
        ("get_suffix", |t, s, args| {
            Ok(t.get_suffix(s, &string_arg(args, "get_suffix", "separator")?))
        }),
        ("remove_prefix", |t, s, args| {
            Ok(t.remove_prefix(s, &string_arg(args, "remove_prefix", "prefix")?))
        }),
        ("remove_suffix", |t, s, args| {
            Ok(t.remove_suffix(s, &string_arg(args, "remove_suffix", "suffix")?))
        }),
        ("replace_prefix", |t, s, args| {
            let old = string_arg(args, "replace_prefix", "old")?;
            Ok(t.replace_prefix(s, &old, &string_arg(args, "replace_prefix", "new")?))
        }),
        ("replace_suffix", |t, s, args| {
            let old = string_arg(args, "replace_suffix", "old")?;
            Ok(t.replace_suffix(s, &old, &string_arg(args, "replace_suffix", "new")?))
        }),
        ("replace_text", |t, s, args| {
            let old = string_arg(args, "replace_text", "old")?;
            Ok(t.replace_text(s, &old, &string_arg(args, "replace_text", "new")?))
        }),
    ];
    for (name, apply) in filters {
        let text = Arc::clone(text);
        tera.register_filter(
            name,
            move |value: &Value, args: &HashMap<String, Value>| -> tera::Result<Value> {
                Ok(Value::String(apply(text.as_ref(), &value_text(value), args)?))
            },
        );
    }

    // Unparsable numbers render as null
    let integer_text = Arc::clone(text);
    tera.register_filter(
        "integer",
        move |value: &Value, _: &HashMap<String, Value>| -> tera::Result<Value> {
            Ok(integer_text
                .parse_integer(&value_text(value))
                .map_or(Value::Null, Value::from))
        },
    );
    let real_text = Arc::clone(text);
    tera.register_filter(
        "real",
        move |value: &Value, _: &HashMap<String, Value>| -> tera::Result<Value> {
            Ok(real_text
                .parse_real(&value_text(value))
                .map_or(Value::Null, Value::from))
        },
    );
}

fn register_text_testers(tera: &mut Tera, text: &Arc<dyn TextTransformer>) {
    let testers: [(&str, TestFn); 3] = [
        ("contains_text", |t, s, arg| t.contains_text(s, arg)),
        ("has_prefix", |t, s, arg| t.has_prefix(s, arg)),
        ("has_suffix", |t, s, arg| t.has_suffix(s, arg)),
    ];
    for (name, apply) in testers {
        let text = Arc::clone(text);
        tera.register_tester(
            name,
            move |value: Option<&Value>, args: &[Value]| -> tera::Result<bool> {
                let Some(arg) = args.first() else {
                    return Err(tera::Error::msg(format!("Tester `{}` expects one argument", name)));
                };
                let value = value.map(value_text).unwrap_or_default();
                Ok(apply(text.as_ref(), &value, &value_text(arg)))
            },
        );
    }
}

fn string_arg(args: &HashMap<String, Value>, filter: &str, key: &str) -> tera::Result<String> {
    match args.get(key) {
        Some(value) => Ok(value_text(value)),
        None => Err(tera::Error::msg(format!(
            "Filter `{}` expected an argument `{}`",
            filter, key
        ))),
    }
}

impl Template for FileTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(
        &self,
        schema: &Schema,
        text: &Arc<dyn TextTransformer>,
    ) -> Result<Vec<RenderedFile>> {
        let tera = self.engine(text)?;

        let mut context = Context::new();
        context.insert("schema", &SchemaContext::new(schema));

        let rendered = tera
            .render(&self.name, &context)
            .with_context(|| format!("Failed to render template: {}", self.name))?;

        Ok(vec![RenderedFile::new(self.output.clone(), rendered)])
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Serialize)]
struct SchemaContext<'a> {
    tables: Vec<TableContext<'a>>,
}

impl<'a> SchemaContext<'a> {
    fn new(schema: &'a Schema) -> Self {
        Self {
            tables: schema.tables().iter().map(TableContext::new).collect(),
        }
    }
}

#[derive(Serialize)]
struct TableContext<'a> {
    name: &'a str,
    columns: &'a [String],
    row_count: usize,
    default_row: &'a Row,
    rows: Vec<RowContext<'a>>,
}

impl<'a> TableContext<'a> {
    fn new(table: &'a Table) -> Self {
        let rows = (0..table.row_count())
            .map(|index| {
                let position = index as isize;
                RowContext {
                    index,
                    values: table.get_row(position),
                    previous: table.get_row(position - 1),
                    next: table.get_row(position + 1),
                }
            })
            .collect();

        Self {
            name: table.name(),
            columns: table.column_names(),
            row_count: table.row_count(),
            default_row: table.default_row(),
            rows,
        }
    }
}

#[derive(Serialize)]
struct RowContext<'a> {
    index: usize,
    values: &'a Row,
    previous: &'a Row,
    next: &'a Row,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::StandardText;

    use tempfile::tempdir;

    fn schema() -> Schema {
        let mut table = Table::new("CHARACTER");
        table.add_row(
            Row::new()
                .with_column("FirstName", "Bilbo")
                .with_column("Title", "Mr. Baggins"),
        );
        table.add_row(
            Row::new()
                .with_column("FirstName", "Frodo")
                .with_column("Title", "a, b"),
        );

        let mut schema = Schema::new();
        schema.add_table(table);
        schema
    }

    fn render(source: &str) -> String {
        let text: Arc<dyn TextTransformer> = Arc::new(StandardText);
        let template = FileTemplate::new("test", source, "out.txt");
        let mut files = template.render(&schema(), &text).unwrap();
        files.remove(0).text
    }

    #[test]
    fn test_lookahead_and_lookbehind() {
        let out = render(concat!(
            "{% for table in schema.tables %}{{ table.name }}:",
            "{% for row in table.rows %} [{{ row.previous.FirstName }}",
            "<{{ row.values.FirstName }}>{{ row.next.FirstName }}]",
            "{% endfor %}\n{% endfor %}"
        ));

        assert_eq!(out, "CHARACTER: [<Bilbo>Frodo] [Bilbo<Frodo>]\n");
    }

    #[test]
    fn test_text_filters() {
        let out = render(concat!(
            "{% for row in schema.tables.0.rows %}",
            "{{ row.values.Title | slug_case }};{{ row.values.Title | csv }};",
            "{{ row.values.FirstName | upper_case }}\n",
            "{% endfor %}"
        ));

        assert_eq!(out, "mr-baggins;Mr. Baggins;BILBO\na-b;\"a, b\";FRODO\n");
    }

    #[test]
    fn test_argument_filters() {
        let out = render(concat!(
            "{% set title = schema.tables.0.rows.0.values.Title %}",
            "{{ title | get_prefix(separator=\" \") }}|",
            "{{ title | get_suffix(separator=\" \") }}|",
            "{{ title | remove_prefix(prefix=\"Mr. \") }}|",
            "{{ title | remove_suffix(suffix=\"gins\") }}|",
            "{{ title | replace_prefix(old=\"Mr.\", new=\"Master\") }}|",
            "{{ title | replace_suffix(old=\"Baggins\", new=\"Took\") }}|",
            "{{ title | replace_text(old=\"g\", new=\"G\") }}|",
            "[{{ \"  x  \" | left_stripped }}][{{ \"  x  \" | right_stripped }}]"
        ));

        assert_eq!(
            out,
            "Mr.|Baggins|Baggins|Mr. Bag|Master Baggins|Mr. Took|Mr. BaGGins|[x  ][  x]"
        );
    }

    #[test]
    fn test_missing_filter_argument() {
        let text: Arc<dyn TextTransformer> = Arc::new(StandardText);
        let template = FileTemplate::new("t", "{{ \"a.b\" | get_prefix }}", "out.txt");

        assert!(template.render(&schema(), &text).is_err());
    }

    #[test]
    fn test_testers() {
        let out = render(concat!(
            "{% for row in schema.tables.0.rows %}",
            "{% if row.values.FirstName is has_prefix(\"Bil\") %}B{% endif %}",
            "{% if row.values.FirstName is has_suffix(\"do\") %}F{% endif %}",
            "{% if row.values.Title is contains_text(\",\") %}C{% endif %}",
            "{% endfor %}"
        ));

        assert_eq!(out, "BFC");
    }

    #[test]
    fn test_number_filters() {
        let out = render(concat!(
            "{% set count = \" 41 \" | integer %}{{ count + 1 }};",
            "{{ \"2.5\" | real }}"
        ));
        assert_eq!(out, "42;2.5");
    }

    #[test]
    fn test_get_value_is_lenient() {
        let out = render(concat!(
            "{% for row in schema.tables.0.rows %}",
            "[{{ row.values | get_value(name=\"FirstName\") }}:",
            "{{ row.values | get_value(name=\"Nickname\") }}:",
            "{{ row.next | get_value(name=\"Title\") }}]",
            "{% endfor %}"
        ));

        assert_eq!(out, "[Bilbo::a, b][Frodo::]");
    }

    #[test]
    fn test_direct_access_to_missing_column_fails() {
        let text: Arc<dyn TextTransformer> = Arc::new(StandardText);
        let template = FileTemplate::new("t", "{{ schema.tables.0.rows.0.values.Nickname }}", "o");

        assert!(template.render(&schema(), &text).is_err());
    }

    #[test]
    fn test_no_html_escaping() {
        let out = render("{{ schema.tables.0.columns | join(sep=\"&\") }}");
        assert_eq!(out, "FirstName&Title");
    }

    #[test]
    fn test_load_strips_tera_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("race.bd.tera");
        fs::write(&path, "{{ schema.tables | length }}").unwrap();

        let template = FileTemplate::load(&path).unwrap();
        assert_eq!(template.output(), Path::new("race.bd"));
        assert_eq!(Template::name(&template), "race.bd.tera");
    }

    #[test]
    fn test_compile_error() {
        let text: Arc<dyn TextTransformer> = Arc::new(StandardText);
        let template = FileTemplate::new("broken", "{% for %}", "out.txt");

        assert!(template.render(&schema(), &text).is_err());
    }
}
