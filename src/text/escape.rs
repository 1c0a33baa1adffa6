//! Value escaping for generated files

use csv::{QuoteStyle, WriterBuilder};

/// Escape a value for a Basil `~` line
pub fn basil_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a value as a single CSV field, quoted only when necessary
pub fn csv_text(text: &str) -> String {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    if writer.write_field(text).is_ok() {
        if let Ok(bytes) = writer.into_inner() {
            if let Ok(field) = String::from_utf8(bytes) {
                return field;
            }
        }
    }

    format!("\"{}\"", text.replace('"', "\"\""))
}
