//! Text service used by templates: casing, editing, escaping and number parsing

pub mod case;
pub mod escape;

/// Text operations available to templates.
///
/// Every method has a standard implementation; implementors override only what
/// they need to change.
pub trait TextTransformer: Send + Sync {
    fn contains_text(&self, text: &str, searched: &str) -> bool {
        text.contains(searched)
    }

    fn has_prefix(&self, text: &str, prefix: &str) -> bool {
        text.starts_with(prefix)
    }

    fn has_suffix(&self, text: &str, suffix: &str) -> bool {
        text.ends_with(suffix)
    }

    /// Text before the first `separator`, or all of it when absent
    fn get_prefix(&self, text: &str, separator: &str) -> String {
        match text.split_once(separator) {
            Some((prefix, _)) => prefix.to_string(),
            None => text.to_string(),
        }
    }

    /// Text after the last `separator`, or all of it when absent
    fn get_suffix(&self, text: &str, separator: &str) -> String {
        match text.rsplit_once(separator) {
            Some((_, suffix)) => suffix.to_string(),
            None => text.to_string(),
        }
    }

    fn remove_prefix(&self, text: &str, prefix: &str) -> String {
        text.strip_prefix(prefix).unwrap_or(text).to_string()
    }

    fn remove_suffix(&self, text: &str, suffix: &str) -> String {
        text.strip_suffix(suffix).unwrap_or(text).to_string()
    }

    fn replace_prefix(&self, text: &str, old_prefix: &str, new_prefix: &str) -> String {
        match text.strip_prefix(old_prefix) {
            Some(rest) => format!("{}{}", new_prefix, rest),
            None => text.to_string(),
        }
    }

    fn replace_suffix(&self, text: &str, old_suffix: &str, new_suffix: &str) -> String {
        match text.strip_suffix(old_suffix) {
            Some(rest) => format!("{}{}", rest, new_suffix),
            None => text.to_string(),
        }
    }

    fn replace_text(&self, text: &str, old_text: &str, new_text: &str) -> String {
        if old_text.is_empty() {
            return text.to_string();
        }
        text.replace(old_text, new_text)
    }

    fn stripped(&self, text: &str) -> String {
        text.trim().to_string()
    }

    fn left_stripped(&self, text: &str) -> String {
        text.trim_start().to_string()
    }

    fn right_stripped(&self, text: &str) -> String {
        text.trim_end().to_string()
    }

    fn minor_case(&self, text: &str) -> String {
        case::minor_case(text)
    }

    fn major_case(&self, text: &str) -> String {
        case::major_case(text)
    }

    fn lower_case(&self, text: &str) -> String {
        text.to_lowercase()
    }

    fn upper_case(&self, text: &str) -> String {
        text.to_uppercase()
    }

    fn pascal_case(&self, text: &str) -> String {
        case::pascal_case(text)
    }

    fn camel_case(&self, text: &str) -> String {
        case::camel_case(text)
    }

    fn snake_case(&self, text: &str) -> String {
        case::snake_case(text)
    }

    fn slug_case(&self, text: &str) -> String {
        case::slug_case(text)
    }

    fn basil_text(&self, text: &str) -> String {
        escape::basil_text(text)
    }

    fn csv_text(&self, text: &str) -> String {
        escape::csv_text(text)
    }

    fn parse_integer(&self, text: &str) -> Option<i64> {
        text.trim().parse().ok()
    }

    fn parse_real(&self, text: &str) -> Option<f64> {
        text.trim().parse().ok()
    }
}

/// The standard text service
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardText;

impl TextTransformer for StandardText {}
