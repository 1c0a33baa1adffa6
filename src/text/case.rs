//! Word splitting and identifier casing

/// Split text into words.
///
/// Any non-alphanumeric character separates words, as do lower-to-upper,
/// letter-to-digit and acronym-to-word (`HTTPServer`) boundaries.
pub fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut word = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
            continue;
        }

        // word is non-empty only if chars[i - 1] was pushed into it
        if !word.is_empty() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() != c.is_alphabetic())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(char::is_lowercase));
            if boundary {
                words.push(std::mem::take(&mut word));
            }
        }

        word.push(c);
    }

    if !word.is_empty() {
        words.push(word);
    }
    words
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut capital: String = first.to_uppercase().collect();
            capital.push_str(&chars.as_str().to_lowercase());
            capital
        }
        None => String::new(),
    }
}

/// First character lowered, rest unchanged
pub fn minor_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First character raised, rest unchanged
pub fn major_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn pascal_case(text: &str) -> String {
    split_words(text).iter().map(|w| capitalized(w)).collect()
}

pub fn camel_case(text: &str) -> String {
    split_words(text)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalized(w) })
        .collect()
}

pub fn snake_case(text: &str) -> String {
    joined_lower(text, "_")
}

pub fn slug_case(text: &str) -> String {
    joined_lower(text, "-")
}

fn joined_lower(text: &str, separator: &str) -> String {
    split_words(text)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}
