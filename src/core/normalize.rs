//! Output transforms applied to a submission once it has fully validated.

/// Trims the name, collapses whitespace runs and upper-cases the first
/// character of every word. The rest of each word is left as typed.
pub fn capitalize_words(name: &str) -> String {
    name.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
