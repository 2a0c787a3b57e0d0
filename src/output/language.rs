//! Mapping from site language names to file extensions
//!
//! The site reports names such as `C++14(gcc 6.3)`, `JAVA`, `PYTH 3.6` or
//! `C`. Only the first token of the upper-cased name is inspected, so
//! compiler versions in parentheses do not matter.

/// Returns the file extension (with leading dot) for a language name
///
/// C++ is checked before C; anything unrecognised gets `.txt`.
pub fn extension_for_language(language: &str) -> &'static str {
    let upper = language.trim().to_ascii_uppercase();
    let token = upper
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or("");

    if token.starts_with("JAVA") && !token.starts_with("JAVASCRIPT") {
        ".java"
    } else if token.starts_with("C++") || token.starts_with("CPP") {
        ".cpp"
    } else if is_c_family(token) {
        ".c"
    } else if token.starts_with("PY") {
        ".py"
    } else {
        ".txt"
    }
}

/// `C`, optionally followed by a standard year such as `C99`
fn is_c_family(token: &str) -> bool {
    token
        .strip_prefix('C')
        .map(|rest| rest.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}
