//! Source text normalisation applied before a solution is written

/// Normalises downloaded source text
///
/// The text is split into lines, line-ending carriage returns are dropped,
/// empty lines are removed, and every kept line ends with exactly one `\n`.
/// Lines holding only whitespace, and trailing whitespace inside a line, are
/// part of the program and are kept as they are.
pub fn normalize_source(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for line in raw.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        normalized.push_str(line);
        normalized.push('\n');
    }
    normalized
}
