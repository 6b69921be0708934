use std::sync::LazyLock;

use regex::Regex;

/// A lower-case letter (`Ll`) directly followed by an upper-case one (`Lu`).
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{Ll})(\p{Lu})").expect("valid regex"));

/// Converts a field's structural name into an environment variable segment.
///
/// An underscore is inserted between a lower-case letter and an upper-case
/// letter that directly follows it, then every code point is upper-cased.
/// Case is judged by general category, so `ª` (category `Lo`) never opens a
/// boundary. Runs of upper-case letters stay together, so `UINT8` is one
/// segment, and characters without case (ideographs, digits, `_`) are copied
/// unchanged. A raw identifier prefix (`r#`) is ignored.
pub fn env_segment(name: &str) -> String {
    let name = name.strip_prefix("r#").unwrap_or(name);
    WORD_BOUNDARY
        .replace_all(name, "${1}_${2}")
        .chars()
        .map(simple_uppercase)
        .collect()
}

/// One-to-one upper-case mapping: a code point whose upper-case form spans
/// several code points (`ß`, ligatures) is kept as is.
fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Builds the full key for `name` one level below `prefix`.
///
/// An empty prefix yields the bare segment (`PORT`), not `_PORT` as a plain
/// `PREFIX + "_" + SEGMENT` join would.
pub fn env_key(prefix: &str, name: &str) -> String {
    let segment = env_segment(name);
    if prefix.is_empty() {
        segment
    } else {
        format!("{prefix}_{segment}")
    }
}
