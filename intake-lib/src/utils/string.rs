use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a cell token for comparison against alias sets.
///
/// Lowercases, decomposes to NFD and drops combining marks (so "Sí" becomes "si"),
/// then trims surrounding whitespace. Inner whitespace is kept: "No disponible"
/// normalizes to "no disponible".
///
/// The function is total and idempotent: unrecognized input simply produces a
/// string that matches no alias.
pub fn normalize_token(value: &str) -> String {
    let folded: String = value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    return folded.trim().to_string();
}

/// Normalize a header key.
///
/// Same folding as [`normalize_token`], additionally removing every whitespace
/// character, so "Años De Experiencia" and "anosdeexperiencia" compare equal.
pub fn normalize_header(value: &str) -> String {
    normalize_token(value)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// True when the string carries no visible content.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
