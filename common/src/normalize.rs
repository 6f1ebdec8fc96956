/// Canonicalize a name or keyword for equality comparison.
///
/// Lower-cases and trims leading/trailing whitespace. Internal whitespace and
/// punctuation (hyphens, dots) are preserved, so `"Apache-2"` and `"apache 2"`
/// stay distinct while `"Apache "` and `"apache"` compare equal.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Normalize an optional value; absent input normalizes to the empty string.
pub fn normalize_opt(s: Option<&str>) -> String {
    s.map(normalize).unwrap_or_default()
}
