use semver::Version;

/// Placeholder strings meaning "no real version is known".
const SENTINELS: &[&str] = &["unknown", "n/a"];

/// Check whether a string parses as a full semantic version
/// (`MAJOR.MINOR.PATCH[-prerelease][+build]`).
pub fn is_valid(s: &str) -> bool {
    Version::parse(s).is_ok()
}

/// Resolve a usable version from an inventory record.
///
/// A version is usable only if it is present, non-empty and not one of the
/// case-insensitive sentinel strings. Anything else is treated as absent.
pub fn usable_version(s: Option<&str>) -> Option<&str> {
    match s {
        Some(s) if !s.is_empty() && !SENTINELS.contains(&s.to_lowercase().as_str()) => Some(s),
        _ => None,
    }
}

/// Compare two semantic versions by precedence, `a <= b`.
///
/// Returns `None` unless both sides parse as valid semver; callers fall back
/// to name-only classification in that case. Build metadata does not
/// participate in the ordering.
pub fn less_than_or_equal(a: &str, b: &str) -> Option<bool> {
    let a = Version::parse(a).ok()?;
    let b = Version::parse(b).ok()?;
    Some(a.cmp_precedence(&b).is_le())
}
