//! Request field validation helpers

/// Check that a required string field is present and non-blank
///
/// The gateway intentionally validates presence only. Email format is
/// not checked beyond non-emptiness; the managed auth provider rejects
/// malformed addresses on its side.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Collect the names of missing required fields from `(name, value)` pairs
pub fn missing_fields<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| !is_present(value))
        .map(|(name, _)| *name)
        .collect()
}
