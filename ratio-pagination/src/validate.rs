//! Field-name validation for paginated fields.

/// Maximum length for a field path.
const MAX_FIELD_NAME_LENGTH: usize = 255;

/// Validate that a string is usable as a sort/filter field name.
///
/// A valid field name:
/// - Is not empty and not longer than 255 bytes
/// - Does not start with `$` (reserved for operators)
/// - Contains no NUL byte
/// - Has no empty path segment (`a..b`, `.a`, `a.`)
///
/// # Examples
///
/// ```
/// use ratio_pagination::is_valid_field_name;
///
/// assert!(is_valid_field_name("rating"));
/// assert!(is_valid_field_name("stats.likes"));
///
/// assert!(!is_valid_field_name(""));
/// assert!(!is_valid_field_name("$where"));
/// assert!(!is_valid_field_name("stats..likes"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_field_name(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_FIELD_NAME_LENGTH
        && !s.starts_with('$')
        && !s.contains('\0')
        && s.split('.').all(|segment| !segment.is_empty())
}
