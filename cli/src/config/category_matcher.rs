//! Category matching for config section names.

/// Separator between categories in a section name (`linux-server`).
pub const SECTION_SEPARATOR: char = '-';

/// Split a section name into its category tags.
///
/// # Examples
///
/// ```
/// use zdot::config::category_matcher::section_categories;
///
/// assert_eq!(section_categories("macos-server"), vec!["macos", "server"]);
/// ```
#[must_use]
pub fn section_categories(section: &str) -> Vec<&str> {
    section
        .split(SECTION_SEPARATOR)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Check if every category of a section is active (AND match).
///
/// # Examples
///
/// ```
/// use zdot::config::category_matcher::matches;
///
/// let active = vec!["base".to_string(), "macos".to_string()];
/// assert!(matches("macos", &active));
/// assert!(!matches("macos-server", &active));
/// ```
#[must_use]
pub fn matches(section: &str, active_categories: &[String]) -> bool {
    let categories = section_categories(section);
    !categories.is_empty()
        && categories
            .iter()
            .all(|cat| active_categories.iter().any(|a| a == cat))
}
