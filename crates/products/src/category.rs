//! Fixed category list offered by the catalog.

use omnistock_core::{DomainError, DomainResult};

pub const CATEGORIES: [&str; 5] = [
    "Electronics",
    "Peripherals",
    "Monitors",
    "Hardware",
    "Accessories",
];

pub fn default_category() -> &'static str {
    CATEGORIES[0]
}

/// Map free-text input onto the canonical category name.
///
/// Blank input falls back to the default category; matching is
/// case-insensitive.
pub fn resolve_category(raw: Option<&str>) -> DomainResult<String> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(default_category().to_string());
    }
    CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(raw))
        .map(|c| (*c).to_string())
        .ok_or_else(|| DomainError::validation(format!("unknown category '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_category_uses_default() {
        assert_eq!(resolve_category(None).unwrap(), "Electronics");
        assert_eq!(resolve_category(Some("  ")).unwrap(), "Electronics");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(resolve_category(Some("monitors")).unwrap(), "Monitors");
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(matches!(
            resolve_category(Some("Groceries")),
            Err(DomainError::Validation(_))
        ));
    }
}
