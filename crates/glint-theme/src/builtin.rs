//! Named preset themes.

use crate::highlight::{Theme, ThemeError};

/// Look up a builtin theme by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_theme(name: &str) -> Option<Theme> {
    Some(match name {
        "default" | "docs" => Theme::docs(),
        "docs-light" | "light" => Theme::docs_light(),
        "terminal" => Theme::terminal(),
        "mono" => Theme::mono(),
        _ => return None,
    })
}

/// [`builtin_theme`], with an error listing the valid names.
///
/// # Errors
///
/// Returns [`ThemeError::Unknown`] if the name is not recognized.
pub fn resolve(name: &str) -> Result<Theme, ThemeError> {
    builtin_theme(name).ok_or_else(|| ThemeError::Unknown {
        name: name.to_string(),
        available: builtin_names().join(", "),
    })
}

/// List all available builtin theme names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &["default", "docs", "docs-light", "light", "terminal", "mono"]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
