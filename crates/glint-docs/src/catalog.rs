//! Catalog: code samples grouped into documentation sections.
//!
//! A catalog file is TOML with one `[[section]]` table per section and one
//! `[[section.block]]` table per code sample:
//!
//! ```toml
//! [[section]]
//! id = "quick-start"
//! title = "Quick Start"
//!
//! [[section.block]]
//! title = "Quick Start Example"
//! code = '''
//! from justllms import JustLLM
//! client = JustLLM()'''
//! ```
//!
//! Section order is file order. Section ids must be unique.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::block::CodeBlock;

/// The documentation samples shipped with glint.
const BUNDLED: &str = include_str!("../samples/docs.toml");

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate section id `{0}`")]
    DuplicateSection(String),

    #[error("unknown section `{id}` (available: {available})")]
    UnknownSection { id: String, available: String },
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// A titled group of code blocks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default, rename = "block")]
    pub blocks: Vec<CodeBlock>,
}

/// All sections of a documentation page, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default, rename = "section")]
    sections: Vec<Section>,
}

impl Catalog {
    /// Build a catalog from sections, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateSection`] for the first repeated id.
    pub fn new(sections: Vec<Section>) -> Result<Self, CatalogError> {
        let catalog = Self { sections };
        catalog.check_ids()?;
        Ok(catalog)
    }

    /// Parse a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed TOML or unknown keys,
    /// and [`CatalogError::DuplicateSection`] for repeated section ids.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(content)?;
        catalog.check_ids()?;
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file can't be read, otherwise
    /// the errors of [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            sections = catalog.sections.len(),
            blocks = catalog.block_count(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// The samples shipped with glint.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled file itself is broken.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUNDLED)
    }

    fn check_ids(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(CatalogError::DuplicateSection(section.id.clone()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// [`section`](Self::section), with an error listing the valid ids.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSection`] if no section has `id`.
    pub fn require(&self, id: &str) -> Result<&Section, CatalogError> {
        self.section(id).ok_or_else(|| CatalogError::UnknownSection {
            id: id.to_string(),
            available: self.ids().collect::<Vec<_>>().join(", "),
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    /// Every block with its section, in page order.
    pub fn blocks(&self) -> impl Iterator<Item = (&Section, &CodeBlock)> {
        self.sections
            .iter()
            .flat_map(|s| s.blocks.iter().map(move |b| (s, b)))
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SMALL: &str = r#"
[[section]]
id = "install"
title = "Installation"

[[section.block]]
title = "Basic"
language = "bash"
code = "pip install justllms"

[[section]]
id = "usage"
title = "Usage"

[[section.block]]
title = "Hello"
description = "Prints a greeting"
code = '''
print("hi")'''
"#;

    #[test]
    fn parse_sections_in_order() {
        let catalog = Catalog::from_toml_str(SMALL).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), ["install", "usage"]);
        assert_eq!(catalog.block_count(), 2);

        let hello = &catalog.section("usage").unwrap().blocks[0];
        assert_eq!(hello.language, "python");
        assert_eq!(hello.description.as_deref(), Some("Prints a greeting"));
        assert_eq!(hello.code, "print(\"hi\")");
    }

    #[test]
    fn blocks_carry_their_section() {
        let catalog = Catalog::from_toml_str(SMALL).unwrap();
        let pairs: Vec<_> = catalog
            .blocks()
            .map(|(s, b)| (s.id.as_str(), b.title.as_str()))
            .collect();
        assert_eq!(pairs, [("install", "Basic"), ("usage", "Hello")]);
    }

    #[test]
    fn empty_file_is_empty_catalog() {
        let catalog = Catalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.block_count(), 0);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let toml = r#"
[[section]]
id = "a"
title = "A"

[[section]]
id = "a"
title = "Again"
"#;
        let err = Catalog::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSection(ref id) if id == "a"));
    }

    #[test]
    fn unknown_keys_rejected() {
        let toml = r#"
[[section]]
id = "a"
title = "A"

[[section.block]]
title = "t"
code = "x"
lang = "rust"
"#;
        assert!(matches!(
            Catalog::from_toml_str(toml),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn missing_code_rejected() {
        let toml = r#"
[[section]]
id = "a"
title = "A"

[[section.block]]
title = "t"
"#;
        assert!(Catalog::from_toml_str(toml).is_err());
    }

    #[test]
    fn require_lists_ids() {
        let catalog = Catalog::from_toml_str(SMALL).unwrap();
        assert_eq!(catalog.require("usage").unwrap().title, "Usage");
        let msg = catalog.require("nope").unwrap_err().to_string();
        assert_eq!(msg, "unknown section `nope` (available: install, usage)");
    }

    #[test]
    fn new_checks_ids() {
        let section = Section {
            id: "x".to_string(),
            title: "X".to_string(),
            blocks: Vec::new(),
        };
        assert!(Catalog::new(vec![section.clone()]).is_ok());
        assert!(Catalog::new(vec![section.clone(), section]).is_err());
    }

    #[test]
    fn load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/glint/docs.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/glint/docs.toml"));
    }

    #[test]
    fn bundled_has_every_page_section() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(
            catalog.ids().collect::<Vec<_>>(),
            [
                "installation",
                "quick-start",
                "multi-provider",
                "rag",
                "intelligent-routing",
                "streaming",
                "conversation",
                "caching",
                "analytics",
                "validation",
            ]
        );
        assert!(catalog.sections().iter().all(|s| !s.blocks.is_empty()));
    }

    #[test]
    fn bundled_install_blocks_are_bash() {
        let catalog = Catalog::bundled().unwrap();
        let install = catalog.section("installation").unwrap();
        assert!(install.blocks.iter().all(|b| b.language == "bash"));
        assert_eq!(install.blocks[0].code, "pip install justllms");
        assert_eq!(
            install.blocks[2].description.as_deref(),
            Some("Includes PDF export, Redis caching, and advanced analytics")
        );
    }
}
