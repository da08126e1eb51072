// SPDX-License-Identifier: MIT
//
// Error types for the glint binary.
//
// Library crates each have their own error enum; these wrap them so `main`
// has one type to report. The top-level message says what glint was doing;
// the source chain says why it failed.

use std::io;
use std::path::PathBuf;

use glint_docs::CatalogError;
use glint_scan::{LexiconError, UnknownCategory};
use glint_theme::ThemeError;
use thiserror::Error;

/// Errors from reading and applying `glint.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("bad [theme_colors] entry")]
    Category(#[from] UnknownCategory),

    #[error("bad [lexicon] table")]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error("min_contrast must be between 1 and 21, got {0}")]
    MinContrast(f64),
}

/// Everything that can make a glint command fail.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to read {}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin")]
    Stdin(#[source] io::Error),

    #[error("failed to write output")]
    Output(#[source] io::Error),

    #[error("failed to encode spans")]
    Json(#[from] serde_json::Error),
}
