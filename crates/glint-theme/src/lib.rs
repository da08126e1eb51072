//! # glint-theme: category → style mapping
//!
//! A [`Theme`] gives every scanner [`Category`](glint_scan::Category) a
//! terminal style, plus the chrome of a rendered code block (frame, title,
//! language badge, line numbers, background).
//!
//! # Architecture
//!
//! ```text
//! builtin.rs:   named presets ("docs", "docs-light", "terminal", "mono")
//!     │
//!     ▼
//! highlight.rs: Theme + HighlightGroup, per-category overrides
//!     │
//!     ▼
//! contrast.rs:  WCAG contrast checks and nudging overrides into range
//! ```
//!
//! Colors are resolved to terminal-ready `CellColor` values when the theme
//! is built, so rendering never does color math.

pub mod builtin;
pub mod contrast;
pub mod highlight;

pub use builtin::{builtin_names, builtin_theme};
pub use highlight::{HighlightGroup, Theme, ThemeError};
