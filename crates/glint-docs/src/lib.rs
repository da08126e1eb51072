//! # glint-docs: documentation code blocks
//!
//! The model and renderer behind `glint docs` and `glint render`: titled
//! code samples grouped into sections, and a view that draws one sample as
//! a framed, highlighted block in the terminal.
//!
//! # Architecture
//!
//! ```text
//! catalog.rs: Catalog → Section → CodeBlock, loaded from TOML
//!     │
//!     ▼
//! view.rs:    BlockView: header, description, separator, code rows
//!     │         (scan each line, style each span from the Theme)
//!     ▼
//! glint_term::OutputBuffer → stdout in one write
//! ```
//!
//! The language of a block is a label only. Every block is scanned with the
//! same [`Scanner`](glint_scan::Scanner) regardless of what the badge says.

pub mod block;
pub mod catalog;
pub mod view;

pub use block::CodeBlock;
pub use catalog::{Catalog, CatalogError, Section};
pub use view::{BlockView, RenderOptions};
