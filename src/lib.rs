//! Infer data-class definitions from sample JSON documents.
//!
//! One depth-first pass over a parsed document derives a typed shape for
//! every object, merges heterogeneous array elements into one canonical
//! element shape, deduplicates structurally-identical shapes across the
//! whole document, and maps raw JSON keys to target identifiers while
//! preserving round-trip fidelity. The result is a deterministic sequence
//! of [`model::ClassModel`] records; renderers (see [`render`]) turn those
//! into concrete source files.
//!
//! ```no_run
//! use json_dto::config::GeneratorConfig;
//! use json_dto::infer::generate;
//! use json_dto::parse::parse_document;
//! use json_dto::render::{PhpRenderer, Renderer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let document = parse_document(r#"{"id": 1, "name": "Alice"}"#)?;
//! let generation = generate(&document, GeneratorConfig::default())?;
//! for file in PhpRenderer::new().render_all(&generation.classes) {
//!     println!("{}\n{}", file.path, file.source);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ident;
pub mod infer;
pub mod merge;
pub mod model;
pub mod parse;
pub mod registry;
pub mod render;
