//! Ingestion of files into trees.
//!
//! This module handles:
//! - Extension-based dispatch through a format registry
//! - Recursive conversion of parsed YAML, JSON and TOML documents
//! - The scalar coercion cascade
//! - Cross-file inclusion of path-like strings, with a cycle guard

pub mod coerce;
pub mod document;
pub mod loader;
pub mod registry;

pub use coerce::coerce_text;
pub use document::{DocumentNode, DocumentView, RawScalar};
pub use loader::{Loader, LoaderOptions, load};
pub use registry::{Format, FormatRegistry};
