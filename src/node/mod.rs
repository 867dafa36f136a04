//! The loaded tree.
//!
//! This module handles:
//! - The `Node` tagged union (leaf, list, map) and its scalar type
//! - Single-key and multi-key indexing with checked casts
//! - Deterministic printing

pub mod access;
pub mod printer;
pub mod types;

pub use access::FromNode;
pub use printer::{render, render_values};
pub use types::{Key, Kind, Node, Scalar};
