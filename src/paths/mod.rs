//! Path resolution for filetree.
//!
//! A path string found in a document may mean:
//! - a home-relative path (`~/...`)
//! - a path relative to the file that mentions it
//! - a path relative to the project root

pub mod resolver;

pub use resolver::{HOME_VAR, PathResolver};
