//! filetree - load config files, plain files and directories into one tree.
//!
//! This library provides:
//! - Path resolution against `~`, a base directory and a project root
//! - A `Node` tree (leaf, list, map) with checked indexing and casts
//! - Recursive YAML/JSON/TOML ingestion where a string naming an existing
//!   file is replaced by that file's own tree
//! - `.filetree.toml` settings discovery
//!
//! # Example
//!
//! ```no_run
//! use filetree::ingest::Loader;
//! use filetree::node::Key;
//! use filetree::paths::PathResolver;
//!
//! let mut loader = Loader::new(PathResolver::new("/path/to/project"));
//! let root = loader.load("config/scheduler.yaml").unwrap();
//!
//! let workers: i64 = root.get(&[Key::from("pool"), Key::from("workers")]).unwrap();
//! let first_task = &root["tasks"][0];
//! println!("{} workers, first task:{}", workers, first_task);
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod node;
pub mod paths;

pub use error::{FileTreeError, Result};
pub use ingest::{Loader, load};
pub use node::{Key, Node, Scalar, render};
