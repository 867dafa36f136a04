//! Settings loading for filetree.
//!
//! This module handles:
//! - `.filetree.toml` parsing
//! - Directory cascade discovery
//! - Settings merging into loader options

pub mod cascade;
pub mod parser;
pub mod types;

pub use cascade::{SETTINGS_FILE_NAME, discover_settings, load_merged_settings, merge_settings};
pub use parser::{parse_settings_file, parse_settings_str};
pub use types::{LoadedSettings, MergedSettings, Settings};
