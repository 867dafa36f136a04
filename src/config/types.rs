use crate::error::Result;
use crate::ingest::{Format, FormatRegistry, LoaderOptions};
use crate::paths::PathResolver;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Settings from one `.filetree.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
	/// If true, stop walking up the directory tree at this file.
	#[serde(default)]
	pub root: bool,

	/// Project root for path resolution, relative to the settings file.
	pub project_root: Option<PathBuf>,

	/// Reuse already ingested documents within one load.
	pub cache_includes: Option<bool>,

	/// Extra extension to format mappings, e.g. `conf = "yaml"`.
	#[serde(default)]
	pub formats: BTreeMap<String, String>,
}

impl Settings {
	/// Check that every format name is known.
	pub fn validate(&self) -> Result<()> {
		for name in self.formats.values() {
			name.parse::<Format>()?;
		}
		Ok(())
	}
}

/// Settings with the file they were read from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
	/// The parsed settings.
	pub settings: Settings,

	/// The path these settings were loaded from.
	pub path: PathBuf,
}

/// Effective settings after merging the cascade, nearest file first.
#[derive(Debug, Clone, Default)]
pub struct MergedSettings {
	/// Project root, already joined onto the directory of the file that set it.
	pub project_root: Option<PathBuf>,

	pub cache_includes: bool,

	pub formats: BTreeMap<String, Format>,

	/// Files that contributed, in cascade order.
	pub sources: Vec<PathBuf>,
}

impl MergedSettings {
	/// Build loader options, using `fallback_root` when no project root is set.
	pub fn loader_options(&self, fallback_root: PathBuf) -> LoaderOptions {
		let project_root = self.project_root.clone().unwrap_or(fallback_root);

		let mut formats = FormatRegistry::default();
		for (extension, format) in &self.formats {
			formats.register(extension, *format);
		}

		LoaderOptions {
			resolver: PathResolver::new(project_root),
			formats,
			cache_includes: self.cache_includes,
		}
	}
}
