use crate::config::parser::parse_settings_file;
use crate::config::types::{LoadedSettings, MergedSettings};
use crate::error::Result;
use crate::ingest::Format;
use std::path::Path;

/// Name of the settings file looked for in each directory.
pub const SETTINGS_FILE_NAME: &str = ".filetree.toml";

/// Discover and load all settings files in the cascade.
///
/// Starts at `start_dir` and walks up the directory tree, collecting every
/// `.filetree.toml`. A file with `root = true` ends the walk.
///
/// Returns settings in cascade order (most specific first).
pub fn discover_settings(start_dir: &Path) -> Result<Vec<LoadedSettings>> {
	let mut found = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	loop {
		let settings_path = current_dir.join(SETTINGS_FILE_NAME);

		if settings_path.is_file() {
			let settings = parse_settings_file(&settings_path)?;
			let is_root = settings.root;

			found.push(LoadedSettings {
				settings,
				path: settings_path,
			});

			if is_root {
				break;
			}
		}

		// Move to parent directory
		if let Some(parent) = current_dir.parent() {
			current_dir = parent.to_path_buf();
		} else {
			break;
		}
	}

	Ok(found)
}

/// Merge settings into one effective set.
///
/// For every field the most specific file that sets it wins. Format
/// mappings merge per extension the same way.
pub fn merge_settings(loaded: &[LoadedSettings]) -> Result<MergedSettings> {
	let mut merged = MergedSettings::default();
	let mut cache_includes = None;

	for entry in loaded {
		let settings = &entry.settings;

		if merged.project_root.is_none()
			&& let Some(ref root) = settings.project_root
		{
			let settings_dir = entry.path.parent().unwrap_or(Path::new(""));
			merged.project_root = Some(settings_dir.join(root));
		}

		if cache_includes.is_none() {
			cache_includes = settings.cache_includes;
		}

		for (extension, name) in &settings.formats {
			if !merged.formats.contains_key(extension) {
				merged
					.formats
					.insert(extension.clone(), name.parse::<Format>()?);
			}
		}

		merged.sources.push(entry.path.clone());
	}

	merged.cache_includes = cache_includes.unwrap_or(false);
	Ok(merged)
}

/// Convenience function to discover and merge settings from a directory.
pub fn load_merged_settings(start_dir: &Path) -> Result<MergedSettings> {
	let loaded = discover_settings(start_dir)?;
	merge_settings(&loaded)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn test_nearest_file_wins() {
		let temp = tempfile::tempdir().unwrap();
		let outer = temp.path();
		let inner = outer.join("sub");
		fs::create_dir(&inner).unwrap();

		fs::write(
			outer.join(SETTINGS_FILE_NAME),
			"root = true\ncache-includes = true\nproject-root = \"proj\"\n[formats]\nconf = \"yaml\"\nini = \"text\"\n",
		)
		.unwrap();
		fs::write(
			inner.join(SETTINGS_FILE_NAME),
			"cache-includes = false\n[formats]\nconf = \"toml\"\n",
		)
		.unwrap();

		let loaded = discover_settings(&inner).unwrap();
		assert_eq!(loaded.len(), 2);

		let merged = merge_settings(&loaded).unwrap();
		assert!(!merged.cache_includes);
		assert_eq!(merged.project_root, Some(outer.join("proj")));
		assert_eq!(merged.formats.get("conf"), Some(&Format::Toml));
		assert_eq!(merged.formats.get("ini"), Some(&Format::Text));
		assert_eq!(merged.sources[0], inner.join(SETTINGS_FILE_NAME));
	}

	#[test]
	fn test_root_stops_walk() {
		let temp = tempfile::tempdir().unwrap();
		let outer = temp.path();
		let inner = outer.join("sub");
		fs::create_dir(&inner).unwrap();

		fs::write(outer.join(SETTINGS_FILE_NAME), "cache-includes = true\n").unwrap();
		fs::write(inner.join(SETTINGS_FILE_NAME), "root = true\n").unwrap();

		let merged = load_merged_settings(&inner).unwrap();
		assert_eq!(merged.sources.len(), 1);
		assert!(!merged.cache_includes);
	}

	#[test]
	fn test_no_settings_is_default() {
		let temp = tempfile::tempdir().unwrap();
		fs::write(temp.path().join(SETTINGS_FILE_NAME), "root = true\n").unwrap();
		let merged = load_merged_settings(temp.path()).unwrap();
		assert!(merged.project_root.is_none());
		assert!(merged.formats.is_empty());
	}
}
