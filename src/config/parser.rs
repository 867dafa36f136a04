use crate::config::types::Settings;
use crate::error::{FileTreeError, Result};
use std::path::Path;

/// Parse a settings file from the given path.
pub fn parse_settings_file(path: &Path) -> Result<Settings> {
	let content =
		std::fs::read_to_string(path).map_err(|source| FileTreeError::SettingsReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_settings_str(&content, path)
}

/// Parse settings from a string (useful for testing).
pub fn parse_settings_str(content: &str, path: &Path) -> Result<Settings> {
	let settings: Settings =
		toml::from_str(content).map_err(|source| FileTreeError::SettingsParseError {
			path: path.to_path_buf(),
			source,
		})?;

	settings.validate()?;

	Ok(settings)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_settings() {
		let path = PathBuf::from("test.toml");
		let settings = parse_settings_str("", &path).unwrap();

		assert!(!settings.root);
		assert!(settings.project_root.is_none());
		assert!(settings.cache_includes.is_none());
		assert!(settings.formats.is_empty());
	}

	#[test]
	fn test_parse_full_settings() {
		let content = r#"
root = true
project-root = "../checkout"
cache-includes = true

[formats]
conf = "yaml"
tsv = "table"
"#;
		let path = PathBuf::from("test.toml");
		let settings = parse_settings_str(content, &path).unwrap();

		assert!(settings.root);
		assert_eq!(settings.project_root, Some(PathBuf::from("../checkout")));
		assert_eq!(settings.cache_includes, Some(true));
		assert_eq!(settings.formats.get("conf").map(String::as_str), Some("yaml"));
		assert_eq!(settings.formats.get("tsv").map(String::as_str), Some("table"));
	}

	#[test]
	fn test_parse_invalid_toml() {
		let path = PathBuf::from("test.toml");
		let result = parse_settings_str("invalid toml [[[", &path);
		assert!(matches!(
			result,
			Err(FileTreeError::SettingsParseError { .. })
		));
	}

	#[test]
	fn test_parse_unknown_format_name() {
		let content = r#"
[formats]
conf = "xml"
"#;
		let path = PathBuf::from("test.toml");
		match parse_settings_str(content, &path) {
			Err(FileTreeError::UnknownFormat { name }) => assert_eq!(name, "xml"),
			other => panic!("Expected UnknownFormat, got {:?}", other),
		}
	}

	#[test]
	fn test_parse_missing_file() {
		let result = parse_settings_file(Path::new("/nonexistent/.filetree.toml"));
		assert!(matches!(
			result,
			Err(FileTreeError::SettingsReadError { .. })
		));
	}
}
