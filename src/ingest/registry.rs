use crate::error::{FileTreeError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How a file with a given extension is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
	Yaml,
	Json,
	Toml,
	/// Tabular data. Not parsed yet: ingests as the resolved path.
	Table,
	/// Plain text. Not parsed yet: ingests as the resolved path.
	Text,
}

impl Format {
	pub fn name(&self) -> &'static str {
		match self {
			Format::Yaml => "yaml",
			Format::Json => "json",
			Format::Toml => "toml",
			Format::Table => "table",
			Format::Text => "text",
		}
	}

	/// Whether the format is walked into a nested tree.
	pub fn is_structured(&self) -> bool {
		matches!(self, Format::Yaml | Format::Json | Format::Toml)
	}
}

impl fmt::Display for Format {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Format {
	type Err = FileTreeError;

	fn from_str(name: &str) -> Result<Self> {
		match name {
			"yaml" => Ok(Format::Yaml),
			"json" => Ok(Format::Json),
			"toml" => Ok(Format::Toml),
			"table" => Ok(Format::Table),
			"text" => Ok(Format::Text),
			_ => Err(FileTreeError::UnknownFormat {
				name: name.to_string(),
			}),
		}
	}
}

/// Maps file extensions (without the dot, case-sensitive) to formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRegistry {
	by_extension: BTreeMap<String, Format>,
}

impl FormatRegistry {
	/// A registry with no extensions at all.
	pub fn empty() -> Self {
		Self {
			by_extension: BTreeMap::new(),
		}
	}

	/// Add or replace the format for `extension`. A leading dot is ignored.
	pub fn register(&mut self, extension: &str, format: Format) {
		let extension = extension.trim_start_matches('.');
		self.by_extension.insert(extension.to_string(), format);
	}

	pub fn lookup(&self, extension: &str) -> Option<Format> {
		self.by_extension.get(extension).copied()
	}

	/// Registered extensions in sorted order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, Format)> {
		self.by_extension.iter().map(|(ext, format)| (ext.as_str(), *format))
	}
}

impl Default for FormatRegistry {
	fn default() -> Self {
		let mut registry = Self::empty();
		registry.register("yaml", Format::Yaml);
		registry.register("yml", Format::Yaml);
		registry.register("json", Format::Json);
		registry.register("toml", Format::Toml);
		registry.register("csv", Format::Table);
		registry.register("txt", Format::Text);
		registry
	}
}
