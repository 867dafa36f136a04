use crate::error::{FileTreeError, Result};
use crate::ingest::coerce::coerce_text;
use crate::ingest::document::{DocumentNode, DocumentView, RawScalar};
use crate::ingest::registry::{Format, FormatRegistry};
use crate::node::{Node, Scalar};
use crate::paths::PathResolver;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings for a [`Loader`].
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
	/// Resolves the root path and every path-like string found in documents.
	pub resolver: PathResolver,

	/// Extension to format mapping.
	pub formats: FormatRegistry,

	/// Reuse structured files already ingested by the same loader.
	pub cache_includes: bool,
}

/// Loads files into [`Node`] trees, following path-like strings into the
/// files they name.
#[derive(Debug, Default)]
pub struct Loader {
	resolver: PathResolver,
	formats: FormatRegistry,
	cache_includes: bool,
	cache: HashMap<PathBuf, Node>,
	/// Canonical paths of the documents currently being ingested, outermost first.
	in_progress: Vec<PathBuf>,
}

impl Loader {
	pub fn new(resolver: PathResolver) -> Self {
		Self::from_options(LoaderOptions {
			resolver,
			..Default::default()
		})
	}

	pub fn from_options(options: LoaderOptions) -> Self {
		Self {
			resolver: options.resolver,
			formats: options.formats,
			cache_includes: options.cache_includes,
			cache: HashMap::new(),
			in_progress: Vec::new(),
		}
	}

	/// Drop every cached document.
	pub fn clear_cache(&mut self) {
		self.cache.clear();
	}

	/// Load `path` into a tree.
	///
	/// The path is resolved against the home directory, the working
	/// directory and the project root. What happens next depends on the
	/// extension:
	/// - structured formats are parsed and converted recursively
	/// - table and text formats become a leaf holding the resolved path
	/// - no extension (a directory) becomes a leaf holding `path` unchanged
	/// - anything else is logged as unsupported and becomes a leaf holding `path`
	pub fn load(&mut self, path: &str) -> Result<Node> {
		let resolved = self
			.resolver
			.resolve(path, Path::new(""))?
			.ok_or_else(|| FileTreeError::PathNotFound {
				path: path.to_string(),
			})?;
		self.load_resolved(Path::new(path), &resolved)
	}

	/// Dispatch an already resolved path on its extension. Directories and
	/// unsupported files keep `original`.
	fn load_resolved(&mut self, original: &Path, resolved: &Path) -> Result<Node> {
		let Some(extension) = resolved.extension() else {
			return Ok(Node::path(original));
		};
		let extension = extension.to_string_lossy().into_owned();

		match self.formats.lookup(&extension) {
			Some(format) if format.is_structured() => self.load_document(resolved, format),
			Some(format) => {
				debug!(
					path = %resolved.display(),
					format = format.name(),
					"format not parsed yet, storing path"
				);
				Ok(Node::path(resolved))
			}
			None => {
				warn!(
					"Path {}'s file type .{} is not supported",
					resolved.display(),
					extension
				);
				Ok(Node::path(original))
			}
		}
	}

	fn load_document(&mut self, resolved: &Path, format: Format) -> Result<Node> {
		let key = std::fs::canonicalize(resolved).unwrap_or_else(|_| resolved.to_path_buf());

		if self.in_progress.contains(&key) {
			let chain = self
				.in_progress
				.iter()
				.chain(std::iter::once(&key))
				.map(|p| p.display().to_string())
				.collect::<Vec<_>>()
				.join(" -> ");
			return Err(FileTreeError::CyclicInclusion { path: key, chain });
		}

		if self.cache_includes
			&& let Some(node) = self.cache.get(&key)
		{
			debug!(path = %resolved.display(), "using cached document");
			return Ok(node.clone());
		}

		let content =
			std::fs::read_to_string(resolved).map_err(|source| FileTreeError::ReadError {
				path: resolved.to_path_buf(),
				source,
			})?;
		let base_dir = resolved.parent().unwrap_or(Path::new("")).to_path_buf();

		debug!(path = %resolved.display(), format = format.name(), "ingesting document");

		self.in_progress.push(key.clone());
		let result = self.parse_and_convert(&content, resolved, &base_dir, format);
		self.in_progress.pop();
		let node = result?;

		if self.cache_includes {
			self.cache.insert(key, node.clone());
		}
		Ok(node)
	}

	fn parse_and_convert(
		&mut self,
		content: &str,
		path: &Path,
		base_dir: &Path,
		format: Format,
	) -> Result<Node> {
		let parse_error = |message: String| FileTreeError::ParseError {
			path: path.to_path_buf(),
			format: format.name(),
			message,
		};

		match format {
			Format::Yaml => {
				let mut doc: serde_yaml::Value =
					serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
				doc.apply_merge().map_err(|e| parse_error(e.to_string()))?;
				self.convert(&doc, base_dir)
			}
			Format::Json => {
				let doc: serde_json::Value =
					serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
				self.convert(&doc, base_dir)
			}
			Format::Toml => {
				let table: toml::Table =
					toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
				self.convert(&toml::Value::Table(table), base_dir)
			}
			Format::Table | Format::Text => Ok(Node::path(path)),
		}
	}

	/// Convert one parsed node, relative references resolving against `base_dir`.
	pub fn convert<N: DocumentNode>(&mut self, node: &N, base_dir: &Path) -> Result<Node> {
		match node.view()? {
			DocumentView::Null => Ok(Node::null()),
			DocumentView::Scalar(raw) => self.convert_scalar(raw, base_dir),
			DocumentView::Sequence(items) => items
				.into_iter()
				.map(|item| self.convert(item, base_dir))
				.collect::<Result<Vec<_>>>()
				.map(Node::List),
			DocumentView::Mapping(entries) => {
				let mut map = BTreeMap::new();
				for (key, value) in entries {
					let node = self.convert(value, base_dir)?;
					if map.insert(key.clone(), node).is_some() {
						warn!(
							"Duplicate key {} in mapping, keeping the last value",
							key
						);
					}
				}
				Ok(Node::Map(map))
			}
		}
	}

	fn convert_scalar(&mut self, raw: RawScalar<'_>, base_dir: &Path) -> Result<Node> {
		let scalar = match raw {
			RawScalar::Integer(i) => Scalar::Integer(i),
			RawScalar::Float(x) => Scalar::Float(x),
			RawScalar::Bool(b) => Scalar::Bool(b),
			RawScalar::Text(text) => coerce_text(&text),
		};

		if let Scalar::String(text) = &scalar
			&& let Some(included) = self.include(text, base_dir)?
		{
			return Ok(included);
		}
		Ok(Node::Leaf(scalar))
	}

	/// Cross-file inclusion for a string value.
	///
	/// If `text` resolves to an existing path, returns that path loaded as a
	/// tree. Returns `None` when it names nothing, so the caller keeps the
	/// plain string. Empty strings are never resolved.
	pub fn include(&mut self, text: &str, base_dir: &Path) -> Result<Option<Node>> {
		if text.is_empty() {
			return Ok(None);
		}
		let Some(resolved) = self.resolver.resolve(text, base_dir)? else {
			return Ok(None);
		};

		debug!(reference = text, path = %resolved.display(), "including referenced path");
		self.load_resolved(&resolved, &resolved).map(Some)
	}
}

/// Load `path` with default options.
pub fn load(path: &str) -> Result<Node> {
	Loader::default().load(path)
}
