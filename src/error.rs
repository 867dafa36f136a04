use std::path::PathBuf;

/// Library-level structured errors for filetree.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum FileTreeError {
	#[error("Invalid input: {reason}")]
	InvalidInput { reason: String },

	#[error("Environment variable {var} is not set")]
	MissingEnvironment { var: String },

	#[error("Path {path} does not exist")]
	PathNotFound { path: String },

	#[error("Index {key} invalid since the node is a leaf, neither a list nor a map")]
	InvalidIndex { key: String },

	#[error("Key {key} cannot index a {kind} node")]
	InvalidKeyType { key: String, kind: &'static str },

	#[error("Index {index} out of range for list of length {len}")]
	IndexOutOfRange { index: usize, len: usize },

	#[error("Key {key} does not exist")]
	KeyNotFound { key: String },

	#[error("Type mismatch: expected {expected}, found {found}")]
	TypeMismatch {
		expected: &'static str,
		found: &'static str,
	},

	#[error("Cyclic inclusion of {path} (chain: {chain})")]
	CyclicInclusion { path: PathBuf, chain: String },

	#[error("Failed to read file: {path}")]
	ReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse {format} file {path}: {message}")]
	ParseError {
		path: PathBuf,
		format: &'static str,
		message: String,
	},

	#[error("Unsupported document node: {detail}")]
	UnsupportedNode { detail: String },

	#[error("Unknown format name: {name}")]
	UnknownFormat { name: String },

	#[error("Failed to read settings file: {path}")]
	SettingsReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings file: {path}")]
	SettingsParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
}

/// Result type alias using FileTreeError.
pub type Result<T> = std::result::Result<T, FileTreeError>;
