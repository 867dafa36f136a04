use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A single typed value held by a leaf.
///
/// The variant is chosen once, at ingestion time, by the coercion cascade.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	Null,
	Integer(i64),
	Float(f64),
	Bool(bool),
	String(String),
	/// A file or directory path stored as-is, without its content.
	Path(PathBuf),
}

impl Scalar {
	/// Name of the variant, used in error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Scalar::Null => "null",
			Scalar::Integer(_) => "integer",
			Scalar::Float(_) => "float",
			Scalar::Bool(_) => "bool",
			Scalar::String(_) => "string",
			Scalar::Path(_) => "path",
		}
	}
}

impl fmt::Display for Scalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Scalar::Null => write!(f, "null"),
			Scalar::Integer(i) => write!(f, "{}", i),
			Scalar::Float(x) => write!(f, "{:?}", x),
			Scalar::Bool(b) => write!(f, "{}", b),
			Scalar::String(s) => write!(f, "{}", s),
			Scalar::Path(p) => write!(f, "{}", p.display()),
		}
	}
}

/// Which shape a node has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
	Leaf,
	List,
	Map,
}

impl Kind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Kind::Leaf => "leaf",
			Kind::List => "list",
			Kind::Map => "map",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One node of a loaded tree.
///
/// A node owns all of its children. Maps are kept sorted by key so that
/// iteration and rendering are stable.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	Leaf(Scalar),
	List(Vec<Node>),
	Map(BTreeMap<String, Node>),
}

impl Node {
	pub fn kind(&self) -> Kind {
		match self {
			Node::Leaf(_) => Kind::Leaf,
			Node::List(_) => Kind::List,
			Node::Map(_) => Kind::Map,
		}
	}

	/// Leaf holding nothing.
	pub fn null() -> Self {
		Node::Leaf(Scalar::Null)
	}

	/// Leaf holding a path string.
	pub fn path(path: impl Into<PathBuf>) -> Self {
		Node::Leaf(Scalar::Path(path.into()))
	}

	/// Number of direct children. Leaves have none.
	pub fn len(&self) -> usize {
		match self {
			Node::Leaf(_) => 0,
			Node::List(items) => items.len(),
			Node::Map(entries) => entries.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// True when this node is a map containing every one of `keys`.
	pub fn contains_keys(&self, keys: &[&str]) -> bool {
		match self {
			Node::Map(entries) => keys.iter().all(|key| entries.contains_key(*key)),
			_ => false,
		}
	}
}

impl From<Scalar> for Node {
	fn from(scalar: Scalar) -> Self {
		Node::Leaf(scalar)
	}
}

/// A key used to index into a node: a list position or a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
	Index(usize),
	Name(String),
}

impl Key {
	/// Parse a command-line key. All-digit text is a list index.
	pub fn parse(text: &str) -> Self {
		if !text.is_empty()
			&& text.bytes().all(|b| b.is_ascii_digit())
			&& let Ok(index) = text.parse()
		{
			return Key::Index(index);
		}
		Key::Name(text.to_string())
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Key::Index(i) => write!(f, "{}", i),
			Key::Name(name) => f.write_str(name),
		}
	}
}

impl From<usize> for Key {
	fn from(index: usize) -> Self {
		Key::Index(index)
	}
}

impl From<&str> for Key {
	fn from(name: &str) -> Self {
		Key::Name(name.to_string())
	}
}

impl From<String> for Key {
	fn from(name: String) -> Self {
		Key::Name(name)
	}
}
