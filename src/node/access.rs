//! Indexing into a loaded tree and recovering typed values from leaves.

use crate::error::{FileTreeError, Result};
use crate::node::types::{Key, Node, Scalar};
use std::collections::BTreeMap;
use std::path::Path;

impl Node {
	/// Look up one child.
	///
	/// Lists take [`Key::Index`], maps take [`Key::Name`]. Using the other key
	/// variant is an error rather than a miss.
	pub fn index(&self, key: &Key) -> Result<&Node> {
		match (self, key) {
			(Node::Leaf(_), _) => Err(FileTreeError::InvalidIndex {
				key: key.to_string(),
			}),
			(Node::List(items), Key::Index(index)) => {
				items.get(*index).ok_or(FileTreeError::IndexOutOfRange {
					index: *index,
					len: items.len(),
				})
			}
			(Node::Map(entries), Key::Name(name)) => {
				entries.get(name).ok_or_else(|| FileTreeError::KeyNotFound {
					key: name.clone(),
				})
			}
			(Node::List(_), Key::Name(_)) | (Node::Map(_), Key::Index(_)) => {
				Err(FileTreeError::InvalidKeyType {
					key: key.to_string(),
					kind: self.kind().as_str(),
				})
			}
		}
	}

	/// Follow a sequence of keys, stopping at the first one that fails.
	pub fn get_path(&self, keys: &[Key]) -> Result<&Node> {
		keys.iter().try_fold(self, |node, key| node.index(key))
	}

	/// Follow `keys`, then cast the node found there.
	pub fn get<'a, T: FromNode<'a>>(&'a self, keys: &[Key]) -> Result<T> {
		self.get_path(keys)?.cast()
	}

	/// Recover a typed value, checking that the stored type matches.
	pub fn cast<'a, T: FromNode<'a>>(&'a self) -> Result<T> {
		T::from_node(self).ok_or_else(|| FileTreeError::TypeMismatch {
			expected: T::EXPECTED,
			found: self.type_name(),
		})
	}

	/// Scalar type for leaves, shape for lists and maps.
	pub fn type_name(&self) -> &'static str {
		match self {
			Node::Leaf(scalar) => scalar.type_name(),
			_ => self.kind().as_str(),
		}
	}

	pub fn scalar(&self) -> Option<&Scalar> {
		match self {
			Node::Leaf(scalar) => Some(scalar),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Node::Leaf(Scalar::Null))
	}

	pub fn as_i64(&self) -> Result<i64> {
		self.cast()
	}

	pub fn as_f64(&self) -> Result<f64> {
		self.cast()
	}

	pub fn as_bool(&self) -> Result<bool> {
		self.cast()
	}

	pub fn as_str(&self) -> Result<&str> {
		self.cast()
	}

	pub fn as_path(&self) -> Result<&Path> {
		self.cast()
	}

	pub fn as_list(&self) -> Result<&[Node]> {
		self.cast()
	}

	pub fn as_map(&self) -> Result<&BTreeMap<String, Node>> {
		self.cast()
	}
}

/// Types that can be recovered from a [`Node`] with a checked cast.
pub trait FromNode<'a>: Sized {
	/// Type name reported on mismatch.
	const EXPECTED: &'static str;

	fn from_node(node: &'a Node) -> Option<Self>;
}

macro_rules! copy_from_leaf {
	($ty:ty, $expected:literal, $variant:ident) => {
		impl FromNode<'_> for $ty {
			const EXPECTED: &'static str = $expected;

			fn from_node(node: &Node) -> Option<Self> {
				match node {
					Node::Leaf(Scalar::$variant(value)) => Some(*value),
					_ => None,
				}
			}
		}
	};
}

copy_from_leaf!(i64, "integer", Integer);
copy_from_leaf!(f64, "float", Float);
copy_from_leaf!(bool, "bool", Bool);

impl<'a> FromNode<'a> for &'a str {
	const EXPECTED: &'static str = "string";

	fn from_node(node: &'a Node) -> Option<Self> {
		match node {
			Node::Leaf(Scalar::String(s)) => Some(s.as_str()),
			_ => None,
		}
	}
}

impl<'a> FromNode<'a> for &'a Path {
	const EXPECTED: &'static str = "path";

	fn from_node(node: &'a Node) -> Option<Self> {
		match node {
			Node::Leaf(Scalar::Path(p)) => Some(p.as_path()),
			_ => None,
		}
	}
}

impl<'a> FromNode<'a> for &'a Scalar {
	const EXPECTED: &'static str = "leaf";

	fn from_node(node: &'a Node) -> Option<Self> {
		node.scalar()
	}
}

impl<'a> FromNode<'a> for &'a [Node] {
	const EXPECTED: &'static str = "list";

	fn from_node(node: &'a Node) -> Option<Self> {
		match node {
			Node::List(items) => Some(items.as_slice()),
			_ => None,
		}
	}
}

impl<'a> FromNode<'a> for &'a BTreeMap<String, Node> {
	const EXPECTED: &'static str = "map";

	fn from_node(node: &'a Node) -> Option<Self> {
		match node {
			Node::Map(entries) => Some(entries),
			_ => None,
		}
	}
}

fn index_or_panic<'a>(node: &'a Node, key: Key) -> &'a Node {
	match node.index(&key) {
		Ok(child) => child,
		Err(e) => panic!("{}", e),
	}
}

/// `node[0]`; panics with the accessor error on misuse.
impl std::ops::Index<usize> for Node {
	type Output = Node;

	fn index(&self, index: usize) -> &Node {
		index_or_panic(self, Key::Index(index))
	}
}

/// `node["key"]`; panics with the accessor error on misuse.
impl std::ops::Index<&str> for Node {
	type Output = Node;

	fn index(&self, key: &str) -> &Node {
		index_or_panic(self, Key::from(key))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::types::Kind;
	use std::path::PathBuf;

	fn sample() -> Node {
		let mut entries = BTreeMap::new();
		entries.insert("a".to_string(), Node::Leaf(Scalar::Integer(1)));
		entries.insert(
			"b".to_string(),
			Node::List(vec![
				Node::Leaf(Scalar::Integer(2)),
				Node::Leaf(Scalar::Integer(3)),
			]),
		);
		entries.insert(
			"c".to_string(),
			Node::Leaf(Scalar::String("hello".to_string())),
		);
		entries.insert("d".to_string(), Node::path("/data/set"));
		Node::Map(entries)
	}

	#[test]
	fn test_index_map_and_list() {
		let root = sample();
		assert_eq!(root.index(&Key::from("a")).unwrap().as_i64().unwrap(), 1);
		let b = root.index(&Key::from("b")).unwrap();
		assert_eq!(b.index(&Key::Index(1)).unwrap().as_i64().unwrap(), 3);
	}

	#[test]
	fn test_get_path_folds_keys() {
		let root = sample();
		let node = root.get_path(&[Key::from("b"), Key::Index(0)]).unwrap();
		assert_eq!(node.as_i64().unwrap(), 2);
		assert_eq!(root.get_path(&[]).unwrap(), &root);
	}

	#[test]
	fn test_get_with_cast() {
		let root = sample();
		let c: &str = root.get(&[Key::from("c")]).unwrap();
		assert_eq!(c, "hello");
		let d: &Path = root.get(&[Key::from("d")]).unwrap();
		assert_eq!(d, Path::new("/data/set"));
	}

	#[test]
	fn test_index_leaf_is_invalid() {
		let leaf = Node::Leaf(Scalar::Integer(1));
		assert!(matches!(
			leaf.index(&Key::Index(0)),
			Err(FileTreeError::InvalidIndex { .. })
		));
		assert!(matches!(
			leaf.index(&Key::from("a")),
			Err(FileTreeError::InvalidIndex { .. })
		));
	}

	#[test]
	fn test_index_out_of_range() {
		let root = sample();
		let result = root.get_path(&[Key::from("b"), Key::Index(5)]);
		match result {
			Err(FileTreeError::IndexOutOfRange { index, len }) => {
				assert_eq!(index, 5);
				assert_eq!(len, 2);
			}
			other => panic!("Expected IndexOutOfRange, got {:?}", other),
		}
	}

	#[test]
	fn test_missing_key() {
		let root = sample();
		match root.index(&Key::from("zzz")) {
			Err(FileTreeError::KeyNotFound { key }) => assert_eq!(key, "zzz"),
			other => panic!("Expected KeyNotFound, got {:?}", other),
		}
	}

	#[test]
	fn test_wrong_key_variant() {
		let root = sample();
		assert!(matches!(
			root.index(&Key::Index(0)),
			Err(FileTreeError::InvalidKeyType { kind: "map", .. })
		));
		let b = &root["b"];
		assert!(matches!(
			b.index(&Key::from("x")),
			Err(FileTreeError::InvalidKeyType { kind: "list", .. })
		));
	}

	#[test]
	fn test_get_path_short_circuits() {
		let root = sample();
		// "a" is a leaf, so the second key fails there.
		let result = root.get_path(&[Key::from("a"), Key::from("x"), Key::Index(9)]);
		assert!(matches!(result, Err(FileTreeError::InvalidIndex { .. })));
	}

	#[test]
	fn test_cast_mismatch() {
		let root = sample();
		match root["a"].as_str() {
			Err(FileTreeError::TypeMismatch { expected, found }) => {
				assert_eq!(expected, "string");
				assert_eq!(found, "integer");
			}
			other => panic!("Expected TypeMismatch, got {:?}", other),
		}
		assert!(root["a"].as_f64().is_err());
		assert!(root["b"].as_map().is_err());
		assert_eq!(root["b"].as_list().unwrap().len(), 2);
		assert!(root.as_i64().is_err());
	}

	#[test]
	fn test_operator_index() {
		let root = sample();
		assert_eq!(root["b"][1].as_i64().unwrap(), 3);
		assert_eq!(
			root["d"].as_path().unwrap().to_path_buf(),
			PathBuf::from("/data/set")
		);
	}

	#[test]
	#[should_panic(expected = "does not exist")]
	fn test_operator_index_panics_on_missing_key() {
		let root = sample();
		let _ = &root["nope"];
	}

	#[test]
	fn test_scalar_and_null() {
		assert!(Node::null().is_null());
		let leaf = Node::Leaf(Scalar::Bool(true));
		let scalar: &Scalar = leaf.cast().unwrap();
		assert_eq!(scalar, &Scalar::Bool(true));
		assert_eq!(leaf.kind(), Kind::Leaf);
		assert!(Node::List(Vec::new()).scalar().is_none());
	}
}
