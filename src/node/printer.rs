use crate::node::types::Node;
use std::fmt;

fn indent(level: usize) -> String {
	"\t".repeat(level)
}

/// Render the shape of a tree.
///
/// Leaves print as `leaf`. Each list item and map entry goes on its own
/// line, prefixed by its index or key and indented one tab per level.
pub fn render(node: &Node, level: usize) -> String {
	render_with(node, level, &|_| "leaf".to_string())
}

/// Same layout as [`render`], but leaves print their values.
pub fn render_values(node: &Node, level: usize) -> String {
	render_with(node, level, &|leaf| match leaf {
		Node::Leaf(scalar) => scalar.to_string(),
		_ => String::new(),
	})
}

fn render_with(node: &Node, level: usize, leaf: &dyn Fn(&Node) -> String) -> String {
	match node {
		Node::Leaf(_) => format!("{}\n", leaf(node)),
		Node::List(items) => {
			let mut out = String::from("\n");
			for (index, child) in items.iter().enumerate() {
				out.push_str(&format!(
					"{}{}:\t{}",
					indent(level),
					index,
					render_with(child, level + 1, leaf)
				));
			}
			out
		}
		Node::Map(entries) => {
			let mut out = String::from("\n");
			for (key, child) in entries {
				out.push_str(&format!(
					"{}{}:\t{}",
					indent(level),
					key,
					render_with(child, level + 1, leaf)
				));
			}
			out
		}
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&render(self, 0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::types::Scalar;
	use std::collections::BTreeMap;

	fn sample() -> Node {
		let mut entries = BTreeMap::new();
		entries.insert("b".to_string(), Node::Leaf(Scalar::Integer(1)));
		entries.insert(
			"a".to_string(),
			Node::List(vec![
				Node::Leaf(Scalar::String("x".to_string())),
				Node::Leaf(Scalar::Bool(false)),
			]),
		);
		Node::Map(entries)
	}

	#[test]
	fn test_render_leaf() {
		assert_eq!(render(&Node::null(), 0), "leaf\n");
	}

	#[test]
	fn test_render_nested() {
		let expected = "\na:\t\n\t0:\tleaf\n\t1:\tleaf\nb:\tleaf\n";
		assert_eq!(render(&sample(), 0), expected);
	}

	#[test]
	fn test_render_values() {
		let expected = "\na:\t\n\t0:\tx\n\t1:\tfalse\nb:\t1\n";
		assert_eq!(render_values(&sample(), 0), expected);
	}

	#[test]
	fn test_render_with_indent() {
		let list = Node::List(vec![Node::null()]);
		assert_eq!(render(&list, 2), "\n\t\t0:\tleaf\n");
	}

	#[test]
	fn test_render_is_idempotent() {
		let root = sample();
		assert_eq!(render(&root, 0), render(&root, 0));
		assert_eq!(root.to_string(), render(&root, 0));
	}

	#[test]
	fn test_render_empty_containers() {
		assert_eq!(render(&Node::List(Vec::new()), 0), "\n");
		assert_eq!(render(&Node::Map(BTreeMap::new()), 0), "\n");
	}
}
