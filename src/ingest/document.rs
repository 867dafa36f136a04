//! Parsed-document capability surface.
//!
//! The loader does not parse document syntax itself. Each parser's value
//! type exposes what the conversion needs through [`DocumentNode`]: the node
//! kind, scalar text or native scalar, sequence items and mapping entries.

use crate::error::{FileTreeError, Result};
use std::borrow::Cow;

/// A scalar as the parser handed it over.
#[derive(Debug, Clone, PartialEq)]
pub enum RawScalar<'a> {
	/// Untyped text; runs through the coercion cascade.
	Text(Cow<'a, str>),
	Integer(i64),
	Float(f64),
	Bool(bool),
}

/// One level of a parsed document.
#[derive(Debug)]
pub enum DocumentView<'a, N> {
	Null,
	Scalar(RawScalar<'a>),
	Sequence(Vec<&'a N>),
	/// Entries with keys already turned into strings.
	Mapping(Vec<(String, &'a N)>),
}

/// A node of a parse tree the loader can walk.
pub trait DocumentNode: Sized {
	fn view(&self) -> Result<DocumentView<'_, Self>>;
}

fn number_scalar<'a>(as_i64: Option<i64>, as_f64: Option<f64>, text: String) -> RawScalar<'a> {
	match (as_i64, as_f64) {
		(Some(i), _) => RawScalar::Integer(i),
		(None, Some(x)) => RawScalar::Float(x),
		(None, None) => RawScalar::Text(Cow::Owned(text)),
	}
}

impl DocumentNode for serde_yaml::Value {
	fn view(&self) -> Result<DocumentView<'_, Self>> {
		use serde_yaml::Value;

		Ok(match self {
			Value::Null => DocumentView::Null,
			Value::Bool(b) => DocumentView::Scalar(RawScalar::Bool(*b)),
			Value::Number(n) => {
				DocumentView::Scalar(number_scalar(n.as_i64(), n.as_f64(), n.to_string()))
			}
			Value::String(s) => DocumentView::Scalar(RawScalar::Text(Cow::Borrowed(s))),
			Value::Sequence(items) => DocumentView::Sequence(items.iter().collect()),
			Value::Mapping(entries) => DocumentView::Mapping(
				entries
					.iter()
					.map(|(key, value)| yaml_key(key).map(|key| (key, value)))
					.collect::<Result<Vec<_>>>()?,
			),
			// Tags carry no meaning here; the tagged value is used as-is.
			Value::Tagged(tagged) => tagged.value.view()?,
		})
	}
}

fn yaml_key(key: &serde_yaml::Value) -> Result<String> {
	use serde_yaml::Value;

	match key {
		Value::String(s) => Ok(s.clone()),
		Value::Number(n) => Ok(n.to_string()),
		Value::Bool(b) => Ok(b.to_string()),
		Value::Null => Ok("null".to_string()),
		Value::Tagged(tagged) => yaml_key(&tagged.value),
		Value::Sequence(_) | Value::Mapping(_) => Err(FileTreeError::UnsupportedNode {
			detail: "mapping key is a sequence or mapping".to_string(),
		}),
	}
}

impl DocumentNode for serde_json::Value {
	fn view(&self) -> Result<DocumentView<'_, Self>> {
		use serde_json::Value;

		Ok(match self {
			Value::Null => DocumentView::Null,
			Value::Bool(b) => DocumentView::Scalar(RawScalar::Bool(*b)),
			Value::Number(n) => {
				DocumentView::Scalar(number_scalar(n.as_i64(), n.as_f64(), n.to_string()))
			}
			Value::String(s) => DocumentView::Scalar(RawScalar::Text(Cow::Borrowed(s))),
			Value::Array(items) => DocumentView::Sequence(items.iter().collect()),
			Value::Object(entries) => DocumentView::Mapping(
				entries
					.iter()
					.map(|(key, value)| (key.clone(), value))
					.collect(),
			),
		})
	}
}

impl DocumentNode for toml::Value {
	fn view(&self) -> Result<DocumentView<'_, Self>> {
		use toml::Value;

		Ok(match self {
			Value::String(s) => DocumentView::Scalar(RawScalar::Text(Cow::Borrowed(s))),
			Value::Integer(i) => DocumentView::Scalar(RawScalar::Integer(*i)),
			Value::Float(x) => DocumentView::Scalar(RawScalar::Float(*x)),
			Value::Boolean(b) => DocumentView::Scalar(RawScalar::Bool(*b)),
			Value::Datetime(dt) => {
				DocumentView::Scalar(RawScalar::Text(Cow::Owned(dt.to_string())))
			}
			Value::Array(items) => DocumentView::Sequence(items.iter().collect()),
			Value::Table(entries) => DocumentView::Mapping(
				entries
					.iter()
					.map(|(key, value)| (key.clone(), value))
					.collect(),
			),
		})
	}
}
