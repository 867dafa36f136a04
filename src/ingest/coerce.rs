//! Scalar coercion cascade.
//!
//! Raw scalar text is tried, in order, as an integer, a float, a bool, and
//! finally kept as a string. The first interpretation that succeeds wins, so
//! `"42"` is an integer and `"true"` is a bool even when quoted.

use crate::node::Scalar;
use regex::Regex;
use std::sync::LazyLock;

static DECIMAL_INT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("static regex"));

static RADIX_INT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^0(x[0-9a-fA-F]+|o[0-7]+)$").expect("static regex"));

static DECIMAL_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?$").expect("static regex")
});

static SPECIAL_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?P<sign>[-+]?)\.(?P<inf>inf|Inf|INF)$|^\.(?P<nan>nan|NaN|NAN)$")
		.expect("static regex")
});

/// Parse a 64-bit integer: decimal with optional sign, or `0x`/`0o` prefixed.
pub fn parse_integer(text: &str) -> Option<i64> {
	if DECIMAL_INT.is_match(text) {
		return text.parse().ok();
	}
	if RADIX_INT.is_match(text) {
		let (radix, digits) = match text.as_bytes()[1] {
			b'x' => (16, &text[2..]),
			_ => (8, &text[2..]),
		};
		return i64::from_str_radix(digits, radix).ok();
	}
	None
}

/// Parse a float: plain decimal or exponent notation, or the YAML spellings
/// of infinity and NaN. Words like `inf` or `NaN` without the dot are not floats.
pub fn parse_float(text: &str) -> Option<f64> {
	if DECIMAL_FLOAT.is_match(text) {
		return text.parse().ok();
	}
	let caps = SPECIAL_FLOAT.captures(text)?;
	if caps.name("nan").is_some() {
		return Some(f64::NAN);
	}
	match caps.name("sign").map(|m| m.as_str()) {
		Some("-") => Some(f64::NEG_INFINITY),
		_ => Some(f64::INFINITY),
	}
}

/// Parse a bool using the YAML 1.1 word set (`yes`/`no`, `on`/`off`, `y`/`n`).
pub fn parse_bool(text: &str) -> Option<bool> {
	match text {
		"y" | "Y" | "yes" | "Yes" | "YES" | "true" | "True" | "TRUE" | "on" | "On" | "ON" => {
			Some(true)
		}
		"n" | "N" | "no" | "No" | "NO" | "false" | "False" | "FALSE" | "off" | "Off" | "OFF" => {
			Some(false)
		}
		_ => None,
	}
}

/// Run the full cascade over scalar text.
pub fn coerce_text(text: &str) -> Scalar {
	if let Some(i) = parse_integer(text) {
		return Scalar::Integer(i);
	}
	if let Some(x) = parse_float(text) {
		return Scalar::Float(x);
	}
	if let Some(b) = parse_bool(text) {
		return Scalar::Bool(b);
	}
	Scalar::String(text.to_string())
}
