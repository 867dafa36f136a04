use crate::error::{FileTreeError, Result};
use std::path::{Path, PathBuf};

/// Environment variable consulted for `~` expansion.
pub const HOME_VAR: &str = "HOME";

/// Resolves path strings against the home directory, a caller-supplied base
/// directory and a fixed project root, in that order.
#[derive(Debug, Clone)]
pub struct PathResolver {
	project_root: PathBuf,
	home_dir: Option<PathBuf>,
}

impl PathResolver {
	/// Create a resolver rooted at `project_root`.
	///
	/// The home directory is read from `$HOME` once, here. A missing `$HOME`
	/// only becomes an error when a `~` path is actually resolved.
	pub fn new(project_root: impl Into<PathBuf>) -> Self {
		Self {
			project_root: project_root.into(),
			home_dir: std::env::var_os(HOME_VAR).map(PathBuf::from),
		}
	}

	/// Override the home directory used for `~` expansion.
	pub fn with_home_dir(mut self, home_dir: Option<PathBuf>) -> Self {
		self.home_dir = home_dir;
		self
	}

	pub fn project_root(&self) -> &Path {
		&self.project_root
	}

	pub fn home_dir(&self) -> Option<&Path> {
		self.home_dir.as_deref()
	}

	/// Substitute the home directory for a leading `~`.
	///
	/// Only the first character is replaced, so `~/a` becomes `$HOME/a`.
	/// Strings without a leading `~` are returned unchanged.
	pub fn expand_user(&self, probe: &str) -> Result<String> {
		let Some(rest) = probe.strip_prefix('~') else {
			return Ok(probe.to_string());
		};

		let home = self
			.home_dir
			.as_ref()
			.ok_or_else(|| FileTreeError::MissingEnvironment {
				var: HOME_VAR.to_string(),
			})?;

		Ok(format!("{}{}", home.to_string_lossy(), rest))
	}

	/// Resolve `probe` to an existing path.
	///
	/// First match wins:
	/// 1. `~` expansion, if the result is absolute and exists
	/// 2. `base` joined with `probe` (an empty base leaves `probe` relative to the cwd)
	/// 3. the project root joined with `probe`
	///
	/// Returns `Ok(None)` when nothing exists; callers decide whether that is fatal.
	pub fn resolve(&self, probe: &str, base: &Path) -> Result<Option<PathBuf>> {
		if probe.is_empty() {
			return Err(FileTreeError::InvalidInput {
				reason: "path to resolve is empty".to_string(),
			});
		}

		if probe.starts_with('~') {
			let expanded = PathBuf::from(self.expand_user(probe)?);
			if expanded.is_absolute() && expanded.exists() {
				return Ok(Some(expanded));
			}
		}

		let joined = base.join(probe);
		if joined.exists() {
			return Ok(Some(joined));
		}

		let from_root = self.project_root.join(probe);
		if from_root.exists() {
			return Ok(Some(from_root));
		}

		Ok(None)
	}
}

impl Default for PathResolver {
	/// Rooted at the directory holding this crate's manifest.
	fn default() -> Self {
		Self::new(env!("CARGO_MANIFEST_DIR"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn touch(path: &Path) {
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).unwrap();
		}
		fs::write(path, "").unwrap();
	}

	#[test]
	fn test_empty_probe_is_invalid() {
		let resolver = PathResolver::new("/nonexistent");
		let result = resolver.resolve("", Path::new(""));
		assert!(matches!(result, Err(FileTreeError::InvalidInput { .. })));
	}

	#[test]
	fn test_base_wins_over_project_root() {
		let base = tempfile::tempdir().unwrap();
		let root = tempfile::tempdir().unwrap();
		touch(&base.path().join("a.yaml"));
		touch(&root.path().join("a.yaml"));

		let resolver = PathResolver::new(root.path()).with_home_dir(None);
		let resolved = resolver.resolve("a.yaml", base.path()).unwrap();
		assert_eq!(resolved, Some(base.path().join("a.yaml")));
	}

	#[test]
	fn test_falls_back_to_project_root() {
		let base = tempfile::tempdir().unwrap();
		let root = tempfile::tempdir().unwrap();
		touch(&root.path().join("cfg/b.yaml"));

		let resolver = PathResolver::new(root.path()).with_home_dir(None);
		let resolved = resolver.resolve("cfg/b.yaml", base.path()).unwrap();
		assert_eq!(resolved, Some(root.path().join("cfg/b.yaml")));
	}

	#[test]
	fn test_no_match_is_none() {
		let base = tempfile::tempdir().unwrap();
		let root = tempfile::tempdir().unwrap();

		let resolver = PathResolver::new(root.path()).with_home_dir(None);
		assert_eq!(resolver.resolve("missing.yaml", base.path()).unwrap(), None);
		assert_eq!(resolver.resolve("hello", base.path()).unwrap(), None);
	}

	#[test]
	fn test_home_wins_over_base() {
		let home = tempfile::tempdir().unwrap();
		let base = tempfile::tempdir().unwrap();
		touch(&home.path().join("x.yaml"));
		// A literal "~" directory under base would also match the probe.
		touch(&base.path().join("~/x.yaml"));

		let resolver =
			PathResolver::new("/nonexistent").with_home_dir(Some(home.path().to_path_buf()));
		let resolved = resolver.resolve("~/x.yaml", base.path()).unwrap().unwrap();
		assert_eq!(
			resolved,
			PathBuf::from(format!("{}/x.yaml", home.path().display()))
		);
	}

	#[test]
	fn test_tilde_without_home_is_missing_environment() {
		let resolver = PathResolver::new("/nonexistent").with_home_dir(None);
		let result = resolver.resolve("~/x.yaml", Path::new(""));
		match result {
			Err(FileTreeError::MissingEnvironment { var }) => assert_eq!(var, "HOME"),
			other => panic!("Expected MissingEnvironment, got {:?}", other),
		}
	}

	#[test]
	fn test_plain_probe_ignores_missing_home() {
		let base = tempfile::tempdir().unwrap();
		touch(&base.path().join("c.yaml"));

		let resolver = PathResolver::new("/nonexistent").with_home_dir(None);
		let resolved = resolver.resolve("c.yaml", base.path()).unwrap();
		assert_eq!(resolved, Some(base.path().join("c.yaml")));
	}

	#[test]
	fn test_expand_user() {
		let resolver =
			PathResolver::new("/nonexistent").with_home_dir(Some(PathBuf::from("/home/me")));
		assert_eq!(resolver.expand_user("~/cfg").unwrap(), "/home/me/cfg");
		assert_eq!(resolver.expand_user("cfg").unwrap(), "cfg");
	}

	#[test]
	fn test_absolute_probe_ignores_base() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("abs.yaml");
		touch(&file);

		let resolver = PathResolver::new("/nonexistent").with_home_dir(None);
		let resolved = resolver
			.resolve(file.to_str().unwrap(), Path::new("/somewhere/else"))
			.unwrap();
		assert_eq!(resolved, Some(file));
	}

	#[test]
	fn test_default_root_is_manifest_dir() {
		let resolver = PathResolver::default();
		assert_eq!(resolver.project_root(), Path::new(env!("CARGO_MANIFEST_DIR")));
		assert!(resolver.resolve("Cargo.toml", Path::new("/nonexistent")).unwrap().is_some());
	}
}
