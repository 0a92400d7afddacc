//! Navigation tree configuration.
//!
//! The tree is read from a JSON or YAML file. The location is resolved in this
//! order: an explicit path from the caller, the `SIDENAV_TREE_PATH` environment
//! variable, then `~/.config/sidenav/nav.yaml` when it exists. Without any of
//! those the built-in demo tree is used.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use sidenav_types::{NavTree, NavTreeError, RawNavDocument};
use thiserror::Error;
use tracing::{debug, info};

use crate::path_processing::{expand_tilde, extension_lowercase};

/// Environment variable allowing callers to override the tree file path.
pub const NAV_TREE_PATH_ENV: &str = "SIDENAV_TREE_PATH";

/// Default filename inside the config directory.
pub const NAV_TREE_FILE_NAME: &str = "nav.yaml";

const DEMO_TREE: &str = include_str!("../assets/demo_nav.yaml");

/// Error surfaced when a tree file cannot be read or understood.
#[derive(Debug, Error)]
pub enum NavConfigError {
    /// I/O failure (missing file, permissions).
    #[error("navigation tree I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON.
    #[error("navigation tree JSON error in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    /// The file is not valid YAML.
    #[error("navigation tree YAML error in {origin}: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
    /// Strict loading found a malformed item.
    #[error(transparent)]
    Tree(#[from] NavTreeError),
}

/// Syntax of a tree document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Json,
    Yaml,
}

impl TreeFormat {
    /// Picks the format from the file extension. Anything that is not `.json` is
    /// read as YAML, which also accepts plain JSON.
    pub fn from_path(path: &Path) -> Self {
        match extension_lowercase(path).as_deref() {
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// How malformed items are treated while building the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Keep malformed items with a warning; they render but do nothing.
    #[default]
    Lenient,
    /// Fail on the first malformed item.
    Strict,
}

/// Where the loaded tree came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTreeSource {
    File(PathBuf),
    BuiltIn,
}

impl fmt::Display for NavTreeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::BuiltIn => f.write_str("built-in demo tree"),
        }
    }
}

/// Parses a tree document from memory. `origin` only feeds error messages.
pub fn parse_nav_tree(content: &str, format: TreeFormat, validation: Validation, origin: &str) -> Result<NavTree, NavConfigError> {
    let document: RawNavDocument = match format {
        TreeFormat::Json => serde_json::from_str(content).map_err(|source| NavConfigError::Json {
            origin: origin.to_string(),
            source,
        })?,
        TreeFormat::Yaml => serde_yaml::from_str(content).map_err(|source| NavConfigError::Yaml {
            origin: origin.to_string(),
            source,
        })?,
    };
    let items = document.into_items();
    let tree = match validation {
        Validation::Strict => NavTree::from_raw(items)?,
        Validation::Lenient => NavTree::from_raw_lenient(items),
    };
    Ok(tree)
}

/// Reads and parses the tree file at `path`.
pub fn load_nav_tree(path: &Path, validation: Validation) -> Result<NavTree, NavConfigError> {
    let content = fs::read_to_string(path).map_err(|source| NavConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let origin = path.display().to_string();
    let tree = parse_nav_tree(&content, TreeFormat::from_path(path), validation, &origin)?;
    debug!(path = %origin, root_items = tree.items.len(), "navigation tree loaded");
    Ok(tree)
}

/// The tree shipped with the binary.
pub fn demo_nav_tree() -> NavTree {
    // Validity is covered by `demo_tree_parses_strictly`.
    parse_nav_tree(DEMO_TREE, TreeFormat::Yaml, Validation::Lenient, "built-in demo tree").unwrap_or_default()
}

/// Resolves which tree file to use, if any.
///
/// An explicit path or the environment override is returned even when the file
/// does not exist, so the caller reports the mistake. The default config path is
/// only returned when present.
pub fn resolve_nav_tree_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(expand_tilde(&path.to_string_lossy()));
    }
    if let Ok(path) = env::var(NAV_TREE_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(expand_tilde(trimmed));
        }
    }
    config_dir()
        .map(|dir| dir.join("sidenav").join(NAV_TREE_FILE_NAME))
        .filter(|path| path.is_file())
}

/// Loads the configured tree, falling back to the demo tree when nothing is
/// configured.
pub fn load_configured_nav_tree(explicit: Option<&Path>, validation: Validation) -> Result<(NavTree, NavTreeSource), NavConfigError> {
    match resolve_nav_tree_path(explicit) {
        Some(path) => {
            let tree = load_nav_tree(&path, validation)?;
            info!(path = %path.display(), "using navigation tree file");
            Ok((tree, NavTreeSource::File(path)))
        }
        None => {
            info!("no navigation tree configured; using built-in demo tree");
            Ok((demo_nav_tree(), NavTreeSource::BuiltIn))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const BROKEN_CHILD: &str = r#"[
        {"name": "Home", "href": "/"},
        {"name": "Reports", "children": [{"name": "Broken"}, {"name": "Daily", "href": "/r/daily"}]}
    ]"#;

    #[test]
    fn demo_tree_parses_strictly() {
        let tree = parse_nav_tree(DEMO_TREE, TreeFormat::Yaml, Validation::Strict, "demo").expect("demo tree is valid");
        assert!(!tree.is_empty());
        assert_eq!(tree, demo_nav_tree());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(TreeFormat::from_path(Path::new("nav.JSON")), TreeFormat::Json);
        assert_eq!(TreeFormat::from_path(Path::new("nav.yml")), TreeFormat::Yaml);
        assert_eq!(TreeFormat::from_path(Path::new("nav")), TreeFormat::Yaml);
    }

    #[test]
    fn validation_mode_controls_malformed_items() {
        let lenient = parse_nav_tree(BROKEN_CHILD, TreeFormat::Json, Validation::Lenient, "inline").expect("lenient");
        let children = lenient.items[1].children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "Broken");
        assert_eq!(children[0].href(), None);

        let strict = parse_nav_tree(BROKEN_CHILD, TreeFormat::Json, Validation::Strict, "inline");
        assert!(matches!(strict, Err(NavConfigError::Tree(NavTreeError::MissingTarget { ref name })) if name == "Broken"));
    }

    #[test]
    fn syntax_errors_name_their_origin() {
        let error = parse_nav_tree("{not json", TreeFormat::Json, Validation::Lenient, "inline.json").expect_err("invalid json");
        assert!(error.to_string().contains("inline.json"), "{error}");
    }

    #[test]
    fn loads_tree_from_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nav.json");
        fs::write(&path, BROKEN_CHILD).expect("write tree");

        let tree = load_nav_tree(&path, Validation::Lenient).expect("load tree");
        assert_eq!(tree.items.len(), 2);

        let missing = load_nav_tree(&dir.path().join("missing.yaml"), Validation::Lenient);
        assert!(matches!(missing, Err(NavConfigError::Io { .. })));
    }

    #[test]
    fn explicit_path_wins_over_environment() {
        temp_env::with_var(NAV_TREE_PATH_ENV, Some("/from/env.yaml"), || {
            assert_eq!(resolve_nav_tree_path(Some(Path::new("/explicit.yaml"))), Some(PathBuf::from("/explicit.yaml")));
            assert_eq!(resolve_nav_tree_path(None), Some(PathBuf::from("/from/env.yaml")));
        });
    }

    #[test]
    fn configured_file_is_reported_as_source() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nav.yaml");
        fs::write(&path, "- name: Home\n  href: /\n").expect("write tree");

        let (tree, source) = load_configured_nav_tree(Some(&path), Validation::Strict).expect("load configured");
        assert_eq!(tree.items[0].name, "Home");
        assert_eq!(source, NavTreeSource::File(path));
    }
}
