//! Configuration loading and small helpers shared by the sidenav binaries.

pub mod nav_config;
pub mod path_processing;

pub use nav_config::{
    NAV_TREE_PATH_ENV, NavConfigError, NavTreeSource, TreeFormat, Validation, demo_nav_tree, load_configured_nav_tree, load_nav_tree,
    parse_nav_tree, resolve_nav_tree_path,
};
pub use path_processing::expand_tilde;
