//! Configuration layers for skill linking
//!
//! Layers, lowest priority first:
//! - User: `<config_dir>/skill-link/config.toml`
//! - Repository: `<repo>/skill-link.toml`
//! - Explicit: a file named on the command line

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_config_file, parse_config_str};
pub use paths::{REPO_CONFIG_FILE, expand_dir};
pub use schema::{DEFAULT_MANIFEST, SkillLinkConfig, TargetConfigEntry};
pub use store::ConfigStore;
