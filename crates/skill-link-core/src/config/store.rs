//! Config store for loading layered `skill-link.toml` files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use super::paths::{global_config_path, repo_config_path};
use super::{SkillLinkConfig, parser};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    global_path: Option<PathBuf>,
    repo_path: PathBuf,
    explicit_path: Option<PathBuf>,
}

impl ConfigStore {
    /// Store using the platform config directory for the user layer.
    pub fn from_repo(repo_root: &Path) -> Self {
        let global_dir = dirs::config_dir().map(|p| p.join("skill-link"));
        Self::from_paths(global_dir, repo_root)
    }

    pub fn from_paths(global_dir: Option<PathBuf>, repo_root: &Path) -> Self {
        Self {
            global_path: global_dir.map(|dir| global_config_path(&dir)),
            repo_path: repo_config_path(repo_root),
            explicit_path: None,
        }
    }

    /// Add a file that must exist and wins over every other layer.
    pub fn with_explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Load and merge all layers: user, repository, explicit.
    pub fn load(&self) -> anyhow::Result<SkillLinkConfig> {
        let mut config = SkillLinkConfig::new();

        for path in [self.global_path.as_deref(), Some(self.repo_path.as_path())]
            .into_iter()
            .flatten()
        {
            if path.is_file() {
                debug!(path = %path.display(), "loading config layer");
                config.merge(parser::parse_config_file(path)?);
            }
        }

        if let Some(path) = &self.explicit_path {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let layer = parser::parse_config_file(path)
                .with_context(|| format!("Failed to load --config {}", path.display()))?;
            config.merge(layer);
        }

        Ok(config)
    }
}
