//! Application context for unified dependency injection.

use std::path::{Path, PathBuf};

use crate::config::{ConfigStore, SkillLinkConfig};
use crate::error::{LinkError, Result};
use crate::skills::SkillCatalog;
use crate::target::{Target, TargetRegistry};
use crate::types::TargetId;

/// Everything an operation needs, passed explicitly.
///
/// Frontends build this once per invocation; nothing here is cached
/// between invocations.
#[derive(Debug, Clone)]
pub struct AppContext {
    home_dir: PathBuf,
    repo_root: PathBuf,
    config: SkillLinkConfig,
    targets: TargetRegistry,
}

impl AppContext {
    /// Create a new context with explicit paths.
    pub fn new(home_dir: PathBuf, repo_root: PathBuf, config: SkillLinkConfig) -> Self {
        let targets = TargetRegistry::resolve(&config, &home_dir, &repo_root);
        Self {
            home_dir,
            repo_root,
            config,
            targets,
        }
    }

    /// Context from the user's home directory and layered config files.
    pub fn with_defaults(repo_root: PathBuf, explicit_config: Option<&Path>) -> anyhow::Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        let mut store = ConfigStore::from_repo(&repo_root);
        if let Some(path) = explicit_config {
            store = store.with_explicit(path);
        }
        let config = store.load()?;

        Ok(Self::new(home_dir, repo_root, config))
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn config(&self) -> &SkillLinkConfig {
        &self.config
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    pub fn target(&self, id: TargetId) -> Result<&Target> {
        self.targets
            .get(id)
            .ok_or_else(|| LinkError::UnknownTarget(id.to_string()))
    }

    /// Scan the repository root for skills.
    pub fn catalog(&self) -> Result<SkillCatalog> {
        SkillCatalog::discover(&self.repo_root, self.config.manifest_name())
    }
}
