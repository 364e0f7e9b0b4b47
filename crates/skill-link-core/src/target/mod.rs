//! Link targets: the agent tools whose skills directories receive links.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{SkillLinkConfig, expand_dir};
use crate::types::TargetId;

/// Built-in skills directory of a tool, relative to the home directory.
pub fn default_skills_dir(id: TargetId) -> &'static str {
    match id {
        TargetId::Claude => "~/.claude/skills",
        TargetId::Cursor => "~/.cursor/skills",
    }
}

/// A target with its skills directory resolved to an absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub id: TargetId,
    pub skills_dir: PathBuf,
}

impl Target {
    pub fn new(id: TargetId, skills_dir: impl Into<PathBuf>) -> Self {
        Self {
            id,
            skills_dir: skills_dir.into(),
        }
    }

    /// Where the link for `skill_name` lives in this target.
    pub fn link_path(&self, skill_name: &str) -> PathBuf {
        self.skills_dir.join(skill_name)
    }
}

/// Every known target, in processing order.
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    /// Resolve all targets, applying per-target overrides from config.
    pub fn resolve(config: &SkillLinkConfig, home_dir: &Path, repo_root: &Path) -> Self {
        let targets = TargetId::ALL
            .into_iter()
            .map(|id| {
                let raw = config
                    .skills_dir_for(id)
                    .unwrap_or_else(|| default_skills_dir(id));
                Target::new(id, expand_dir(raw, home_dir, repo_root))
            })
            .collect();
        Self { targets }
    }

    pub fn all(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Targets matching an optional filter; `None` keeps all.
    pub fn filtered(&self, filter: Option<TargetId>) -> Vec<&Target> {
        self.targets
            .iter()
            .filter(|t| filter.is_none_or(|id| t.id == id))
            .collect()
    }
}
