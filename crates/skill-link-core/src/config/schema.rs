//! Schema for `skill-link.toml`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::TargetId;

/// Manifest file name used when no configuration overrides it.
pub const DEFAULT_MANIFEST: &str = "SKILL.md";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillLinkConfig {
    /// Marker file that makes a directory a skill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,

    /// Per-target overrides, keyed by target id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, TargetConfigEntry>,
}

/// Target override entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfigEntry {
    /// Directory receiving skill links (`~/` and repo-relative paths allowed)
    pub skills_dir: String,
}

impl SkillLinkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a higher-priority layer into this one, field by field.
    pub fn merge(&mut self, other: SkillLinkConfig) {
        if other.manifest.is_some() {
            self.manifest = other.manifest;
        }
        self.targets.extend(other.targets);
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(manifest) = &self.manifest
            && (manifest.is_empty() || manifest.contains(['/', '\\']))
        {
            anyhow::bail!(
                "Invalid manifest '{}': must be a bare file name",
                manifest
            );
        }

        for (key, entry) in &self.targets {
            key.parse::<TargetId>()
                .map_err(|_| anyhow::anyhow!("Unknown target '{}' in [targets]", key))?;
            if entry.skills_dir.trim().is_empty() {
                anyhow::bail!("Target '{}' has an empty skills_dir", key);
            }
        }
        Ok(())
    }

    pub fn manifest_name(&self) -> &str {
        self.manifest.as_deref().unwrap_or(DEFAULT_MANIFEST)
    }

    /// Configured skills directory for a target, if any layer set one.
    pub fn skills_dir_for(&self, target: TargetId) -> Option<&str> {
        self.targets
            .iter()
            .find(|(key, _)| key.parse::<TargetId>().ok() == Some(target))
            .map(|(_, entry)| entry.skills_dir.as_str())
    }
}
