//! Skill discovery under a repository root.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{LinkError, Result};
use crate::types::SkillSelection;

/// A directory of instructional content identified by its manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    /// Directory name, unique within the catalog
    pub name: String,
    /// Canonical path of the skill directory
    pub source_path: PathBuf,
}

/// Skills discovered in one repository root, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    root: PathBuf,
    skills: Vec<Skill>,
}

impl SkillCatalog {
    /// Scan the immediate subdirectories of `root` for `manifest`.
    ///
    /// Hidden directories and directories without the manifest are skipped.
    pub fn discover(root: &Path, manifest: &str) -> Result<Self> {
        let root = fs::canonicalize(root).map_err(|e| LinkError::filesystem(root, e))?;
        let entries = fs::read_dir(&root).map_err(|e| LinkError::filesystem(&root, e))?;

        let mut skills = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') || !path.is_dir() {
                continue;
            }
            if !path.join(manifest).is_file() {
                debug!(dir = %path.display(), manifest, "skipping directory without manifest");
                continue;
            }
            let Ok(source_path) = fs::canonicalize(&path) else {
                continue;
            };
            skills.push(Skill {
                name: name.to_string(),
                source_path,
            });
        }
        skills.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(root = %root.display(), count = skills.len(), "discovered skills");
        Ok(Self { root, skills })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Result<&Skill> {
        self.skills
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| LinkError::SkillNotFound {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// Resolve a selection into skills, failing on the first unknown name.
    ///
    /// Named selections keep the requested order and drop repeats.
    pub fn select(&self, selection: &SkillSelection) -> Result<Vec<&Skill>> {
        match selection {
            SkillSelection::All => Ok(self.skills.iter().collect()),
            SkillSelection::Named(names) => {
                let mut selected: Vec<&Skill> = Vec::with_capacity(names.len());
                for name in names {
                    let skill = self.get(name)?;
                    if !selected.iter().any(|s| s.name == skill.name) {
                        selected.push(skill);
                    }
                }
                Ok(selected)
            }
        }
    }
}
