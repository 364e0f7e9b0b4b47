//! Status collection for skill links.
//!
//! Status is computed from the filesystem on every call and never mutates
//! anything, so it is safe to run repeatedly.

use std::path::PathBuf;

use crate::context::AppContext;
use crate::error::Result;
use crate::skills::{LinkState, link_state};
use crate::target::Target;
use crate::types::TargetId;

// =============================================================================
// Data Structures
// =============================================================================

/// Options for the status command
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    /// Only report this target
    pub target: Option<TargetId>,
}

impl StatusOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }
}

/// State of one (skill, target) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub skill: String,
    pub target: TargetId,
    pub link_path: PathBuf,
    pub state: LinkState,
}

/// Full status table
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub repo_root: PathBuf,
    pub skills: Vec<String>,
    pub targets: Vec<Target>,
    /// Catalog order, then target order
    pub entries: Vec<StatusEntry>,
}

impl StatusReport {
    /// State for a pair, if both the skill and target are in the report.
    pub fn state_of(&self, skill: &str, target: TargetId) -> Option<&LinkState> {
        self.entries
            .iter()
            .find(|e| e.skill == skill && e.target == target)
            .map(|e| &e.state)
    }

    pub fn conflicts(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.state, LinkState::Conflict(_)))
            .count()
    }
}

// =============================================================================
// Command
// =============================================================================

#[derive(Debug)]
pub struct StatusCommand<'a> {
    ctx: &'a AppContext,
}

impl<'a> StatusCommand<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub fn execute(&self, options: &StatusOptions) -> Result<StatusReport> {
        let catalog = self.ctx.catalog()?;
        let targets = self.ctx.targets().filtered(options.target);

        let mut entries = Vec::with_capacity(catalog.skills().len() * targets.len());
        for skill in catalog.skills() {
            for target in &targets {
                entries.push(StatusEntry {
                    skill: skill.name.clone(),
                    target: target.id,
                    link_path: target.link_path(&skill.name),
                    state: link_state(skill, target),
                });
            }
        }

        Ok(StatusReport {
            repo_root: catalog.root().to_path_buf(),
            skills: catalog.names(),
            targets: targets.into_iter().cloned().collect(),
            entries,
        })
    }
}
