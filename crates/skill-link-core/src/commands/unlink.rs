//! Unlink (uninstall) command implementation.
//!
//! Only links that point at this repository's skills are removed.

use crate::context::AppContext;
use crate::error::Result;
use crate::skills::{UnlinkOutcome, unlink_skill};
use crate::types::{SkillSelection, TargetId};

use super::report::BatchReport;

pub type UnlinkReport = BatchReport<UnlinkOutcome>;

/// Options for the unlink command
#[derive(Debug, Clone)]
pub struct UnlinkOptions {
    /// Tool to remove links from
    pub target: TargetId,
    /// Skills to unlink
    pub selection: SkillSelection,
}

impl UnlinkOptions {
    pub fn all(target: TargetId) -> Self {
        Self {
            target,
            selection: SkillSelection::All,
        }
    }

    pub fn skills<I, S>(target: TargetId, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target,
            selection: SkillSelection::Named(names.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug)]
pub struct UnlinkCommand<'a> {
    ctx: &'a AppContext,
}

impl<'a> UnlinkCommand<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Execute the unlink command. The target directory is never created.
    pub fn execute(&self, options: &UnlinkOptions) -> Result<UnlinkReport> {
        let catalog = self.ctx.catalog()?;
        let skills = catalog.select(&options.selection)?;
        let target = self.ctx.target(options.target)?;

        let mut report = UnlinkReport::new(target.id, target.skills_dir.clone());
        for skill in skills {
            report.push(&skill.name, unlink_skill(skill, target));
        }
        Ok(report)
    }
}
