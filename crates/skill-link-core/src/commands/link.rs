//! Link (install) command implementation.

use tracing::warn;

use crate::context::AppContext;
use crate::error::Result;
use crate::skills::{FailureReason, LinkOutcome, link_skill, prepare_target};
use crate::types::{SkillSelection, TargetId};

use super::report::BatchReport;

pub type LinkReport = BatchReport<LinkOutcome>;

/// Options for the link command
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// Tool receiving the links
    pub target: TargetId,
    /// Skills to link
    pub selection: SkillSelection,
    /// Replace conflicting entries
    pub force: bool,
}

impl LinkOptions {
    /// Link every skill in the catalog
    pub fn all(target: TargetId) -> Self {
        Self {
            target,
            selection: SkillSelection::All,
            force: false,
        }
    }

    /// Link the named skills
    pub fn skills<I, S>(target: TargetId, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target,
            selection: SkillSelection::Named(names.into_iter().map(Into::into).collect()),
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Link command orchestrator
#[derive(Debug)]
pub struct LinkCommand<'a> {
    ctx: &'a AppContext,
}

impl<'a> LinkCommand<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Execute the link command.
    ///
    /// Unknown skill names reject the whole request before anything is
    /// touched. Past that point every pair is processed independently.
    pub fn execute(&self, options: &LinkOptions) -> Result<LinkReport> {
        let catalog = self.ctx.catalog()?;
        let skills = catalog.select(&options.selection)?;
        let target = self.ctx.target(options.target)?;

        let mut report = LinkReport::new(target.id, target.skills_dir.clone());

        if let Err(err) = prepare_target(target) {
            warn!(target = %target.id, error = %err, "target unavailable");
            for skill in &skills {
                report.push(&skill.name, LinkOutcome::Failed(FailureReason::TargetUnavailable));
            }
            return Ok(report);
        }

        for skill in skills {
            report.push(&skill.name, link_skill(skill, target, options.force));
        }
        Ok(report)
    }
}
