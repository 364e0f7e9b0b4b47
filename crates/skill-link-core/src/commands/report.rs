//! Per-pair batch reports shared by link and unlink.

use std::path::PathBuf;

use crate::skills::PairOutcome;
use crate::types::TargetId;

/// Outcome for one skill within one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairResult<O> {
    pub skill: String,
    pub link_path: PathBuf,
    pub outcome: O,
}

/// All pair outcomes for one target, in catalog (or request) order.
#[derive(Debug, Clone)]
pub struct BatchReport<O> {
    pub target: TargetId,
    pub skills_dir: PathBuf,
    pub results: Vec<PairResult<O>>,
}

impl<O: PairOutcome> BatchReport<O> {
    pub fn new(target: TargetId, skills_dir: PathBuf) -> Self {
        Self {
            target,
            skills_dir,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, skill: &str, outcome: O) {
        self.results.push(PairResult {
            skill: skill.to_string(),
            link_path: self.skills_dir.join(skill),
            outcome,
        });
    }

    /// True when every pair ended in a success state.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_success())
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| !r.outcome.is_success()).count()
    }

    /// Outcome recorded for `skill`, if it was part of the batch.
    pub fn outcome_for(&self, skill: &str) -> Option<&O> {
        self.results
            .iter()
            .find(|r| r.skill == skill)
            .map(|r| &r.outcome)
    }
}
