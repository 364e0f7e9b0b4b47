//! Per-(skill, target) link inspection and mutation.
//!
//! The filesystem is the only record of what is installed: every call
//! inspects the destination entry afresh and never caches the result.
//!
//! Transitions:
//! - absent   --link-->        linked
//! - linked   --link-->        linked (no-op)
//! - conflict --link-->        conflict (untouched)
//! - conflict --link(force)--> linked
//! - linked   --unlink-->      absent
//! - absent   --unlink-->      absent (no-op)
//! - conflict --unlink-->      conflict (untouched)

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::LinkError;
use crate::fs::{create_dir_symlink, remove_entry, same_location};
use crate::skills::Skill;
use crate::target::Target;

/// What occupies a destination that is not the expected link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    File,
    Directory,
    /// Symlink resolving elsewhere, or not resolving at all
    ForeignLink { points_to: Option<PathBuf> },
    /// Entry could not be inspected
    Inaccessible,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::File => f.write_str("regular file"),
            ConflictKind::Directory => f.write_str("directory"),
            ConflictKind::ForeignLink {
                points_to: Some(target),
            } => write!(f, "link to {}", target.display()),
            ConflictKind::ForeignLink { points_to: None } => f.write_str("unreadable link"),
            ConflictKind::Inaccessible => f.write_str("inaccessible entry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    Absent,
    Linked,
    Conflict(ConflictKind),
}

impl LinkState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkState::Absent => "absent",
            LinkState::Linked => "linked",
            LinkState::Conflict(_) => "conflict",
        }
    }
}

/// Why a single pair failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    PermissionDenied,
    TargetUnavailable,
    Io(String),
}

impl FailureReason {
    pub fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::PermissionDenied => FailureReason::PermissionDenied,
            _ => FailureReason::Io(err.to_string()),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::PermissionDenied => f.write_str("permission_denied"),
            FailureReason::TargetUnavailable => f.write_str("target_unavailable"),
            FailureReason::Io(message) => write!(f, "io_error: {message}"),
        }
    }
}

/// Result of linking one skill into one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Created,
    AlreadyLinked,
    SkippedConflict(ConflictKind),
    /// The conflicting entry was removed and the link created
    Replaced(ConflictKind),
    Failed(FailureReason),
}

/// Result of unlinking one skill from one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlinkOutcome {
    Removed,
    NotLinked,
    SkippedConflict(ConflictKind),
    Failed(FailureReason),
}

/// Common view of per-pair outcomes for reporting and exit codes.
pub trait PairOutcome {
    /// Stable label: `created`, `skipped_conflict`, `failed:<reason>`, ...
    fn label(&self) -> String;

    fn is_success(&self) -> bool;

    /// Extra human-readable context, if any.
    fn detail(&self) -> Option<String>;
}

impl PairOutcome for LinkOutcome {
    fn label(&self) -> String {
        match self {
            LinkOutcome::Created => "created".to_string(),
            LinkOutcome::AlreadyLinked => "already_linked".to_string(),
            LinkOutcome::SkippedConflict(_) => "skipped_conflict".to_string(),
            LinkOutcome::Replaced(_) => "replaced".to_string(),
            LinkOutcome::Failed(reason) => failed_label(reason),
        }
    }

    fn is_success(&self) -> bool {
        matches!(
            self,
            LinkOutcome::Created | LinkOutcome::AlreadyLinked | LinkOutcome::Replaced(_)
        )
    }

    fn detail(&self) -> Option<String> {
        match self {
            LinkOutcome::SkippedConflict(kind) => Some(format!("{kind} exists (use --force)")),
            LinkOutcome::Replaced(kind) => Some(format!("removed {kind}")),
            LinkOutcome::Failed(FailureReason::Io(message)) => Some(message.clone()),
            _ => None,
        }
    }
}

impl PairOutcome for UnlinkOutcome {
    fn label(&self) -> String {
        match self {
            UnlinkOutcome::Removed => "removed".to_string(),
            UnlinkOutcome::NotLinked => "not_linked".to_string(),
            UnlinkOutcome::SkippedConflict(_) => "skipped_conflict".to_string(),
            UnlinkOutcome::Failed(reason) => failed_label(reason),
        }
    }

    fn is_success(&self) -> bool {
        matches!(self, UnlinkOutcome::Removed | UnlinkOutcome::NotLinked)
    }

    fn detail(&self) -> Option<String> {
        match self {
            UnlinkOutcome::SkippedConflict(kind) => Some(format!("{kind} left in place")),
            UnlinkOutcome::Failed(FailureReason::Io(message)) => Some(message.clone()),
            _ => None,
        }
    }
}

fn failed_label(reason: &FailureReason) -> String {
    match reason {
        FailureReason::Io(_) => "failed:io_error".to_string(),
        other => format!("failed:{other}"),
    }
}

/// Inspect `link_path` without following a final symlink.
pub fn inspect(link_path: &Path, source_path: &Path) -> LinkState {
    let meta = match fs::symlink_metadata(link_path) {
        Ok(meta) => meta,
        // A file where a parent directory should be means nothing can exist here.
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            return LinkState::Absent;
        }
        Err(err) => {
            debug!(path = %link_path.display(), error = %err, "cannot inspect destination");
            return LinkState::Conflict(ConflictKind::Inaccessible);
        }
    };

    if meta.file_type().is_symlink() {
        if same_location(link_path, source_path) {
            return LinkState::Linked;
        }
        return LinkState::Conflict(ConflictKind::ForeignLink {
            points_to: fs::read_link(link_path).ok(),
        });
    }

    if meta.is_dir() {
        LinkState::Conflict(ConflictKind::Directory)
    } else {
        LinkState::Conflict(ConflictKind::File)
    }
}

/// Current state of `skill` in `target`.
pub fn link_state(skill: &Skill, target: &Target) -> LinkState {
    inspect(&target.link_path(&skill.name), &skill.source_path)
}

/// Make sure the target's skills directory exists.
pub fn prepare_target(target: &Target) -> Result<(), LinkError> {
    fs::create_dir_all(&target.skills_dir).map_err(|source| LinkError::TargetUnavailable {
        target: target.id,
        path: target.skills_dir.clone(),
        source,
    })
}

/// Link one skill into a target whose skills directory already exists.
pub fn link_skill(skill: &Skill, target: &Target, force: bool) -> LinkOutcome {
    let dest = target.link_path(&skill.name);

    match inspect(&dest, &skill.source_path) {
        LinkState::Linked => {
            debug!(skill = %skill.name, target = %target.id, "already linked");
            LinkOutcome::AlreadyLinked
        }
        LinkState::Absent => match create_dir_symlink(&skill.source_path, &dest) {
            Ok(()) => {
                info!(skill = %skill.name, dest = %dest.display(), "created link");
                LinkOutcome::Created
            }
            Err(err) => {
                warn!(skill = %skill.name, dest = %dest.display(), error = %err, "link failed");
                LinkOutcome::Failed(FailureReason::from_io(&err))
            }
        },
        LinkState::Conflict(kind) if !force => {
            warn!(skill = %skill.name, dest = %dest.display(), conflict = %kind, "skipping conflict");
            LinkOutcome::SkippedConflict(kind)
        }
        LinkState::Conflict(kind) => {
            if let Err(err) = remove_entry(&dest) {
                warn!(dest = %dest.display(), error = %err, "cannot remove conflicting entry");
                return LinkOutcome::Failed(FailureReason::from_io(&err));
            }
            match create_dir_symlink(&skill.source_path, &dest) {
                Ok(()) => {
                    info!(skill = %skill.name, dest = %dest.display(), replaced = %kind, "replaced entry with link");
                    LinkOutcome::Replaced(kind)
                }
                Err(err) => {
                    warn!(skill = %skill.name, dest = %dest.display(), error = %err, "link failed after removal");
                    LinkOutcome::Failed(FailureReason::from_io(&err))
                }
            }
        }
    }
}

/// Remove the link for one skill, leaving anything that is not our link alone.
pub fn unlink_skill(skill: &Skill, target: &Target) -> UnlinkOutcome {
    let dest = target.link_path(&skill.name);

    match inspect(&dest, &skill.source_path) {
        LinkState::Absent => UnlinkOutcome::NotLinked,
        LinkState::Conflict(kind) => {
            warn!(skill = %skill.name, dest = %dest.display(), conflict = %kind, "not removing foreign entry");
            UnlinkOutcome::SkippedConflict(kind)
        }
        LinkState::Linked => match remove_entry(&dest) {
            Ok(()) => {
                info!(skill = %skill.name, dest = %dest.display(), "removed link");
                UnlinkOutcome::Removed
            }
            Err(err) => {
                warn!(dest = %dest.display(), error = %err, "unlink failed");
                UnlinkOutcome::Failed(FailureReason::from_io(&err))
            }
        },
    }
}
