//! Shared core types used across configuration, status and commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LinkError;

/// Agent tools whose skills directory can receive links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetId {
    /// Claude Code (`~/.claude/skills`)
    Claude,
    /// Cursor (`~/.cursor/skills`)
    Cursor,
}

impl TargetId {
    /// All known targets in processing order.
    pub const ALL: [TargetId; 2] = [TargetId::Claude, TargetId::Cursor];

    pub fn as_str(self) -> &'static str {
        match self {
            TargetId::Claude => "claude",
            TargetId::Cursor => "cursor",
        }
    }

    /// Human-facing tool name used in tables and prompts.
    pub fn display_name(self) -> &'static str {
        match self {
            TargetId::Claude => "Claude Code",
            TargetId::Cursor => "Cursor",
        }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TargetId {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "claude-code" => Ok(TargetId::Claude),
            "cursor" => Ok(TargetId::Cursor),
            _ => Err(LinkError::UnknownTarget(s.to_string())),
        }
    }
}

/// Which skills an operation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillSelection {
    /// Every skill in the catalog.
    All,
    /// Explicitly named skills, in the order given.
    Named(Vec<String>),
}
