//! Error types for skill link management.

use std::path::PathBuf;

use crate::types::TargetId;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("skill not found: {name} (available: {})", available.join(", "))]
    SkillNotFound { name: String, available: Vec<String> },

    #[error("unknown target: '{0}' (expected one of: claude, cursor)")]
    UnknownTarget(String),

    #[error("target {target} unavailable: cannot create {}", path.display())]
    TargetUnavailable {
        target: TargetId,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("filesystem error at {}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LinkError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;
