//! skill-link Core Library
//!
//! Discovers skills in a repository and manages the symbolic links that
//! install them into agent tools' skills directories.

pub mod bundle;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod fs;
pub mod skills;
pub mod status;
pub mod target;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, SkillLinkConfig};
    pub use crate::context::AppContext;
    pub use crate::error::LinkError;

    // Skills
    pub use crate::skills::{
        ConflictKind, FailureReason, LinkOutcome, LinkState, PairOutcome, Skill, SkillCatalog,
        UnlinkOutcome,
    };

    // Targets
    pub use crate::target::{Target, TargetRegistry};
    pub use crate::types::{SkillSelection, TargetId};

    // Commands
    pub use crate::commands::{
        LinkCommand, LinkOptions, StatusCommand, StatusOptions, UnlinkCommand, UnlinkOptions,
    };
}
