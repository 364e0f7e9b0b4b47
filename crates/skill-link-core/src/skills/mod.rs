//! Skills: discovery and linking

pub mod catalog;
pub mod linker;

pub use catalog::{Skill, SkillCatalog};
pub use linker::{
    ConflictKind, FailureReason, LinkOutcome, LinkState, PairOutcome, UnlinkOutcome, link_skill,
    link_state, prepare_target, unlink_skill,
};
