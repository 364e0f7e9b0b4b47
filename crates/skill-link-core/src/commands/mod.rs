//! High-level commands for skill-link operations.
//!
//! This module provides the public API for linking, unlinking and status.
//! Commands borrow an [`AppContext`](crate::context::AppContext) and are
//! called by the CLI, both from subcommands and from the interactive flow.

pub mod link;
pub mod report;
pub mod unlink;

pub use link::{LinkCommand, LinkOptions, LinkReport};
pub use report::{BatchReport, PairResult};
pub use unlink::{UnlinkCommand, UnlinkOptions, UnlinkReport};

// Re-export status command types from the status module
pub use crate::status::{StatusCommand, StatusOptions, StatusReport};
