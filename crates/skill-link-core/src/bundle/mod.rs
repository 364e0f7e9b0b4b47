//! Asset bundle preprocessing helpers.

pub mod cfs;

pub use cfs::{StripOutcome, StripStats, StripWarning, strip_dir, strip_file};
