//! Filesystem primitives shared across features.

pub mod symlink;

pub use symlink::{create_dir_symlink, remove_entry, same_location};
