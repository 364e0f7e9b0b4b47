//! Platform-specific symlink creation and entry removal.

use std::fs;
use std::path::Path;

/// Remove whatever occupies `path` without following a final symlink.
///
/// Symlinks and files are unlinked; real directories are removed recursively.
pub fn remove_entry(path: &Path) -> std::io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        remove_link_or_file(path)
    }
}

#[cfg(windows)]
fn remove_link_or_file(path: &Path) -> std::io::Result<()> {
    // Directory symlinks on Windows must be removed as directories.
    fs::remove_file(path).or_else(|_| fs::remove_dir(path))
}

#[cfg(not(windows))]
fn remove_link_or_file(path: &Path) -> std::io::Result<()> {
    fs::remove_file(path)
}

/// Whether two paths name the same location once both are canonicalized.
///
/// Returns false when either side does not resolve.
pub fn same_location(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(unix)]
pub fn create_dir_symlink(src_dir: &Path, dst_link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(src_dir, dst_link)
}

#[cfg(windows)]
pub fn create_dir_symlink(src_dir: &Path, dst_link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(src_dir, dst_link)
}

#[cfg(not(any(unix, windows)))]
pub fn create_dir_symlink(_src_dir: &Path, _dst_link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "Symlinks are not supported on this platform",
    ))
}
