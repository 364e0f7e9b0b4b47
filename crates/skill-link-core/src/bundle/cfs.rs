//! UnityCFS header stripping.
//!
//! A CFS bundle is a standard UnityFS bundle with a 32-byte header in front:
//!
//! ```text
//! offset  size  field
//! 0       8     magic "UnityCFS"
//! 8       4     version (little-endian u32)
//! 12      20    SHA-1 of the payload
//! 32      ..    payload, normally starting with "UnityFS"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sha1::{Digest, Sha1};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const CFS_MAGIC: &[u8; 8] = b"UnityCFS";
pub const CFS_HEADER_SIZE: usize = 32;
pub const UNITYFS_MAGIC: &[u8; 7] = b"UnityFS";

/// Extensions treated as bundles when walking a directory.
const BUNDLE_EXTENSIONS: [&str; 4] = ["bundle", "unity3d", "assets", "resource"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfsHeader {
    pub version: u32,
    pub sha1: [u8; 20],
}

/// Non-fatal problems found while stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripWarning {
    /// Payload does not start with the UnityFS magic
    NotUnityFs,
    /// Payload hash differs from the header
    HashMismatch { expected: String, actual: String },
}

impl std::fmt::Display for StripWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StripWarning::NotUnityFs => f.write_str("payload does not start with UnityFS"),
            StripWarning::HashMismatch { expected, actual } => {
                write!(f, "SHA-1 mismatch (header {expected}, payload {actual})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripOutcome {
    /// Header removed; payload written
    Stripped {
        version: u32,
        warnings: Vec<StripWarning>,
    },
    /// No CFS header; bytes written unchanged
    Copied,
}

/// Parse the CFS header, if `data` starts with one.
///
/// Returns an error when the magic is present but the header is truncated.
pub fn parse_header(data: &[u8]) -> anyhow::Result<Option<CfsHeader>> {
    if !data.starts_with(CFS_MAGIC) {
        return Ok(None);
    }
    if data.len() < CFS_HEADER_SIZE {
        anyhow::bail!(
            "Truncated CFS header: {} bytes, expected at least {}",
            data.len(),
            CFS_HEADER_SIZE
        );
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&data[8..12]);
    let mut sha1 = [0u8; 20];
    sha1.copy_from_slice(&data[12..CFS_HEADER_SIZE]);

    Ok(Some(CfsHeader {
        version: u32::from_le_bytes(version),
        sha1,
    }))
}

/// Split `data` into the bytes to write and what happened.
pub fn strip_bytes(data: &[u8]) -> anyhow::Result<(&[u8], StripOutcome)> {
    let Some(header) = parse_header(data)? else {
        return Ok((data, StripOutcome::Copied));
    };

    let payload = &data[CFS_HEADER_SIZE..];
    let mut warnings = Vec::new();

    if !payload.starts_with(UNITYFS_MAGIC) {
        warnings.push(StripWarning::NotUnityFs);
    }

    let actual = Sha1::digest(payload);
    if actual.as_slice() != header.sha1.as_slice() {
        warnings.push(StripWarning::HashMismatch {
            expected: hex::encode(header.sha1),
            actual: hex::encode(actual),
        });
    }

    Ok((
        payload,
        StripOutcome::Stripped {
            version: header.version,
            warnings,
        },
    ))
}

/// Strip one file into `output`, creating parent directories.
pub fn strip_file(input: &Path, output: &Path) -> anyhow::Result<StripOutcome> {
    let data = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let (bytes, outcome) =
        strip_bytes(&data).with_context(|| format!("Invalid bundle {}", input.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(output, bytes).with_context(|| format!("Failed to write {}", output.display()))?;

    if let StripOutcome::Stripped { warnings, .. } = &outcome {
        for warning in warnings {
            warn!(file = %input.display(), "{warning}");
        }
    }
    Ok(outcome)
}

/// Result for one file of a directory run.
#[derive(Debug)]
pub struct FileResult {
    /// Path relative to the input directory
    pub relative: PathBuf,
    pub result: Result<StripOutcome, String>,
}

#[derive(Debug, Default)]
pub struct StripStats {
    pub files: Vec<FileResult>,
}

impl StripStats {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn stripped(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.result, Ok(StripOutcome::Stripped { .. })))
            .count()
    }

    pub fn already_standard(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.result, Ok(StripOutcome::Copied)))
            .count()
    }

    pub fn errors(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_err()).count()
    }
}

fn is_bundle_candidate(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        None => true,
        Some(ext) => BUNDLE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext)),
    }
}

/// Files found under a directory, plus entries the walk could not read.
#[derive(Debug, Default)]
pub struct Candidates {
    pub files: Vec<PathBuf>,
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Files under `dir` to process, sorted. Falls back to every file when
/// nothing looks like a bundle. Unreadable entries are collected, not fatal.
pub fn collect_candidates(dir: &Path) -> Candidates {
    let mut all = Vec::new();
    let mut unreadable = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                // Follows symlinks so linked bundles are processed too.
                if entry.path().is_file() {
                    all.push(entry.into_path());
                }
            }
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                warn!(path = %path.display(), error = %err, "cannot read entry");
                unreadable.push((path, err.to_string()));
            }
        }
    }
    all.sort();

    let bundles: Vec<PathBuf> = all
        .iter()
        .filter(|p| is_bundle_candidate(p))
        .cloned()
        .collect();

    Candidates {
        files: if bundles.is_empty() { all } else { bundles },
        unreadable,
    }
}

/// Strip every candidate under `input` into the same relative path under
/// `output`. Per-file failures are recorded, not returned.
pub fn strip_dir(input: &Path, output: &Path) -> anyhow::Result<StripStats> {
    let mut stats = StripStats::default();
    let candidates = collect_candidates(input);

    for (path, message) in candidates.unreadable {
        let relative = path.strip_prefix(input).unwrap_or(&path).to_path_buf();
        stats.files.push(FileResult {
            relative,
            result: Err(message),
        });
    }

    for path in candidates.files {
        let relative = path.strip_prefix(input).unwrap_or(&path).to_path_buf();
        let result = strip_file(&path, &output.join(&relative)).map_err(|e| format!("{e:#}"));
        if let Err(message) = &result {
            warn!(file = %relative.display(), error = %message, "strip failed");
        } else {
            debug!(file = %relative.display(), "processed");
        }
        stats.files.push(FileResult { relative, result });
    }

    Ok(stats)
}
