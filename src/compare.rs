//! Directory comparison for snapshot sets
//!
//! Two directories of same-named snapshot images are compared pairwise by
//! content. The baseline directory drives enumeration: every baseline
//! snapshot must have a counterpart in the candidate directory, extra
//! candidate files are ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for directory comparison failures. All variants are fatal.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Input path is missing or not a directory
    #[error("'{}' is not a directory", .path.display())]
    NotADirectory { path: PathBuf },
    /// A baseline snapshot has no same-named candidate counterpart
    #[error("cannot find the same file for the candidate version: {name}")]
    MissingCounterpart { name: String },
    /// IO error while listing or reading snapshots
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },
}

/// A same-named snapshot pair whose contents differ.
///
/// Both paths exist when the entry is produced; a missing counterpart is a
/// fatal error, never an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    /// Snapshot file name, shared by both sides
    pub name: String,
    pub baseline: PathBuf,
    pub candidate: PathBuf,
}

/// List snapshot names in a directory, sorted for deterministic output.
///
/// Hidden entries (leading `.`) and non-regular files are excluded.
pub fn snapshot_names(dir: &Path) -> Result<Vec<String>, CompareError> {
    if !dir.is_dir() {
        return Err(CompareError::NotADirectory { path: dir.to_path_buf() });
    }

    let read_dir = fs::read_dir(dir)
        .map_err(|e| CompareError::Io { path: dir.to_path_buf(), source: e })?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| CompareError::Io { path: dir.to_path_buf(), source: e })?;
        let file_type = entry
            .file_type()
            .map_err(|e| CompareError::Io { path: entry.path(), source: e })?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}

/// Find the baseline snapshots whose candidate counterparts differ.
///
/// Pairs are compared as whole byte buffers, no hashing and no decoding;
/// equal pairs are dropped, unequal pairs become [`DiffEntry`]s in sorted
/// name order.
pub fn different_files(baseline: &Path, candidate: &Path) -> Result<Vec<DiffEntry>, CompareError> {
    let names = snapshot_names(baseline)?;
    if !candidate.is_dir() {
        return Err(CompareError::NotADirectory { path: candidate.to_path_buf() });
    }

    let mut entries = Vec::new();
    for name in names {
        let baseline_path = baseline.join(&name);
        let candidate_path = candidate.join(&name);

        if !candidate_path.is_file() {
            return Err(CompareError::MissingCounterpart { name });
        }

        let baseline_bytes = fs::read(&baseline_path)
            .map_err(|e| CompareError::Io { path: baseline_path.clone(), source: e })?;
        let candidate_bytes = fs::read(&candidate_path)
            .map_err(|e| CompareError::Io { path: candidate_path.clone(), source: e })?;

        if baseline_bytes != candidate_bytes {
            entries.push(DiffEntry { name, baseline: baseline_path, candidate: candidate_path });
        }
    }

    Ok(entries)
}
