//! Decides which source files need recompiling.
//!
//! A source is stale when its output file is missing or strictly older than the
//! source. When the whole output root is missing every source is stale.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct StalenessResolver;

impl StalenessResolver {
    pub fn new() -> Self {
        Self
    }

    /// Relative paths (under `source_root`) of sources whose output is missing or
    /// out of date, sorted lexicographically.
    pub fn find_sources_needing_compilation(
        &self,
        source_root: &Path,
        output_root: &Path,
        source_extension: &str,
        output_extension: &str,
    ) -> Result<Vec<PathBuf>> {
        if !source_root.exists() {
            debug!("Source root {:?} does not exist, nothing to compile", source_root);
            return Ok(Vec::new());
        }

        let candidates = collect_files(source_root, source_extension)?;

        if !output_root.exists() {
            debug!(
                "Output root {:?} does not exist, all {} sources are stale",
                output_root,
                candidates.len()
            );
            return Ok(candidates);
        }

        let mut stale = Vec::new();
        for relative in candidates {
            let source = source_root.join(&relative);
            let output = output_root.join(relative.with_extension(output_extension));

            let Some(output_time) = modified_if_exists(&output)? else {
                debug!("{:?} has no output", relative);
                stale.push(relative);
                continue;
            };
            let source_time = modified(&source)?;

            if output_time < source_time {
                debug!("{:?} is newer than its output", relative);
                stale.push(relative);
            }
        }

        Ok(stale)
    }

    /// Every interop source below `interop_root`, unfiltered, sorted
    /// lexicographically. Empty when the root does not exist.
    pub fn list_interop_sources(&self, interop_root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        if !interop_root.exists() {
            return Ok(Vec::new());
        }
        collect_files(interop_root, extension)
    }
}

fn collect_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| Error::io(root, e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| entry.path().to_path_buf());
        files.push(relative);
    }

    files.sort();
    Ok(files)
}

fn modified(path: &Path) -> Result<SystemTime> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| Error::io(path, e))
}

fn modified_if_exists(path: &Path) -> Result<Option<SystemTime>> {
    match std::fs::metadata(path) {
        Ok(metadata) => metadata
            .modified()
            .map(Some)
            .map_err(|e| Error::io(path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
