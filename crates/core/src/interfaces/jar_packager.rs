//! Jar packaging interface

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub trait JarPackager: Send + Sync {
    /// Write a jar at `output_path` holding the contents of `source_dirs`.
    ///
    /// Directories that do not exist are skipped, not errors. `manifest_entries`
    /// are written to `META-INF/MANIFEST.MF`.
    fn write_jar(
        &self,
        output_path: &Path,
        source_dirs: &[PathBuf],
        manifest_entries: &BTreeMap<String, String>,
    ) -> Result<()>;
}
