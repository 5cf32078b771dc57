use std::path::Path;

use crate::error::Result;

/// Copies a resource tree into a classes directory
pub trait ResourceCopier: Send + Sync {
    /// Copy everything below `source_dir` into `dest_dir`.
    /// Must be a no-op when `source_dir` does not exist.
    fn copy_tree(&self, source_dir: &Path, dest_dir: &Path) -> Result<()>;
}
