//! Dependency resolution interface
//!
//! Resolving a group means turning a selector into artifact files, typically by
//! consulting remote repositories and a local cache. That work belongs to the host.

use std::path::PathBuf;

use crate::{config::DependencyGroupSelector, error::Result};

pub trait DependencyResolver: Send + Sync {
    /// Resolve a dependency group to absolute artifact paths.
    ///
    /// The returned order is kept verbatim on the classpath. Failures should be
    /// reported as `Error::DependencyError` naming the group.
    fn resolve(&self, selector: &DependencyGroupSelector) -> Result<Vec<PathBuf>>;
}
