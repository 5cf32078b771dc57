//! Classpath assembly.
//!
//! Entry order decides which class wins when two entries contain the same name,
//! so the builder never reorders: resolved dependency groups first (in selector
//! order), then the archives found in each library directory (sorted within the
//! directory), then the extra paths as given.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    config::{DependencyGroupSelector, LibraryDir},
    error::{Error, Result},
    interfaces::DependencyResolver,
};

pub const ARCHIVE_EXTENSION: &str = "jar";

/// Ordered classpath entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<PathBuf>,
}

impl Classpath {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Join with the platform path separator
    pub fn to_os_string(&self) -> Result<OsString> {
        std::env::join_paths(&self.entries).map_err(|e| {
            Error::config(
                format!("Classpath entry cannot be joined: {e}"),
                "Remove the path separator character from dependency and library paths",
            )
        })
    }

    fn push(&mut self, entry: PathBuf) {
        self.entries.push(entry);
    }
}

pub struct ClasspathBuilder<'a> {
    resolver: &'a dyn DependencyResolver,
    project_root: &'a Path,
}

impl<'a> ClasspathBuilder<'a> {
    /// Relative library directories are resolved against `project_root`
    pub fn new(resolver: &'a dyn DependencyResolver, project_root: &'a Path) -> Self {
        Self {
            resolver,
            project_root,
        }
    }

    pub fn build_classpath(
        &self,
        selectors: &[DependencyGroupSelector],
        extra_library_dirs: &[LibraryDir],
        extra_paths: &[PathBuf],
    ) -> Result<Classpath> {
        let mut classpath = Classpath::default();

        for selector in selectors {
            let resolved = self.resolver.resolve(selector)?;
            debug!(
                "Group '{}' resolved to {} entries",
                selector.group,
                resolved.len()
            );
            for path in resolved {
                classpath.push(path);
            }
        }

        for library_dir in extra_library_dirs {
            for dir in self.library_directories(library_dir)? {
                for archive in list_archives(&dir)? {
                    classpath.push(archive);
                }
            }
        }

        for path in extra_paths {
            classpath.push(path.clone());
        }

        Ok(classpath)
    }

    fn library_directories(&self, library_dir: &LibraryDir) -> Result<Vec<PathBuf>> {
        match library_dir {
            LibraryDir::Path(path) => Ok(vec![self.project_root.join(path)]),
            LibraryDir::Group(selector) => self.resolver.resolve(selector),
        }
    }
}

/// Archives directly inside `dir`, sorted. A missing directory yields nothing.
fn list_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        if dir.exists() {
            warn!("Library path {:?} is not a directory, skipping", dir);
        } else {
            debug!("Library directory {:?} does not exist, skipping", dir);
        }
        return Ok(Vec::new());
    }

    let mut archives = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(ARCHIVE_EXTENSION)
        {
            archives.push(path);
        }
    }
    archives.sort();
    Ok(archives)
}
