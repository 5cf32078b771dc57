//! Registry held in memory, for hosts that load versions themselves

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{
    error::Result,
    toolchain::{RegistryKind, VersionRegistry},
};

pub struct MemoryVersionRegistry {
    kind: RegistryKind,
    location: PathBuf,
    entries: HashMap<String, PathBuf>,
}

impl MemoryVersionRegistry {
    /// `location` is only used to tell users where entries come from
    pub fn new(kind: RegistryKind, location: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            location: location.into(),
            entries: HashMap::new(),
        }
    }

    pub fn with_entry(mut self, version: impl Into<String>, home: impl Into<PathBuf>) -> Self {
        self.entries.insert(version.into(), home.into());
        self
    }
}

impl VersionRegistry for MemoryVersionRegistry {
    fn kind(&self) -> RegistryKind {
        self.kind
    }

    fn location(&self) -> &Path {
        &self.location
    }

    fn lookup(&self, version: &str) -> Result<Option<PathBuf>> {
        Ok(self.entries.get(version).cloned())
    }
}
