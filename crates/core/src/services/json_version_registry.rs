//! Registry backed by a JSON file in the registry directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{Error, Result},
    toolchain::{RegistryKind, VersionRegistry, default_registry_dir},
};

/// Reads `{ "<version>": "<installation dir>" }` from a JSON file.
///
/// A missing file is an empty registry; the lookup failure then tells the user
/// which file to create.
pub struct JsonVersionRegistry {
    kind: RegistryKind,
    path: PathBuf,
}

impl JsonVersionRegistry {
    pub fn new(kind: RegistryKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// The registry file of `kind` inside `dir`
    pub fn in_dir(kind: RegistryKind, dir: &Path) -> Self {
        Self::new(kind, dir.join(kind.file_name()))
    }

    /// The registry file of `kind` in `$KTBUILD_HOME` or `$HOME/.ktbuild`
    pub fn default_for(kind: RegistryKind) -> Result<Self> {
        Ok(Self::in_dir(kind, &default_registry_dir()?))
    }

    fn load(&self) -> Result<HashMap<String, PathBuf>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Registry {:?} does not exist", self.path);
                return Ok(HashMap::new());
            }
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        serde_json::from_str(&contents).map_err(|e| {
            Error::config(
                format!("Failed to parse {}: {e}", self.path.display()),
                format!(
                    "{} must be a JSON object mapping versions to installation directories, for example:\n    {{ \"{}\": \"{}\" }}",
                    self.path.display(),
                    self.kind.example_version(),
                    self.kind.example_home(self.kind.example_version()),
                ),
            )
        })
    }
}

impl VersionRegistry for JsonVersionRegistry {
    fn kind(&self) -> RegistryKind {
        self.kind
    }

    fn location(&self) -> &Path {
        &self.path
    }

    fn lookup(&self, version: &str) -> Result<Option<PathBuf>> {
        Ok(self.load()?.remove(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lookup_from_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("kotlin-versions.json"),
            r#"{ "1.9": "/opt/kotlinc-1.9", "2.0": "/opt/kotlinc-2.0" }"#,
        )
        .unwrap();

        let registry = JsonVersionRegistry::in_dir(RegistryKind::Compiler, temp_dir.path());
        assert_eq!(
            registry.lookup("2.0").unwrap(),
            Some(PathBuf::from("/opt/kotlinc-2.0"))
        );
        assert_eq!(registry.lookup("9.9").unwrap(), None);
        assert_eq!(
            registry.location(),
            temp_dir.path().join("kotlin-versions.json")
        );
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let registry = JsonVersionRegistry::in_dir(RegistryKind::Runtime, temp_dir.path());
        assert_eq!(registry.lookup("17").unwrap(), None);
    }

    #[test]
    fn test_malformed_file_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jdk-versions.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = JsonVersionRegistry::new(RegistryKind::Runtime, &path)
            .lookup("17")
            .unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("jdk-versions.json"));
    }
}
