use crate::error::{Error, Result};
use crate::layout::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAMES: [&str; 2] = [".ktbuild.json", "ktbuild.json"];

/// Names a dependency group known to the dependency-resolution collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DependencyGroupSelector {
    pub group: String,
    #[serde(default = "default_transitive")]
    pub transitive: bool,
    #[serde(default)]
    pub fetch_source: bool,
}

fn default_transitive() -> bool {
    true
}

impl DependencyGroupSelector {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            transitive: true,
            fetch_source: false,
        }
    }

    pub fn intransitive(mut self) -> Self {
        self.transitive = false;
        self
    }

    pub fn with_sources(mut self) -> Self {
        self.fetch_source = true;
        self
    }
}

/// An extra library location: either a directory or a group whose resolved
/// paths are treated as directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LibraryDir {
    Path(PathBuf),
    Group(DependencyGroupSelector),
}

impl From<&str> for LibraryDir {
    fn from(path: &str) -> Self {
        LibraryDir::Path(PathBuf::from(path))
    }
}

impl From<DependencyGroupSelector> for LibraryDir {
    fn from(selector: DependencyGroupSelector) -> Self {
        LibraryDir::Group(selector)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompileSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_runtime_version: Option<String>,
    /// Tokenized with POSIX shell rules before being handed to the compiler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_compiler_args: Option<String>,
    #[serde(default)]
    pub extra_library_dirs: Vec<LibraryDir>,
    #[serde(default)]
    pub main_dependencies: Vec<DependencyGroupSelector>,
    #[serde(default)]
    pub test_dependencies: Vec<DependencyGroupSelector>,
    #[serde(default)]
    pub jar_manifest_entries: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_version: Option<String>,
    #[serde(default = "default_interop_sources")]
    pub interop_sources: bool,
}

fn default_interop_sources() -> bool {
    true
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            language_version: None,
            target_runtime_version: None,
            extra_compiler_args: None,
            extra_library_dirs: Vec::new(),
            main_dependencies: Vec::new(),
            test_dependencies: Vec::new(),
            jar_manifest_entries: BTreeMap::new(),
            artifact_name: None,
            artifact_version: None,
            interop_sources: true,
        }
    }
}

impl CompileSettings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::config(
                format!("Failed to parse {}: {e}", path.display()),
                format!(
                    "Fix the JSON in {}, for example:\n    {{ \"language_version\": \"1.9\", \"target_runtime_version\": \"17\" }}",
                    path.display()
                ),
            )
        })
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| Error::io(path, e))?;
        Ok(())
    }

    /// Walk upward from `start_path` looking for a settings file
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    pub fn dependencies_for(&self, role: Role) -> &[DependencyGroupSelector] {
        match role {
            Role::Main => &self.main_dependencies,
            Role::Test => &self.test_dependencies,
        }
    }

    /// Splits `extra_compiler_args` into individual arguments
    pub fn extra_compiler_arg_tokens(&self) -> Result<Vec<String>> {
        match self.extra_compiler_args.as_deref() {
            None => Ok(Vec::new()),
            Some(raw) => shlex::split(raw).ok_or_else(|| {
                Error::config(
                    format!("extra_compiler_args has unbalanced quotes: {raw}"),
                    "Quote each argument containing spaces with matching quotes, for example:\n    \"extra_compiler_args\": \"-Xjsr305=strict -module-name 'my module'\"",
                )
            }),
        }
    }
}
