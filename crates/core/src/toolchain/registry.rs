//! Version to installation-path registries.
//!
//! Two registries exist: one for the language toolchain (Kotlin compiler
//! installations) and one for the interop runtime (JDK installations). Both are
//! JSON objects mapping a version string to a directory and live in the registry
//! directory, `$KTBUILD_HOME` or `$HOME/.ktbuild`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const REGISTRY_HOME_ENV: &str = "KTBUILD_HOME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    Compiler,
    Runtime,
}

impl RegistryKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            RegistryKind::Compiler => "kotlin-versions.json",
            RegistryKind::Runtime => "jdk-versions.json",
        }
    }

    /// The settings key whose value is looked up in this registry
    pub fn setting_name(&self) -> &'static str {
        match self {
            RegistryKind::Compiler => "language_version",
            RegistryKind::Runtime => "target_runtime_version",
        }
    }

    pub(crate) fn example_home(&self, version: &str) -> String {
        match self {
            RegistryKind::Compiler => format!("/opt/kotlinc-{version}"),
            RegistryKind::Runtime => format!("/usr/lib/jvm/jdk-{version}"),
        }
    }

    /// Error for a version that has no registered installation
    pub fn missing_entry(&self, version: &str, location: &Path) -> Error {
        Error::config(
            format!("No {self} installation registered for version '{version}'"),
            format!(
                "Add an entry to {}, for example:\n    {{ \"{version}\": \"{}\" }}",
                location.display(),
                self.example_home(version)
            ),
        )
    }

    /// Error for a version setting that was never given
    pub fn unset(&self, location: &Path) -> Error {
        Error::config(
            format!("{} is not set", self.setting_name()),
            format!(
                "Set \"{}\" in .ktbuild.json to a version registered in {}, for example:\n    {{ \"{}\": \"{}\" }}",
                self.setting_name(),
                location.display(),
                self.setting_name(),
                self.example_version()
            ),
        )
    }

    pub(crate) fn example_version(&self) -> &'static str {
        match self {
            RegistryKind::Compiler => "1.9",
            RegistryKind::Runtime => "17",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Compiler => f.write_str("Kotlin compiler"),
            RegistryKind::Runtime => f.write_str("JDK"),
        }
    }
}

/// Looks up installation directories by version string
pub trait VersionRegistry: Send + Sync {
    fn kind(&self) -> RegistryKind;

    /// Where entries are configured; named in remediation messages
    fn location(&self) -> &Path;

    fn lookup(&self, version: &str) -> Result<Option<PathBuf>>;
}

/// `$KTBUILD_HOME`, falling back to `$HOME/.ktbuild`
pub fn default_registry_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(REGISTRY_HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home).join(".ktbuild"));
    }
    Err(Error::config(
        "Cannot locate the toolchain registry directory",
        format!("Set {REGISTRY_HOME_ENV} or HOME so that registry files can be found"),
    ))
}
