//! Toolchain resolution.
//!
//! The configured language and runtime versions are looked up in their
//! registries once per orchestrator. A successful binding is memoized; a failed
//! resolution leaves nothing behind, so the next call tries again.

pub mod registry;

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::{
    config::CompileSettings,
    error::{Error, Result},
};

pub use registry::{RegistryKind, VersionRegistry, default_registry_dir};

/// Environment variable pointing the compiler at its own installation
pub const COMPILER_HOME_ENV: &str = "KOTLIN_HOME";
/// Environment variable pointing the compiler at the interop runtime
pub const RUNTIME_HOME_ENV: &str = "JAVA_HOME";

#[cfg(windows)]
const COMPILER_EXECUTABLE: &str = "kotlinc.bat";
#[cfg(not(windows))]
const COMPILER_EXECUTABLE: &str = "kotlinc";

/// Resolved installation paths for one build session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainBinding {
    pub language_version: String,
    pub target_runtime_version: String,
    pub compiler_home: PathBuf,
    pub compiler_executable: PathBuf,
    pub interop_runtime_home: PathBuf,
}

impl ToolchainBinding {
    /// Location of the compiler executable inside an installation
    pub fn executable_in(compiler_home: &Path) -> PathBuf {
        compiler_home.join("bin").join(COMPILER_EXECUTABLE)
    }
}

pub struct ToolchainResolver {
    compilers: Box<dyn VersionRegistry>,
    runtimes: Box<dyn VersionRegistry>,
    binding: OnceCell<ToolchainBinding>,
}

impl ToolchainResolver {
    pub fn new(compilers: Box<dyn VersionRegistry>, runtimes: Box<dyn VersionRegistry>) -> Self {
        Self {
            compilers,
            runtimes,
            binding: OnceCell::new(),
        }
    }

    /// The memoized binding, resolving it on first use
    pub fn resolve(&self, settings: &CompileSettings) -> Result<&ToolchainBinding> {
        self.binding.get_or_try_init(|| self.resolve_uncached(settings))
    }

    pub fn is_resolved(&self) -> bool {
        self.binding.get().is_some()
    }

    fn resolve_uncached(&self, settings: &CompileSettings) -> Result<ToolchainBinding> {
        let language_version = settings
            .language_version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| self.compilers.kind().unset(self.compilers.location()))?;

        let compiler_home = self
            .compilers
            .lookup(language_version)?
            .ok_or_else(|| {
                self.compilers
                    .kind()
                    .missing_entry(language_version, self.compilers.location())
            })?;

        let compiler_executable = ToolchainBinding::executable_in(&compiler_home);
        check_executable(&compiler_executable, language_version, self.compilers.location())?;

        let target_runtime_version = settings
            .target_runtime_version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| self.runtimes.kind().unset(self.runtimes.location()))?;

        let interop_runtime_home = self
            .runtimes
            .lookup(target_runtime_version)?
            .ok_or_else(|| {
                self.runtimes
                    .kind()
                    .missing_entry(target_runtime_version, self.runtimes.location())
            })?;

        info!(
            "Using Kotlin {} at {:?} targeting JDK {} at {:?}",
            language_version, compiler_home, target_runtime_version, interop_runtime_home
        );

        Ok(ToolchainBinding {
            language_version: language_version.to_string(),
            target_runtime_version: target_runtime_version.to_string(),
            compiler_home,
            compiler_executable,
            interop_runtime_home,
        })
    }
}

fn check_executable(executable: &Path, version: &str, registry: &Path) -> Result<()> {
    let metadata = std::fs::metadata(executable).ok().filter(|m| m.is_file());
    let Some(metadata) = metadata else {
        return Err(Error::config(
            format!(
                "Kotlin compiler {version} not found at {}",
                executable.display()
            ),
            format!(
                "Point the \"{version}\" entry in {} at a Kotlin compiler installation containing bin/{COMPILER_EXECUTABLE}",
                registry.display()
            ),
        ));
    };

    if !is_runnable(&metadata) {
        return Err(Error::config(
            format!(
                "Kotlin compiler {version} at {} is not executable",
                executable.display()
            ),
            format!("Mark it executable, for example:\n    chmod +x {}", executable.display()),
        ));
    }

    debug!("Compiler executable {:?} is usable", executable);
    Ok(())
}

#[cfg(unix)]
fn is_runnable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_runnable(_metadata: &std::fs::Metadata) -> bool {
    true
}
