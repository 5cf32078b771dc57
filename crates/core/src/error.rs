use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while compiling or packaging a project
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {message}\n{remediation}")]
    ConfigError {
        message: String,
        /// Names the file to edit and shows an example entry
        remediation: String,
    },

    #[error("Compilation failed: {}", describe_exit(.exit_code))]
    CompilationError { exit_code: Option<i32> },

    #[error("IO error while processing {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to launch {}: {source}", .program.display())]
    LaunchError {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Dependency resolution failed for group '{group}': {reason}")]
    DependencyError { group: String, reason: String },

    #[error("Packaging error: {0}")]
    PackagingError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::IoError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn config(message: impl Into<String>, remediation: impl Into<String>) -> Self {
        Error::ConfigError {
            message: message.into(),
            remediation: remediation.into(),
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::ConfigError { .. })
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("compiler exited with status {code}"),
        None => "compiler was terminated by a signal".to_string(),
    }
}

/// Result type alias for ktbuild operations
pub type Result<T> = std::result::Result<T, Error>;
