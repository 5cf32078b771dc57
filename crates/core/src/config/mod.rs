//! Configuration management for ktbuild

mod settings;
pub mod validation;

// Re-export main types
pub use settings::{CONFIG_FILE_NAMES, CompileSettings, DependencyGroupSelector, LibraryDir};
pub use validation::{ConfigValidator, SettingsValidator};
