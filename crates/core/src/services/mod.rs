//! Service implementations for the collaborator interfaces
//!
//! Default, filesystem-backed implementations that a host can use as-is or
//! replace with its own.

pub mod memory_version_registry;
pub mod json_version_registry;
pub mod system_process_launcher;

pub use json_version_registry::JsonVersionRegistry;
pub use memory_version_registry::MemoryVersionRegistry;
pub use system_process_launcher::SystemProcessLauncher;
