//! ktbuild-core - Incremental Kotlin compilation for a host build system
//!
//! This crate provides functionality to:
//! - Decide which sources are out of date against their compiled outputs
//! - Assemble an ordered classpath from dependency groups and library directories
//! - Bind the configured Kotlin and JDK versions to installed toolchains
//! - Invoke the compiler and sequence the clean, compile and jar steps
pub mod classpath;
pub mod command;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod layout;
pub mod orchestrator;
pub mod services;
pub mod staleness;
pub mod toolchain;

// Re-export commonly used types and traits
pub use error::{Error, Result};

// Re-export main API components
pub use classpath::{Classpath, ClasspathBuilder};
pub use command::{CompileRequest, CompilerCommand, CompilerInvoker};
pub use config::{CompileSettings, DependencyGroupSelector, LibraryDir};
pub use layout::{PathLayout, Role, SourceSet};
pub use orchestrator::{CompilationOrchestrator, CompileOutcome, CompileReport, OrchestratorBuilder};
pub use staleness::StalenessResolver;
pub use toolchain::{ToolchainBinding, ToolchainResolver};
