//! Collaborator interfaces
//!
//! The compile pipeline only decides what to compile and how to invoke the
//! compiler. Everything else it needs from the outside world is expressed as one
//! of these traits and injected at construction.

pub mod dependency_resolver;
pub mod jar_packager;
pub mod process_launcher;
pub mod resource_copier;

pub use dependency_resolver::DependencyResolver;
pub use jar_packager::JarPackager;
pub use process_launcher::{ProcessExit, ProcessLauncher};
pub use resource_copier::ResourceCopier;
