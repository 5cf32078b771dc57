//! Canonical project-relative locations of sources, resources and build outputs.
//!
//! The layout is pure data. Every path is relative to a project root that is only
//! supplied when an operation runs, so nothing here touches the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};

/// Source set role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Main,
    Test,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Main => "main",
            Role::Test => "test",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Directories belonging to one role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub source_dir: PathBuf,
    pub interop_source_dir: PathBuf,
    pub resource_dir: PathBuf,
    pub classes_dir: PathBuf,
}

impl SourceSet {
    fn conventional(role: Role, build_dir: &Path) -> Self {
        let src = Path::new("src").join(role.name());
        Self {
            source_dir: src.join("kotlin"),
            interop_source_dir: src.join("java"),
            resource_dir: src.join("resources"),
            classes_dir: build_dir.join("classes").join(role.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    build_dir: PathBuf,
    doc_dir: PathBuf,
    jar_output_dir: PathBuf,
    main: SourceSet,
    test: SourceSet,
}

impl PathLayout {
    /// Conventional layout with every build output placed under `build_dir`
    pub fn with_build_dir(build_dir: impl Into<PathBuf>) -> Self {
        let build_dir = build_dir.into();
        Self {
            doc_dir: build_dir.join("doc"),
            jar_output_dir: build_dir.join("lib"),
            main: SourceSet::conventional(Role::Main, &build_dir),
            test: SourceSet::conventional(Role::Test, &build_dir),
            build_dir,
        }
    }

    /// Fully explicit layout
    pub fn new(
        build_dir: PathBuf,
        doc_dir: PathBuf,
        jar_output_dir: PathBuf,
        main: SourceSet,
        test: SourceSet,
    ) -> Self {
        Self {
            build_dir,
            doc_dir,
            jar_output_dir,
            main,
            test,
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn doc_dir(&self) -> &Path {
        &self.doc_dir
    }

    pub fn jar_output_dir(&self) -> &Path {
        &self.jar_output_dir
    }

    pub fn source_set(&self, role: Role) -> &SourceSet {
        match role {
            Role::Main => &self.main,
            Role::Test => &self.test,
        }
    }
}

impl Default for PathLayout {
    fn default() -> Self {
        Self::with_build_dir("build")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = PathLayout::default();

        assert_eq!(layout.build_dir(), Path::new("build"));
        assert_eq!(layout.jar_output_dir(), Path::new("build/lib"));
        assert_eq!(layout.doc_dir(), Path::new("build/doc"));

        let main = layout.source_set(Role::Main);
        assert_eq!(main.source_dir, PathBuf::from("src/main/kotlin"));
        assert_eq!(main.interop_source_dir, PathBuf::from("src/main/java"));
        assert_eq!(main.resource_dir, PathBuf::from("src/main/resources"));
        assert_eq!(main.classes_dir, PathBuf::from("build/classes/main"));

        let test = layout.source_set(Role::Test);
        assert_eq!(test.source_dir, PathBuf::from("src/test/kotlin"));
        assert_eq!(test.classes_dir, PathBuf::from("build/classes/test"));
    }

    #[test]
    fn test_custom_build_dir_moves_all_outputs() {
        let layout = PathLayout::with_build_dir("out");

        assert_eq!(layout.jar_output_dir(), Path::new("out/lib"));
        assert_eq!(
            layout.source_set(Role::Test).classes_dir,
            PathBuf::from("out/classes/test")
        );
        // sources stay where they are
        assert_eq!(
            layout.source_set(Role::Main).source_dir,
            PathBuf::from("src/main/kotlin")
        );
    }
}
