//! Recording fakes and project fixtures shared by the scenario tests

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use ktbuild::interfaces::{DependencyResolver, JarPackager, ProcessExit, ProcessLauncher, ResourceCopier};
use ktbuild::services::MemoryVersionRegistry;
use ktbuild::toolchain::RegistryKind;
use ktbuild::{
    CompilationOrchestrator, CompileSettings, CompilerCommand, DependencyGroupSelector, Result,
    ToolchainBinding,
};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Launch(CompilerCommand),
    CopyResources { from: PathBuf, to: PathBuf },
    WriteJar {
        output: PathBuf,
        dirs: Vec<PathBuf>,
        manifest: BTreeMap<String, String>,
    },
}

/// Every collaborator call, in order
#[derive(Debug, Default, Clone)]
pub struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    fn record(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn launches(&self) -> Vec<CompilerCommand> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Launch(command) => Some(command),
                _ => None,
            })
            .collect()
    }

    pub fn copies(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::CopyResources { .. }))
            .count()
    }
}

pub struct FakeResolver(pub HashMap<String, Vec<PathBuf>>);

impl DependencyResolver for FakeResolver {
    fn resolve(&self, selector: &DependencyGroupSelector) -> Result<Vec<PathBuf>> {
        Ok(self.0.get(&selector.group).cloned().unwrap_or_default())
    }
}

pub struct FakeCopier(pub Recorder);

impl ResourceCopier for FakeCopier {
    fn copy_tree(&self, source_dir: &Path, dest_dir: &Path) -> Result<()> {
        self.0.record(Event::CopyResources {
            from: source_dir.to_path_buf(),
            to: dest_dir.to_path_buf(),
        });
        Ok(())
    }
}

pub struct FakePackager(pub Recorder);

impl JarPackager for FakePackager {
    fn write_jar(
        &self,
        output_path: &Path,
        source_dirs: &[PathBuf],
        manifest_entries: &BTreeMap<String, String>,
    ) -> Result<()> {
        self.0.record(Event::WriteJar {
            output: output_path.to_path_buf(),
            dirs: source_dirs.to_vec(),
            manifest: manifest_entries.clone(),
        });
        Ok(())
    }
}

/// Records the command and answers with a fixed exit
pub struct FakeLauncher {
    pub recorder: Recorder,
    pub exit: ProcessExit,
}

impl ProcessLauncher for FakeLauncher {
    fn run(&self, command: &CompilerCommand) -> Result<ProcessExit> {
        self.recorder.record(Event::Launch(command.clone()));
        Ok(self.exit)
    }
}

/// A project directory plus an installed fake compiler next to it
pub struct Fixture {
    pub temp_dir: TempDir,
    pub project: PathBuf,
    pub compiler_home: PathBuf,
    pub recorder: Recorder,
}

impl Fixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("greeter");
        fs::create_dir_all(&project).unwrap();

        let compiler_home = temp_dir.path().join("kotlinc-1.9");
        let exe = ToolchainBinding::executable_in(&compiler_home);
        fs::create_dir_all(exe.parent().unwrap()).unwrap();
        fs::write(&exe, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
        }

        Self {
            temp_dir,
            project,
            compiler_home,
            recorder: Recorder::default(),
        }
    }

    pub fn settings() -> CompileSettings {
        CompileSettings {
            language_version: Some("1.9".into()),
            target_runtime_version: Some("17".into()),
            ..Default::default()
        }
    }

    pub fn registry_path(&self) -> PathBuf {
        self.temp_dir.path().join("registry/kotlin-versions.json")
    }

    pub fn orchestrator(&self, settings: CompileSettings) -> CompilationOrchestrator {
        self.orchestrator_with(settings, ProcessExit::success(), HashMap::new())
    }

    pub fn orchestrator_with(
        &self,
        settings: CompileSettings,
        exit: ProcessExit,
        groups: HashMap<String, Vec<PathBuf>>,
    ) -> CompilationOrchestrator {
        self.build(&self.project, settings, exit, groups)
    }

    /// Same collaborators, but rooted somewhere other than the fixture project
    pub fn orchestrator_at(&self, project_root: &Path, settings: CompileSettings) -> CompilationOrchestrator {
        self.build(project_root, settings, ProcessExit::success(), HashMap::new())
    }

    fn build(
        &self,
        project_root: &Path,
        settings: CompileSettings,
        exit: ProcessExit,
        groups: HashMap<String, Vec<PathBuf>>,
    ) -> CompilationOrchestrator {
        CompilationOrchestrator::builder(project_root)
            .with_settings(settings)
            .with_dependency_resolver(FakeResolver(groups))
            .with_resource_copier(FakeCopier(self.recorder.clone()))
            .with_jar_packager(FakePackager(self.recorder.clone()))
            .with_process_launcher(FakeLauncher {
                recorder: self.recorder.clone(),
                exit,
            })
            .with_compiler_registry(
                MemoryVersionRegistry::new(RegistryKind::Compiler, self.registry_path())
                    .with_entry("1.9", &self.compiler_home),
            )
            .with_runtime_registry(
                MemoryVersionRegistry::new(
                    RegistryKind::Runtime,
                    self.temp_dir.path().join("registry/jdk-versions.json"),
                )
                .with_entry("17", "/usr/lib/jvm/jdk-17"),
            )
            .build()
            .unwrap()
    }

    /// Write `relative` under the project with the given modification time
    pub fn write_at(&self, relative: &str, contents: &str, mtime: SystemTime) -> PathBuf {
        let path = self.project.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
        path
    }
}

pub fn hours_ago(hours: u64) -> SystemTime {
    SystemTime::now() - Duration::from_secs(hours * 3600)
}
