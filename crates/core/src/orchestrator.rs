//! The five host-facing build steps: `clean`, `compile_main`, `compile_test`,
//! `compile` and `jar`.
//!
//! A compile step resolves the toolchain, asks the staleness resolver what is
//! out of date and stops there when the answer is nothing. Otherwise it
//! assembles the classpath, runs the compiler and copies resources into the
//! classes directory. Any failure ends the step immediately; partial class files
//! from a failed run are left for the next staleness check to pick up.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    classpath::ClasspathBuilder,
    command::{CompileRequest, CompilerInvoker},
    config::{CompileSettings, ConfigValidator, DependencyGroupSelector, SettingsValidator},
    error::{Error, Result},
    interfaces::{DependencyResolver, JarPackager, ProcessLauncher, ResourceCopier},
    layout::{PathLayout, Role},
    services::{JsonVersionRegistry, SystemProcessLauncher},
    staleness::StalenessResolver,
    toolchain::{RegistryKind, ToolchainBinding, ToolchainResolver, VersionRegistry},
};

pub const SOURCE_EXTENSION: &str = "kt";
pub const OUTPUT_EXTENSION: &str = "class";
pub const INTEROP_EXTENSION: &str = "java";

/// What a single compile step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Every output was up to date; the compiler was not started
    Skipped,
    Compiled {
        sources: usize,
        interop_sources: usize,
    },
}

impl CompileOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, CompileOutcome::Skipped)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub main: CompileOutcome,
    pub test: CompileOutcome,
}

/// Inputs of one compile step, built fresh for each call
#[derive(Debug)]
struct CompileUnit<'a> {
    role: Role,
    source_root: PathBuf,
    interop_source_root: PathBuf,
    resource_root: PathBuf,
    output_root: PathBuf,
    dependency_selectors: &'a [DependencyGroupSelector],
    extra_classpath_roots: Vec<PathBuf>,
}

pub struct CompilationOrchestrator {
    project_root: PathBuf,
    layout: PathLayout,
    settings: CompileSettings,
    toolchain: ToolchainResolver,
    dependencies: Box<dyn DependencyResolver>,
    resources: Box<dyn ResourceCopier>,
    packager: Box<dyn JarPackager>,
    invoker: CompilerInvoker,
    staleness: StalenessResolver,
}

impl CompilationOrchestrator {
    pub fn builder(project_root: impl Into<PathBuf>) -> OrchestratorBuilder {
        OrchestratorBuilder::new(project_root)
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn layout(&self) -> &PathLayout {
        &self.layout
    }

    pub fn settings(&self) -> &CompileSettings {
        &self.settings
    }

    /// The toolchain binding, resolved on first use
    pub fn toolchain(&self) -> Result<&ToolchainBinding> {
        self.toolchain.resolve(&self.settings)
    }

    /// Delete the build directory; succeeds when it is already gone
    pub fn clean(&self) -> Result<()> {
        let build_dir = self.project_root.join(self.layout.build_dir());
        match std::fs::remove_dir_all(&build_dir) {
            Ok(()) => {
                info!("Removed {:?}", build_dir);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{:?} does not exist, nothing to clean", build_dir);
                Ok(())
            }
            Err(e) => Err(Error::io(&build_dir, e)),
        }
    }

    pub fn compile_main(&self) -> Result<CompileOutcome> {
        self.compile_role(Role::Main)
    }

    pub fn compile_test(&self) -> Result<CompileOutcome> {
        self.compile_role(Role::Test)
    }

    /// Main then test; test sources may depend on main classes
    pub fn compile(&self) -> Result<CompileReport> {
        let main = self.compile_main()?;
        let test = self.compile_test()?;
        Ok(CompileReport { main, test })
    }

    /// Package classes and sources of both roles; returns the jars written.
    ///
    /// Expects the compile steps to have run already. Missing input directories
    /// are left out of the affected jar rather than failing.
    pub fn jar(&self) -> Result<Vec<PathBuf>> {
        // fail fast on a broken toolchain setup even though packaging does not need it
        self.toolchain()?;

        let jar_dir = self.project_root.join(self.layout.jar_output_dir());
        std::fs::create_dir_all(&jar_dir).map_err(|e| Error::io(&jar_dir, e))?;

        let base = self.artifact_base_name();
        let main = self.layout.source_set(Role::Main);
        let test = self.layout.source_set(Role::Test);
        let root = &self.project_root;

        let jars = [
            (format!("{base}.jar"), vec![root.join(&main.classes_dir)]),
            (
                format!("{base}-sources.jar"),
                vec![
                    root.join(&main.source_dir),
                    root.join(&main.resource_dir),
                    root.join(&main.interop_source_dir),
                ],
            ),
            (format!("{base}-tests.jar"), vec![root.join(&test.classes_dir)]),
            (
                format!("{base}-test-sources.jar"),
                vec![
                    root.join(&test.source_dir),
                    root.join(&test.resource_dir),
                    root.join(&test.interop_source_dir),
                ],
            ),
        ];

        let mut written = Vec::with_capacity(jars.len());
        for (name, dirs) in jars {
            let output = jar_dir.join(name);
            info!("Packaging {:?}", output);
            self.packager
                .write_jar(&output, &dirs, &self.settings.jar_manifest_entries)?;
            written.push(output);
        }

        Ok(written)
    }

    fn compile_role(&self, role: Role) -> Result<CompileOutcome> {
        let toolchain = self.toolchain()?;
        let unit = self.compile_unit(role);

        let stale = self.staleness.find_sources_needing_compilation(
            &unit.source_root,
            &unit.output_root,
            SOURCE_EXTENSION,
            OUTPUT_EXTENSION,
        )?;

        if stale.is_empty() {
            info!("compile {}: up to date, skipping", unit.role);
            return Ok(CompileOutcome::Skipped);
        }

        let interop = if self.settings.interop_sources {
            self.staleness
                .list_interop_sources(&unit.interop_source_root, INTEROP_EXTENSION)?
        } else {
            Vec::new()
        };
        debug!(
            "compile {}: {} stale sources, {} interop sources",
            unit.role,
            stale.len(),
            interop.len()
        );

        let classpath = ClasspathBuilder::new(&*self.dependencies, &self.project_root)
            .build_classpath(
                unit.dependency_selectors,
                &self.settings.extra_library_dirs,
                &unit.extra_classpath_roots,
            )?;

        std::fs::create_dir_all(&unit.output_root).map_err(|e| Error::io(&unit.output_root, e))?;

        let sources: Vec<PathBuf> = stale.iter().map(|p| unit.source_root.join(p)).collect();
        let interop_sources: Vec<PathBuf> = interop
            .iter()
            .map(|p| unit.interop_source_root.join(p))
            .collect();
        let extra_args = self.settings.extra_compiler_arg_tokens()?;

        self.invoker.invoke(
            &CompileRequest {
                sources: &sources,
                interop_sources: &interop_sources,
                classpath: &classpath,
                output_dir: &unit.output_root,
                extra_args: &extra_args,
            },
            toolchain,
        )?;

        self.resources
            .copy_tree(&unit.resource_root, &unit.output_root)?;

        info!(
            "compile {}: compiled {} sources",
            unit.role,
            sources.len()
        );
        Ok(CompileOutcome::Compiled {
            sources: sources.len(),
            interop_sources: interop_sources.len(),
        })
    }

    fn compile_unit(&self, role: Role) -> CompileUnit<'_> {
        let set = self.layout.source_set(role);
        let root = &self.project_root;

        let main_classes = root.join(&self.layout.source_set(Role::Main).classes_dir);
        let extra_classpath_roots = match role {
            Role::Main => vec![main_classes],
            Role::Test => vec![main_classes, root.join(&set.classes_dir)],
        };

        CompileUnit {
            role,
            source_root: root.join(&set.source_dir),
            interop_source_root: root.join(&set.interop_source_dir),
            resource_root: root.join(&set.resource_dir),
            output_root: root.join(&set.classes_dir),
            dependency_selectors: self.settings.dependencies_for(role),
            extra_classpath_roots,
        }
    }

    fn artifact_base_name(&self) -> String {
        let name = self
            .settings
            .artifact_name
            .clone()
            .or_else(|| {
                self.project_root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "project".to_string());

        match &self.settings.artifact_version {
            Some(version) => format!("{name}-{version}"),
            None => name,
        }
    }
}

/// Assembles an orchestrator from settings and collaborators
pub struct OrchestratorBuilder {
    project_root: PathBuf,
    layout: PathLayout,
    settings: CompileSettings,
    dependencies: Option<Box<dyn DependencyResolver>>,
    resources: Option<Box<dyn ResourceCopier>>,
    packager: Option<Box<dyn JarPackager>>,
    launcher: Option<Box<dyn ProcessLauncher>>,
    compilers: Option<Box<dyn VersionRegistry>>,
    runtimes: Option<Box<dyn VersionRegistry>>,
}

impl OrchestratorBuilder {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            layout: PathLayout::default(),
            settings: CompileSettings::default(),
            dependencies: None,
            resources: None,
            packager: None,
            launcher: None,
            compilers: None,
            runtimes: None,
        }
    }

    pub fn with_layout(mut self, layout: PathLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_settings(mut self, settings: CompileSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_dependency_resolver(mut self, resolver: impl DependencyResolver + 'static) -> Self {
        self.dependencies = Some(Box::new(resolver));
        self
    }

    pub fn with_resource_copier(mut self, copier: impl ResourceCopier + 'static) -> Self {
        self.resources = Some(Box::new(copier));
        self
    }

    pub fn with_jar_packager(mut self, packager: impl JarPackager + 'static) -> Self {
        self.packager = Some(Box::new(packager));
        self
    }

    /// Defaults to [`SystemProcessLauncher`]
    pub fn with_process_launcher(mut self, launcher: impl ProcessLauncher + 'static) -> Self {
        self.launcher = Some(Box::new(launcher));
        self
    }

    /// Defaults to `kotlin-versions.json` in the registry directory
    pub fn with_compiler_registry(mut self, registry: impl VersionRegistry + 'static) -> Self {
        self.compilers = Some(Box::new(registry));
        self
    }

    /// Defaults to `jdk-versions.json` in the registry directory
    pub fn with_runtime_registry(mut self, registry: impl VersionRegistry + 'static) -> Self {
        self.runtimes = Some(Box::new(registry));
        self
    }

    pub fn build(self) -> Result<CompilationOrchestrator> {
        SettingsValidator.validate(&self.settings)?;

        let dependencies = self.dependencies.ok_or_else(|| missing("dependency resolver"))?;
        let resources = self.resources.ok_or_else(|| missing("resource copier"))?;
        let packager = self.packager.ok_or_else(|| missing("jar packager"))?;

        let compilers = match self.compilers {
            Some(registry) => registry,
            None => Box::new(JsonVersionRegistry::default_for(RegistryKind::Compiler)?),
        };
        let runtimes = match self.runtimes {
            Some(registry) => registry,
            None => Box::new(JsonVersionRegistry::default_for(RegistryKind::Runtime)?),
        };
        let launcher = self
            .launcher
            .unwrap_or_else(|| Box::new(SystemProcessLauncher::new()));

        // the compiler runs inside the project root, so every path handed to it must be absolute
        let project_root =
            std::path::absolute(&self.project_root).map_err(|e| Error::io(&self.project_root, e))?;

        Ok(CompilationOrchestrator {
            invoker: CompilerInvoker::new(launcher, project_root.clone()),
            project_root,
            layout: self.layout,
            settings: self.settings,
            toolchain: ToolchainResolver::new(compilers, runtimes),
            dependencies,
            resources,
            packager,
            staleness: StalenessResolver::new(),
        })
    }
}

fn missing(collaborator: &str) -> Error {
    Error::config(
        format!("No {collaborator} configured"),
        format!("Provide a {collaborator} when building the orchestrator"),
    )
}
