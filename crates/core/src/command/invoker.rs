//! Builds the compiler invocation and runs it.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::{
    classpath::Classpath,
    error::{Error, Result},
    interfaces::{ProcessExit, ProcessLauncher},
    toolchain::{COMPILER_HOME_ENV, RUNTIME_HOME_ENV, ToolchainBinding},
};

use super::CompilerCommand;

/// Everything one compiler run needs besides the toolchain
#[derive(Debug, Clone)]
pub struct CompileRequest<'a> {
    pub sources: &'a [PathBuf],
    pub interop_sources: &'a [PathBuf],
    pub classpath: &'a Classpath,
    pub output_dir: &'a Path,
    /// Already tokenized, inserted right after the executable
    pub extra_args: &'a [String],
}

pub struct CompilerInvoker {
    launcher: Box<dyn ProcessLauncher>,
    working_dir: PathBuf,
}

impl CompilerInvoker {
    /// `working_dir` is the project root the compiler runs in
    pub fn new(launcher: Box<dyn ProcessLauncher>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            launcher,
            working_dir: working_dir.into(),
        }
    }

    pub fn build_command(
        &self,
        request: &CompileRequest<'_>,
        toolchain: &ToolchainBinding,
    ) -> Result<CompilerCommand> {
        let command = CompilerCommand::new(&toolchain.compiler_executable, &self.working_dir)
            .args(request.extra_args)
            .arg("-cp")
            .arg(request.classpath.to_os_string()?)
            .arg("-jdk-home")
            .arg(&toolchain.interop_runtime_home)
            .arg("-jvm-target")
            .arg(&toolchain.target_runtime_version)
            .arg("-d")
            .arg(request.output_dir)
            .args(request.sources)
            .args(request.interop_sources)
            .with_env(COMPILER_HOME_ENV, &toolchain.compiler_home)
            .with_env(RUNTIME_HOME_ENV, &toolchain.interop_runtime_home);

        Ok(command)
    }

    /// Run the compiler; any non-zero exit is a `CompilationError`
    pub fn invoke(&self, request: &CompileRequest<'_>, toolchain: &ToolchainBinding) -> Result<()> {
        let command = self.build_command(request, toolchain)?;

        info!(
            "Compiling {} sources and {} interop sources into {:?}",
            request.sources.len(),
            request.interop_sources.len(),
            request.output_dir
        );
        info!("Running: {}", command.to_shell_command());

        let exit = self.launcher.run(&command)?;
        classify(exit)
    }
}

pub fn classify(exit: ProcessExit) -> Result<()> {
    if exit.is_success() {
        return Ok(());
    }
    error!("Compiler failed with exit code {:?}", exit.code);
    Err(Error::CompilationError {
        exit_code: exit.code,
    })
}
