//! Runs commands as real subprocesses.
//!
//! Both output pipes are drained on their own threads while the calling thread
//! waits for the child, so a compiler that writes more than a pipe buffer's
//! worth of diagnostics never blocks.

use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::{
    command::CompilerCommand,
    error::{Error, Result},
    interfaces::{ProcessExit, ProcessLauncher},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessLauncher;

impl SystemProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessLauncher for SystemProcessLauncher {
    fn run(&self, command: &CompilerCommand) -> Result<ProcessExit> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .current_dir(&command.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &command.env {
            debug!("Setting env: {}={:?}", key, value);
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().map_err(|source| Error::LaunchError {
            program: command.program.clone(),
            source,
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let status = thread::scope(|scope| {
            if let Some(out) = stdout {
                scope.spawn(move || forward(out, io::stdout()));
            }
            if let Some(err) = stderr {
                scope.spawn(move || forward(err, io::stderr()));
            }
            child.wait()
        })
        .map_err(|source| Error::LaunchError {
            program: command.program.clone(),
            source,
        })?;

        Ok(ProcessExit {
            code: status.code(),
        })
    }
}

/// Copy chunks as they arrive, flushing after each so output appears live
fn forward(mut from: impl Read, mut to: impl Write) {
    let mut buf = [0u8; 8192];
    loop {
        match from.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if to.write_all(&buf[..n]).and_then(|_| to.flush()).is_err() {
                    // keep draining so the child is never blocked on a full pipe
                    continue;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Stopped forwarding compiler output: {}", e);
                break;
            }
        }
    }
}
