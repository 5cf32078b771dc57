//! Process launching interface
//!
//! Separates building a compiler command from actually running it, so callers
//! can observe or replace subprocess execution.

use crate::{command::CompilerCommand, error::Result};

/// How a launched process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl ProcessExit {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn failure(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait ProcessLauncher: Send + Sync {
    /// Run the command to completion, forwarding its output as it is produced
    fn run(&self, command: &CompilerCommand) -> Result<ProcessExit>;
}
