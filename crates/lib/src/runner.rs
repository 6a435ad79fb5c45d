//! External process execution.
//!
//! The orchestrator never spawns processes itself; it hands [`Invocation`]s to a
//! [`CommandRunner`]. [`ProcessRunner`] is the real implementation, tests use a
//! recording runner instead.

use std::io;
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::{debug, info};

use crate::cmake::Invocation;

/// Exit code reported for a process that terminated without one (killed by a signal).
pub const SIGNALED_EXIT_CODE: i32 = 1;

#[derive(Debug, Error)]
pub enum RunError {
  /// The program could not be started at all.
  #[error("failed to launch {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },
}

/// Runs an invocation to completion and returns its exit code.
pub trait CommandRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<i32, RunError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
  fn run(&mut self, invocation: &Invocation) -> Result<i32, RunError> {
    (**self).run(invocation)
  }
}

/// Spawns processes synchronously.
///
/// The child inherits stdin/stdout/stderr and the full, unmodified environment
/// of this process, so CMake's own output reaches the terminal as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<i32, RunError> {
    info!(command = %invocation, cwd = %invocation.cwd.display(), "running");

    let status = Command::new(&invocation.program)
      .args(&invocation.args)
      .current_dir(&invocation.cwd)
      .status()
      .map_err(|source| RunError::Spawn {
        program: invocation.program.display().to_string(),
        source,
      })?;

    let code = exit_code(status);
    debug!(code, "process exited");
    Ok(code)
  }
}

fn exit_code(status: ExitStatus) -> i32 {
  status.code().unwrap_or(SIGNALED_EXIT_CODE)
}
