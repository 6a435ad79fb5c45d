//! Types for orchestrating a Slang build.
//!
//! This module defines the error type, the step report and the exit-code
//! mapping handed back to the host build.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::artifacts::Artifact;
use crate::install::InstallError;
use crate::runner::RunError;

/// A step of the orchestrated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  Configure,
  Build,
  Install,
}

impl std::fmt::Display for Step {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Step::Configure => write!(f, "configure"),
      Step::Build => write!(f, "build"),
      Step::Install => write!(f, "install"),
    }
  }
}

/// Errors that end an orchestrated build.
#[derive(Debug, Error)]
pub enum OrchestrateError {
  /// `cmake --preset` exited nonzero.
  #[error("CMake configuration failed with exit code {code}")]
  ConfigureFailed { code: i32 },

  /// `cmake --build` exited nonzero.
  #[error("CMake build failed with exit code {code}")]
  BuildFailed { code: i32 },

  /// CMake could not be started.
  #[error("{step} step could not run: {source}")]
  Launch {
    step: Step,
    #[source]
    source: RunError,
  },

  #[error("failed to create build directory {path}: {source}")]
  CreateBuildDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error(transparent)]
  Install(#[from] InstallError),
}

impl OrchestrateError {
  /// The step that failed.
  pub fn step(&self) -> Step {
    match self {
      OrchestrateError::ConfigureFailed { .. } | OrchestrateError::CreateBuildDir { .. } => Step::Configure,
      OrchestrateError::BuildFailed { .. } => Step::Build,
      OrchestrateError::Launch { step, .. } => *step,
      OrchestrateError::Install(_) => Step::Install,
    }
  }

  /// Exit code to report to the host build.
  ///
  /// Nonzero CMake exit codes are passed through verbatim; everything else is `1`.
  pub fn exit_code(&self) -> i32 {
    match self {
      OrchestrateError::ConfigureFailed { code } | OrchestrateError::BuildFailed { code } => *code,
      _ => 1,
    }
  }
}

/// Whether the configure step ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureStatus {
  /// The cache marker was missing and `cmake --preset` ran.
  Configured,
  /// The build tree was already configured.
  AlreadyConfigured,
}

/// Result of a successful orchestrated build.
#[derive(Debug, Clone)]
pub struct BuildReport {
  pub configure: ConfigureStatus,
  /// Artifacts declared after the build ran.
  pub artifacts: Vec<Artifact>,
  /// Paths written into the output directory.
  pub installed: Vec<PathBuf>,
}
