//! Build orchestration.
//!
//! Runs the Slang build as a linear sequence:
//!
//! 1. configure, only if `CMakeCache.txt` is missing
//! 2. `cmake --build --preset <build_type>`
//! 3. install the declared artifacts into the output directory
//!
//! The first failing step ends the run. Nothing is retried or rolled back;
//! CMake keeps its own incremental state in the build tree.

mod types;

pub use types::*;

use std::fs;

use tracing::{debug, info};

use crate::artifacts::declare_artifacts;
use crate::cmake::{Invocation, build_invocation, configure_invocation};
use crate::config::BuildConfig;
use crate::install::{InstallOptions, install};
use crate::runner::CommandRunner;

/// Drives CMake for one [`BuildConfig`] through a [`CommandRunner`].
pub struct Orchestrator<'a, R: CommandRunner> {
  config: &'a BuildConfig,
  runner: R,
}

impl<'a, R: CommandRunner> Orchestrator<'a, R> {
  pub fn new(config: &'a BuildConfig, runner: R) -> Self {
    Self { config, runner }
  }

  pub fn config(&self) -> &BuildConfig {
    self.config
  }

  pub fn into_runner(self) -> R {
    self.runner
  }

  /// Whether the build tree has been configured before.
  pub fn is_configured(&self) -> bool {
    self.config.cache_marker().is_file()
  }

  /// Configure the build tree unless CMake's cache marker already exists.
  pub fn ensure_configured(&mut self) -> Result<ConfigureStatus, OrchestrateError> {
    if self.is_configured() {
      debug!(marker = %self.config.cache_marker().display(), "build tree already configured");
      return Ok(ConfigureStatus::AlreadyConfigured);
    }

    let build_dir = self.config.build_dir();
    fs::create_dir_all(&build_dir).map_err(|source| OrchestrateError::CreateBuildDir {
      path: build_dir.clone(),
      source,
    })?;

    info!(preset = %self.config.preset, "configuring slang");
    let code = self.run_step(Step::Configure, &configure_invocation(self.config))?;
    if code != 0 {
      return Err(OrchestrateError::ConfigureFailed { code });
    }

    Ok(ConfigureStatus::Configured)
  }

  /// Compile with the configured build preset.
  pub fn build(&mut self) -> Result<(), OrchestrateError> {
    info!(build_type = %self.config.build_type, "building slang");
    let code = self.run_step(Step::Build, &build_invocation(self.config))?;
    if code != 0 {
      return Err(OrchestrateError::BuildFailed { code });
    }
    Ok(())
  }

  /// Configure if needed, build, then install the artifacts.
  pub fn run(&mut self, options: InstallOptions) -> Result<BuildReport, OrchestrateError> {
    let configure = self.ensure_configured()?;
    self.build()?;

    let artifacts = declare_artifacts(self.config);
    let installed = install(&artifacts, &self.config.output_dir, options)?;

    Ok(BuildReport {
      configure,
      artifacts,
      installed,
    })
  }

  fn run_step(&mut self, step: Step, invocation: &Invocation) -> Result<i32, OrchestrateError> {
    debug!(%step, args = ?invocation.args, "invoking cmake");
    self
      .runner
      .run(invocation)
      .map_err(|source| OrchestrateError::Launch { step, source })
  }
}
