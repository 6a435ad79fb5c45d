//! Implementation of the `slangbuild configure` command.

use anyhow::{Context, Result};

use slangbuild_lib::orchestrate::ConfigureStatus;
use slangbuild_lib::{BuildConfig, Orchestrator, ProcessRunner};

use crate::output::{print_info, print_success};

pub fn cmd_configure(config: &BuildConfig) -> Result<()> {
  let status = Orchestrator::new(config, ProcessRunner)
    .ensure_configured()
    .context("Slang configure failed")?;

  match status {
    ConfigureStatus::Configured => print_success(&format!("Configured {}", config.build_dir().display())),
    ConfigureStatus::AlreadyConfigured => print_info("Build tree already configured"),
  }

  Ok(())
}
