//! Implementation of the `slangbuild build` command.
//!
//! Skips the build when the declared artifacts and their installed copies are
//! newer than the declared sources, otherwise configures if needed, builds and
//! installs.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use slangbuild_lib::cmake::{build_invocation, configure_invocation};
use slangbuild_lib::install::{InstallOptions, is_installable};
use slangbuild_lib::manifest::ArtifactManifest;
use slangbuild_lib::orchestrate::ConfigureStatus;
use slangbuild_lib::{BuildConfig, Orchestrator, ProcessRunner};

use crate::output::{format_duration, print_info, print_planned, print_stat, print_success};

pub fn cmd_build(config: &BuildConfig, force: bool, dry_run: bool, with_headers: bool) -> Result<()> {
  let manifest = ArtifactManifest::from_config(config);
  let options = InstallOptions { with_headers };

  if dry_run {
    print_dry_run(config, &manifest, options);
    return Ok(());
  }

  if !force
    && !manifest
      .is_out_of_date(options)
      .context("Failed to compare artifact timestamps")?
  {
    print_info("Slang is up to date");
    return Ok(());
  }

  let start = Instant::now();
  let mut orchestrator = Orchestrator::new(config, ProcessRunner);
  let report = orchestrator.run(options).context("Slang build failed")?;

  info!(installed = report.installed.len(), "build finished");

  print_success(&format!("Built Slang in {}", format_duration(start.elapsed())));
  let configured = match report.configure {
    ConfigureStatus::Configured => "yes",
    ConfigureStatus::AlreadyConfigured => "no (already configured)",
  };
  print_stat("Configured", configured);
  print_stat("Installed", &format!("{} file(s) into {}", report.installed.len(), config.output_dir.display()));

  Ok(())
}

fn print_dry_run(config: &BuildConfig, manifest: &ArtifactManifest, options: InstallOptions) {
  print_info("Dry run, nothing will be executed");

  if !config.cache_marker().is_file() {
    print_planned(&configure_invocation(config).to_string());
  }
  print_planned(&build_invocation(config).to_string());

  for artifact in manifest.artifacts.iter().filter(|a| is_installable(a, options)) {
    print_planned(&format!("install {}", artifact.path.display()));
  }
}
