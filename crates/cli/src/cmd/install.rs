//! Implementation of the `slangbuild install` command.

use anyhow::{Context, Result};

use slangbuild_lib::BuildConfig;
use slangbuild_lib::artifacts::declare_artifacts;
use slangbuild_lib::install::{InstallOptions, install};

use crate::output::{print_stat, print_success, print_warning};

pub fn cmd_install(config: &BuildConfig, with_headers: bool) -> Result<()> {
  let artifacts = declare_artifacts(config);
  let installed = install(&artifacts, &config.output_dir, InstallOptions { with_headers })
    .context("Failed to install Slang artifacts. Has it been built?")?;

  if installed.is_empty() {
    print_warning("No artifacts were installed");
    return Ok(());
  }

  print_success(&format!("Installed {} file(s)", installed.len()));
  for path in &installed {
    print_stat("File", &path.display().to_string());
  }

  Ok(())
}
