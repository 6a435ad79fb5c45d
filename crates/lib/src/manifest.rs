//! Machine-readable description of the build step.
//!
//! Host build tools that cannot call into this crate read the declared
//! sources and artifacts from this JSON document instead.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifacts::{Artifact, declare_artifacts, declare_sources, needs_rebuild};
use crate::config::BuildConfig;
use crate::install::{InstallOptions, installed_artifacts};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
  pub platform: String,
  pub preset: String,
  pub build_type: String,
  pub output_dir: PathBuf,
  pub sources: Vec<PathBuf>,
  pub artifacts: Vec<Artifact>,
}

impl ArtifactManifest {
  pub fn from_config(config: &BuildConfig) -> Self {
    Self {
      platform: config.os.to_string(),
      preset: config.preset.clone(),
      build_type: config.build_type.clone(),
      output_dir: config.output_dir.clone(),
      sources: declare_sources(config),
      artifacts: declare_artifacts(config),
    }
  }

  /// Whether the declared artifacts are missing or older than the declared sources.
  pub fn is_stale(&self) -> io::Result<bool> {
    needs_rebuild(&self.sources, &self.artifacts)
  }

  /// [`is_stale`](Self::is_stale), or the copies in the output directory are
  /// missing or older than the declared sources.
  pub fn is_out_of_date(&self, options: InstallOptions) -> io::Result<bool> {
    if self.is_stale()? {
      return Ok(true);
    }
    let installed = installed_artifacts(&self.artifacts, &self.output_dir, options);
    needs_rebuild(&self.sources, &installed)
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }

  /// Write the manifest as pretty JSON, creating parent directories.
  pub fn write(&self, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }
    let json = self.to_json().map_err(io::Error::other)?;
    std::fs::write(path, format!("{}\n", json))
  }
}
