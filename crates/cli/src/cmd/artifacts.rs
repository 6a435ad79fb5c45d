//! Implementation of the `slangbuild artifacts` command.
//!
//! Prints the declared outputs (and optionally inputs) of the build step so a
//! host build tool can register them for dependency tracking.

use std::path::Path;

use anyhow::{Context, Result};

use slangbuild_lib::BuildConfig;
use slangbuild_lib::artifacts::ArtifactKind;
use slangbuild_lib::manifest::ArtifactManifest;

use crate::output::{print_json, print_stat, print_success};

pub fn cmd_artifacts(config: &BuildConfig, json: bool, sources: bool, write: Option<&Path>) -> Result<()> {
  let manifest = ArtifactManifest::from_config(config);

  if let Some(path) = write {
    manifest
      .write(path)
      .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
    if !json {
      print_success(&format!("Wrote manifest to {}", path.display()));
    }
  }

  if json {
    return print_json(&manifest);
  }

  println!("Artifacts ({} {}):", manifest.platform, manifest.build_type);
  for artifact in &manifest.artifacts {
    let kind = match artifact.kind {
      ArtifactKind::File => "file",
      ArtifactKind::Directory => "dir",
    };
    print_stat(kind, &artifact.path.display().to_string());
  }

  if sources {
    println!();
    println!("Sources ({}):", manifest.sources.len());
    for source in &manifest.sources {
      println!("  {}", source.display());
    }
  }

  Ok(())
}
