//! Copying built artifacts into the output directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::artifacts::{Artifact, ArtifactKind};

#[derive(Debug, Error)]
pub enum InstallError {
  #[error("declared artifact is missing: {0}")]
  MissingArtifact(PathBuf),

  #[error("failed to create output directory {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to copy {from} to {to}: {source}")]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to walk header directory {path}: {source}")]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
  /// Also copy the public header tree into `<output_dir>/include`.
  pub with_headers: bool,
}

/// Whether `install` copies `artifact` under `options`.
///
/// Symlinks are never copied. Directory artifacts are copied only when headers
/// were requested. Missing artifacts count as installable so `install` can
/// report them.
pub fn is_installable(artifact: &Artifact, options: InstallOptions) -> bool {
  if artifact.kind == ArtifactKind::Directory && !options.with_headers {
    return false;
  }
  !fs::symlink_metadata(&artifact.path).is_ok_and(|metadata| metadata.file_type().is_symlink())
}

/// The copies `install` leaves in `output_dir`, one per installable artifact.
pub fn installed_artifacts(artifacts: &[Artifact], output_dir: &Path, options: InstallOptions) -> Vec<Artifact> {
  artifacts
    .iter()
    .filter(|artifact| is_installable(artifact, options))
    .filter_map(|artifact| {
      let name = artifact.path.file_name()?;
      Some(Artifact {
        path: output_dir.join(name),
        kind: artifact.kind,
      })
    })
    .collect()
}

/// Copy declared artifacts into `output_dir`.
///
/// Regular files are copied flat, by file name. Symlinks are skipped so only
/// the real versioned libraries land in the output. Directory artifacts are
/// copied recursively only when headers were requested, and are not required
/// to exist otherwise.
///
/// Returns the installed paths in declaration order.
pub fn install(artifacts: &[Artifact], output_dir: &Path, options: InstallOptions) -> Result<Vec<PathBuf>, InstallError> {
  create_dir(output_dir)?;
  let mut installed = Vec::new();

  for artifact in artifacts {
    if !is_installable(artifact, options) {
      debug!(path = %artifact.path.display(), "not installing");
      continue;
    }

    match fs::metadata(&artifact.path) {
      Ok(_) => {}
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(InstallError::MissingArtifact(artifact.path.clone()));
      }
      Err(source) => {
        return Err(InstallError::Copy {
          from: artifact.path.clone(),
          to: output_dir.to_path_buf(),
          source,
        });
      }
    }

    let Some(name) = artifact.path.file_name() else {
      continue;
    };
    let dest = output_dir.join(name);
    match artifact.kind {
      ArtifactKind::File => {
        copy_file(&artifact.path, &dest)?;
        installed.push(dest);
      }
      ArtifactKind::Directory => installed.extend(copy_tree(&artifact.path, &dest)?),
    }
  }

  info!(count = installed.len(), output = %output_dir.display(), "installed artifacts");
  Ok(installed)
}

fn create_dir(path: &Path) -> Result<(), InstallError> {
  fs::create_dir_all(path).map_err(|source| InstallError::CreateDir {
    path: path.to_path_buf(),
    source,
  })
}

fn copy_file(from: &Path, to: &Path) -> Result<(), InstallError> {
  debug!(from = %from.display(), to = %to.display(), "copying");
  fs::copy(from, to).map_err(|source| InstallError::Copy {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source,
  })?;
  Ok(())
}

fn copy_tree(from: &Path, to: &Path) -> Result<Vec<PathBuf>, InstallError> {
  let mut copied = Vec::new();

  for entry in WalkDir::new(from).sort_by_file_name() {
    let entry = entry.map_err(|source| InstallError::Walk {
      path: from.to_path_buf(),
      source,
    })?;
    let Ok(relative) = entry.path().strip_prefix(from) else {
      continue;
    };
    let dest = to.join(relative);

    if entry.file_type().is_dir() {
      create_dir(&dest)?;
    } else if entry.file_type().is_file() {
      copy_file(entry.path(), &dest)?;
      copied.push(dest);
    }
  }

  Ok(copied)
}
