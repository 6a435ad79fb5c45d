//! Declared inputs and outputs of the Slang build.
//!
//! The host build never parses CMake's build graph. Instead the step declares
//! a fixed set of source files it depends on and the artifact paths it
//! produces, and staleness is decided by comparing modification times.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::BuildConfig;
use crate::consts::DEBUG_SYMBOL_SUFFIXES;
use crate::platform::os::Os;

/// Name of the compiler library, before platform prefixes and extensions.
pub const COMPILER_LIB: &str = "slang-compiler";
/// Name of the bundled GLSL frontend library.
pub const GLSLANG_LIB: &str = "slang-glslang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
  File,
  Directory,
}

/// One declared output of the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
  pub path: PathBuf,
  pub kind: ArtifactKind,
}

impl Artifact {
  fn file(path: PathBuf) -> Self {
    Self {
      path,
      kind: ArtifactKind::File,
    }
  }

  fn directory(path: PathBuf) -> Self {
    Self {
      path,
      kind: ArtifactKind::Directory,
    }
  }
}

/// Compute the artifacts produced by building `config`.
///
/// Names follow the platform's library conventions. On non-Windows targets the
/// library directory is also scanned for versioned libraries (`libfoo.so.1.2`
/// on Linux, `libfoo.1.2.dylib` on macOS), so those only show up once a build
/// has run.
pub fn declare_artifacts(config: &BuildConfig) -> Vec<Artifact> {
  let root = config.artifact_root();
  let os = config.os;
  let lib_dir = root.join("lib");
  let mut artifacts = Vec::new();

  match os {
    Os::Windows => {
      let bin_dir = root.join(os.shared_lib_dir());
      for name in [COMPILER_LIB, GLSLANG_LIB] {
        artifacts.push(Artifact::file(bin_dir.join(shared_lib_name(os, name))));
      }
      artifacts.push(Artifact::file(lib_dir.join(static_lib_name(os, COMPILER_LIB))));
    }
    Os::Linux | Os::MacOs => {
      artifacts.push(Artifact::file(lib_dir.join(static_lib_name(os, COMPILER_LIB))));
      if os == Os::MacOs {
        for name in [COMPILER_LIB, GLSLANG_LIB] {
          artifacts.push(Artifact::file(lib_dir.join(shared_lib_name(os, name))));
        }
      }
      artifacts.extend(versioned_libraries(os, &lib_dir).into_iter().map(Artifact::file));
    }
  }

  artifacts.push(Artifact::directory(root.join("include")));
  artifacts
}

/// `slang-compiler.dll`, `libslang-compiler.so`, `libslang-compiler.dylib`
pub fn shared_lib_name(os: Os, name: &str) -> String {
  format!("{}{}.{}", os.lib_prefix(), name, os.shared_lib_ext())
}

/// `slang-compiler.lib` on Windows, `libslang-compiler.a` elsewhere
pub fn static_lib_name(os: Os, name: &str) -> String {
  format!("{}{}.{}", os.lib_prefix(), name, os.static_lib_ext())
}

/// Versioned libraries directly inside `dir`, sorted. Missing directories yield nothing.
fn versioned_libraries(os: Os, dir: &Path) -> Vec<PathBuf> {
  let Ok(entries) = fs::read_dir(dir) else {
    return Vec::new();
  };

  let mut found: Vec<PathBuf> = entries
    .filter_map(Result::ok)
    .filter(|entry| {
      let name = entry.file_name();
      let name = name.to_string_lossy();
      let versioned = match os {
        Os::MacOs => is_versioned_dylib(&name),
        _ => is_versioned_shared_object(&name),
      };
      versioned && !has_debug_suffix(&name)
    })
    .map(|entry| entry.path())
    .collect();
  found.sort();
  found
}

/// True for `<stem>.so.<major>.<minor>[...]`, with at least two numeric components.
pub fn is_versioned_shared_object(name: &str) -> bool {
  let Some((stem, version)) = name.split_once(".so.") else {
    return false;
  };
  if stem.is_empty() {
    return false;
  }

  let components: Vec<&str> = version.split('.').collect();
  components.len() >= 2 && components[..2].iter().all(|c| is_number(c))
}

/// True for `<stem>.<major>.<minor>[...].dylib`, with at least two numeric components.
pub fn is_versioned_dylib(name: &str) -> bool {
  let Some(rest) = name.strip_suffix(".dylib") else {
    return false;
  };

  let mut parts = rest.split('.');
  let Some(stem) = parts.next() else {
    return false;
  };
  let version: Vec<&str> = parts.collect();
  !stem.is_empty() && version.len() >= 2 && version.iter().all(|c| is_number(c))
}

fn is_number(component: &str) -> bool {
  !component.is_empty() && component.chars().all(|ch| ch.is_ascii_digit())
}

pub fn has_debug_suffix(name: &str) -> bool {
  DEBUG_SYMBOL_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Files the build depends on, sorted and deduplicated.
///
/// These are only used for staleness detection and are never parsed. Missing
/// roots contribute nothing.
pub fn declare_sources(config: &BuildConfig) -> Vec<PathBuf> {
  let slang_dir = &config.slang_dir;
  let mut sources = BTreeSet::new();

  for fixed in ["slang-tag-version.h.in", "CMakeLists.txt"] {
    let path = slang_dir.join(fixed);
    if path.is_file() {
      sources.insert(path);
    }
  }

  sources.extend(walk_files(&slang_dir.join("source"), None, |name| name == "CMakeLists.txt"));
  sources.extend(walk_files(&slang_dir.join("include"), Some(1), |name| name.ends_with(".h")));
  sources.extend(walk_files(&slang_dir.join("source").join("slang"), None, |name| {
    name.ends_with(".cpp") || name.ends_with(".h")
  }));

  sources.into_iter().collect()
}

fn walk_files(root: &Path, max_depth: Option<usize>, keep: impl Fn(&str) -> bool) -> Vec<PathBuf> {
  if !root.is_dir() {
    return Vec::new();
  }

  let mut walker = WalkDir::new(root);
  if let Some(depth) = max_depth {
    walker = walker.max_depth(depth);
  }

  walker
    .into_iter()
    .filter_map(Result::ok)
    .filter(|entry| entry.file_type().is_file() && keep(&entry.file_name().to_string_lossy()))
    .map(|entry| entry.into_path())
    .collect()
}

/// Whether the build step has to run again.
///
/// True if any artifact is missing, or if the oldest file artifact is older
/// than the newest source. Directory artifacts only need to exist.
pub fn needs_rebuild(sources: &[PathBuf], artifacts: &[Artifact]) -> io::Result<bool> {
  let mut oldest_output: Option<SystemTime> = None;

  for artifact in artifacts {
    let metadata = match fs::metadata(&artifact.path) {
      Ok(metadata) => metadata,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %artifact.path.display(), "artifact missing");
        return Ok(true);
      }
      Err(e) => return Err(e),
    };

    if artifact.kind == ArtifactKind::File {
      let modified = metadata.modified()?;
      oldest_output = Some(oldest_output.map_or(modified, |t| t.min(modified)));
    }
  }

  let Some(oldest_output) = oldest_output else {
    return Ok(false);
  };

  for source in sources {
    let modified = fs::metadata(source)?.modified()?;
    if modified > oldest_output {
      debug!(path = %source.display(), "source newer than artifacts");
      return Ok(true);
    }
  }

  Ok(false)
}
