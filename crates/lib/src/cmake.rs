//! CMake command lines.
//!
//! Builds the configure and build invocations for a [`BuildConfig`] without
//! running anything, so dry runs and tests can inspect them.

use std::fmt;
use std::path::PathBuf;

use crate::config::BuildConfig;
use crate::consts::FEATURE_FLAGS;
use crate::platform::os::Os;

/// A fully specified external process launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: PathBuf,
  pub args: Vec<String>,
  pub cwd: PathBuf,
}

impl Invocation {
  pub fn has_arg(&self, arg: &str) -> bool {
    self.args.iter().any(|a| a == arg)
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program.display())?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// `cmake --preset <preset> <feature flags> [-DCMAKE_OSX_ARCHITECTURES=<arch>]`
pub fn configure_invocation(config: &BuildConfig) -> Invocation {
  let mut args = vec!["--preset".to_string(), config.preset.clone()];
  args.extend(FEATURE_FLAGS.iter().map(|flag| flag.to_string()));

  if let (Os::MacOs, Some(arch)) = (config.os, &config.osx_arch) {
    args.push(format!("-DCMAKE_OSX_ARCHITECTURES={}", arch.cmake_value()));
  }

  Invocation {
    program: config.cmake.clone(),
    args,
    cwd: config.slang_dir.clone(),
  }
}

/// `cmake --build --preset <build_type>`
pub fn build_invocation(config: &BuildConfig) -> Invocation {
  Invocation {
    program: config.cmake.clone(),
    args: vec!["--build".to_string(), "--preset".to_string(), config.build_type.clone()],
    cwd: config.slang_dir.clone(),
  }
}
