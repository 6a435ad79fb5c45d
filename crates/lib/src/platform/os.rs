use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Target operating system of a Slang build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown platform '{0}' (expected one of: linux, macos, windows)")]
pub struct UnknownOs(pub String);

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "macos",
      Self::Windows => "windows",
    }
  }

  pub fn is_windows(&self) -> bool {
    matches!(self, Self::Windows)
  }

  /// Prefix prepended to library file names (`lib` everywhere but Windows)
  pub fn lib_prefix(&self) -> &'static str {
    match self {
      Self::Windows => "",
      Self::Linux | Self::MacOs => "lib",
    }
  }

  /// Extension of a shared library, without the dot
  pub fn shared_lib_ext(&self) -> &'static str {
    match self {
      Self::Linux => "so",
      Self::MacOs => "dylib",
      Self::Windows => "dll",
    }
  }

  /// Extension of a static or import library, without the dot
  pub fn static_lib_ext(&self) -> &'static str {
    match self {
      Self::Windows => "lib",
      Self::Linux | Self::MacOs => "a",
    }
  }

  /// Directory under the CMake configuration dir that receives shared libraries
  pub fn shared_lib_dir(&self) -> &'static str {
    match self {
      Self::Windows => "bin",
      Self::Linux | Self::MacOs => "lib",
    }
  }
}

impl FromStr for Os {
  type Err = UnknownOs;

  /// Accepts Rust target names as well as the names host build tools tend to use.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "linux" | "linuxbsd" => Ok(Self::Linux),
      "macos" | "darwin" | "osx" => Ok(Self::MacOs),
      "windows" | "win32" | "win64" => Ok(Self::Windows),
      _ => Err(UnknownOs(s.to_string())),
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
