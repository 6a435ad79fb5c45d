use std::fmt;

/// CPU architecture of the machine running the build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  Aarch64,
}

impl Arch {
  /// Detect the current CPU architecture at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86_64" => Some(Self::X86_64),
      "aarch64" => Some(Self::Aarch64),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Architecture selection passed to CMake on macOS via `CMAKE_OSX_ARCHITECTURES`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OsxArch {
  /// Fat binary covering Apple Silicon and Intel
  Universal,
  /// Any other architecture string, passed through as given
  Single(String),
}

impl OsxArch {
  pub const UNIVERSAL_ARCHS: &'static str = "arm64;x86_64";

  pub fn parse(s: &str) -> Self {
    if s.eq_ignore_ascii_case("universal") {
      Self::Universal
    } else {
      Self::Single(s.to_string())
    }
  }

  /// Value for the `CMAKE_OSX_ARCHITECTURES` cache variable
  pub fn cmake_value(&self) -> &str {
    match self {
      Self::Universal => Self::UNIVERSAL_ARCHS,
      Self::Single(arch) => arch,
    }
  }
}

impl fmt::Display for OsxArch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Universal => write!(f, "universal"),
      Self::Single(arch) => write!(f, "{}", arch),
    }
  }
}
