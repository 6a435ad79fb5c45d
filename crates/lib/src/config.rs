//! Build configuration.
//!
//! Configuration is layered, lowest precedence first: built-in defaults, an
//! optional `slangbuild.toml`, `SLANGBUILD_*` environment variables and
//! command-line flags. Each source produces a [`ConfigLayer`]; layers are
//! merged and then resolved into an immutable [`BuildConfig`].

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  BUILD_DIR_NAME, CACHE_MARKER, CONFIG_FILE_NAME, DEFAULT_BUILD_TYPE, DEFAULT_CMAKE, DEFAULT_OUTPUT_DIR,
  DEFAULT_PRESET, DEFAULT_SLANG_DIR, ENV_PREFIX, WINDOWS_PRESET,
};
use crate::platform::arch::OsxArch;
use crate::platform::os::{Os, UnknownOs};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config file not found: {0}")]
  NotFound(PathBuf),

  #[error("failed to read config file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error(transparent)]
  UnknownPlatform(#[from] UnknownOs),

  #[error("host platform is not supported, pass --platform explicitly")]
  UnsupportedHost,

  #[error("failed to determine the working directory: {0}")]
  CurrentDir(#[source] io::Error),
}

/// One layer of partially specified configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
  pub platform: Option<String>,
  pub arch: Option<String>,
  pub preset: Option<String>,
  pub build_type: Option<String>,
  pub slang_dir: Option<PathBuf>,
  pub output_dir: Option<PathBuf>,
  pub cmake: Option<PathBuf>,
}

impl ConfigLayer {
  /// Parse a TOML config file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
      if source.kind() == io::ErrorKind::NotFound {
        ConfigError::NotFound(path.to_path_buf())
      } else {
        ConfigError::Read {
          path: path.to_path_buf(),
          source,
        }
      }
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Load the explicitly requested file, or `slangbuild.toml` in `dir` if present.
  ///
  /// An explicit path that does not exist is an error; a missing implicit file is not.
  pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      debug!(path = %path.display(), "loading config file");
      return Self::load(path);
    }

    let implicit = dir.join(CONFIG_FILE_NAME);
    if implicit.is_file() {
      debug!(path = %implicit.display(), "loading config file");
      Self::load(&implicit)
    } else {
      Ok(Self::default())
    }
  }

  /// Read `SLANGBUILD_*` environment variables. Empty values count as unset.
  pub fn from_env() -> Self {
    let var = |name: &str| {
      std::env::var(format!("{}{}", ENV_PREFIX, name))
        .ok()
        .filter(|value| !value.is_empty())
    };

    Self {
      platform: var("PLATFORM"),
      arch: var("ARCH"),
      preset: var("PRESET"),
      build_type: var("BUILD_TYPE"),
      slang_dir: var("SLANG_DIR").map(PathBuf::from),
      output_dir: var("OUTPUT_DIR").map(PathBuf::from),
      cmake: var("CMAKE").map(PathBuf::from),
    }
  }

  /// Overlay `higher` on top of `self`; values set in `higher` win.
  pub fn merge(self, higher: ConfigLayer) -> ConfigLayer {
    ConfigLayer {
      platform: higher.platform.or(self.platform),
      arch: higher.arch.or(self.arch),
      preset: higher.preset.or(self.preset),
      build_type: higher.build_type.or(self.build_type),
      slang_dir: higher.slang_dir.or(self.slang_dir),
      output_dir: higher.output_dir.or(self.output_dir),
      cmake: higher.cmake.or(self.cmake),
    }
  }
}

/// Fully resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  pub os: Os,
  /// Only consulted when `os` is macOS.
  pub osx_arch: Option<OsxArch>,
  /// Configure preset passed to `cmake --preset`.
  pub preset: String,
  /// Build preset passed to `cmake --build --preset`.
  pub build_type: String,
  pub slang_dir: PathBuf,
  pub output_dir: PathBuf,
  pub cmake: PathBuf,
}

impl BuildConfig {
  /// Defaults for building on `os`.
  pub fn for_os(os: Os) -> Self {
    let preset = if os.is_windows() { WINDOWS_PRESET } else { DEFAULT_PRESET };
    Self {
      os,
      osx_arch: None,
      preset: preset.to_string(),
      build_type: DEFAULT_BUILD_TYPE.to_string(),
      slang_dir: PathBuf::from(DEFAULT_SLANG_DIR),
      output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
      cmake: PathBuf::from(DEFAULT_CMAKE),
    }
  }

  /// Resolve a merged layer against the defaults for its platform.
  pub fn resolve(layer: ConfigLayer) -> Result<Self, ConfigError> {
    let os = match layer.platform.as_deref() {
      Some(name) => name.parse::<Os>()?,
      None => Os::current().ok_or(ConfigError::UnsupportedHost)?,
    };

    let mut config = Self::for_os(os);
    config.osx_arch = layer.arch.as_deref().map(OsxArch::parse);
    if let Some(preset) = layer.preset {
      config.preset = preset;
    }
    if let Some(build_type) = layer.build_type {
      config.build_type = build_type;
    }
    if let Some(slang_dir) = layer.slang_dir {
      config.slang_dir = slang_dir;
    }
    if let Some(output_dir) = layer.output_dir {
      config.output_dir = output_dir;
    }
    if let Some(cmake) = layer.cmake {
      config.cmake = if is_bare_program(&cmake) || cmake.is_absolute() {
        cmake
      } else {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        program_path(cmake, &cwd)
      };
    }

    if config.osx_arch.is_some() && os != Os::MacOs {
      debug!(platform = %os, "ignoring architecture selection outside macOS");
    }

    Ok(config)
  }

  /// `<slang_dir>/build`
  pub fn build_dir(&self) -> PathBuf {
    self.slang_dir.join(BUILD_DIR_NAME)
  }

  /// `<slang_dir>/build/CMakeCache.txt`
  pub fn cache_marker(&self) -> PathBuf {
    self.build_dir().join(CACHE_MARKER)
  }

  /// Multi-config output directory for the selected build preset.
  pub fn config_dir(&self) -> &'static str {
    cmake_config_dir(&self.build_type)
  }

  /// `<slang_dir>/build/<config_dir>`, the root all artifacts live under.
  pub fn artifact_root(&self) -> PathBuf {
    self.build_dir().join(self.config_dir())
  }
}

/// A program name without any directory part, left to the `PATH` lookup.
fn is_bare_program(program: &Path) -> bool {
  program.components().count() == 1 && program.is_relative()
}

/// Anchor a program path at `cwd`.
///
/// CMake runs inside the Slang checkout, so a relative path such as
/// `./tools/cmake` has to be fixed to the caller's directory first. Bare names
/// and absolute paths are returned unchanged.
pub fn program_path(program: PathBuf, cwd: &Path) -> PathBuf {
  if is_bare_program(&program) || program.is_absolute() {
    program
  } else {
    cwd.join(program)
  }
}

/// Map a Slang build preset to the CMake configuration directory it writes into.
///
/// Unknown presets fall back to `RelWithDebInfo`, the configuration of the default preset.
pub fn cmake_config_dir(build_type: &str) -> &'static str {
  match build_type {
    "debug" => "Debug",
    "release" => "Release",
    _ => "RelWithDebInfo",
  }
}
