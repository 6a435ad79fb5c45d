//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Stand-in for `cmake`.
///
/// Appends its arguments to `$FAKE_CMAKE_LOG`. A configure run writes
/// `build/CMakeCache.txt`, a build run writes Linux-style libraries under
/// `build/RelWithDebInfo`. `FAKE_CONFIGURE_EXIT` / `FAKE_BUILD_EXIT` make the
/// respective step fail with that code.
#[cfg(unix)]
const FAKE_CMAKE: &str = r#"#!/bin/sh
echo "$*" >> "$FAKE_CMAKE_LOG"
if [ "$1" = "--build" ]; then
  if [ -n "$FAKE_BUILD_EXIT" ]; then
    exit "$FAKE_BUILD_EXIT"
  fi
  out=build/RelWithDebInfo
  mkdir -p "$out/lib" "$out/include"
  touch "$out/lib/libslang-compiler.a"
  touch "$out/lib/libslang-compiler.so.0.2025"
  touch "$out/lib/libslang-compiler.so.0.2025.debug"
  ln -sf libslang-compiler.so.0.2025 "$out/lib/libslang-compiler.so"
  touch "$out/include/slang.h"
  exit 0
fi
if [ -n "$FAKE_CONFIGURE_EXIT" ]; then
  exit "$FAKE_CONFIGURE_EXIT"
fi
touch build/CMakeCache.txt
exit 0
"#;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the Slang checkout,
/// the output directory and the fake CMake.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Slang checkout (isolated per test).
  pub fn slang_dir(&self) -> PathBuf {
    let p = self.temp.path().join("slang");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Where installed libraries land.
  pub fn output_dir(&self) -> PathBuf {
    self.temp.path().join("out")
  }

  pub fn cmake_log(&self) -> PathBuf {
    self.temp.path().join("cmake.log")
  }

  /// Arguments of every fake CMake run, one entry per run.
  pub fn cmake_calls(&self) -> Vec<String> {
    match std::fs::read_to_string(self.cmake_log()) {
      Ok(content) => content.lines().map(str::to_string).collect(),
      Err(_) => Vec::new(),
    }
  }

  /// Pretend a previous run already configured the build tree.
  pub fn mark_configured(&self) {
    let build = self.slang_dir().join("build");
    std::fs::create_dir_all(&build).unwrap();
    std::fs::write(build.join("CMakeCache.txt"), "").unwrap();
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  #[cfg(unix)]
  fn fake_cmake(&self) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = self.temp.path().join("fake-cmake");
    if !path.exists() {
      std::fs::write(&path, FAKE_CMAKE).unwrap();
      std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
  }

  /// Get a pre-configured Command for the slangbuild binary.
  ///
  /// Configuration comes in through environment variables so tests can
  /// still override any of it with flags:
  /// - `SLANGBUILD_PLATFORM`: linux
  /// - `SLANGBUILD_SLANG_DIR`: isolated checkout
  /// - `SLANGBUILD_OUTPUT_DIR`: isolated output directory
  /// - `SLANGBUILD_CMAKE`: the fake CMake (Unix only)
  pub fn slangbuild_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("slangbuild");
    cmd.current_dir(self.temp.path());
    for var in ["SLANGBUILD_ARCH", "SLANGBUILD_PRESET", "SLANGBUILD_BUILD_TYPE"] {
      cmd.env_remove(var);
    }
    cmd.env("SLANGBUILD_PLATFORM", "linux");
    cmd.env("SLANGBUILD_SLANG_DIR", self.slang_dir());
    cmd.env("SLANGBUILD_OUTPUT_DIR", self.output_dir());
    cmd.env("FAKE_CMAKE_LOG", self.cmake_log());
    cmd.env_remove("FAKE_CONFIGURE_EXIT");
    cmd.env_remove("FAKE_BUILD_EXIT");
    #[cfg(unix)]
    cmd.env("SLANGBUILD_CMAKE", self.fake_cmake());
    #[cfg(not(unix))]
    cmd.env_remove("SLANGBUILD_CMAKE");
    cmd
  }
}
