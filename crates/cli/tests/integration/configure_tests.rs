//! Tests for `slangbuild configure`.

use predicates::prelude::*;
use serial_test::serial;

use crate::common::TestEnv;

#[test]
#[serial]
fn configure_runs_once() {
  let env = TestEnv::new();

  env
    .slangbuild_cmd()
    .arg("configure")
    .assert()
    .success()
    .stdout(predicate::str::contains("Configured"));
  env
    .slangbuild_cmd()
    .arg("configure")
    .assert()
    .success()
    .stdout(predicate::str::contains("already configured"));

  assert_eq!(env.cmake_calls().len(), 1);
}

#[test]
#[serial]
fn macos_universal_requests_both_architectures() {
  let env = TestEnv::new();

  env
    .slangbuild_cmd()
    .args(["--platform", "macos", "--arch", "universal", "configure"])
    .assert()
    .success();

  let calls = env.cmake_calls();
  assert_eq!(calls.len(), 1);
  assert!(calls[0].ends_with("-DCMAKE_OSX_ARCHITECTURES=arm64;x86_64"));
}

#[test]
#[serial]
fn macos_single_architecture_is_literal() {
  let env = TestEnv::new();

  env
    .slangbuild_cmd()
    .args(["--platform", "macos", "--arch", "arm64", "configure"])
    .assert()
    .success();

  assert!(env.cmake_calls()[0].ends_with("-DCMAKE_OSX_ARCHITECTURES=arm64"));
}

#[test]
#[serial]
fn windows_uses_vs2022_preset() {
  let env = TestEnv::new();

  env
    .slangbuild_cmd()
    .args(["--platform", "windows", "configure"])
    .assert()
    .success();

  assert!(env.cmake_calls()[0].starts_with("--preset vs2022 "));
}
