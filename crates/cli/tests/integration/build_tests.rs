//! Tests for `slangbuild build`.

use predicates::prelude::*;
use serial_test::serial;

use crate::common::TestEnv;

const CONFIGURE_CALL: &str = "--preset default -DSLANG_ENABLE_GFX=FALSE -DSLANG_ENABLE_SLANGI=FALSE \
  -DSLANG_ENABLE_SLANGRT=FALSE -DSLANG_ENABLE_TESTS=FALSE -DSLANG_ENABLE_EXAMPLES=FALSE -DSLANG_LIB_TYPE=SHARED";
const BUILD_CALL: &str = "--build --preset releaseWithDebugInfo";

#[test]
#[serial]
fn fresh_checkout_configures_then_builds() {
  let env = TestEnv::new();

  env
    .slangbuild_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built Slang"));

  assert_eq!(env.cmake_calls(), vec![CONFIGURE_CALL.to_string(), BUILD_CALL.to_string()]);
}

#[test]
#[serial]
fn configured_checkout_only_builds() {
  let env = TestEnv::new();
  env.mark_configured();

  env.slangbuild_cmd().args(["build", "--force"]).assert().success();

  assert_eq!(env.cmake_calls(), vec![BUILD_CALL.to_string()]);
}

#[test]
#[serial]
fn installs_real_libraries_only() {
  let env = TestEnv::new();

  env.slangbuild_cmd().arg("build").assert().success();

  let out = env.output_dir();
  assert!(out.join("libslang-compiler.a").is_file());
  assert!(out.join("libslang-compiler.so.0.2025").is_file());
  assert!(!out.join("libslang-compiler.so").exists());
  assert!(!out.join("libslang-compiler.so.0.2025.debug").exists());
  assert!(!out.join("include").exists());
}

#[test]
#[serial]
fn with_headers_installs_include_tree() {
  let env = TestEnv::new();

  env.slangbuild_cmd().args(["build", "--with-headers"]).assert().success();

  assert!(env.output_dir().join("include").join("slang.h").is_file());
}

#[test]
#[serial]
fn configure_failure_exit_code_is_passed_through() {
  let env = TestEnv::new();

  env
    .slangbuild_cmd()
    .arg("build")
    .env("FAKE_CONFIGURE_EXIT", "3")
    .assert()
    .code(3)
    .stderr(predicate::str::contains("CMake configuration failed"));

  assert_eq!(env.cmake_calls().len(), 1, "build must not run after a failed configure");
}

#[test]
#[serial]
fn build_failure_exit_code_is_passed_through() {
  let env = TestEnv::new();
  env.mark_configured();

  env
    .slangbuild_cmd()
    .arg("build")
    .env("FAKE_BUILD_EXIT", "5")
    .assert()
    .code(5)
    .stderr(predicate::str::contains("CMake build failed"));

  assert!(!env.output_dir().exists(), "install must not run after a failed build");
}

#[test]
#[serial]
fn second_build_is_up_to_date() {
  let env = TestEnv::new();

  env.slangbuild_cmd().arg("build").assert().success();
  env
    .slangbuild_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("up to date"));

  assert_eq!(env.cmake_calls().len(), 2);
}

#[test]
#[serial]
fn deleted_output_is_installed_again() {
  let env = TestEnv::new();

  env.slangbuild_cmd().arg("build").assert().success();
  std::fs::remove_dir_all(env.output_dir()).unwrap();

  env
    .slangbuild_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built Slang"));

  assert!(env.output_dir().join("libslang-compiler.a").is_file());
  assert_eq!(env.cmake_calls(), vec![CONFIGURE_CALL, BUILD_CALL, BUILD_CALL]);
}

#[test]
#[serial]
fn headers_requested_after_plain_build_are_installed() {
  let env = TestEnv::new();

  env.slangbuild_cmd().arg("build").assert().success();
  env.slangbuild_cmd().args(["build", "--with-headers"]).assert().success();

  assert!(env.output_dir().join("include").join("slang.h").is_file());
}

#[test]
#[serial]
fn relative_cmake_path_is_resolved_from_working_directory() {
  let env = TestEnv::new();

  env
    .slangbuild_cmd()
    .args(["build", "--cmake", "./fake-cmake"])
    .assert()
    .success();

  assert_eq!(env.cmake_calls(), vec![CONFIGURE_CALL, BUILD_CALL]);
}

#[test]
#[serial]
fn dry_run_launches_nothing() {
  let env = TestEnv::new();

  env
    .slangbuild_cmd()
    .args(["build", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"))
    .stdout(predicate::str::contains(BUILD_CALL))
    .stdout(predicate::str::contains("libslang-compiler.a"))
    .stdout(predicate::str::contains("RelWithDebInfo/include").not());

  assert!(env.cmake_calls().is_empty());
  assert!(!env.output_dir().exists());
}

#[test]
#[serial]
fn dry_run_lists_headers_when_requested() {
  let env = TestEnv::new();

  env
    .slangbuild_cmd()
    .args(["build", "--dry-run", "--with-headers"])
    .assert()
    .success()
    .stdout(predicate::str::contains("RelWithDebInfo/include"));
}
