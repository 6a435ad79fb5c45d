//! Tests for `slangbuild artifacts`.

use predicates::prelude::*;
use serde_json::Value;
use serial_test::serial;

use crate::common::TestEnv;

fn artifact_paths(manifest: &Value) -> Vec<String> {
  manifest["artifacts"]
    .as_array()
    .unwrap()
    .iter()
    .map(|a| a["path"].as_str().unwrap().replace('\\', "/"))
    .collect()
}

#[test]
#[serial]
fn windows_declares_import_library() {
  let env = TestEnv::new();

  let output = env
    .slangbuild_cmd()
    .args(["--platform", "windows", "artifacts", "--json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let manifest: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(manifest["platform"], "windows");
  let paths = artifact_paths(&manifest);
  assert!(paths.iter().any(|p| p.ends_with("build/RelWithDebInfo/lib/slang-compiler.lib")));
  assert!(!paths.iter().any(|p| p.ends_with(".a")));
}

#[test]
#[serial]
fn linux_declares_static_library() {
  let env = TestEnv::new();

  let output = env.slangbuild_cmd().args(["artifacts", "--json"]).output().unwrap();
  assert!(output.status.success());

  let manifest: Value = serde_json::from_slice(&output.stdout).unwrap();
  let paths = artifact_paths(&manifest);
  assert!(paths.iter().any(|p| p.ends_with("build/RelWithDebInfo/lib/libslang-compiler.a")));
  assert!(paths.iter().any(|p| p.ends_with("build/RelWithDebInfo/include")));
}

#[test]
#[serial]
fn sources_are_listed_on_request() {
  let env = TestEnv::new();
  env.write_file("slang/CMakeLists.txt", "project(slang)\n");
  env.write_file("slang/include/slang.h", "");

  env
    .slangbuild_cmd()
    .args(["artifacts", "--sources"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Sources (2)"))
    .stdout(predicate::str::contains("slang.h"));
}

#[test]
#[serial]
fn manifest_is_written_to_file() {
  let env = TestEnv::new();
  let path = env.temp.path().join("gen").join("slang-manifest.json");

  env
    .slangbuild_cmd()
    .arg("artifacts")
    .arg("--write")
    .arg(&path)
    .assert()
    .success()
    .stdout(predicate::str::contains("Wrote manifest"));

  let manifest: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
  assert_eq!(manifest["build_type"], "releaseWithDebugInfo");
}

#[test]
#[serial]
fn config_file_is_picked_up_from_working_directory() {
  let env = TestEnv::new();
  env.write_file("slangbuild.toml", "platform = \"windows\"\nbuild_type = \"debug\"\n");

  env
    .slangbuild_cmd()
    .env_remove("SLANGBUILD_PLATFORM")
    .arg("artifacts")
    .assert()
    .success()
    .stdout(predicate::str::contains("slang-compiler.lib"))
    .stdout(predicate::str::contains("Debug"));
}

#[test]
#[serial]
fn flags_override_environment() {
  let env = TestEnv::new();

  env
    .slangbuild_cmd()
    .args(["--platform", "macos", "artifacts"])
    .assert()
    .success()
    .stdout(predicate::str::contains("libslang-compiler.dylib"));
}
