//! Fixture project tests: dependency listing, scaffolding, IDE metadata and packaging.

use std::fs::File;
use std::io::Read;

use predicates::prelude::*;
use zip::ZipArchive;

use super::common::TestEnv;

#[test]
fn print_deps_lists_every_scope() {
  let env = TestEnv::from_fixture("greeter.toml");

  env
    .jig_cmd()
    .arg("print-deps")
    .assert()
    .success()
    .stdout(predicate::str::contains("compile (1):\n  com.google.guava:guava:33.0.0-jre\n"))
    .stdout(predicate::str::contains("test (1):\n  junit:junit:4.13.2\n"))
    .stdout(predicate::str::contains("runtime (0):"));
}

#[test]
fn invalid_config_is_reported() {
  let env = TestEnv::from_fixture("broken.toml");

  env
    .jig_cmd()
    .arg("pack")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn explicit_config_file_is_used() {
  let env = TestEnv::empty();
  env.write_file("conf/jig.toml", "[project]\nname = \"elsewhere\"\n");

  env
    .jig_cmd()
    .arg("--list")
    .arg("-f")
    .arg(env.root().join("conf/jig.toml"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Tasks for elsewhere"));
}

#[test]
fn scaffold_creates_a_project_skeleton() {
  let env = TestEnv::empty();

  env.jig_cmd().arg("scaffold").assert().success();

  assert!(env.config_path.is_file());
  assert!(env.root().join("src/main/java/app/Main.java").is_file());
  assert!(env.root().join("src/main/resources").is_dir());
  assert!(env.root().join("src/test/java").is_dir());
}

#[test]
fn scaffold_keeps_existing_config() {
  let env = TestEnv::from_fixture("greeter.toml");

  env.jig_cmd().arg("scaffold").assert().success();

  let contents = std::fs::read_to_string(&env.config_path).unwrap();
  assert!(contents.contains("name = \"greeter\""));
  assert!(contents.contains("Built-By"));
}

#[test]
fn ide_writes_module_metadata() {
  let env = TestEnv::from_fixture("greeter.toml");

  env
    .jig_cmd()
    .arg("ide")
    .assert()
    .success()
    .stdout(predicate::str::contains("greeter.iml"));

  let iml = std::fs::read_to_string(env.root().join("greeter.iml")).unwrap();
  assert!(iml.contains("file://$MODULE_DIR$/src/main/java"));
  assert!(iml.contains("guava-33.0.0-jre.jar"));
}

#[test]
fn pack_includes_manifest_and_resources() {
  let env = TestEnv::from_fixture("greeter.toml");
  env.write_file("src/main/resources/greeting.txt", "hello\n");

  env.jig_cmd().arg("pack").assert().success();

  let jar = env.root().join("jig-output/greeter-1.0.0.jar");
  let mut archive = ZipArchive::new(File::open(&jar).unwrap()).unwrap();
  assert!(archive.by_name("greeting.txt").is_ok());

  let mut manifest = String::new();
  archive
    .by_name("META-INF/MANIFEST.MF")
    .unwrap()
    .read_to_string(&mut manifest)
    .unwrap();
  assert!(manifest.contains("Main-Class: app.Main\r\n"));
  assert!(manifest.contains("Implementation-Version: 1.0.0\r\n"));
  assert!(manifest.contains("Built-By: jig-tests\r\n"));
}

#[test]
fn json_report_lists_artifacts() {
  let env = TestEnv::from_fixture("greeter.toml");

  let output = env.jig_cmd().args(["--format", "json", "clean-pack"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["task"], "clean-pack");
  let artifacts = json["artifacts"].as_array().unwrap();
  assert_eq!(artifacts.len(), 1);
  assert!(artifacts[0].as_str().unwrap().ends_with("greeter-1.0.0.jar"));
}
