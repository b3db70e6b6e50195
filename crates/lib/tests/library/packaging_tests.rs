use std::fs::{self, File};
use std::io::Read;

use jig_lib::config::{ConfigError, ConfigLoader, JigConfig};
use jig_lib::project::ProjectBuild;
use jig_lib::pipeline::HookPosition;
use jig_lib::{BuildError, dispatch};
use tempfile::TempDir;
use zip::ZipArchive;

use super::common::ready_at;

fn jar_entries(path: &std::path::Path) -> Vec<String> {
  let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
  archive.file_names().map(str::to_string).collect()
}

#[test]
fn clean_then_pack_yields_exactly_one_artifact() {
  let temp = TempDir::new().unwrap();
  let definition = ready_at(temp.path(), |def| {
    def.manifest_mut()?.set("Main-Class", "app.Main");
    Ok(())
  });

  dispatch("clean", &definition).unwrap();
  let report = dispatch("pack", &definition).unwrap();

  let expected = definition.artifact_path();
  assert_eq!(report.artifacts, vec![expected.clone()]);
  assert_eq!(definition.artifacts(), vec![expected.clone()]);
  assert!(expected.is_file());

  let jars: Vec<_> = fs::read_dir(definition.output_dir())
    .unwrap()
    .filter_map(Result::ok)
    .filter(|e| e.path().extension().is_some_and(|ext| ext == "jar"))
    .collect();
  assert_eq!(jars.len(), 1);
}

#[test]
fn clean_removes_previous_output() {
  let temp = TempDir::new().unwrap();
  let definition = ready_at(temp.path(), |_| Ok(()));

  dispatch("pack", &definition).unwrap();
  assert!(definition.artifact_path().exists());

  dispatch("clean", &definition).unwrap();
  assert!(!definition.output_dir().exists());
}

#[test]
fn resources_and_manifest_are_packaged() {
  let temp = TempDir::new().unwrap();
  let resources = temp.path().join("src/main/resources/config");
  fs::create_dir_all(&resources).unwrap();
  fs::write(resources.join("app.properties"), "greeting=hi\n").unwrap();

  let definition = ready_at(temp.path(), |def| {
    def.manifest_mut()?.set("Main-Class", "app.Main");
    Ok(())
  });

  let report = dispatch("pack", &definition).unwrap();

  let entries = jar_entries(&report.artifacts[0]);
  assert!(entries.contains(&"META-INF/MANIFEST.MF".to_string()));
  assert!(entries.contains(&"config/app.properties".to_string()));

  let mut archive = ZipArchive::new(File::open(&report.artifacts[0]).unwrap()).unwrap();
  let mut manifest = String::new();
  archive
    .by_name("META-INF/MANIFEST.MF")
    .unwrap()
    .read_to_string(&mut manifest)
    .unwrap();
  assert!(manifest.starts_with("Manifest-Version: 1.0\r\n"));
  assert!(manifest.contains("Main-Class: app.Main\r\n"));
}

#[test]
fn replacing_pack_changes_the_artifact() {
  let temp = TempDir::new().unwrap();
  let definition = ready_at(temp.path(), |def| {
    def.register_hook(
      "pack",
      HookPosition::ReplaceDefault,
      "marker-pack",
      Box::new(|ctx| {
        let path = ctx.definition().output_dir().join("marker.txt");
        fs::create_dir_all(ctx.definition().output_dir()).map_err(|e| BuildError::io(&path, e))?;
        fs::write(&path, "packed").map_err(|e| BuildError::io(&path, e))?;
        ctx.record_artifact(path);
        Ok(())
      }),
    )
  });

  let report = dispatch("pack", &definition).unwrap();

  assert_eq!(report.artifacts.len(), 1);
  assert!(report.artifacts[0].ends_with("marker.txt"));
  assert!(!definition.artifact_path().exists());
}

#[test]
fn run_without_main_class_fails_before_packaging() {
  let temp = TempDir::new().unwrap();
  let definition = ready_at(temp.path(), |_| Ok(()));

  let err = dispatch("run", &definition).unwrap_err();

  assert!(matches!(err.source, BuildError::MissingMainClass));
  assert!(!definition.artifact_path().exists());
}

#[test]
fn project_clean_pack_uses_configured_output() {
  let temp = TempDir::new().unwrap();
  let config: JigConfig = toml::from_str("[project]\nversion = \"0.3.0\"\n\n[layout]\noutput = \"target\"\n").unwrap();
  let definition = ProjectBuild::new("greeter", temp.path(), config).into_definition().unwrap();

  let report = dispatch("clean-pack", &definition).unwrap();

  assert_eq!(report.artifacts, vec![temp.path().join("target/greeter-0.3.0.jar")]);
  assert!(report.artifacts[0].is_file());
}

fn project_dir(config: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  fs::write(temp.path().join("jig.toml"), config).unwrap();
  fs::create_dir_all(temp.path().join("src/main/java")).unwrap();
  temp
}

#[test]
fn empty_output_override_is_refused_before_clean() {
  let temp = project_dir("[project]\nname = \"demo\"\n");

  let err = ConfigLoader::new()
    .without_env()
    .with_override("output.dir", "")
    .load_from_directory(temp.path())
    .unwrap_err();

  assert!(matches!(err, ConfigError::EmptyOverride(ref key) if key == "output.dir"));
  assert!(temp.path().join("jig.toml").is_file());
}

#[test]
fn output_at_project_root_is_refused_before_clean() {
  let temp = project_dir("[layout]\noutput = \".\"\n");

  let loaded = ConfigLoader::new().without_env().load_from_directory(temp.path()).unwrap();
  let err = ProjectBuild::from_loaded(loaded).into_definition().unwrap_err();

  assert!(matches!(err, BuildError::InvalidOutputDir { .. }));
  assert!(temp.path().join("jig.toml").is_file());
  assert!(temp.path().join("src/main/java").is_dir());
}
