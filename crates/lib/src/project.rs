//! The standard configuration-driven build definition.
//!
//! [`ProjectBuild`] turns a loaded `jig.toml` into a fully set up
//! [`BuildDefinition`]: it configures every capability module, installs
//! Kotlin compilation when a Kotlin version is configured, fills the
//! dependency set and manifest, and registers the composite tasks.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::capability::{IdeMetadata, JavaCompile, JavaTest, KotlinCompile, Packaging, Scaffold};
use crate::config::{JigConfig, LoadedConfig};
use crate::definition::{BuildDefinition, BuildSetup};
use crate::deps::Scope;
use crate::error::BuildError;
use crate::pipeline::{STAGE_CLEAN, STAGE_PACK};
use crate::{ide, scaffold};

pub const TASK_CLEAN_PACK: &str = "clean-pack";
pub const TASK_PRINT_DEPS: &str = "print-deps";
pub const TASK_SCAFFOLD: &str = "scaffold";
pub const TASK_IDE: &str = "ide";

/// Setup routine driven by a [`JigConfig`].
#[derive(Debug, Clone)]
pub struct ProjectBuild {
  pub name: String,
  pub root: PathBuf,
  pub config: JigConfig,
}

impl ProjectBuild {
  pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, config: JigConfig) -> Self {
    Self {
      name: name.into(),
      root: root.into(),
      config,
    }
  }

  pub fn from_loaded(loaded: LoadedConfig) -> Self {
    let name = loaded.project_name();
    Self::new(name, loaded.root, loaded.config)
  }

  /// Artifact base name: `<name>-<version>` when a version is configured.
  pub fn artifact_name(&self) -> String {
    match &self.config.project.version {
      Some(version) => format!("{}-{}", self.name, version),
      None => self.name.clone(),
    }
  }

  /// Construct a definition for this project and run setup on it.
  pub fn into_definition(self) -> Result<BuildDefinition, BuildError> {
    let mut definition = BuildDefinition::new(self.name.clone(), self.root.clone());
    definition.setup(&self)?;
    Ok(definition)
  }

  fn configure_modules(&self, definition: &mut BuildDefinition) -> Result<(), BuildError> {
    let toolchain = &self.config.toolchain;
    let layout = &self.config.layout;

    definition.configure::<JavaCompile, _>(|java| {
      java.source_roots = layout.sources.clone();
      java.resource_roots = layout.resources.clone();
      java.target_version = toolchain.java_target.clone();
      java.compiler = toolchain.javac.clone();
      java.plugins = toolchain.javac_plugins.clone();
      java.options = toolchain.javac_options.clone();
      java.launcher = toolchain.java.clone();
    })?;

    let pack = &self.config.pack;
    definition.configure::<Packaging, _>(|packaging| {
      packaging.deflate = pack.deflate;
      packaging.include_resources = pack.include_resources;
    })?;

    let test = &self.config.test;
    definition.configure::<JavaTest, _>(|tests| {
      tests.source_roots = layout.tests.clone();
      tests.launcher_main = test.launcher_main.clone();
      tests.options = test.options.clone();
      tests.env = test.env.clone();
      tests.skip = test.skip;
    })?;

    let kotlin_enabled = toolchain.kotlin_version.is_some();
    definition.configure::<Scaffold, _>(|skeleton| {
      let mut directories = layout.sources.clone();
      if kotlin_enabled {
        directories.extend(layout.kotlin_sources.iter().cloned());
      }
      directories.extend(layout.resources.iter().cloned());
      directories.extend(layout.tests.iter().cloned());
      skeleton.directories = directories;
    })?;

    if let Some(version) = &toolchain.kotlin_version {
      definition.configure::<KotlinCompile, _>(|kotlin| {
        kotlin.version = Some(version.clone());
        kotlin.source_roots = layout.kotlin_sources.clone();
        kotlin.compiler = toolchain.kotlinc.clone();
        kotlin.plugins = toolchain.kotlin_plugins.clone();
      })?;
      KotlinCompile::install(definition)?;
    }

    Ok(())
  }

  fn configure_outputs(&self, definition: &mut BuildDefinition) -> Result<(), BuildError> {
    let deps = &self.config.dependencies;
    let set = definition.dependencies_mut()?;
    set.extend(Scope::Compile, deps.compile.iter().cloned());
    set.extend(Scope::Test, deps.test.iter().cloned());
    set.extend(Scope::Runtime, deps.runtime.iter().cloned());

    let project = &self.config.project;
    let manifest = definition.manifest_mut()?;
    if let Some(main_class) = &project.main_class {
      manifest.set("Main-Class", main_class);
    }
    manifest.set("Implementation-Title", &self.name);
    if let Some(version) = &project.version {
      manifest.set("Implementation-Version", version);
    }
    if let Some(group) = &project.group {
      manifest.set("Implementation-Vendor-Id", group);
    }
    for (key, value) in &self.config.manifest {
      manifest.set(key, value);
    }

    definition.set_output_dir(&self.config.layout.output)?;
    let artifact = definition.artifact_mut()?;
    artifact.name = self.artifact_name();
    artifact.classifier = self.config.pack.classifier.clone();
    Ok(())
  }

  fn register_tasks(&self, definition: &mut BuildDefinition) -> Result<(), BuildError> {
    definition.register_task(
      TASK_CLEAN_PACK,
      "Remove the output directory, then package",
      Box::new(|ctx| {
        ctx.run_stage(STAGE_CLEAN)?;
        ctx.run_stage(STAGE_PACK)
      }),
    )?;

    definition.register_task(
      TASK_PRINT_DEPS,
      "Print declared dependencies by scope",
      Box::new(|ctx| {
        print!("{}", ctx.definition().dependencies().render());
        Ok(())
      }),
    )?;

    let name = self.name.clone();
    definition.register_task(
      TASK_SCAFFOLD,
      "Create the project skeleton",
      Box::new(move |ctx| {
        let definition = ctx.definition();
        scaffold::scaffold(definition.base_dir(), &name, &ctx.module::<Scaffold>(), &ctx.module())?;
        Ok(())
      }),
    )?;

    definition.register_task(
      TASK_IDE,
      "Generate IntelliJ module metadata",
      Box::new(|ctx| {
        let path = ide::write_module(ctx.definition(), &ctx.module::<IdeMetadata>())?;
        ctx.record_artifact(path);
        Ok(())
      }),
    )?;

    Ok(())
  }
}

impl BuildSetup for ProjectBuild {
  fn setup(&self, definition: &mut BuildDefinition) -> Result<(), BuildError> {
    debug!(project = %self.name, root = %self.root.display(), "configuring project");
    self.configure_modules(definition)?;
    self.configure_outputs(definition)?;
    self.register_tasks(definition)?;
    info!(project = %self.name, tasks = definition.tasks().len(), "project configured");
    Ok(())
  }
}

/// Load the configuration for `dir` and build its definition.
pub fn load_project(dir: &Path) -> Result<BuildDefinition, BuildError> {
  let loaded = crate::config::ConfigLoader::new().load_from_directory(dir)?;
  ProjectBuild::from_loaded(loaded).into_definition()
}
