//! Build definitions and their lifecycle.
//!
//! A [`BuildDefinition`] wires capability modules, the pipeline, dependencies
//! and tasks together for one build run. It moves through
//! [`Phase::Constructed`], [`Phase::SettingUp`], [`Phase::Ready`],
//! [`Phase::Executing`] and [`Phase::Done`]:
//!
//! - configuration is mutable only while the setup routine runs
//! - setup runs exactly once
//! - one task executes at a time
//!
//! A `Done` definition accepts further dispatches.

mod manifest;
mod stages;

pub use manifest::ManifestAttributes;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info};

use crate::capability::{Capability, CapabilityKind, ModuleHandle, ModuleRegistry};
use crate::deps::{DependencyResolver, DependencySet, MavenLocalResolver, Scope};
use crate::error::BuildError;
use crate::pipeline::{Action, HookPosition, Pipeline};
use crate::task::TaskTable;
use crate::util::paths::output_dir_problem;

/// Default output directory, relative to the base directory.
pub const DEFAULT_OUTPUT_DIR: &str = "jig-output";

/// Lifecycle phase of a [`BuildDefinition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
  Constructed,
  SettingUp,
  Ready,
  Executing,
  Done,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Phase::Constructed => "constructed",
      Phase::SettingUp => "setting-up",
      Phase::Ready => "ready",
      Phase::Executing => "executing",
      Phase::Done => "done",
    };
    f.write_str(s)
  }
}

/// One-time routine that configures a definition.
pub trait BuildSetup {
  fn setup(&self, definition: &mut BuildDefinition) -> Result<(), BuildError>;
}

impl<F> BuildSetup for F
where
  F: Fn(&mut BuildDefinition) -> Result<(), BuildError>,
{
  fn setup(&self, definition: &mut BuildDefinition) -> Result<(), BuildError> {
    self(definition)
  }
}

/// Where the packaged artifact is written: `<dir>/<name>[-<classifier>].jar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSpec {
  /// Destination directory, relative to the base directory.
  pub dir: PathBuf,
  pub name: String,
  pub classifier: Option<String>,
}

impl ArtifactSpec {
  pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
    Self {
      dir: dir.into(),
      name: name.into(),
      classifier: None,
    }
  }

  pub fn file_name(&self) -> String {
    match &self.classifier {
      Some(classifier) => format!("{}-{}.jar", self.name, classifier),
      None => format!("{}.jar", self.name),
    }
  }
}

/// Top-level configuration object for one build run.
pub struct BuildDefinition {
  name: String,
  base_dir: PathBuf,
  phase: Cell<Phase>,
  running: RefCell<Option<String>>,
  artifacts: RefCell<Vec<PathBuf>>,
  registry: ModuleRegistry,
  pipeline: Pipeline,
  tasks: TaskTable,
  dependencies: DependencySet,
  manifest: ManifestAttributes,
  artifact: ArtifactSpec,
  output_dir: PathBuf,
  resolver: Rc<dyn DependencyResolver>,
}

impl BuildDefinition {
  /// A definition with the default stages and their tasks.
  pub fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
    let name = name.into();
    let mut pipeline = Pipeline::new();
    let mut tasks = TaskTable::new();

    for (stage, default, description) in stages::defaults() {
      let defined = pipeline.define_stage(stage, default);
      debug_assert!(defined.is_ok(), "built-in stage {stage} defined twice");
      let registered = tasks.register(stage, description, stages::run_stage_task(stage));
      debug_assert!(registered.is_ok(), "built-in task {stage} registered twice");
    }

    Self {
      artifact: ArtifactSpec::new(DEFAULT_OUTPUT_DIR, name.clone()),
      name,
      base_dir: base_dir.into(),
      phase: Cell::new(Phase::Constructed),
      running: RefCell::new(None),
      artifacts: RefCell::new(Vec::new()),
      registry: ModuleRegistry::with_defaults(),
      pipeline,
      tasks,
      dependencies: DependencySet::new(),
      manifest: ManifestAttributes::new(),
      output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
      resolver: Rc::new(MavenLocalResolver::default()),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn base_dir(&self) -> &Path {
    &self.base_dir
  }

  pub fn phase(&self) -> Phase {
    self.phase.get()
  }

  /// Run the one-time setup routine.
  ///
  /// On success the definition is `Ready`. On failure it stays `SettingUp`
  /// and refuses every dispatch.
  pub fn setup<S: BuildSetup + ?Sized>(&mut self, routine: &S) -> Result<(), BuildError> {
    if self.phase.get() != Phase::Constructed {
      return Err(BuildError::SetupAlreadyRun);
    }

    self.phase.set(Phase::SettingUp);
    debug!(definition = %self.name, "running setup");
    routine.setup(self)?;
    self.phase.set(Phase::Ready);

    info!(
      definition = %self.name,
      modules = self.registry.instantiated().len(),
      dependencies = self.dependencies.len(),
      "build definition ready"
    );
    Ok(())
  }

  fn ensure_setting_up(&self, operation: &'static str) -> Result<(), BuildError> {
    if self.phase.get() == Phase::SettingUp {
      Ok(())
    } else {
      Err(BuildError::ConfigurationFrozen { operation })
    }
  }

  // -- setup-only mutators --

  /// The module for `kind`, constructing it on first request.
  pub fn module(&mut self, kind: CapabilityKind) -> Result<ModuleHandle, BuildError> {
    self.ensure_setting_up("instantiate a capability module")?;
    self.registry.get(kind)
  }

  /// Mutate the typed configuration of capability `T`.
  pub fn configure<T: Capability, R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Result<R, BuildError> {
    self.ensure_setting_up("configure a capability module")?;
    self.registry.configure::<T, R>(f)
  }

  pub fn register_hook(
    &mut self,
    stage: &str,
    position: HookPosition,
    name: impl Into<String>,
    action: Action,
  ) -> Result<(), BuildError> {
    self.ensure_setting_up("register a hook")?;
    self.pipeline.register_hook(stage, position, name, action)
  }

  pub fn define_stage(&mut self, name: impl Into<String>, default: Action) -> Result<(), BuildError> {
    self.ensure_setting_up("define a stage")?;
    self.pipeline.define_stage(name, default)
  }

  pub fn register_task(
    &mut self,
    name: impl Into<String>,
    description: impl Into<String>,
    operation: Action,
  ) -> Result<(), BuildError> {
    self.ensure_setting_up("register a task")?;
    self.tasks.register(name, description, operation)
  }

  pub fn dependencies_mut(&mut self) -> Result<&mut DependencySet, BuildError> {
    self.ensure_setting_up("modify dependencies")?;
    Ok(&mut self.dependencies)
  }

  /// Parse and add a dependency coordinate.
  pub fn add_dependency(&mut self, scope: Scope, coordinate: &str) -> Result<bool, BuildError> {
    self.dependencies_mut()?.add_str(scope, coordinate)
  }

  pub fn manifest_mut(&mut self) -> Result<&mut ManifestAttributes, BuildError> {
    self.ensure_setting_up("modify manifest attributes")?;
    Ok(&mut self.manifest)
  }

  pub fn artifact_mut(&mut self) -> Result<&mut ArtifactSpec, BuildError> {
    self.ensure_setting_up("modify the artifact output")?;
    Ok(&mut self.artifact)
  }

  /// Set the output directory, relative to the base directory.
  ///
  /// The directory must name a strict descendant of the base directory:
  /// empty, absolute, `..`-containing and `.`-only paths are rejected. The
  /// artifact destination follows when it still points at the old output
  /// directory.
  pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), BuildError> {
    self.ensure_setting_up("change the output directory")?;
    let dir = dir.into();
    if let Some(reason) = output_dir_problem(&dir) {
      return Err(BuildError::InvalidOutputDir { path: dir, reason });
    }
    if self.artifact.dir == self.output_dir {
      self.artifact.dir = dir.clone();
    }
    self.output_dir = dir;
    Ok(())
  }

  pub fn set_resolver(&mut self, resolver: Rc<dyn DependencyResolver>) -> Result<(), BuildError> {
    self.ensure_setting_up("replace the dependency resolver")?;
    self.resolver = resolver;
    Ok(())
  }

  // -- read access --

  pub fn registry(&self) -> &ModuleRegistry {
    &self.registry
  }

  pub fn pipeline(&self) -> &Pipeline {
    &self.pipeline
  }

  pub fn tasks(&self) -> &TaskTable {
    &self.tasks
  }

  pub fn dependencies(&self) -> &DependencySet {
    &self.dependencies
  }

  pub fn manifest(&self) -> &ManifestAttributes {
    &self.manifest
  }

  pub fn artifact(&self) -> &ArtifactSpec {
    &self.artifact
  }

  pub fn resolver(&self) -> &dyn DependencyResolver {
    self.resolver.as_ref()
  }

  /// Absolute output directory.
  pub fn output_dir(&self) -> PathBuf {
    self.base_dir.join(&self.output_dir)
  }

  /// Directory compilers write class files to.
  pub fn classes_dir(&self) -> PathBuf {
    self.output_dir().join("classes")
  }

  /// Directory compiled test classes are written to.
  pub fn test_classes_dir(&self) -> PathBuf {
    self.output_dir().join("test-classes")
  }

  /// Absolute path of the packaged artifact.
  pub fn artifact_path(&self) -> PathBuf {
    self.base_dir.join(&self.artifact.dir).join(self.artifact.file_name())
  }

  /// Every artifact recorded across dispatches, in production order.
  pub fn artifacts(&self) -> Vec<PathBuf> {
    self.artifacts.borrow().clone()
  }

  /// Name of the task currently executing.
  pub fn running_task(&self) -> Option<String> {
    self.running.borrow().clone()
  }

  // -- dispatch support --

  pub(crate) fn record_artifact(&self, path: PathBuf) {
    self.artifacts.borrow_mut().push(path);
  }

  /// Fail unless a new task may start.
  pub(crate) fn ensure_dispatchable(&self, requested: &str) -> Result<(), BuildError> {
    match self.phase.get() {
      Phase::Ready | Phase::Done => Ok(()),
      Phase::Executing => Err(BuildError::TaskAlreadyRunning {
        running: self.running_task().unwrap_or_default(),
        requested: requested.to_string(),
      }),
      Phase::Constructed | Phase::SettingUp => Err(BuildError::SetupIncomplete),
    }
  }

  /// Enter `Executing`; the returned guard moves to `Done` when dropped.
  pub(crate) fn begin_execution(&self, task: &str) -> Execution<'_> {
    self.phase.set(Phase::Executing);
    *self.running.borrow_mut() = Some(task.to_string());
    Execution { definition: self }
  }
}

/// Marks a definition as executing for the guard's lifetime.
pub(crate) struct Execution<'a> {
  definition: &'a BuildDefinition,
}

impl Drop for Execution<'_> {
  fn drop(&mut self) {
    self.definition.running.borrow_mut().take();
    self.definition.phase.set(Phase::Done);
  }
}

impl fmt::Debug for BuildDefinition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BuildDefinition")
      .field("name", &self.name)
      .field("base_dir", &self.base_dir)
      .field("phase", &self.phase.get())
      .field("stages", &self.pipeline.stage_names())
      .field("tasks", &self.tasks.names())
      .field("dependencies", &self.dependencies)
      .finish_non_exhaustive()
  }
}
