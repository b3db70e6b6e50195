use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use super::{Capability, CapabilityKind};
use crate::compile;
use crate::definition::BuildDefinition;
use crate::deps::{Coordinate, Scope};
use crate::error::BuildError;
use crate::pipeline::{HookPosition, STAGE_COMPILE};

/// Name of the hook [`KotlinCompile::install`] registers on the compile stage.
pub const KOTLIN_COMPILE_HOOK: &str = "kotlin-sources-compile";

/// Configuration of the `kotlin-compile` capability.
///
/// The JVM target is shared with `java-compile` so both compilers emit the
/// same class file version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KotlinCompile {
  /// Kotlin toolchain version; selects the stdlib coordinate.
  pub version: Option<String>,
  pub source_roots: Vec<PathBuf>,
  pub compiler: String,
  /// Compiler plugin jars or identifiers, passed as `-Xplugin=<id>`.
  pub plugins: Vec<String>,
  pub options: Vec<String>,
  /// Add `kotlin-stdlib` to the compile scope on install.
  pub add_stdlib: bool,
}

impl Default for KotlinCompile {
  fn default() -> Self {
    Self {
      version: None,
      source_roots: vec![PathBuf::from("src/main/kotlin")],
      compiler: "kotlinc".to_string(),
      plugins: Vec::new(),
      options: Vec::new(),
      add_stdlib: true,
    }
  }
}

impl KotlinCompile {
  /// `org.jetbrains.kotlin:kotlin-stdlib:<version>` when a version is configured.
  ///
  /// A version that does not form a valid coordinate, such as an empty one,
  /// is an [`BuildError::InvalidCoordinate`].
  pub fn stdlib_coordinate(&self) -> Result<Option<Coordinate>, BuildError> {
    self
      .version
      .as_ref()
      .map(|version| format!("org.jetbrains.kotlin:kotlin-stdlib:{version}").parse())
      .transpose()
  }

  /// Wire Kotlin compilation into `definition`.
  ///
  /// Registers a `before-default` hook on the compile stage so Kotlin classes
  /// exist before `javac` runs against them. The hook holds the shared module
  /// handle and reads its configuration when the stage runs. The stdlib
  /// dependency is derived from the version configured at install time.
  pub fn install(definition: &mut BuildDefinition) -> Result<(), BuildError> {
    let handle = definition.module(CapabilityKind::KotlinCompile)?;

    let stdlib = {
      let module = handle.borrow();
      match KotlinCompile::from_module(&module) {
        Some(kotlin) if kotlin.add_stdlib => kotlin.stdlib_coordinate()?,
        _ => None,
      }
    };
    if let Some(coordinate) = stdlib {
      debug!(coordinate = %coordinate, "adding kotlin stdlib");
      definition.dependencies_mut()?.add(Scope::Compile, coordinate);
    }

    definition.register_hook(
      STAGE_COMPILE,
      HookPosition::BeforeDefault,
      KOTLIN_COMPILE_HOOK,
      Box::new(move |ctx| {
        let kotlin = {
          let module = handle.borrow();
          KotlinCompile::from_module(&module).cloned().unwrap_or_default()
        };
        compile::compile_kotlin(ctx, &kotlin)
      }),
    )
  }
}
