//! Compile specifications and toolchain invocation.
//!
//! A [`CompileSpec`] is the value handed to a compiler: output directory,
//! target version, ordered source roots, ordered plugin identifiers,
//! classpath and extra options. It renders into `javac` and `kotlinc`
//! argument lists; the compilers themselves are external programs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::capability::{JavaCompile, JavaTest, KotlinCompile};
use crate::context::ExecCtx;
use crate::definition::BuildDefinition;
use crate::deps::Scope;
use crate::error::BuildError;
use crate::exec::{Invocation, join_classpath};

/// Everything a compiler needs for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileSpec {
  pub output_dir: PathBuf,
  pub target_version: String,
  pub source_roots: Vec<PathBuf>,
  pub plugins: Vec<String>,
  pub classpath: Vec<PathBuf>,
  pub options: Vec<String>,
}

impl CompileSpec {
  pub fn new(output_dir: impl Into<PathBuf>, target_version: impl Into<String>) -> Self {
    Self {
      output_dir: output_dir.into(),
      target_version: target_version.into(),
      ..Self::default()
    }
  }

  pub fn source_roots<I, P>(mut self, roots: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    self.source_roots.extend(roots.into_iter().map(Into::into));
    self
  }

  pub fn plugins<I, S>(mut self, plugins: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.plugins.extend(plugins.into_iter().map(Into::into));
    self
  }

  pub fn classpath<I, P>(mut self, entries: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    self.classpath.extend(entries.into_iter().map(Into::into));
    self
  }

  pub fn options<I, S>(mut self, options: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.options.extend(options.into_iter().map(Into::into));
    self
  }

  /// Source files with `extension` under the source roots.
  ///
  /// Roots are visited in order and files within a root are sorted, so the
  /// compiler sees a stable argument list. Missing roots are skipped.
  pub fn sources(&self, extension: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in &self.source_roots {
      if !root.is_dir() {
        debug!(root = %root.display(), "source root missing, skipping");
        continue;
      }
      let mut found: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect();
      found.sort();
      files.extend(found);
    }
    files
  }

  /// `javac` arguments for `sources`.
  pub fn javac_args(&self, sources: &[PathBuf]) -> Vec<String> {
    let mut args = vec![
      "-d".to_string(),
      display(&self.output_dir),
      "--release".to_string(),
      self.target_version.clone(),
    ];
    if !self.classpath.is_empty() {
      args.push("-cp".to_string());
      args.push(join_classpath(&self.classpath));
    }
    args.extend(self.plugins.iter().map(|plugin| format!("-Xplugin:{plugin}")));
    args.extend(self.options.iter().cloned());
    args.extend(sources.iter().map(|s| display(s)));
    args
  }

  /// `kotlinc` arguments for `sources`.
  pub fn kotlinc_args(&self, sources: &[PathBuf]) -> Vec<String> {
    let mut args = vec![
      "-d".to_string(),
      display(&self.output_dir),
      "-jvm-target".to_string(),
      self.target_version.clone(),
    ];
    if !self.classpath.is_empty() {
      args.push("-cp".to_string());
      args.push(join_classpath(&self.classpath));
    }
    args.extend(self.plugins.iter().map(|plugin| format!("-Xplugin={plugin}")));
    args.extend(self.options.iter().cloned());
    args.extend(sources.iter().map(|s| display(s)));
    args
  }
}

fn display(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}

/// Resolved compile-scope classpath of `definition`.
fn compile_classpath(definition: &BuildDefinition) -> Result<Vec<PathBuf>, BuildError> {
  let coordinates = definition.dependencies().classpath(Scope::Compile);
  definition.resolver().resolve(&coordinates)
}

/// Compile spec for the `java-compile` module.
///
/// The classes directory leads the classpath so Java sources can reference
/// classes compiled earlier in the same stage.
pub fn java_spec(definition: &BuildDefinition, java: &JavaCompile) -> Result<CompileSpec, BuildError> {
  let base = definition.base_dir();
  let classes = definition.classes_dir();
  Ok(
    CompileSpec::new(&classes, &java.target_version)
      .source_roots(java.source_roots.iter().map(|root| base.join(root)))
      .plugins(java.plugins.iter().cloned())
      .classpath(std::iter::once(classes.clone()).chain(compile_classpath(definition)?))
      .options(java.options.iter().cloned()),
  )
}

/// Compile spec for the `kotlin-compile` module, targeting the Java release.
pub fn kotlin_spec(
  definition: &BuildDefinition,
  kotlin: &KotlinCompile,
  java: &JavaCompile,
) -> Result<CompileSpec, BuildError> {
  let base = definition.base_dir();
  Ok(
    CompileSpec::new(definition.classes_dir(), &java.target_version)
      .source_roots(kotlin.source_roots.iter().map(|root| base.join(root)))
      .plugins(kotlin.plugins.iter().cloned())
      .classpath(compile_classpath(definition)?)
      .options(kotlin.options.iter().cloned()),
  )
}

/// Compile spec for test sources.
///
/// Tests compile into the test classes directory against the main classes and
/// the effective `test` classpath. The same classpath, led by the test
/// classes, is what the test launcher runs with.
pub fn test_spec(
  definition: &BuildDefinition,
  tests: &JavaTest,
  java: &JavaCompile,
) -> Result<CompileSpec, BuildError> {
  let base = definition.base_dir();
  let test_classes = definition.test_classes_dir();
  let resolved = definition
    .resolver()
    .resolve(&definition.dependencies().classpath(Scope::Test))?;
  Ok(
    CompileSpec::new(&test_classes, &java.target_version)
      .source_roots(tests.source_roots.iter().map(|root| base.join(root)))
      .classpath([test_classes.clone(), definition.classes_dir()])
      .classpath(resolved)
      .options(java.options.iter().cloned()),
  )
}

fn create_output(spec: &CompileSpec) -> Result<(), BuildError> {
  fs::create_dir_all(&spec.output_dir).map_err(|e| BuildError::io(&spec.output_dir, e))
}

/// Default action of the compile stage: run `javac` over the Java sources.
pub fn compile_java(ctx: &mut ExecCtx<'_>) -> Result<(), BuildError> {
  let definition = ctx.definition();
  let java: JavaCompile = ctx.module();
  let spec = java_spec(definition, &java)?;

  let sources = spec.sources("java");
  if sources.is_empty() {
    info!("no java sources found, skipping javac");
    return Ok(());
  }

  create_output(&spec)?;
  info!(sources = sources.len(), release = %spec.target_version, "compiling java sources");
  let invocation = Invocation::new(&java.compiler)
    .args(spec.javac_args(&sources))
    .current_dir(definition.base_dir());
  ctx.exec(&invocation)?;
  Ok(())
}

/// Run `javac` over the test sources described by `spec`.
pub fn compile_tests(ctx: &ExecCtx<'_>, spec: &CompileSpec, sources: &[PathBuf]) -> Result<(), BuildError> {
  let java: JavaCompile = ctx.module();
  create_output(spec)?;
  info!(sources = sources.len(), release = %spec.target_version, "compiling test sources");
  let invocation = Invocation::new(&java.compiler)
    .args(spec.javac_args(sources))
    .current_dir(ctx.definition().base_dir());
  ctx.exec(&invocation)
}

/// Run `kotlinc` over the Kotlin sources.
///
/// Java source roots are passed along so Kotlin code can reference Java
/// declarations that `javac` compiles afterwards.
pub fn compile_kotlin(ctx: &mut ExecCtx<'_>, kotlin: &KotlinCompile) -> Result<(), BuildError> {
  let definition = ctx.definition();
  let java: JavaCompile = ctx.module();
  let spec = kotlin_spec(definition, kotlin, &java)?;

  let sources = spec.sources("kt");
  if sources.is_empty() {
    info!("no kotlin sources found, skipping kotlinc");
    return Ok(());
  }

  let java_roots: Vec<PathBuf> = java
    .source_roots
    .iter()
    .map(|root| definition.base_dir().join(root))
    .filter(|root| root.is_dir())
    .collect();

  create_output(&spec)?;
  info!(sources = sources.len(), jvm_target = %spec.target_version, "compiling kotlin sources");
  let invocation = Invocation::new(&kotlin.compiler)
    .args(spec.kotlinc_args(&sources))
    .args(java_roots.iter().map(|root| display(root)))
    .current_dir(definition.base_dir());
  ctx.exec(&invocation)?;
  Ok(())
}
