//! Default actions of the built-in stages.

use std::fs;

use tracing::{debug, info};

use crate::capability::{JavaCompile, JavaTest};
use crate::compile;
use crate::context::ExecCtx;
use crate::deps::Scope;
use crate::error::BuildError;
use crate::exec::{Invocation, join_classpath};
use crate::pack;
use crate::pipeline::{Action, STAGE_CLEAN, STAGE_COMPILE, STAGE_PACK, STAGE_RUN, STAGE_TEST};

/// Built-in stages in pipeline order, with their task descriptions.
pub(super) fn defaults() -> Vec<(&'static str, Action, &'static str)> {
  vec![
    (STAGE_CLEAN, Box::new(clean) as Action, "Remove the output directory"),
    (STAGE_COMPILE, Box::new(compile::compile_java) as Action, "Compile main sources"),
    (STAGE_TEST, Box::new(test) as Action, "Compile, then compile and run the tests"),
    (STAGE_PACK, Box::new(pack_jar) as Action, "Test, then package the jar artifact"),
    (STAGE_RUN, Box::new(run) as Action, "Package, then run the Main-Class"),
  ]
}

/// Task operation that runs `stage`.
pub(super) fn run_stage_task(stage: &'static str) -> Action {
  Box::new(move |ctx| ctx.run_stage(stage))
}

fn clean(ctx: &mut ExecCtx<'_>) -> Result<(), BuildError> {
  let definition = ctx.definition();
  let output = definition.output_dir();
  if !output.exists() {
    debug!(path = %output.display(), "output directory absent, nothing to clean");
    return Ok(());
  }

  // Never remove the project itself, whatever the output path resolves to.
  let resolved = dunce::canonicalize(&output).map_err(|e| BuildError::io(&output, e))?;
  let base = dunce::canonicalize(definition.base_dir()).map_err(|e| BuildError::io(definition.base_dir(), e))?;
  if base.starts_with(&resolved) {
    return Err(BuildError::InvalidOutputDir {
      path: output,
      reason: "resolves to the project directory or one of its ancestors",
    });
  }

  info!(path = %output.display(), "removing output directory");
  fs::remove_dir_all(&output).map_err(|e| BuildError::io(&output, e))
}

fn test(ctx: &mut ExecCtx<'_>) -> Result<(), BuildError> {
  ctx.run_stage(STAGE_COMPILE)?;

  let definition = ctx.definition();
  let tests: JavaTest = ctx.module();
  let java: JavaCompile = ctx.module();
  let spec = compile::test_spec(definition, &tests, &java)?;

  let sources = spec.sources("java");
  if sources.is_empty() {
    info!("no test sources found, skipping tests");
    return Ok(());
  }
  compile::compile_tests(ctx, &spec, &sources)?;

  info!(launcher = %tests.launcher_main, "running tests");
  let mut invocation = Invocation::new(java.launcher)
    .arg("-cp")
    .arg(join_classpath(&spec.classpath))
    .arg(tests.launcher_main)
    .arg("--scan-class-path")
    .arg(spec.output_dir.to_string_lossy())
    .args(tests.options)
    .current_dir(definition.base_dir());
  for (key, value) in tests.env {
    invocation = invocation.env(key, value);
  }

  ctx.exec(&invocation)
}

fn pack_jar(ctx: &mut ExecCtx<'_>) -> Result<(), BuildError> {
  let tests: JavaTest = ctx.module();
  if tests.skip {
    info!("tests skipped");
    ctx.run_stage(STAGE_COMPILE)?;
  } else {
    ctx.run_stage(STAGE_TEST)?;
  }

  let artifact = pack::write_artifact(ctx.definition(), &ctx.module())?;
  ctx.record_artifact(artifact);
  Ok(())
}

fn run(ctx: &mut ExecCtx<'_>) -> Result<(), BuildError> {
  let definition = ctx.definition();
  let main_class = definition
    .manifest()
    .main_class()
    .ok_or(BuildError::MissingMainClass)?
    .to_string();

  ctx.run_stage(STAGE_PACK)?;

  let mut classpath = vec![definition.artifact_path()];
  classpath.extend(
    definition
      .resolver()
      .resolve(&definition.dependencies().classpath(Scope::Runtime))?,
  );

  let java: JavaCompile = ctx.module();
  let invocation = Invocation::new(java.launcher)
    .arg("-cp")
    .arg(join_classpath(&classpath))
    .arg(main_class)
    .current_dir(definition.base_dir());

  ctx.exec(&invocation)
}
