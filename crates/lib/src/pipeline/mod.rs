//! Build pipeline: ordered stages with extension points.
//!
//! Each stage has a default action and a list of hooks. Running a stage
//! executes, in order:
//!
//! 1. `before-default` hooks, in registration order
//! 2. the `replace-default` hook if one is registered, otherwise the default action
//! 3. `after-default` hooks, in registration order
//!
//! Actions may run other stages through the execution context. The context
//! tracks the stages in progress, so a stage reached again while it is still
//! running fails with [`BuildError::CyclicStageInvocation`] instead of
//! recursing forever.

mod types;

pub use types::*;

use tracing::{debug, info};

use crate::context::ExecCtx;
use crate::error::BuildError;

pub const STAGE_CLEAN: &str = "clean";
pub const STAGE_COMPILE: &str = "compile";
pub const STAGE_TEST: &str = "test";
pub const STAGE_PACK: &str = "pack";
pub const STAGE_RUN: &str = "run";

/// Ordered collection of stages.
#[derive(Debug, Default)]
pub struct Pipeline {
  stages: Vec<Stage>,
}

impl Pipeline {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a stage after the existing ones.
  pub fn define_stage(&mut self, name: impl Into<String>, default: Action) -> Result<(), BuildError> {
    let name = name.into();
    if self.stage(&name).is_some() {
      return Err(BuildError::DuplicateStage(name));
    }
    debug!(stage = %name, "defined stage");
    self.stages.push(Stage::new(name, default));
    Ok(())
  }

  /// Attach a hook to `stage`.
  ///
  /// A second `replace-default` hook on the same stage is rejected and the
  /// first one stays effective.
  pub fn register_hook(
    &mut self,
    stage: &str,
    position: HookPosition,
    name: impl Into<String>,
    action: Action,
  ) -> Result<(), BuildError> {
    let name = name.into();
    let target = self
      .stages
      .iter_mut()
      .find(|s| s.name == stage)
      .ok_or_else(|| BuildError::UnknownStage(stage.to_string()))?;

    if position == HookPosition::ReplaceDefault
      && let Some(existing) = target.replacement()
    {
      return Err(BuildError::ConflictingReplacement {
        stage: stage.to_string(),
        existing: existing.name.clone(),
        rejected: name,
      });
    }

    debug!(stage = %stage, hook = %name, position = %position, "registered hook");
    target.hooks.push(Hook { name, position, action });
    Ok(())
  }

  pub fn stage(&self, name: &str) -> Option<&Stage> {
    self.stages.iter().find(|s| s.name == name)
  }

  /// Stage names in definition order.
  pub fn stage_names(&self) -> Vec<&str> {
    self.stages.iter().map(|s| s.name.as_str()).collect()
  }

  /// Hook names of `stage` grouped by position.
  pub fn describe(&self, stage: &str) -> Result<StageHooks, BuildError> {
    let target = self.stage(stage).ok_or_else(|| BuildError::UnknownStage(stage.to_string()))?;
    let names = |position: HookPosition| target.hooks_at(position).map(|h| h.name.clone()).collect::<Vec<_>>();

    Ok(StageHooks {
      stage: target.name.clone(),
      before: names(HookPosition::BeforeDefault),
      replace: target.replacement().map(|h| h.name.clone()),
      after: names(HookPosition::AfterDefault),
    })
  }

  /// Run `stage` with its hooks on behalf of `ctx`.
  pub fn run(&self, stage: &str, ctx: &mut ExecCtx<'_>) -> Result<(), BuildError> {
    let target = self.stage(stage).ok_or_else(|| BuildError::UnknownStage(stage.to_string()))?;

    ctx.enter_stage(stage)?;
    let result = Self::execute(target, ctx);
    ctx.exit_stage();
    result
  }

  fn execute(stage: &Stage, ctx: &mut ExecCtx<'_>) -> Result<(), BuildError> {
    info!(stage = %stage.name, "running stage");

    for hook in stage.hooks_at(HookPosition::BeforeDefault) {
      debug!(stage = %stage.name, hook = %hook.name, "running before hook");
      (hook.action)(ctx)?;
    }

    match stage.replacement() {
      Some(hook) => {
        debug!(stage = %stage.name, hook = %hook.name, "running replacement");
        (hook.action)(ctx)?;
      }
      None => (stage.default)(ctx)?,
    }

    for hook in stage.hooks_at(HookPosition::AfterDefault) {
      debug!(stage = %stage.name, hook = %hook.name, "running after hook");
      (hook.action)(ctx)?;
    }

    Ok(())
  }
}
