use jig_lib::pipeline::{HookPosition, STAGE_CLEAN, STAGE_PACK};
use jig_lib::{BuildDefinition, BuildError, dispatch};

use super::common::{entries, new_log, ready, record};

/// Defines a `verify` stage with a logging default and a matching task.
fn with_verify_stage(def: &mut BuildDefinition, log: &super::common::Log) -> Result<(), BuildError> {
  def.define_stage("verify", record(log, "default"))?;
  def.register_task("verify", "run the verify stage", Box::new(|ctx| ctx.run_stage("verify")))
}

#[test]
fn hooks_run_around_default_in_registration_order() {
  let log = new_log();
  let definition = ready(|def| {
    with_verify_stage(def, &log)?;
    def.register_hook("verify", HookPosition::BeforeDefault, "b1", record(&log, "b1"))?;
    def.register_hook("verify", HookPosition::AfterDefault, "a1", record(&log, "a1"))?;
    def.register_hook("verify", HookPosition::BeforeDefault, "b2", record(&log, "b2"))?;
    def.register_hook("verify", HookPosition::AfterDefault, "a2", record(&log, "a2"))
  });

  dispatch("verify", &definition).unwrap();

  assert_eq!(entries(&log), vec!["b1", "b2", "default", "a1", "a2"]);
}

#[test]
fn replacement_suppresses_default_and_second_is_rejected() {
  let log = new_log();
  let definition = ready(|def| {
    with_verify_stage(def, &log)?;
    def.register_hook("verify", HookPosition::ReplaceDefault, "r1", record(&log, "r1"))?;

    let err = def
      .register_hook("verify", HookPosition::ReplaceDefault, "r2", record(&log, "r2"))
      .unwrap_err();
    assert!(matches!(err, BuildError::ConflictingReplacement { .. }));
    Ok(())
  });

  dispatch("verify", &definition).unwrap();

  assert_eq!(entries(&log), vec!["r1"]);
}

#[test]
fn hook_on_unknown_stage_fails_setup() {
  let mut definition = BuildDefinition::new("demo", "/nonexistent/jig-tests");
  let log = new_log();

  let err = definition
    .setup(&|def: &mut BuildDefinition| def.register_hook("lint", HookPosition::AfterDefault, "x", record(&log, "x")))
    .unwrap_err();

  assert!(matches!(err, BuildError::UnknownStage(ref stage) if stage == "lint"));
}

#[test]
fn self_invoking_hook_is_cyclic() {
  let definition = ready(|def| {
    def.register_hook(
      STAGE_PACK,
      HookPosition::BeforeDefault,
      "repack",
      Box::new(|ctx| ctx.run_stage(STAGE_PACK)),
    )
  });

  let err = dispatch("pack", &definition).unwrap_err();
  assert_ne!(err.exit_code(), 0);

  match err.source {
    BuildError::CyclicStageInvocation { stage, chain } => {
      assert_eq!(stage, "pack");
      assert_eq!(chain, vec!["pack", "pack"]);
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn transitive_cycle_reports_full_chain() {
  let log = new_log();
  let definition = ready(|def| {
    with_verify_stage(def, &log)?;
    def.define_stage("lint", Box::new(|ctx| ctx.run_stage("verify")))?;
    def.register_hook(
      "verify",
      HookPosition::AfterDefault,
      "lint-after-verify",
      Box::new(|ctx| ctx.run_stage("lint")),
    )
  });

  let err = dispatch("verify", &definition).unwrap_err();

  assert!(matches!(
    err.source,
    BuildError::CyclicStageInvocation { ref chain, .. } if chain == &["verify", "lint", "verify"]
  ));
}

#[test]
fn cross_stage_hook_completes_before_continuing() {
  let log = new_log();
  let definition = ready(|def| {
    with_verify_stage(def, &log)?;
    def.register_hook(STAGE_CLEAN, HookPosition::AfterDefault, "log-clean", record(&log, "clean"))?;

    let inner = std::rc::Rc::clone(&log);
    def.register_hook(
      "verify",
      HookPosition::BeforeDefault,
      "clean-first",
      Box::new(move |ctx| {
        ctx.run_stage(STAGE_CLEAN)?;
        inner.borrow_mut().push("after-clean".to_string());
        Ok(())
      }),
    )
  });

  dispatch("verify", &definition).unwrap();

  assert_eq!(entries(&log), vec!["clean", "after-clean", "default"]);
}

#[test]
fn same_stage_may_run_twice_sequentially() {
  let log = new_log();
  let definition = ready(|def| {
    with_verify_stage(def, &log)?;
    def.register_task(
      "verify-twice",
      "",
      Box::new(|ctx| {
        ctx.run_stage("verify")?;
        ctx.run_stage("verify")
      }),
    )
  });

  dispatch("verify-twice", &definition).unwrap();

  assert_eq!(entries(&log), vec!["default", "default"]);
}
