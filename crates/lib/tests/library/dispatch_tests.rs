use jig_lib::task::EXIT_UNKNOWN_TASK;
use jig_lib::{BuildDefinition, BuildError, Phase, dispatch};

use super::common::{entries, new_log, ready, record};

#[test]
fn unknown_task_is_reported_with_non_zero_exit() {
  let definition = ready(|_| Ok(()));

  let err = dispatch("deploy-prod", &definition).unwrap_err();

  assert!(matches!(err.source, BuildError::UnknownTask(ref name) if name == "deploy-prod"));
  assert_eq!(err.exit_code(), EXIT_UNKNOWN_TASK);
  assert!(err.to_string().contains("deploy-prod"));
}

#[test]
fn dispatch_before_setup_is_refused() {
  let definition = BuildDefinition::new("demo", "/nonexistent/jig-tests");
  let err = dispatch("clean", &definition).unwrap_err();
  assert!(matches!(err.source, BuildError::SetupIncomplete));
  assert_eq!(definition.phase(), Phase::Constructed);
}

#[test]
fn failed_setup_leaves_definition_unusable() {
  let mut definition = BuildDefinition::new("demo", "/nonexistent/jig-tests");
  assert!(
    definition
      .setup(&|def: &mut BuildDefinition| def.define_stage("compile", Box::new(|_| Ok(()))))
      .is_err()
  );

  let err = dispatch("clean", &definition).unwrap_err();
  assert!(matches!(err.source, BuildError::SetupIncomplete));
}

#[test]
fn dispatching_from_inside_a_task_is_refused() {
  let definition = ready(|def| {
    def.register_task(
      "outer",
      "",
      Box::new(|ctx| match dispatch("clean", ctx.definition()) {
        Err(err) => Err(err.source),
        Ok(_) => Ok(()),
      }),
    )
  });

  let err = dispatch("outer", &definition).unwrap_err();

  assert!(matches!(
    err.source,
    BuildError::TaskAlreadyRunning { ref running, ref requested } if running == "outer" && requested == "clean"
  ));
  assert_eq!(definition.phase(), Phase::Done);
}

#[test]
fn composite_task_runs_parts_in_order() {
  let log = new_log();
  let definition = ready(|def| {
    def.register_task("lint", "", record(&log, "lint"))?;
    def.register_task("docs", "", record(&log, "docs"))?;
    def.register_task(
      "check",
      "",
      Box::new(|ctx| {
        ctx.invoke_task("lint")?;
        ctx.invoke_task("docs")
      }),
    )
  });

  let report = dispatch("check", &definition).unwrap();

  assert_eq!(report.task, "check");
  assert!(report.artifacts.is_empty());
  assert_eq!(entries(&log), vec!["lint", "docs"]);
}

#[test]
fn composite_task_stops_at_first_failure() {
  let log = new_log();
  let definition = ready(|def| {
    def.register_task("docs", "", record(&log, "docs"))?;
    def.register_task(
      "check",
      "",
      Box::new(|ctx| {
        ctx.invoke_task("missing")?;
        ctx.invoke_task("docs")
      }),
    )
  });

  let err = dispatch("check", &definition).unwrap_err();

  assert!(matches!(err.source, BuildError::UnknownTask(ref name) if name == "missing"));
  assert!(entries(&log).is_empty());
}
