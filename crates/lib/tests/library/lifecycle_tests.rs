use std::rc::Rc;

use jig_lib::capability::{CapabilityKind, JavaCompile, KotlinCompile};
use jig_lib::deps::{Coordinate, DependencySet, Scope};
use jig_lib::{BuildDefinition, BuildError, Phase};

use super::common::ready;

#[test]
fn module_handles_are_the_same_instance() {
  let mut definition = BuildDefinition::new("demo", "/nonexistent/jig-tests");
  definition
    .setup(&|def: &mut BuildDefinition| -> Result<(), BuildError> {
      for kind in CapabilityKind::ALL {
        let first = def.module(kind)?;
        let second = def.module(kind)?;
        assert!(Rc::ptr_eq(&first, &second), "{kind} was constructed twice");
      }
      Ok(())
    })
    .unwrap();

  assert_eq!(definition.registry().instantiated().len(), CapabilityKind::ALL.len());
}

#[test]
fn configuration_is_shared_through_handles() {
  let definition = ready(|def| {
    let handle = def.module(CapabilityKind::KotlinCompile)?;
    def.configure::<KotlinCompile, _>(|kotlin| kotlin.version = Some("2.0.0".to_string()))?;

    let module = handle.borrow();
    let kotlin = <KotlinCompile as jig_lib::capability::Capability>::from_module(&module).unwrap();
    assert_eq!(kotlin.version.as_deref(), Some("2.0.0"));
    Ok(())
  });

  assert_eq!(
    definition
      .registry()
      .read::<KotlinCompile, _>(|kotlin| kotlin.version.clone())
      .flatten()
      .as_deref(),
    Some("2.0.0")
  );
}

#[test]
fn second_setup_fails() {
  let mut definition = ready(|_| Ok(()));

  let err = definition
    .setup(&|_: &mut BuildDefinition| -> Result<(), BuildError> { Ok(()) })
    .unwrap_err();

  assert!(matches!(err, BuildError::SetupAlreadyRun));
  assert_eq!(definition.phase(), Phase::Ready);
}

#[test]
fn dependency_mutation_after_ready_is_rejected() {
  let mut definition = ready(|def| def.add_dependency(Scope::Compile, "g:a:1").map(|_| ()));

  let err = definition.add_dependency(Scope::Compile, "g:b:1").unwrap_err();

  assert!(matches!(err, BuildError::ConfigurationFrozen { .. }));
  assert_eq!(definition.dependencies().scope(Scope::Compile).len(), 1);
}

#[test]
fn hook_registration_after_ready_is_rejected() {
  let mut definition = ready(|_| Ok(()));

  let err = definition
    .register_hook(
      "compile",
      jig_lib::pipeline::HookPosition::AfterDefault,
      "late",
      Box::new(|_| Ok(())),
    )
    .unwrap_err();

  assert!(matches!(err, BuildError::ConfigurationFrozen { .. }));
  assert!(definition.pipeline().describe("compile").unwrap().after.is_empty());
}

#[test]
fn module_configuration_after_ready_is_rejected() {
  let mut definition = ready(|_| Ok(()));
  assert!(matches!(
    definition.configure::<JavaCompile, _>(|java| java.target_version = "8".to_string()),
    Err(BuildError::ConfigurationFrozen { .. })
  ));
}

#[test]
fn merge_appends_in_order() {
  let mut deps = DependencySet::new();
  deps.add_str(Scope::Compile, "g:a:1").unwrap();
  deps.add_str(Scope::Compile, "g:b:1").unwrap();

  let mut more = DependencySet::new();
  more.add_str(Scope::Compile, "g:c:1").unwrap();
  deps.merge(&more);

  let names: Vec<String> = deps.scope(Scope::Compile).iter().map(Coordinate::to_string).collect();
  assert_eq!(names, vec!["g:a:1", "g:b:1", "g:c:1"]);
}
