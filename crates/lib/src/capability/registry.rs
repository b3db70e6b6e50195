use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use super::{Capability, CapabilityKind, CapabilityModule};
use crate::error::BuildError;

/// Shared handle to a module owned by a [`ModuleRegistry`].
///
/// Every handle for a kind points at the same instance, so a hook that
/// captured a handle during setup sees configuration applied later through
/// another handle.
pub type ModuleHandle = Rc<RefCell<CapabilityModule>>;

/// Builds a module with its kind's default configuration.
pub type Constructor = fn() -> CapabilityModule;

/// Registry of capability modules for one build run.
///
/// Modules are constructed lazily on first request and cached, so at most one
/// instance per kind exists for the lifetime of the registry.
#[derive(Default)]
pub struct ModuleRegistry {
  constructors: HashMap<CapabilityKind, Constructor>,
  modules: HashMap<CapabilityKind, ModuleHandle>,
}

impl ModuleRegistry {
  /// An empty registry with no constructors.
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry with a constructor for every built-in kind.
  pub fn with_defaults() -> Self {
    let mut registry = Self::new();
    registry.register(CapabilityKind::JavaCompile, || {
      CapabilityModule::default_for(CapabilityKind::JavaCompile)
    });
    registry.register(CapabilityKind::KotlinCompile, || {
      CapabilityModule::default_for(CapabilityKind::KotlinCompile)
    });
    registry.register(CapabilityKind::JavaTest, || {
      CapabilityModule::default_for(CapabilityKind::JavaTest)
    });
    registry.register(CapabilityKind::Packaging, || {
      CapabilityModule::default_for(CapabilityKind::Packaging)
    });
    registry.register(CapabilityKind::Scaffold, || {
      CapabilityModule::default_for(CapabilityKind::Scaffold)
    });
    registry.register(CapabilityKind::IdeMetadata, || {
      CapabilityModule::default_for(CapabilityKind::IdeMetadata)
    });
    registry
  }

  /// Register (or replace) the constructor for `kind`.
  ///
  /// Replacing a constructor does not affect an instance that was already built.
  pub fn register(&mut self, kind: CapabilityKind, constructor: Constructor) {
    self.constructors.insert(kind, constructor);
  }

  /// Get the module for `kind`, constructing it on first request.
  pub fn get(&mut self, kind: CapabilityKind) -> Result<ModuleHandle, BuildError> {
    if let Some(handle) = self.modules.get(&kind) {
      return Ok(Rc::clone(handle));
    }

    let constructor = self
      .constructors
      .get(&kind)
      .ok_or_else(|| BuildError::UnknownCapabilityKind(kind.to_string()))?;

    let module = constructor();
    debug_assert_eq!(module.kind(), kind, "constructor built the wrong module kind");
    debug!(kind = %kind, "instantiated capability module");

    let handle = Rc::new(RefCell::new(module));
    self.modules.insert(kind, Rc::clone(&handle));
    Ok(handle)
  }

  /// Same as [`get`](Self::get), parsing the kind from its tag.
  pub fn get_by_name(&mut self, name: &str) -> Result<ModuleHandle, BuildError> {
    let kind = name.parse::<CapabilityKind>()?;
    self.get(kind)
  }

  /// The already-instantiated module for `kind`, without constructing one.
  pub fn lookup(&self, kind: CapabilityKind) -> Option<ModuleHandle> {
    self.modules.get(&kind).map(Rc::clone)
  }

  /// Mutate the typed configuration of `T`, constructing the module if needed.
  pub fn configure<T: Capability, R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Result<R, BuildError> {
    let handle = self.get(T::KIND)?;
    let mut module = handle.borrow_mut();
    let typed = T::from_module_mut(&mut module).ok_or_else(|| BuildError::UnknownCapabilityKind(T::KIND.to_string()))?;
    Ok(f(typed))
  }

  /// Read the typed configuration of `T` if the module was instantiated.
  pub fn read<T: Capability, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
    let handle = self.modules.get(&T::KIND)?;
    let module = handle.borrow();
    T::from_module(&module).map(f)
  }

  /// Instantiated kinds, sorted.
  pub fn instantiated(&self) -> Vec<CapabilityKind> {
    let mut kinds: Vec<_> = self.modules.keys().copied().collect();
    kinds.sort();
    kinds
  }
}
