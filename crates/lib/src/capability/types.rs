use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{IdeMetadata, JavaCompile, JavaTest, KotlinCompile, Packaging, Scaffold};
use crate::error::BuildError;

/// Tag identifying one capability a build definition can compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
  JavaCompile,
  KotlinCompile,
  JavaTest,
  Packaging,
  Scaffold,
  IdeMetadata,
}

impl CapabilityKind {
  /// All built-in kinds, in registration order.
  pub const ALL: [CapabilityKind; 6] = [
    CapabilityKind::JavaCompile,
    CapabilityKind::KotlinCompile,
    CapabilityKind::JavaTest,
    CapabilityKind::Packaging,
    CapabilityKind::Scaffold,
    CapabilityKind::IdeMetadata,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      CapabilityKind::JavaCompile => "java-compile",
      CapabilityKind::KotlinCompile => "kotlin-compile",
      CapabilityKind::JavaTest => "java-test",
      CapabilityKind::Packaging => "packaging",
      CapabilityKind::Scaffold => "scaffold",
      CapabilityKind::IdeMetadata => "ide-metadata",
    }
  }
}

impl fmt::Display for CapabilityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for CapabilityKind {
  type Err = BuildError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    CapabilityKind::ALL
      .into_iter()
      .find(|kind| kind.as_str() == s)
      .ok_or_else(|| BuildError::UnknownCapabilityKind(s.to_string()))
  }
}

/// A capability module instance: the kind tag plus its module-local configuration.
///
/// Modules are plain configuration holders. The work they describe is carried
/// out by stage actions and hooks that read the configuration at run time.
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityModule {
  JavaCompile(JavaCompile),
  KotlinCompile(KotlinCompile),
  JavaTest(JavaTest),
  Packaging(Packaging),
  Scaffold(Scaffold),
  IdeMetadata(IdeMetadata),
}

impl CapabilityModule {
  /// Build a module of `kind` with that kind's default configuration.
  pub fn default_for(kind: CapabilityKind) -> Self {
    match kind {
      CapabilityKind::JavaCompile => CapabilityModule::JavaCompile(JavaCompile::default()),
      CapabilityKind::KotlinCompile => CapabilityModule::KotlinCompile(KotlinCompile::default()),
      CapabilityKind::JavaTest => CapabilityModule::JavaTest(JavaTest::default()),
      CapabilityKind::Packaging => CapabilityModule::Packaging(Packaging::default()),
      CapabilityKind::Scaffold => CapabilityModule::Scaffold(Scaffold::default()),
      CapabilityKind::IdeMetadata => CapabilityModule::IdeMetadata(IdeMetadata::default()),
    }
  }

  pub fn kind(&self) -> CapabilityKind {
    match self {
      CapabilityModule::JavaCompile(_) => CapabilityKind::JavaCompile,
      CapabilityModule::KotlinCompile(_) => CapabilityKind::KotlinCompile,
      CapabilityModule::JavaTest(_) => CapabilityKind::JavaTest,
      CapabilityModule::Packaging(_) => CapabilityKind::Packaging,
      CapabilityModule::Scaffold(_) => CapabilityKind::Scaffold,
      CapabilityModule::IdeMetadata(_) => CapabilityKind::IdeMetadata,
    }
  }
}

/// Typed access to one variant of [`CapabilityModule`].
///
/// Lets callers write `registry.configure::<JavaCompile, _>(..)` instead of
/// matching on the variant at every use site.
pub trait Capability: Clone + Default + Sized + 'static {
  const KIND: CapabilityKind;

  fn from_module(module: &CapabilityModule) -> Option<&Self>;

  fn from_module_mut(module: &mut CapabilityModule) -> Option<&mut Self>;
}

macro_rules! impl_capability {
  ($ty:ident) => {
    impl Capability for $ty {
      const KIND: CapabilityKind = CapabilityKind::$ty;

      fn from_module(module: &CapabilityModule) -> Option<&Self> {
        match module {
          CapabilityModule::$ty(inner) => Some(inner),
          _ => None,
        }
      }

      fn from_module_mut(module: &mut CapabilityModule) -> Option<&mut Self> {
        match module {
          CapabilityModule::$ty(inner) => Some(inner),
          _ => None,
        }
      }
    }
  };
}

impl_capability!(JavaCompile);
impl_capability!(KotlinCompile);
impl_capability!(JavaTest);
impl_capability!(Packaging);
impl_capability!(Scaffold);
impl_capability!(IdeMetadata);
