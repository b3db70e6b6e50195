use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::ExecCtx;
use crate::error::BuildError;

/// An operation run as a stage default, a hook, or a task body.
pub type Action = Box<dyn Fn(&mut ExecCtx<'_>) -> Result<(), BuildError>>;

/// Where a hook runs relative to its stage's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookPosition {
  BeforeDefault,
  AfterDefault,
  /// Runs instead of the default action. At most one per stage.
  ReplaceDefault,
}

impl HookPosition {
  pub fn as_str(&self) -> &'static str {
    match self {
      HookPosition::BeforeDefault => "before-default",
      HookPosition::AfterDefault => "after-default",
      HookPosition::ReplaceDefault => "replace-default",
    }
  }
}

impl fmt::Display for HookPosition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for HookPosition {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "before-default" => Ok(HookPosition::BeforeDefault),
      "after-default" => Ok(HookPosition::AfterDefault),
      "replace-default" => Ok(HookPosition::ReplaceDefault),
      other => Err(format!("unknown hook position: {other}")),
    }
  }
}

/// A named operation attached to a stage.
pub struct Hook {
  pub name: String,
  pub position: HookPosition,
  pub action: Action,
}

impl fmt::Debug for Hook {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Hook")
      .field("name", &self.name)
      .field("position", &self.position)
      .finish_non_exhaustive()
  }
}

/// A named, hookable unit of build work.
pub struct Stage {
  pub name: String,
  pub(crate) default: Action,
  /// Hooks in registration order.
  pub(crate) hooks: Vec<Hook>,
}

impl Stage {
  pub fn new(name: impl Into<String>, default: Action) -> Self {
    Self {
      name: name.into(),
      default,
      hooks: Vec::new(),
    }
  }

  /// Hooks at `position`, in registration order.
  pub fn hooks_at(&self, position: HookPosition) -> impl Iterator<Item = &Hook> {
    self.hooks.iter().filter(move |hook| hook.position == position)
  }

  /// The effective replacement, if any.
  pub fn replacement(&self) -> Option<&Hook> {
    self.hooks_at(HookPosition::ReplaceDefault).next()
  }
}

impl fmt::Debug for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Stage")
      .field("name", &self.name)
      .field("hooks", &self.hooks)
      .finish_non_exhaustive()
  }
}

/// Hook names of one stage grouped by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageHooks {
  pub stage: String,
  pub before: Vec<String>,
  pub replace: Option<String>,
  pub after: Vec<String>,
}
