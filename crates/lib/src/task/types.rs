use std::fmt;

use crate::error::BuildError;
use crate::pipeline::Action;

/// A named zero-argument operation on a build definition.
pub struct Task {
  pub name: String,
  pub description: String,
  pub(crate) operation: Action,
}

impl fmt::Debug for Task {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Task")
      .field("name", &self.name)
      .field("description", &self.description)
      .finish_non_exhaustive()
  }
}

/// Tasks of a definition, in registration order.
#[derive(Debug, Default)]
pub struct TaskTable {
  tasks: Vec<Task>,
}

impl TaskTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(
    &mut self,
    name: impl Into<String>,
    description: impl Into<String>,
    operation: Action,
  ) -> Result<(), BuildError> {
    let name = name.into();
    if self.get(&name).is_some() {
      return Err(BuildError::DuplicateTask(name));
    }
    self.tasks.push(Task {
      name,
      description: description.into(),
      operation,
    });
    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<&Task> {
    self.tasks.iter().find(|t| t.name == name)
  }

  pub fn names(&self) -> Vec<&str> {
    self.tasks.iter().map(|t| t.name.as_str()).collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Task> {
    self.tasks.iter()
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }
}
