//! Shared helpers for library integration tests.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use jig_lib::pipeline::Action;
use jig_lib::{BuildDefinition, BuildError};

/// Ordered record of side effects shared between hooks.
pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
  Rc::default()
}

/// An action that appends `entry` to `log`.
pub fn record(log: &Log, entry: &str) -> Action {
  let log = Rc::clone(log);
  let entry = entry.to_string();
  Box::new(move |_| {
    log.borrow_mut().push(entry.clone());
    Ok(())
  })
}

pub fn entries(log: &Log) -> Vec<String> {
  log.borrow().clone()
}

/// A definition rooted at `dir` with `routine` as its setup.
pub fn ready_at(
  dir: &Path,
  routine: impl Fn(&mut BuildDefinition) -> Result<(), BuildError>,
) -> BuildDefinition {
  let mut definition = BuildDefinition::new("demo", dir);
  definition.setup(&routine).unwrap();
  definition
}

/// A definition rooted at a directory that is never touched.
pub fn ready(routine: impl Fn(&mut BuildDefinition) -> Result<(), BuildError>) -> BuildDefinition {
  ready_at(Path::new("/nonexistent/jig-tests"), routine)
}
