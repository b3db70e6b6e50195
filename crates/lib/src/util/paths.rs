//! Checks on user-supplied project paths.

use std::path::{Component, Path};

/// Why `dir` cannot serve as an output directory, if it cannot.
///
/// An output directory is removed wholesale by `clean`, so it must name a
/// strict descendant of the project base directory.
pub fn output_dir_problem(dir: &Path) -> Option<&'static str> {
  if dir.as_os_str().is_empty() {
    return Some("must not be empty");
  }
  if dir.has_root() || dir.is_absolute() {
    return Some("must be relative to the project directory");
  }

  let mut named = false;
  for component in dir.components() {
    match component {
      Component::Normal(_) => named = true,
      Component::CurDir => {}
      Component::ParentDir => return Some("must not contain '..'"),
      Component::Prefix(_) | Component::RootDir => return Some("must be relative to the project directory"),
    }
  }

  if named { None } else { Some("must name a directory below the project directory") }
}
