use std::path::PathBuf;

use tracing::warn;

use super::Coordinate;
use crate::error::BuildError;

/// Turns ordered coordinates into classpath entries.
///
/// Version conflict handling and transitive resolution belong to the
/// implementation; callers only rely on the returned order matching the
/// precedence of the input order.
pub trait DependencyResolver {
  fn resolve(&self, coordinates: &[Coordinate]) -> Result<Vec<PathBuf>, BuildError>;
}

/// Maps coordinates onto jars of a local Maven-layout repository.
///
/// No download and no transitive resolution: each coordinate becomes exactly
/// one `<repo>/<group as path>/<artifact>/<version>/<jar>` entry. Missing jars
/// are reported but still returned, leaving the compiler to fail on them.
#[derive(Debug, Clone)]
pub struct MavenLocalResolver {
  repository: PathBuf,
}

impl MavenLocalResolver {
  pub fn new(repository: impl Into<PathBuf>) -> Self {
    Self {
      repository: repository.into(),
    }
  }

  pub fn repository(&self) -> &std::path::Path {
    &self.repository
  }

  /// Repository path of the jar for `coordinate`.
  pub fn jar_path(&self, coordinate: &Coordinate) -> PathBuf {
    let mut path = self.repository.clone();
    for segment in coordinate.group.split('.') {
      path.push(segment);
    }
    path.push(&coordinate.artifact);
    path.push(&coordinate.version);
    path.push(coordinate.jar_name());
    path
  }
}

impl Default for MavenLocalResolver {
  /// `~/.m2/repository`, falling back to a relative `.m2/repository`.
  fn default() -> Self {
    let home = dirs::home_dir().unwrap_or_default();
    Self::new(home.join(".m2").join("repository"))
  }
}

impl DependencyResolver for MavenLocalResolver {
  fn resolve(&self, coordinates: &[Coordinate]) -> Result<Vec<PathBuf>, BuildError> {
    Ok(
      coordinates
        .iter()
        .map(|coordinate| {
          let path = self.jar_path(coordinate);
          if !path.exists() {
            warn!(coordinate = %coordinate, path = %path.display(), "dependency jar not found in local repository");
          }
          path
        })
        .collect(),
    )
  }
}
