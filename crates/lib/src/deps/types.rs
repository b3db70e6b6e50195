use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Dependency scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
  /// Needed to compile and run main code.
  Compile,
  /// Needed only to compile and run tests.
  Test,
  /// Needed at run time but not to compile.
  Runtime,
}

impl Scope {
  pub const ALL: [Scope; 3] = [Scope::Compile, Scope::Test, Scope::Runtime];

  pub fn as_str(&self) -> &'static str {
    match self {
      Scope::Compile => "compile",
      Scope::Test => "test",
      Scope::Runtime => "runtime",
    }
  }
}

impl fmt::Display for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A `group:artifact:version[:classifier]` module coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
  pub group: String,
  pub artifact: String,
  pub version: String,
  pub classifier: Option<String>,
}

impl Coordinate {
  /// `group:artifact`, the part that identifies the module regardless of version.
  pub fn module_id(&self) -> String {
    format!("{}:{}", self.group, self.artifact)
  }

  /// File name of the jar in a Maven-layout repository.
  pub fn jar_name(&self) -> String {
    match &self.classifier {
      Some(classifier) => format!("{}-{}-{}.jar", self.artifact, self.version, classifier),
      None => format!("{}-{}.jar", self.artifact, self.version),
    }
  }
}

impl FromStr for Coordinate {
  type Err = BuildError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    if !(3..=4).contains(&parts.len()) || parts.iter().any(|p| p.is_empty() || p.contains(char::is_whitespace)) {
      return Err(BuildError::InvalidCoordinate(s.to_string()));
    }

    Ok(Self {
      group: parts[0].to_string(),
      artifact: parts[1].to_string(),
      version: parts[2].to_string(),
      classifier: parts.get(3).map(|c| c.to_string()),
    })
  }
}

impl TryFrom<String> for Coordinate {
  type Error = BuildError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Coordinate> for String {
  fn from(value: Coordinate) -> Self {
    value.to_string()
  }
}

impl fmt::Display for Coordinate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
    if let Some(classifier) = &self.classifier {
      write!(f, ":{}", classifier)?;
    }
    Ok(())
  }
}

/// Ordered dependency coordinates partitioned by scope.
///
/// Insertion order within a scope is preserved by every operation. Adding a
/// coordinate already present in the scope is a no-op, so the first position
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySet {
  #[serde(default)]
  compile: Vec<Coordinate>,
  #[serde(default)]
  test: Vec<Coordinate>,
  #[serde(default)]
  runtime: Vec<Coordinate>,
}

impl DependencySet {
  pub fn new() -> Self {
    Self::default()
  }

  fn entries_mut(&mut self, scope: Scope) -> &mut Vec<Coordinate> {
    match scope {
      Scope::Compile => &mut self.compile,
      Scope::Test => &mut self.test,
      Scope::Runtime => &mut self.runtime,
    }
  }

  /// Coordinates declared directly in `scope`, in insertion order.
  pub fn scope(&self, scope: Scope) -> &[Coordinate] {
    match scope {
      Scope::Compile => &self.compile,
      Scope::Test => &self.test,
      Scope::Runtime => &self.runtime,
    }
  }

  /// Append `coordinate` to `scope`. Returns false if it was already present.
  pub fn add(&mut self, scope: Scope, coordinate: Coordinate) -> bool {
    let entries = self.entries_mut(scope);
    if entries.contains(&coordinate) {
      return false;
    }
    entries.push(coordinate);
    true
  }

  /// Parse and append a coordinate string.
  pub fn add_str(&mut self, scope: Scope, coordinate: &str) -> Result<bool, BuildError> {
    Ok(self.add(scope, coordinate.parse()?))
  }

  /// Append every coordinate, in iteration order.
  pub fn extend(&mut self, scope: Scope, coordinates: impl IntoIterator<Item = Coordinate>) {
    for coordinate in coordinates {
      self.add(scope, coordinate);
    }
  }

  /// Append every scope of `other` after this set's entries.
  pub fn merge(&mut self, other: &DependencySet) {
    for scope in Scope::ALL {
      self.extend(scope, other.scope(scope).iter().cloned());
    }
  }

  /// Coordinates visible on the classpath for `scope`.
  ///
  /// - `compile`: compile
  /// - `runtime`: compile, then runtime
  /// - `test`: compile, then runtime, then test
  pub fn classpath(&self, scope: Scope) -> Vec<Coordinate> {
    let layers: &[Scope] = match scope {
      Scope::Compile => &[Scope::Compile],
      Scope::Runtime => &[Scope::Compile, Scope::Runtime],
      Scope::Test => &[Scope::Compile, Scope::Runtime, Scope::Test],
    };

    let mut merged = Vec::new();
    for layer in layers {
      for coordinate in self.scope(*layer) {
        if !merged.contains(coordinate) {
          merged.push(coordinate.clone());
        }
      }
    }
    merged
  }

  pub fn len(&self) -> usize {
    self.compile.len() + self.test.len() + self.runtime.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Human-readable listing, one scope header followed by its coordinates.
  pub fn render(&self) -> String {
    let mut out = String::new();
    for scope in Scope::ALL {
      let entries = self.scope(scope);
      out.push_str(&format!("{} ({}):\n", scope, entries.len()));
      for coordinate in entries {
        out.push_str(&format!("  {}\n", coordinate));
      }
    }
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn coord(s: &str) -> Coordinate {
    s.parse().unwrap()
  }

  #[test]
  fn parse_coordinate() {
    let c = coord("org.jetbrains.kotlin:kotlin-stdlib:1.9.22");
    assert_eq!(c.group, "org.jetbrains.kotlin");
    assert_eq!(c.artifact, "kotlin-stdlib");
    assert_eq!(c.version, "1.9.22");
    assert_eq!(c.classifier, None);
    assert_eq!(c.to_string(), "org.jetbrains.kotlin:kotlin-stdlib:1.9.22");
  }

  #[test]
  fn parse_coordinate_with_classifier() {
    let c = coord("org.lwjgl:lwjgl:3.3.3:natives-linux");
    assert_eq!(c.classifier.as_deref(), Some("natives-linux"));
    assert_eq!(c.jar_name(), "lwjgl-3.3.3-natives-linux.jar");
  }

  #[test]
  fn malformed_coordinates_are_rejected() {
    for bad in ["guava", "com.google:guava", "a::1.0", "a:b:c:d:e", "a:b c:1.0"] {
      let err = bad.parse::<Coordinate>().unwrap_err();
      assert!(matches!(err, BuildError::InvalidCoordinate(_)), "{bad} was accepted");
    }
  }

  #[test]
  fn merge_preserves_insertion_order() {
    let mut deps = DependencySet::new();
    deps.add(Scope::Compile, coord("g:a:1"));
    deps.add(Scope::Compile, coord("g:b:1"));

    let mut extra = DependencySet::new();
    extra.add(Scope::Compile, coord("g:c:1"));
    deps.merge(&extra);

    let names: Vec<_> = deps.scope(Scope::Compile).iter().map(|c| c.artifact.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
  }

  #[test]
  fn duplicates_keep_first_position() {
    let mut deps = DependencySet::new();
    assert!(deps.add(Scope::Compile, coord("g:a:1")));
    assert!(deps.add(Scope::Compile, coord("g:b:1")));
    assert!(!deps.add(Scope::Compile, coord("g:a:1")));

    let names: Vec<_> = deps.scope(Scope::Compile).iter().map(|c| c.artifact.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
  }

  #[test]
  fn scopes_are_independent() {
    let mut deps = DependencySet::new();
    deps.add(Scope::Test, coord("org.junit.jupiter:junit-jupiter:5.10.1"));
    assert!(deps.scope(Scope::Compile).is_empty());
    assert_eq!(deps.scope(Scope::Test).len(), 1);
    assert_eq!(deps.len(), 1);
  }

  #[test]
  fn test_classpath_layers_scopes() {
    let mut deps = DependencySet::new();
    deps.add(Scope::Test, coord("g:junit:5"));
    deps.add(Scope::Runtime, coord("g:h2:2"));
    deps.add(Scope::Compile, coord("g:guava:28"));
    deps.add(Scope::Runtime, coord("g:guava:28"));

    let names: Vec<_> = deps.classpath(Scope::Test).into_iter().map(|c| c.artifact).collect();
    assert_eq!(names, vec!["guava", "h2", "junit"]);

    let runtime: Vec<_> = deps.classpath(Scope::Runtime).into_iter().map(|c| c.artifact).collect();
    assert_eq!(runtime, vec!["guava", "h2"]);
  }

  #[test]
  fn render_lists_every_scope() {
    let mut deps = DependencySet::new();
    deps.add_str(Scope::Compile, "com.google.guava:guava:28.0-jre").unwrap();

    let rendered = deps.render();
    assert!(rendered.starts_with("compile (1):\n  com.google.guava:guava:28.0-jre\n"));
    assert!(rendered.contains("test (0):\n"));
    assert!(rendered.contains("runtime (0):\n"));
  }

  #[test]
  fn coordinates_deserialize_from_strings() {
    let deps: DependencySet = serde_json::from_str(r#"{"compile": ["g:a:1", "g:b:2"]}"#).unwrap();
    assert_eq!(deps.scope(Scope::Compile).len(), 2);
    assert!(serde_json::from_str::<DependencySet>(r#"{"compile": ["nope"]}"#).is_err());
  }
}
