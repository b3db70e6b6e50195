use serde::Serialize;

/// Configuration of the `packaging` capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Packaging {
  /// Include the `java-compile` resource roots in the jar.
  pub include_resources: bool,
  /// Deflate entries; stored uncompressed otherwise.
  pub deflate: bool,
}

impl Default for Packaging {
  fn default() -> Self {
    Self {
      include_resources: true,
      deflate: true,
    }
  }
}
