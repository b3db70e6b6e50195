use serde::Serialize;

/// Configuration of the `ide-metadata` capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdeMetadata {
  /// Name of the generated module file; `<project>.iml` when unset.
  pub file_name: Option<String>,
  /// Named JDK for the module; the project JDK is inherited when unset.
  pub jdk_name: Option<String>,
}

