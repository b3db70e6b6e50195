//! Jar artifact production.
//!
//! The jar is a zip archive holding `META-INF/MANIFEST.MF` first, then the
//! compiled classes, then resources. Entry timestamps are fixed to the zip
//! epoch so identical inputs produce identical archives.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::capability::{JavaCompile, Packaging};
use crate::definition::{BuildDefinition, ManifestAttributes};
use crate::error::BuildError;

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// A file to store in the archive under `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarEntry {
  /// Forward-slash separated path inside the archive.
  pub name: String,
  pub source: PathBuf,
}

/// Files under `root` as archive entries relative to it, sorted by name.
pub fn entries_under(root: &Path) -> Vec<JarEntry> {
  if !root.is_dir() {
    return Vec::new();
  }

  let mut entries: Vec<JarEntry> = WalkDir::new(root)
    .into_iter()
    .filter_map(Result::ok)
    .filter(|entry| entry.file_type().is_file())
    .filter_map(|entry| {
      let relative = entry.path().strip_prefix(root).ok()?;
      let name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
      Some(JarEntry {
        name,
        source: entry.into_path(),
      })
    })
    .collect();
  entries.sort_by(|a, b| a.name.cmp(&b.name));
  entries
}

/// Write a jar at `path` from `manifest` and `entries`.
///
/// Entries are written in the given order. When two entries share a name the
/// first one wins and later ones are skipped with a warning.
pub fn write_jar(
  path: &Path,
  manifest: &ManifestAttributes,
  entries: &[JarEntry],
  deflate: bool,
) -> Result<usize, BuildError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
  }

  let file = File::create(path).map_err(|e| BuildError::io(path, e))?;
  let mut zip = ZipWriter::new(BufWriter::new(file));

  let method = if deflate {
    CompressionMethod::Deflated
  } else {
    CompressionMethod::Stored
  };
  let options = SimpleFileOptions::default()
    .compression_method(method)
    .last_modified_time(DateTime::default());

  zip.add_directory("META-INF/", options)?;
  zip.start_file(MANIFEST_PATH, options)?;
  zip
    .write_all(manifest.render().as_bytes())
    .map_err(|e| BuildError::io(path, e))?;

  let mut seen: HashSet<&str> = HashSet::from(["META-INF/", MANIFEST_PATH]);
  let mut written = 0;
  for entry in entries {
    if !seen.insert(entry.name.as_str()) {
      warn!(entry = %entry.name, source = %entry.source.display(), "duplicate jar entry, keeping first");
      continue;
    }

    let data = fs::read(&entry.source).map_err(|e| BuildError::io(&entry.source, e))?;
    zip.start_file(entry.name.as_str(), options)?;
    zip.write_all(&data).map_err(|e| BuildError::io(path, e))?;
    written += 1;
  }

  let mut writer = zip.finish()?;
  writer.flush().map_err(|e| BuildError::io(path, e))?;

  debug!(path = %path.display(), entries = written, "wrote jar");
  Ok(written)
}

/// Package `definition` into its artifact path and return that path.
///
/// Classes come from the classes directory; resources from the
/// `java-compile` resource roots when `packaging` includes them.
pub fn write_artifact(definition: &BuildDefinition, packaging: &Packaging) -> Result<PathBuf, BuildError> {
  let mut entries = entries_under(&definition.classes_dir());

  if packaging.include_resources {
    let java = definition
      .registry()
      .read::<JavaCompile, _>(JavaCompile::clone)
      .unwrap_or_default();
    for root in &java.resource_roots {
      entries.extend(entries_under(&definition.base_dir().join(root)));
    }
  }

  let path = definition.artifact_path();
  let written = write_jar(&path, definition.manifest(), &entries, packaging.deflate)?;
  info!(path = %path.display(), entries = written, "packaged artifact");
  Ok(path)
}
