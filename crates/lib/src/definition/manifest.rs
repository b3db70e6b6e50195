use serde::Serialize;

/// Ordered `META-INF/MANIFEST.MF` main attributes.
///
/// Setting an existing key replaces its value in place, keeping the
/// attribute's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestAttributes {
  entries: Vec<(String, String)>,
}

/// Maximum line length in bytes, excluding the line break.
const MAX_LINE: usize = 72;

impl ManifestAttributes {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
    let key = key.into();
    let value = value.into();
    match self.entries.iter_mut().find(|(k, _)| *k == key) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((key, value)),
    }
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
  }

  pub fn remove(&mut self, key: &str) -> Option<String> {
    let index = self.entries.iter().position(|(k, _)| k == key)?;
    Some(self.entries.remove(index).1)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn main_class(&self) -> Option<&str> {
    self.get("Main-Class")
  }

  /// Render the manifest file body.
  ///
  /// `Manifest-Version` and `Created-By` come first, followed by the
  /// attributes in insertion order. Lines are CRLF-terminated and wrapped at
  /// 72 bytes with single-space continuation lines.
  pub fn render(&self) -> String {
    let mut out = String::new();
    write_attribute(&mut out, "Manifest-Version", "1.0");
    write_attribute(&mut out, "Created-By", "jig");
    for (key, value) in self.iter() {
      if key == "Manifest-Version" || key == "Created-By" {
        continue;
      }
      write_attribute(&mut out, key, value);
    }
    out.push_str("\r\n");
    out
  }
}

fn write_attribute(out: &mut String, key: &str, value: &str) {
  let line = format!("{key}: {value}");
  let mut rest = line.as_str();
  let mut limit = MAX_LINE;

  while rest.len() > limit {
    let mut split = limit;
    while !rest.is_char_boundary(split) {
      split -= 1;
    }
    out.push_str(&rest[..split]);
    out.push_str("\r\n ");
    rest = &rest[split..];
    // continuation lines spend one byte on the leading space
    limit = MAX_LINE - 1;
  }

  out.push_str(rest);
  out.push_str("\r\n");
}
