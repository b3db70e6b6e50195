//! IntelliJ IDEA module metadata (`.iml`) generation.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::capability::{IdeMetadata, JavaCompile, JavaTest, KotlinCompile};
use crate::definition::BuildDefinition;
use crate::deps::Scope;
use crate::error::BuildError;

/// Module file name for `definition`.
pub fn module_file_name(definition: &BuildDefinition, ide: &IdeMetadata) -> String {
  ide
    .file_name
    .clone()
    .unwrap_or_else(|| format!("{}.iml", definition.name()))
}

/// Render the `.iml` document for `definition`.
///
/// Dependencies become module libraries in declaration order; `compile`
/// entries carry no scope attribute, `runtime` and `test` entries carry
/// `RUNTIME` and `TEST`.
pub fn render_module(definition: &BuildDefinition, ide: &IdeMetadata) -> Result<String, BuildError> {
  let registry = definition.registry();
  let java = registry.read::<JavaCompile, _>(JavaCompile::clone).unwrap_or_default();
  let kotlin = registry.read::<KotlinCompile, _>(KotlinCompile::clone);
  let tests = registry.read::<JavaTest, _>(JavaTest::clone).unwrap_or_default();
  let base = definition.base_dir();

  let mut xml = String::new();
  xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
  xml.push_str("<module type=\"JAVA_MODULE\" version=\"4\">\n");
  xml.push_str("  <component name=\"NewModuleRootManager\" inherit-compiler-output=\"false\">\n");
  line(&mut xml, 4, &format!("<output url=\"{}\" />", module_url(base, &definition.classes_dir())));
  line(&mut xml, 4, "<exclude-output />");
  line(&mut xml, 4, "<content url=\"file://$MODULE_DIR$\">");

  let mut main_roots = java.source_roots.clone();
  if let Some(kotlin) = &kotlin {
    main_roots.extend(kotlin.source_roots.iter().cloned());
  }
  for root in &main_roots {
    line(
      &mut xml,
      6,
      &format!("<sourceFolder url=\"{}\" isTestSource=\"false\" />", module_url(base, &base.join(root))),
    );
  }
  for root in &java.resource_roots {
    line(
      &mut xml,
      6,
      &format!("<sourceFolder url=\"{}\" type=\"java-resource\" />", module_url(base, &base.join(root))),
    );
  }
  for root in &tests.source_roots {
    line(
      &mut xml,
      6,
      &format!("<sourceFolder url=\"{}\" isTestSource=\"true\" />", module_url(base, &base.join(root))),
    );
  }
  line(
    &mut xml,
    6,
    &format!("<excludeFolder url=\"{}\" />", module_url(base, &definition.output_dir())),
  );
  line(&mut xml, 4, "</content>");

  match &ide.jdk_name {
    Some(jdk) => line(
      &mut xml,
      4,
      &format!("<orderEntry type=\"jdk\" jdkName=\"{}\" jdkType=\"JavaSDK\" />", escape(jdk)),
    ),
    None => line(&mut xml, 4, "<orderEntry type=\"inheritedJdk\" />"),
  }
  line(&mut xml, 4, "<orderEntry type=\"sourceFolder\" forTests=\"false\" />");

  for scope in Scope::ALL {
    for coordinate in definition.dependencies().scope(scope) {
      let jars = definition.resolver().resolve(std::slice::from_ref(coordinate))?;
      let scope_attr = match scope {
        Scope::Compile => String::new(),
        Scope::Runtime => " scope=\"RUNTIME\"".to_string(),
        Scope::Test => " scope=\"TEST\"".to_string(),
      };
      line(&mut xml, 4, &format!("<orderEntry type=\"module-library\"{scope_attr}>"));
      line(&mut xml, 6, &format!("<library name=\"{}\">", escape(&coordinate.to_string())));
      line(&mut xml, 8, "<CLASSES>");
      for jar in jars {
        line(&mut xml, 10, &format!("<root url=\"jar://{}!/\" />", escape(&slashed(&jar))));
      }
      line(&mut xml, 8, "</CLASSES>");
      line(&mut xml, 8, "<JAVADOC />");
      line(&mut xml, 8, "<SOURCES />");
      line(&mut xml, 6, "</library>");
      line(&mut xml, 4, "</orderEntry>");
    }
  }

  xml.push_str("  </component>\n");
  xml.push_str("</module>\n");
  Ok(xml)
}

/// Write the module file into the base directory and return its path.
pub fn write_module(definition: &BuildDefinition, ide: &IdeMetadata) -> Result<PathBuf, BuildError> {
  let path = definition.base_dir().join(module_file_name(definition, ide));
  let xml = render_module(definition, ide)?;
  fs::write(&path, xml).map_err(|e| BuildError::io(&path, e))?;
  info!(path = %path.display(), "wrote IDE module");
  Ok(path)
}

fn line(xml: &mut String, indent: usize, content: &str) {
  let _ = writeln!(xml, "{:indent$}{content}", "");
}

fn slashed(path: &Path) -> String {
  path.to_string_lossy().replace('\\', "/")
}

/// `$MODULE_DIR$`-relative URL when `path` is under `base`, absolute otherwise.
fn module_url(base: &Path, path: &Path) -> String {
  match path.strip_prefix(base) {
    Ok(relative) if relative.as_os_str().is_empty() => "file://$MODULE_DIR$".to_string(),
    Ok(relative) => format!("file://$MODULE_DIR$/{}", escape(&slashed(relative))),
    Err(_) => format!("file://{}", escape(&slashed(path))),
  }
}

fn escape(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&apos;"),
      c => out.push(c),
    }
  }
  out
}
