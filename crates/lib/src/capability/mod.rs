//! Capability modules and the registry that owns them.
//!
//! A capability module is an independently configurable unit exposing one
//! narrow build capability:
//!
//! - [`JavaCompile`] - compile Java sources with `javac`
//! - [`KotlinCompile`] - compile Kotlin sources ahead of Java
//! - [`JavaTest`] - compile and run tests on the JUnit platform
//! - [`Packaging`] - assemble the jar artifact
//! - [`Scaffold`] - create a project skeleton
//! - [`IdeMetadata`] - generate IntelliJ module metadata
//!
//! Modules are keyed by [`CapabilityKind`] in a [`ModuleRegistry`], which
//! guarantees one live instance per kind for a build run.

mod ide;
mod java;
mod kotlin;
mod packaging;
mod registry;
mod scaffold;
mod types;

pub use ide::IdeMetadata;
pub use java::JavaCompile;
pub use java_test::{JUNIT_CONSOLE_LAUNCHER, JavaTest};
pub use kotlin::{KOTLIN_COMPILE_HOOK, KotlinCompile};
pub use packaging::Packaging;
pub use registry::*;
pub use scaffold::Scaffold;
pub use types::*;
