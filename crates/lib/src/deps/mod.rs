//! Dependency coordinates, scopes and ordered dependency sets.
//!
//! Coordinates are opaque `group:artifact:version` strings as far as the build
//! definition is concerned; they are validated for shape and handed verbatim,
//! in insertion order, to a [`DependencyResolver`]. Order matters because the
//! resolver uses it for conflict precedence.

mod resolver;
mod types;

pub use resolver::{DependencyResolver, MavenLocalResolver};
pub use types::*;
