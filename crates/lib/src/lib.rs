//! jig-lib: build definitions for JVM projects.
//!
//! A build definition composes independent capability modules, a pipeline
//! of hookable stages and a table of named tasks:
//! - `capability`: Java/Kotlin compilation, tests, packaging, scaffolding, IDE metadata
//! - `pipeline`: stages with before/after/replace extension points
//! - `definition`: the build definition and its setup lifecycle
//! - `task`: dispatching a task name to an operation
//! - `project`: the `jig.toml`-driven definition used by the CLI

pub mod capability;
pub mod compile;
pub mod config;
pub mod context;
pub mod definition;
pub mod deps;
pub mod error;
pub mod exec;
pub mod ide;
pub mod pack;
pub mod pipeline;
pub mod project;
pub mod scaffold;
pub mod task;
pub mod util;

pub use context::ExecCtx;
pub use definition::{BuildDefinition, BuildSetup, Phase};
pub use error::BuildError;
pub use task::{TaskError, TaskReport, dispatch};
