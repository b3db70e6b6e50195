//! Integration tests for build definitions, pipelines and task dispatch.

mod common;
mod dispatch_tests;
mod lifecycle_tests;
mod packaging_tests;
mod pipeline_tests;
