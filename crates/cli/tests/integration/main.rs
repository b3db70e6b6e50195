//! End-to-end tests driving the jig binary against fixture projects.

mod common;
mod project_tests;
