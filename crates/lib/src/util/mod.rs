//! Shared utilities.
//!
//! Path checks shared by configuration and build definitions, plus
//! cross-platform helpers for tests that need to execute shell commands or
//! stand in for external toolchains.

pub mod paths;

#[cfg(test)]
pub mod testutil;
