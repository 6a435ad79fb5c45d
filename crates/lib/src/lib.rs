//! slangbuild-lib: builds the Slang shader compiler through CMake
//!
//! This crate provides everything a host build needs to drive Slang's CMake build:
//! - `config`: layered, immutable build configuration
//! - `cmake`: configure and build command lines
//! - `orchestrate`: configure-if-needed, build, install
//! - `artifacts`: declared sources and outputs for staleness detection
//! - `manifest`: the same declarations as JSON

pub mod artifacts;
pub mod cmake;
pub mod config;
pub mod consts;
pub mod install;
pub mod manifest;
pub mod orchestrate;
pub mod platform;
pub mod runner;

#[cfg(test)]
mod util;

pub use config::{BuildConfig, ConfigLayer};
pub use orchestrate::{OrchestrateError, Orchestrator};
pub use runner::{CommandRunner, ProcessRunner};
