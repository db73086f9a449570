//! Interactive release automation for npm-style package repositories.
//!
//! A release resolves one package, asks for the target version, then runs
//! tests, bumps the manifest, builds, generates the changelog, commits,
//! publishes and pushes. See [`orchestrator`] for the pipeline itself.
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod exec;
pub mod orchestrator;
pub mod package;
pub mod parallel;
pub mod prompt;
pub mod toolchain;
pub mod version;

pub use error::{ReleaseError, Result};
pub use orchestrator::{
    Orchestrator, OrchestratorParams, ReleaseOutcome, config::ReleaseOptions,
};
pub use package::{descriptor::PackageDescriptor, resolver::PackageResolver};

#[cfg(test)]
pub mod test_helpers;
