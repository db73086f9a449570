//! Command execution for pkgrel.
//!
//! - **release**: resolve one package and run the release pipeline for it
//! - **list**: print every candidate package with its current version

/// Repository root and configuration shared by every command.
pub mod common;

/// Candidate package listing.
pub mod list;

/// Interactive release of a single package.
pub mod release;
