//! External process execution for the tools a release drives (git, the
//! package manager, the changelog generator).
//!
//! Commands are described as plain [`request::CommandRequest`] values and
//! executed by a [`traits::CommandRunner`]. The [`manager::ExecManager`]
//! wraps a runner and owns the dry-run gate, so collaborators decide per
//! command whether it mutates state.

/// Dry-run aware wrapper around a command runner.
pub mod manager;

/// Command request and output types.
pub mod request;

/// Runner that spawns real child processes.
pub mod system;

/// Common trait for command execution.
pub mod traits;
