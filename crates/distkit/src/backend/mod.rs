//! Command execution abstraction.
//!
//! The [`CommandRunner`] trait is the only way the orchestrator touches the
//! outside world, allowing for different implementations:
//! - [`system::SystemRunner`] spawns real processes
//! - [`dry_run::DryRunner`] prints commands without running them
//! - [`recording::RecordingRunner`] records commands and answers with
//!   scripted statuses, for tests

pub mod dry_run;
pub mod recording;
pub mod system;

use crate::error::Result;
use crate::types::{Invocation, WaitStatus};

/// Executes one command to completion.
pub trait CommandRunner: Send + Sync {
    /// Run `invocation`, blocking until it exits, and return its wait status.
    ///
    /// A non-zero status is not an error at this level; only failing to
    /// start the command is.
    fn run(&self, invocation: &Invocation) -> Result<WaitStatus>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<WaitStatus> {
        (**self).run(invocation)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, invocation: &Invocation) -> Result<WaitStatus> {
        (**self).run(invocation)
    }
}
