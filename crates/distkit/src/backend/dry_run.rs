//! Backend that prints commands instead of running them.

use crate::backend::CommandRunner;
use crate::error::Result;
use crate::types::{Invocation, WaitStatus};

/// Prints each command and reports success.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunner;

impl CommandRunner for DryRunner {
    fn run(&self, invocation: &Invocation) -> Result<WaitStatus> {
        let via = if invocation.is_shell() { " (sh -c)" } else { "" };
        println!("  [dry-run]{via} {invocation}");
        Ok(WaitStatus::SUCCESS)
    }
}
