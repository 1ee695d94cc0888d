//! Real process backend using `std::process::Command`.

use crate::backend::CommandRunner;
use crate::error::{Error, Result};
use crate::types::{Invocation, WaitStatus};
use std::process::{Command, Stdio};

/// Shell used for [`Invocation::Shell`] commands.
const SHELL: &str = "sh";

/// Backend that spawns real processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new SystemRunner.
    pub fn new() -> Self {
        Self
    }

    fn command(invocation: &Invocation) -> Command {
        match invocation {
            Invocation::Exec { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
            Invocation::Shell { script } => {
                let mut cmd = Command::new(SHELL);
                cmd.arg("-c").arg(script);
                cmd
            }
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<WaitStatus> {
        log::debug!("exec: {invocation}");
        let status = Self::command(invocation)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Spawn {
                command: invocation.to_string(),
                source,
            })?;
        Ok(status.into())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_exec_success() {
        let status = SystemRunner::new().run(&Invocation::exec(["true"])).unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_shell_exit_code_is_wait_status() {
        let status = SystemRunner::new()
            .run(&Invocation::Shell {
                script: "exit 3".to_string(),
            })
            .unwrap();
        assert_eq!(status.raw(), 3 << 8);
        assert_eq!(status.encoded(), 3);
    }

    #[test]
    fn test_exec_does_not_expand_shell_syntax() {
        // `$(false)` is handed to echo verbatim, so the command still succeeds
        let status = SystemRunner::new()
            .run(&Invocation::exec(["echo", "$(false)"]))
            .unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = SystemRunner::new()
            .run(&Invocation::exec(["definitely-not-a-real-binary-xyz"]))
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
