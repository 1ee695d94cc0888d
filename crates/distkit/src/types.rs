//! Core types shared by the catalog, the plan and the orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical group of dependencies installed together in a fixed stage.
///
/// The declaration order is the install order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Build tool, pkg-config and the HIP runtime.
    Common,
    /// Development headers required to build the library.
    Core,
    /// Video acceleration runtime libraries and drivers.
    Runtime,
    /// ffmpeg development packages for the samples.
    Developer,
}

impl Tier {
    /// All tiers in install order.
    pub const ALL: [Tier; 4] = [Tier::Common, Tier::Core, Tier::Runtime, Tier::Developer];

    /// Lowercase name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Common => "common",
            Tier::Core => "core",
            Tier::Runtime => "runtime",
            Tier::Developer => "developer",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One entry of a tier's dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum InstallTarget {
    /// Package names or URLs handed to a single `install` invocation.
    Packages(Vec<String>),
    /// Install spec that needs shell evaluation, e.g. `$(rpm -E %rhel)`.
    Shell(String),
    /// A standalone privileged command that is not an install.
    Command(Vec<String>),
}

impl InstallTarget {
    /// Single package target.
    pub fn package(name: impl Into<String>) -> Self {
        Self::Packages(vec![name.into()])
    }

    /// Several packages installed by one command.
    pub fn packages<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Packages(names.into_iter().map(Into::into).collect())
    }

    /// Standalone command from its argument list.
    pub fn command<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Command(args.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for InstallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallTarget::Packages(names) => write!(f, "{}", names.join(" ")),
            InstallTarget::Shell(spec) => write!(f, "{spec}"),
            InstallTarget::Command(args) => write!(f, "{}", args.join(" ")),
        }
    }
}

/// A command ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Program with a structured argument list; no shell involved.
    Exec {
        /// Program to execute.
        program: String,
        /// Arguments passed verbatim.
        args: Vec<String>,
    },
    /// Script evaluated by `sh -c`.
    Shell {
        /// Script text.
        script: String,
    },
}

impl Invocation {
    /// Build an [`Invocation::Exec`] from an argument list whose first
    /// element is the program. An empty list yields an empty program name,
    /// which fails to spawn.
    pub fn exec<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().unwrap_or_default();
        Self::Exec {
            program,
            args: argv.collect(),
        }
    }

    /// Whether the command goes through a shell.
    pub fn is_shell(&self) -> bool {
        matches!(self, Self::Shell { .. })
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::Exec { program, args } if args.is_empty() => write!(f, "{program}"),
            Invocation::Exec { program, args } => write!(f, "{program} {}", args.join(" ")),
            Invocation::Shell { script } => write!(f, "{script}"),
        }
    }
}

/// Raw wait status of a finished process, as returned by `wait(2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitStatus(i32);

impl WaitStatus {
    /// Successful status.
    pub const SUCCESS: WaitStatus = WaitStatus(0);

    /// Wrap a raw wait status.
    pub fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Wait status of a process that exited normally with `code`.
    pub fn from_exit_code(code: i32) -> Self {
        Self((code & 0xFF) << 8)
    }

    /// Raw value.
    pub fn raw(&self) -> i32 {
        self.0
    }

    /// Whether the process succeeded.
    pub fn success(&self) -> bool {
        self.0 == 0
    }

    /// Fold exit code and signal bits into one byte: `((raw >> 8) | raw) & 0xFF`.
    ///
    /// Non-zero whenever the raw status is non-zero in its low 16 bits.
    pub fn encoded(&self) -> u8 {
        (((self.0 >> 8) | self.0) & 0xFF) as u8
    }
}

impl fmt::Display for WaitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<std::process::ExitStatus> for WaitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            Self(status.into_raw())
        }
        #[cfg(not(unix))]
        {
            Self::from_exit_code(status.code().unwrap_or(1))
        }
    }
}
