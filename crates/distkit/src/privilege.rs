//! Privilege escalation context
//!
//! Install commands always run through sudo. When sudo is missing but the
//! process is already root, sudo itself is bootstrapped with the package
//! manager first.

use crate::error::{Error, Result};
use crate::profile::PackageManagerProfile;
use crate::types::Invocation;

/// Privilege escalation helper.
pub const SUDO: &str = "sudo";

/// What the invoking identity can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivilegeContext {
    /// Effective user is root.
    pub is_root: bool,
    /// `sudo` was found on PATH.
    pub sudo_available: bool,
}

/// How privileged commands will be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// sudo is available.
    Sudo,
    /// Running as root without sudo: install sudo directly, then use it.
    RootBootstrap,
}

impl PrivilegeContext {
    /// Inspect the current process.
    pub fn detect() -> Self {
        // SAFETY: geteuid has no preconditions and cannot fail
        let is_root = unsafe { libc::geteuid() } == 0;
        let sudo_available = which::which(SUDO).is_ok();
        log::debug!("privilege context: root={is_root} sudo={sudo_available}");
        Self {
            is_root,
            sudo_available,
        }
    }

    /// Decide how to escalate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PrivilegeHelperMissing`] when sudo is absent and the
    /// process is not root.
    pub fn resolve(&self) -> Result<Privilege> {
        match (self.sudo_available, self.is_root) {
            (true, _) => Ok(Privilege::Sudo),
            (false, true) => Ok(Privilege::RootBootstrap),
            (false, false) => Err(Error::PrivilegeHelperMissing),
        }
    }
}

/// `sudo [flag] <args…>`
pub fn sudo(profile: &PackageManagerProfile, args: Vec<String>) -> Invocation {
    let mut argv = vec![SUDO.to_string()];
    argv.extend(profile.sudo_flag.map(str::to_string));
    argv.extend(args);
    Invocation::exec(argv)
}

/// `sudo [flag] <script>` evaluated by the shell.
pub fn sudo_script(profile: &PackageManagerProfile, script: &str) -> Invocation {
    let script = match profile.sudo_flag {
        Some(flag) => format!("{SUDO} {flag} {script}"),
        None => format!("{SUDO} {script}"),
    };
    Invocation::Shell { script }
}

/// `sudo -v`: validate (and cache) credentials.
pub fn validate() -> Invocation {
    Invocation::exec([SUDO, "-v"])
}
