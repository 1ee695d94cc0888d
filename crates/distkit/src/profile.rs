//! Package-manager command dialects, one per distribution family.

use crate::platform::Family;
use serde::Serialize;
use std::fmt;

/// The package manager binary behind a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageManager {
    /// `yum`
    Yum,
    /// `apt-get`
    AptGet,
    /// `zypper`
    Zypper,
    /// `tdnf`
    Tdnf,
}

impl PackageManager {
    /// Executable name.
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Yum => "yum",
            PackageManager::AptGet => "apt-get",
            PackageManager::Zypper => "zypper",
            PackageManager::Tdnf => "tdnf",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Command-line dialect of a family's package manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageManagerProfile {
    /// Package manager.
    pub manager: PackageManager,
    /// Base command including the non-interactive flag.
    pub base: &'static [&'static str],
    /// Repository refresh subcommand.
    pub update: &'static str,
    /// Flag that skips signature/authentication checks.
    pub no_gpg_flag: &'static str,
    /// Extra flag passed to sudo for this family.
    pub sudo_flag: Option<&'static str>,
}

const YUM: PackageManagerProfile = PackageManagerProfile {
    manager: PackageManager::Yum,
    base: &["yum", "-y"],
    update: "makecache",
    no_gpg_flag: "--nogpgcheck",
    sudo_flag: None,
};

const APT: PackageManagerProfile = PackageManagerProfile {
    manager: PackageManager::AptGet,
    base: &["apt-get", "-y"],
    update: "update",
    no_gpg_flag: "--allow-unauthenticated",
    sudo_flag: Some("-S"),
};

const ZYPPER: PackageManagerProfile = PackageManagerProfile {
    manager: PackageManager::Zypper,
    base: &["zypper", "-n"],
    update: "refresh",
    no_gpg_flag: "--no-gpg-checks",
    sudo_flag: None,
};

const TDNF: PackageManagerProfile = PackageManagerProfile {
    manager: PackageManager::Tdnf,
    base: &["tdnf", "-y"],
    update: "makecache",
    no_gpg_flag: "--nogpgcheck",
    sudo_flag: None,
};

/// Profile for a family.
pub fn profile_for(family: Family) -> &'static PackageManagerProfile {
    match family {
        Family::RedHat => &YUM,
        Family::Ubuntu => &APT,
        Family::Sles => &ZYPPER,
        Family::Mariner => &TDNF,
    }
}

impl PackageManagerProfile {
    fn base_args(&self) -> Vec<String> {
        self.base.iter().map(|s| (*s).to_string()).collect()
    }

    /// `<base> <no-gpg> <update>`
    pub fn update_args(&self) -> Vec<String> {
        let mut args = self.base_args();
        args.push(self.no_gpg_flag.to_string());
        args.push(self.update.to_string());
        args
    }

    /// `<base> <no-gpg> install <packages…>`
    pub fn install_args(&self, packages: &[String]) -> Vec<String> {
        let mut args = self.base_args();
        args.push(self.no_gpg_flag.to_string());
        args.push("install".to_string());
        args.extend(packages.iter().cloned());
        args
    }

    /// `<base> <update>`, used as root before sudo exists.
    pub fn bootstrap_update_args(&self) -> Vec<String> {
        let mut args = self.base_args();
        args.push(self.update.to_string());
        args
    }

    /// `<base> install <package>`, used as root before sudo exists.
    pub fn bootstrap_install_args(&self, package: &str) -> Vec<String> {
        let mut args = self.base_args();
        args.push("install".to_string());
        args.push(package.to_string());
        args
    }

    /// Install command rendered as a shell string, for shell targets.
    pub fn install_script(&self, spec: &str) -> String {
        let mut parts: Vec<&str> = self.base.to_vec();
        parts.push(self.no_gpg_flag);
        parts.push("install");
        parts.push(spec);
        parts.join(" ")
    }
}
