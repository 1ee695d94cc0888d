//! Settings resolution: command line, then environment overrides.

use distkit::PlanOptions;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::Cli;

/// Default ROCm installation path
pub const DEFAULT_ROCM_PATH: &str = "/opt/rocm";

/// Environment variable that overrides `--rocm_path`
pub const ROCM_PATH_ENV: &str = "ROCM_PATH";

/// An `ON`/`OFF` switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

impl FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ON" => Ok(Toggle::On),
            "OFF" => Ok(Toggle::Off),
            _ => Err(format!(
                "option '{s}' not supported [Supported Options: OFF or ON]"
            )),
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::On => write!(f, "ON"),
            Toggle::Off => write!(f, "OFF"),
        }
    }
}

/// clap value parser for [`Toggle`]
pub fn parse_toggle(s: &str) -> Result<Toggle, String> {
    s.parse()
}

/// Fully resolved run settings
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub rocm_path: PathBuf,
    pub runtime: Toggle,
    pub developer: Toggle,
    #[serde(skip)]
    pub os_release: PathBuf,
    #[serde(skip)]
    pub dry_run: bool,
    #[serde(skip)]
    pub print_plan: bool,
}

impl Settings {
    /// Resolve settings from the command line and the process environment
    pub fn from_env(cli: &Cli) -> Self {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an injected environment lookup
    pub fn resolve(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Self {
        let raw = env(ROCM_PATH_ENV).unwrap_or_else(|| cli.rocm_path.clone());
        let rocm_path = PathBuf::from(shellexpand::tilde(&raw).as_ref());

        Self {
            rocm_path,
            runtime: cli.runtime,
            developer: cli.developer,
            os_release: cli.os_release.clone(),
            dry_run: cli.dry_run,
            print_plan: cli.print_plan,
        }
    }

    /// Tier selection for the install plan
    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            runtime: self.runtime.is_on(),
            developer: self.developer.is_on(),
        }
    }
}
