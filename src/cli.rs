use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_ROCM_PATH, Toggle, parse_toggle};

#[derive(Parser, Debug)]
#[command(name = "rocdecode-setup")]
#[command(author = "rocDecode Contributors")]
#[command(version)]
#[command(about = "Install rocDecode dependencies for this Linux distribution", long_about = None)]
pub struct Cli {
    /// ROCm installation path (ROCM_PATH overrides this when set)
    #[arg(long = "rocm_path", value_name = "PATH", default_value = DEFAULT_ROCM_PATH)]
    pub rocm_path: String,

    /// Install runtime dependencies
    #[arg(long, value_name = "ON|OFF", default_value = "ON", value_parser = parse_toggle)]
    pub runtime: Toggle,

    /// Install developer (ffmpeg) dependencies
    #[arg(long, value_name = "ON|OFF", default_value = "OFF", value_parser = parse_toggle)]
    pub developer: Toggle,

    /// Print each command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the resolved install plan as JSON and exit
    #[arg(long, conflicts_with = "dry_run")]
    pub print_plan: bool,

    /// OS-release file used for distribution detection
    #[arg(long, value_name = "FILE", default_value = distkit::platform::OS_RELEASE_PATH, hide = true)]
    pub os_release: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["rocdecode-setup"]).unwrap();
        assert_eq!(cli.rocm_path, "/opt/rocm");
        assert_eq!(cli.runtime, Toggle::On);
        assert_eq!(cli.developer, Toggle::Off);
        assert!(!cli.dry_run);
        assert_eq!(cli.os_release, PathBuf::from("/etc/os-release"));
    }

    #[test]
    fn test_flags_are_case_insensitive() {
        let cli = Cli::try_parse_from([
            "rocdecode-setup",
            "--runtime",
            "off",
            "--developer",
            "On",
            "--rocm_path",
            "/opt/rocm-6.2.0",
        ])
        .unwrap();
        assert_eq!(cli.runtime, Toggle::Off);
        assert_eq!(cli.developer, Toggle::On);
        assert_eq!(cli.rocm_path, "/opt/rocm-6.2.0");
    }

    #[test]
    fn test_invalid_toggle_is_rejected() {
        let err = Cli::try_parse_from(["rocdecode-setup", "--runtime", "MAYBE"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("MAYBE"));
        assert!(msg.contains("OFF or ON"));

        assert!(Cli::try_parse_from(["rocdecode-setup", "--developer", "yes"]).is_err());
    }

    #[test]
    fn test_print_plan_conflicts_with_dry_run() {
        assert!(Cli::try_parse_from(["rocdecode-setup", "--print-plan", "--dry-run"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
