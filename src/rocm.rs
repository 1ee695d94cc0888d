//! ROCm installation check
//!
//! The setup only verifies that a ROCm tree exists; installing ROCm is out
//! of its hands.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::ui;

#[derive(Debug, thiserror::Error)]
pub enum RocmError {
    #[error("rocDecode setup requires a ROCm install, none found at {}", .0.display())]
    NotFound(PathBuf),
}

/// Fail unless `path` exists
pub fn verify(path: &Path) -> Result<(), RocmError> {
    if path.exists() {
        Ok(())
    } else {
        Err(RocmError::NotFound(path.to_path_buf()))
    }
}

/// Path of the `rocminfo` tool inside a ROCm tree
pub fn rocminfo_path(rocm: &Path) -> PathBuf {
    rocm.join("bin").join("rocminfo")
}

/// Run a tool with inherited stdio so its report shows up in real time
fn run_tool(tool: &Path) -> Result<ExitStatus> {
    Command::new(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to execute {}", tool.display()))
}

/// Show `rocminfo` output; informational only, its status is ignored
pub fn print_info(rocm: &Path) {
    ui::section("ROCm Info");
    match run_tool(&rocminfo_path(rocm)) {
        Ok(status) if !status.success() => log::warn!("rocminfo exited with {status}"),
        Ok(_) => {}
        Err(e) => log::warn!("{e:#}"),
    }
}
