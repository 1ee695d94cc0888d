//! Console progress for the install orchestrator.

use distkit::{Invocation, ProgressCallback, Stage};

use crate::ui;

/// Prints a section per stage and, when verbose, each command
pub struct ConsoleProgress {
    verbose: bool,
}

impl ConsoleProgress {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

/// Section title for a stage, if it gets one
pub fn stage_title(stage: Stage) -> Option<String> {
    match stage {
        Stage::Updating => Some("Updating package cache".to_string()),
        Stage::Installing(tier) => Some(format!("Installing {tier} dependencies")),
        Stage::Idle | Stage::PrivilegeCheck | Stage::Done | Stage::Failed => None,
    }
}

impl ProgressCallback for ConsoleProgress {
    fn on_stage(&mut self, stage: Stage) {
        if let Some(title) = stage_title(stage) {
            ui::section(&title);
        }
    }

    fn on_command(&mut self, invocation: &Invocation) {
        if self.verbose {
            ui::dim(&invocation.to_string());
        }
    }
}
