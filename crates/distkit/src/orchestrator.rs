//! Install orchestrator - drives a plan through the package manager
//!
//! Execution is strictly sequential. Every command's status is checked as
//! soon as it exits; the first non-zero status stops the run and nothing
//! after it is attempted. Nothing already installed is rolled back.

use crate::backend::CommandRunner;
use crate::error::{Error, Result};
use crate::plan::InstallPlan;
use crate::privilege::{self, Privilege};
use crate::profile::PackageManagerProfile;
use crate::types::{InstallTarget, Invocation, Tier};
use std::fmt;

/// Orchestrator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing started yet.
    Idle,
    /// Establishing how to run privileged commands.
    PrivilegeCheck,
    /// Refreshing the package manager cache.
    Updating,
    /// Installing one tier.
    Installing(Tier),
    /// All commands succeeded.
    Done,
    /// A command failed; the run stopped.
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::PrivilegeCheck => write!(f, "privilege check"),
            Stage::Updating => write!(f, "updating"),
            Stage::Installing(tier) => write!(f, "installing {tier}"),
            Stage::Done => write!(f, "done"),
            Stage::Failed => write!(f, "failed"),
        }
    }
}

/// Progress callback for orchestration.
///
/// Implement this trait to receive stage changes and commands as they are
/// issued.
pub trait ProgressCallback {
    /// Called on every stage transition.
    fn on_stage(&mut self, stage: Stage);

    /// Called right before a command runs.
    fn on_command(&mut self, invocation: &Invocation);
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_stage(&mut self, _stage: Stage) {}
    fn on_command(&mut self, _invocation: &Invocation) {}
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Commands issued, including update and credential validation.
    pub commands: usize,
    /// Install steps completed.
    pub installed: usize,
}

/// Runs an [`InstallPlan`] through a [`CommandRunner`].
pub struct Orchestrator<'a, R: CommandRunner> {
    runner: R,
    profile: &'a PackageManagerProfile,
    privilege: Privilege,
}

impl<'a, R: CommandRunner> Orchestrator<'a, R> {
    /// Create an orchestrator.
    pub fn new(runner: R, profile: &'a PackageManagerProfile, privilege: Privilege) -> Self {
        Self {
            runner,
            profile,
            privilege,
        }
    }

    /// Run the plan without progress reporting.
    pub fn run(&self, plan: &InstallPlan) -> Result<RunReport> {
        self.run_with(plan, &mut NoProgress)
    }

    /// Run the plan, reporting progress to `progress`.
    ///
    /// # Errors
    ///
    /// [`Error::CommandFailed`] for the first non-zero status, or the
    /// runner's error if a command cannot be started.
    pub fn run_with<P: ProgressCallback>(
        &self,
        plan: &InstallPlan,
        progress: &mut P,
    ) -> Result<RunReport> {
        let mut report = RunReport::default();
        progress.on_stage(Stage::Idle);

        match self.drive(plan, progress, &mut report) {
            Ok(()) => {
                progress.on_stage(Stage::Done);
                Ok(report)
            }
            Err(e) => {
                progress.on_stage(Stage::Failed);
                Err(e)
            }
        }
    }

    fn drive<P: ProgressCallback>(
        &self,
        plan: &InstallPlan,
        progress: &mut P,
        report: &mut RunReport,
    ) -> Result<()> {
        self.enter(Stage::PrivilegeCheck, progress);
        if self.privilege == Privilege::RootBootstrap {
            log::info!("sudo not found, installing it as root");
            self.check(
                Invocation::exec(self.profile.bootstrap_update_args()),
                progress,
                report,
            )?;
            self.check(
                Invocation::exec(self.profile.bootstrap_install_args(privilege::SUDO)),
                progress,
                report,
            )?;
        }

        self.enter(Stage::Updating, progress);
        self.check(
            privilege::sudo(self.profile, self.profile.update_args()),
            progress,
            report,
        )?;

        for (tier, targets) in plan.tiers() {
            self.enter(Stage::Installing(tier), progress);
            self.check(privilege::validate(), progress, report)?;
            for target in targets {
                self.check(self.install_command(target), progress, report)?;
                report.installed += 1;
            }
        }

        Ok(())
    }

    fn enter<P: ProgressCallback>(&self, stage: Stage, progress: &mut P) {
        log::info!("stage: {stage}");
        progress.on_stage(stage);
    }

    /// Command that installs one target.
    pub fn install_command(&self, target: &InstallTarget) -> Invocation {
        match target {
            InstallTarget::Packages(names) => {
                privilege::sudo(self.profile, self.profile.install_args(names))
            }
            InstallTarget::Shell(spec) => {
                privilege::sudo_script(self.profile, &self.profile.install_script(spec))
            }
            InstallTarget::Command(args) => privilege::sudo(self.profile, args.clone()),
        }
    }

    fn check<P: ProgressCallback>(
        &self,
        invocation: Invocation,
        progress: &mut P,
        report: &mut RunReport,
    ) -> Result<()> {
        progress.on_command(&invocation);
        report.commands += 1;
        log::debug!("running: {invocation}");

        let status = self.runner.run(&invocation)?;
        if !status.success() {
            log::error!("command failed with status {status}: {invocation}");
            return Err(Error::CommandFailed {
                command: invocation.to_string(),
                status,
            });
        }
        Ok(())
    }
}
