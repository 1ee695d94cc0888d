//! Install plan - all enabled tiers resolved against one platform

use crate::catalog;
use crate::error::Result;
use crate::platform::{Family, PlatformTag};
use crate::types::{InstallTarget, Tier};
use serde::Serialize;

/// Which optional tiers the operator asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    /// Install runtime libraries.
    pub runtime: bool,
    /// Install developer (ffmpeg) packages.
    pub developer: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            runtime: true,
            developer: false,
        }
    }
}

/// One resolved install step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    /// Tier the step belongs to.
    pub tier: Tier,
    /// What to install.
    pub target: InstallTarget,
}

/// Ordered install steps for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    /// Platform the plan was resolved for.
    pub platform: PlatformTag,
    /// Steps in execution order.
    pub steps: Vec<PlanStep>,
}

impl InstallPlan {
    /// Resolve every enabled tier for `platform`.
    ///
    /// Runtime is dropped on Mariner whatever was requested. Catalog errors
    /// surface here, before anything is executed.
    pub fn build(platform: &PlatformTag, options: &PlanOptions) -> Result<Self> {
        let runtime = options.runtime && platform.family != Family::Mariner;
        if options.runtime && !runtime {
            log::info!("runtime dependencies are not installed on {}", platform.family);
        }

        let mut steps = Vec::new();
        for tier in enabled_tiers(runtime, options.developer) {
            let targets = catalog::resolve(tier, platform)?;
            steps.extend(targets.into_iter().map(|target| PlanStep { tier, target }));
        }

        Ok(Self {
            platform: platform.clone(),
            steps,
        })
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether any step belongs to `tier`.
    pub fn includes(&self, tier: Tier) -> bool {
        self.steps.iter().any(|s| s.tier == tier)
    }

    /// Targets of one tier, in order.
    pub fn targets(&self, tier: Tier) -> Vec<&InstallTarget> {
        self.steps
            .iter()
            .filter(|s| s.tier == tier)
            .map(|s| &s.target)
            .collect()
    }

    /// Non-empty tier groups in install order.
    pub fn tiers(&self) -> Vec<(Tier, Vec<&InstallTarget>)> {
        Tier::ALL
            .iter()
            .map(|&tier| (tier, self.targets(tier)))
            .filter(|(_, targets)| !targets.is_empty())
            .collect()
    }

    /// Render the plan as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn enabled_tiers(runtime: bool, developer: bool) -> Vec<Tier> {
    Tier::ALL
        .into_iter()
        .filter(|tier| match tier {
            Tier::Common | Tier::Core => true,
            Tier::Runtime => runtime,
            Tier::Developer => developer,
        })
        .collect()
}
