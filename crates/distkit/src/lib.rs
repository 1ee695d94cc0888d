//! # distkit
//!
//! Linux distribution detection and tiered package install orchestration.
//!
//! The pipeline is a chain of plain values:
//!
//! - [`OsRelease`] → [`PlatformTag`] via [`platform::identify`]
//! - [`PlatformTag`] → [`PackageManagerProfile`] via [`profile_for`]
//! - [`PlatformTag`] + [`PlanOptions`] → [`InstallPlan`]
//! - [`Orchestrator`] runs the plan through a [`CommandRunner`]
//!
//! Only the orchestrator has side effects, and only through the runner, so
//! everything up to execution can be tested without spawning processes.
//!
//! ## Example
//!
//! ```
//! use distkit::backend::recording::RecordingRunner;
//! use distkit::{InstallPlan, OsRelease, Orchestrator, PlanOptions, Privilege, platform, profile_for};
//!
//! let os = OsRelease::parse("NAME=\"Ubuntu\"\nVERSION_ID=\"22.04\"\n");
//! let tag = platform::identify(&os, "Linux").unwrap();
//! let plan = InstallPlan::build(&tag, &PlanOptions::default()).unwrap();
//! assert_eq!(plan.len(), 12);
//!
//! let runner = RecordingRunner::new();
//! let report = Orchestrator::new(&runner, profile_for(tag.family), Privilege::Sudo)
//!     .run(&plan)
//!     .unwrap();
//! assert_eq!(report.installed, 12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod catalog;
pub mod error;
pub mod orchestrator;
pub mod plan;
pub mod platform;
pub mod privilege;
pub mod profile;
pub mod types;

pub use backend::CommandRunner;
pub use error::{Error, ErrorCategory, Result};
pub use orchestrator::{NoProgress, Orchestrator, ProgressCallback, RunReport, Stage};
pub use plan::{InstallPlan, PlanOptions, PlanStep};
pub use platform::{DistroVersion, Family, OsRelease, PlatformTag};
pub use privilege::{Privilege, PrivilegeContext};
pub use profile::{PackageManager, PackageManagerProfile, profile_for};
pub use types::{InstallTarget, Invocation, Tier, WaitStatus};
