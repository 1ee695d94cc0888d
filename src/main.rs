mod cli;
mod config;
mod progress;
mod rocm;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Settings;
use distkit::backend::dry_run::DryRunner;
use distkit::backend::system::SystemRunner;
use distkit::{
    CommandRunner, InstallPlan, Orchestrator, OsRelease, PackageManagerProfile, Privilege,
    PrivilegeContext, platform, profile_for,
};
use progress::ConsoleProgress;
use serde::Serialize;
use std::process::ExitCode;

/// Exit status for failures that carry no status of their own
const GENERIC_FAILURE: u8 = 1;

/// Output of `--print-plan`
#[derive(Serialize)]
struct PlanDocument<'a> {
    settings: &'a Settings,
    package_manager: &'a PackageManagerProfile,
    plan: &'a InstallPlan,
}

fn main() -> ExitCode {
    // Invalid --runtime/--developer values exit here, before anything runs
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{e:#}"));
            if let Some(err) = e.downcast_ref::<distkit::Error>() {
                ui::dim(err.category().advice());
            }
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::from_env(cli);

    if !settings.print_plan {
        check_rocm(&settings, cli.quiet)?;
    }

    let os = OsRelease::load(&settings.os_release)?;
    let tag = platform::identify(&os, &platform::host_label())?;
    let profile = profile_for(tag.family);
    let plan = InstallPlan::build(&tag, &settings.plan_options())?;

    if settings.print_plan {
        let doc = PlanDocument {
            settings: &settings,
            package_manager: profile,
            plan: &plan,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&doc).context("Failed to render plan")?
        );
        return Ok(());
    }

    if !cli.quiet {
        ui::section("Setup");
        ui::kv("Platform", &tag.label);
        if let Some(name) = os.get("PRETTY_NAME") {
            ui::kv("Distribution", name);
        }
        ui::kv("Package manager", profile.manager.binary());
        ui::kv("Build tool", tag.build_tool());
        ui::kv("Runtime", &settings.runtime.to_string());
        ui::kv("Developer", &settings.developer.to_string());
        ui::kv("Install steps", &plan.len().to_string());
    }

    let (runner, privilege): (Box<dyn CommandRunner>, Privilege) = if settings.dry_run {
        (Box::new(DryRunner), Privilege::Sudo)
    } else {
        (
            Box::new(SystemRunner::new()),
            PrivilegeContext::detect().resolve()?,
        )
    };

    let mut progress = ConsoleProgress::new(cli.verbose > 0 && !settings.dry_run);
    let report = Orchestrator::new(runner, profile, privilege).run_with(&plan, &mut progress)?;

    log::info!(
        "{} commands issued, {} install steps",
        report.commands,
        report.installed
    );
    println!();
    ui::success(&format!(
        "rocDecode dependencies installed with rocdecode-setup V-{}",
        env!("CARGO_PKG_VERSION")
    ));
    Ok(())
}

fn check_rocm(settings: &Settings, quiet: bool) -> Result<()> {
    if !quiet {
        ui::banner(env!("CARGO_PKG_VERSION"));
        ui::kv("ROCm path", &settings.rocm_path.display().to_string());
    }

    if let Err(e) = rocm::verify(&settings.rocm_path) {
        ui::warn(
            "If ROCm is installed, set the ROCm path with \"--rocm_path\" for full installation [Default:/opt/rocm]",
        );
        return Err(e.into());
    }

    if !quiet {
        rocm::print_info(&settings.rocm_path);
    }
    Ok(())
}

/// Map a failure to the process exit status
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<distkit::Error>() {
        return e.exit_code();
    }
    if err.downcast_ref::<rocm::RocmError>().is_some() {
        return distkit::error::PRECONDITION_EXIT;
    }
    GENERIC_FAILURE
}
