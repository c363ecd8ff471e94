//! Command handlers.
//!
//! Each handler reports progress to the terminal and returns whether the
//! command succeeded. `Err` is reserved for problems that stop a command
//! before it can run at all, such as a malformed release version or an
//! unwritable notes file.

use anyhow::{Context, Result};
use std::fs;

use crate::boundary::BoundaryWarning;
use crate::cli::{BuildTarget, Commands, ReleaseArgs, TestTarget};
use crate::release::{self, ReleasePlan, VersionSource};
use crate::runner::CommandRunner;
use crate::toolchain::lint::LintMode;
use crate::toolchain::{BuildType, Toolchain};
use crate::ui;

/// Dispatch a parsed subcommand.
pub fn run_command<R: CommandRunner + ?Sized>(
    toolchain: &Toolchain<'_, R>,
    command: &Commands,
) -> Result<bool> {
    tracing::debug!(?command, root = %toolchain.project.root.display(), "dispatching");

    let ok = match command {
        Commands::Build {
            target,
            clean,
            build_type,
        } => match target {
            BuildTarget::Backend => toolchain.build_backend(*build_type, *clean),
            BuildTarget::Frontend => toolchain.build_frontend(*clean),
            BuildTarget::All => toolchain.build_all(*build_type, *clean),
        },
        Commands::Debug { clean } => toolchain.build_backend(BuildType::Debug, *clean),
        Commands::Test {
            target,
            watch,
            build_type,
        } => match target {
            TestTarget::Backend => toolchain.test_backend(*build_type),
            TestTarget::Frontend => toolchain.test_frontend(*watch),
        },
        Commands::Lint { fix, unsafe_fixes } => run_lint(toolchain, *fix, *unsafe_fixes),
        Commands::Dev => toolchain.dev_server(),
        Commands::Release(args) => run_release(toolchain, args)?,
        Commands::Check { build_type } => run_check(toolchain, *build_type),
    };

    Ok(ok)
}

fn run_lint<R: CommandRunner + ?Sized>(
    toolchain: &Toolchain<'_, R>,
    fix: bool,
    unsafe_fixes: bool,
) -> bool {
    let mode = if fix {
        LintMode::fix(unsafe_fixes)
    } else {
        if unsafe_fixes {
            ui::display_boundary_warning(&BoundaryWarning::UnsafeWithoutFix);
        }
        LintMode::check()
    };
    toolchain.lint_all(mode)
}

/// Lint, frontend tests and a full build. Every stage runs even after an
/// earlier one fails; the failure count is reported at the end.
pub fn run_check<R: CommandRunner + ?Sized>(
    toolchain: &Toolchain<'_, R>,
    build_type: BuildType,
) -> bool {
    ui::display_section(&format!("Comprehensive Project Check ({})", build_type));

    let mut failures = 0;

    ui::display_step(1, 3, "Linting...");
    if !toolchain.lint_all(LintMode::check()) {
        failures += 1;
    }

    ui::display_step(2, 3, "Testing frontend...");
    if !toolchain.test_frontend(false) {
        failures += 1;
    }

    ui::display_step(3, 3, "Building all...");
    if !toolchain.build_all(build_type, false) {
        failures += 1;
    }

    if failures == 0 {
        ui::display_section("ALL CHECKS PASSED [OK]");
        true
    } else {
        ui::display_section(&format!("{} CHECK(S) FAILED [FAIL]", failures));
        false
    }
}

/// Plan a release, verify and build it, then write notes and print the
/// publish commands.
///
/// `--dry-run` stops after printing the notes: no checks, no build, nothing
/// written to disk.
pub fn run_release<R: CommandRunner + ?Sized>(
    toolchain: &Toolchain<'_, R>,
    args: &ReleaseArgs,
) -> Result<bool> {
    let project = toolchain.project;
    let settings = &project.config.release;
    let bump = args.bump.unwrap_or_else(|| settings.bump());

    let plan = ReleasePlan::resolve(
        toolchain.runner,
        &project.root,
        args.version.as_deref(),
        bump,
    )
    .context("Cannot determine the release version")?;

    if let (Some(previous), VersionSource::Bumped(bump)) = (&plan.previous, plan.source) {
        ui::display_field("Latest tag", &format!("v{}", previous));
        ui::display_field("Next version", &format!("{} ({} bump)", plan.version.tag(), bump));
    }
    for warning in &plan.warnings {
        ui::display_boundary_warning(warning);
    }

    let tag = plan.version.tag();
    let mut extra = vec![project.config.app_name.as_str()];
    if args.dry_run {
        extra.push("Mode: Dry run");
    }
    ui::display_banner(&format!("Creating Release {}", tag), &extra);

    if args.dry_run {
        ui::display_step(1, 3, "Skipping checks (--dry-run)");
        ui::display_step(2, 3, "Skipping build (--dry-run)");
    } else {
        if args.skip_checks {
            ui::display_step(1, 3, "Skipping checks (--skip-checks)");
        } else {
            ui::display_step(1, 3, "Running checks...");
            if !toolchain.lint_all(LintMode::check()) {
                ui::display_error("Lint failed. Use --skip-checks to bypass.");
                return Ok(false);
            }
            if !toolchain.test_frontend(false) {
                ui::display_error("Tests failed. Use --skip-checks to bypass.");
                return Ok(false);
            }
        }

        ui::display_step(2, 3, "Building Release...");
        if !toolchain.build_all(BuildType::Release, true) {
            ui::display_error("Build failed");
            return Ok(false);
        }
    }

    ui::display_step(3, 3, "Generating release notes...");
    let collected = release::collect_release_notes(
        toolchain.runner,
        &plan.version.to_string(),
        plan.previous.as_deref(),
        &project.root,
    );
    if let (Some(0), Some(previous)) = (collected.commit_count, plan.previous.as_deref()) {
        ui::display_boundary_warning(&BoundaryWarning::NoNewCommits {
            latest_tag: previous.to_string(),
        });
    }
    let notes = collected.markdown;

    let notes_path = release::notes_path(&project.root, &plan.version);
    if args.dry_run {
        ui::display_detail(&format!("Would write {}", project.relative(&notes_path).display()));
    } else {
        fs::write(&notes_path, &notes)
            .with_context(|| format!("Failed to write {}", notes_path.display()))?;
        ui::display_success(&project.relative(&notes_path).display().to_string());
    }

    ui::display_section("RELEASE NOTES PREVIEW");
    println!("{}", release::preview(&notes, settings.notes_preview_chars));

    ui::display_section("RELEASE COMMANDS");
    let commands = release::publish_commands(&plan.version, &notes_path, &settings.remote, args.draft);
    ui::display_commands("1. Create and push tag", &commands[..2]);
    ui::display_commands("2. Create GitHub Release", &commands[2..]);

    tracing::info!(version = %tag, dry_run = args.dry_run, "release prepared");
    Ok(true)
}
