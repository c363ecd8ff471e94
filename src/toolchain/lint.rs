use crate::git_ops;
use crate::runner::{run_step, CommandRunner, CommandSpec};
use crate::toolchain::Toolchain;
use crate::ui;
use std::path::Path;

/// How the lint commands treat problems they find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LintMode {
    /// Rewrite files instead of only reporting
    pub fix: bool,
    /// Also apply fixes the linter marks as unsafe (only with `fix`)
    pub unsafe_fixes: bool,
}

impl LintMode {
    pub fn check() -> Self {
        LintMode::default()
    }

    pub fn fix(unsafe_fixes: bool) -> Self {
        LintMode {
            fix: true,
            unsafe_fixes,
        }
    }

    /// Extra arguments forwarded to the frontend `lint` script
    fn frontend_args(&self) -> Vec<&'static str> {
        match (self.fix, self.unsafe_fixes) {
            (false, _) => vec![],
            (true, false) => vec!["--", "--write"],
            (true, true) => vec!["--", "--write", "--unsafe"],
        }
    }
}

impl<'a, R: CommandRunner + ?Sized> Toolchain<'a, R> {
    /// Run the frontend linter and the TypeScript type check.
    pub fn lint_frontend(&self, mode: LintMode) -> bool {
        let extra: &[&str] = if mode.fix { &["Mode: Auto-fix"] } else { &[] };
        ui::display_banner("Linting Frontend", extra);

        let Some(pm) = self.package_manager() else {
            return false;
        };
        let frontend_dir = self.project.frontend_dir();

        let lint = pm
            .run_script("lint", &frontend_dir)
            .args(mode.frontend_args());
        let linted = run_step(self.runner, &lint, "Biome lint");

        ui::display_status("Type checking...");
        let typed = run_step(
            self.runner,
            &pm.run_script("typecheck", &frontend_dir),
            "TypeScript check",
        );

        if linted && typed {
            ui::display_success("Lint passed!");
            true
        } else {
            ui::display_failure("Lint failed");
            false
        }
    }

    /// Check (or with `fix`, rewrite) C++ formatting with clang-format.
    pub fn lint_cpp(&self, mode: LintMode) -> bool {
        let extra: &[&str] = if mode.fix { &["Mode: Auto-fix"] } else { &[] };
        ui::display_banner("Linting C++", extra);

        let Some(clang_format) = (self.locate)("clang-format") else {
            ui::display_error("clang-format not found");
            ui::display_detail("Install LLVM and make sure clang-format is on PATH.");
            return false;
        };

        let version = CommandSpec::new(&clang_format).arg("--version");
        if let Ok(output) = self.runner.output(&version) {
            if output.success() {
                println!("\n{}", output.stdout.trim());
            }
        }

        let root = &self.project.root;
        let files = git_ops::tracked_files(
            self.runner,
            root,
            &self.project.config.lint.cpp_pathspecs(),
        );
        if files.is_empty() {
            ui::display_error("No C++ files found");
            return false;
        }
        println!("\nFound {} C++ files", files.len());

        let mut errors = 0;
        for file in &files {
            let ok = self.format_file(&clang_format, file, mode.fix);
            if !ok {
                errors += 1;
                ui::display_failure(&file.display().to_string());
            } else if mode.fix {
                ui::display_success(&file.display().to_string());
            }
        }

        if errors > 0 {
            println!();
            ui::display_failure(&format!("{} file(s) need formatting", errors));
            if !mode.fix {
                ui::display_detail("Run with --fix to auto-format");
            }
            false
        } else {
            println!();
            ui::display_success("All files properly formatted!");
            true
        }
    }

    fn format_file(&self, clang_format: &Path, file: &Path, fix: bool) -> bool {
        let args: &[&str] = if fix {
            &["-i", "-style=file"]
        } else {
            &["--style=file", "--dry-run", "--Werror"]
        };
        let spec = CommandSpec::new(clang_format)
            .args(args.iter().copied())
            .arg(file.to_string_lossy())
            .cwd(&self.project.root);

        match self.runner.output(&spec) {
            Ok(output) => output.success(),
            Err(e) => {
                tracing::warn!(file = %file.display(), "clang-format could not run: {}", e);
                false
            }
        }
    }

    /// Lint frontend and C++; both run even when the first fails.
    pub fn lint_all(&self, mode: LintMode) -> bool {
        ui::display_section("Linting All (Frontend + C++)");

        let frontend = self.lint_frontend(mode);
        let cpp = self.lint_cpp(mode);

        if frontend && cpp {
            ui::display_section("ALL LINTS PASSED");
            true
        } else {
            ui::display_section("SOME LINTS FAILED");
            false
        }
    }
}
