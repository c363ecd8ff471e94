use crate::runner::{run_step, CommandRunner, CommandSpec};
use crate::toolchain::{Locator, Toolchain};
use crate::ui;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Supported JavaScript package managers, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManagerKind {
    Bun,
    Npm,
}

impl PackageManagerKind {
    pub const PREFERENCE: [PackageManagerKind; 2] = [PackageManagerKind::Bun, PackageManagerKind::Npm];

    pub fn executable(&self) -> &'static str {
        match self {
            PackageManagerKind::Bun => "bun",
            PackageManagerKind::Npm => "npm",
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

/// A package manager that was found and answered `--version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    pub kind: PackageManagerKind,
    pub path: PathBuf,
    pub version: String,
}

impl PackageManager {
    /// `<pm> <args...>` run inside `dir`
    pub fn command<I, S>(&self, args: I, dir: &Path) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(&self.path).args(args).cwd(dir)
    }

    /// `<pm> run <script>` inside `dir`
    pub fn run_script(&self, script: &str, dir: &Path) -> CommandSpec {
        self.command(["run", script], dir)
    }
}

/// Find an available package manager, preferring Bun over npm.
///
/// A candidate must be on PATH and exit successfully for `--version`.
pub fn find_package_manager<R: CommandRunner + ?Sized>(
    runner: &R,
    locate: Locator,
) -> Option<PackageManager> {
    PackageManagerKind::PREFERENCE.into_iter().find_map(|kind| {
        let path = locate(kind.executable())?;
        let output = runner
            .output(&CommandSpec::new(&path).arg("--version"))
            .ok()
            .filter(|output| output.success())?;

        let version = output.stdout.trim().to_string();
        tracing::debug!(%kind, path = %path.display(), %version, "found package manager");
        Some(PackageManager {
            kind,
            path,
            version,
        })
    })
}

/// Whether `node_modules` is missing or older than `package.json`.
pub fn needs_install(frontend_dir: &Path) -> bool {
    let node_modules = frontend_dir.join("node_modules");
    let Some(modules_time) = modified(&node_modules) else {
        return true;
    };

    match modified(&frontend_dir.join("package.json")) {
        Some(package_time) if package_time > modules_time => {
            tracing::info!("package.json is newer than node_modules");
            true
        }
        _ => false,
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}

impl<'a, R: CommandRunner + ?Sized> Toolchain<'a, R> {
    /// Locate the package manager, reporting to the user when none exists.
    pub fn package_manager(&self) -> Option<PackageManager> {
        match find_package_manager(self.runner, self.locate) {
            Some(pm) => {
                ui::display_status(&format!("Found {}: {}", pm.kind, pm.version));
                Some(pm)
            }
            None => {
                ui::display_error("No package manager found (Bun or npm)");
                ui::display_detail("Install Bun (recommended) or Node.js with npm and retry.");
                None
            }
        }
    }

    /// Install frontend dependencies when they are missing or stale.
    ///
    /// `force` reinstalls regardless of timestamps.
    pub fn ensure_frontend_deps(&self, pm: &PackageManager, force: bool) -> bool {
        let frontend_dir = self.project.frontend_dir();

        if !force && !needs_install(&frontend_dir) {
            ui::display_detail("Dependencies are up to date");
            return true;
        }

        ui::display_detail("Installing dependencies...");
        let installed = run_step(
            self.runner,
            &pm.command(["install"], &frontend_dir),
            &format!("{} install", pm.kind),
        );
        if !installed {
            ui::display_error("Failed to install dependencies!");
        }
        installed
    }

    /// Start the frontend dev server and block until it exits.
    pub fn dev_server(&self) -> bool {
        ui::display_banner("Starting Development Server", &[]);

        let Some(pm) = self.package_manager() else {
            return false;
        };
        if !self.ensure_frontend_deps(&pm, false) {
            return false;
        }

        let frontend_dir = self.project.frontend_dir();
        run_step(
            self.runner,
            &pm.run_script("dev", &frontend_dir),
            &format!("{} run dev", pm.kind),
        )
    }
}
