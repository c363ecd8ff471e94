use crate::runner::{run_step, CommandRunner, CommandSpec};
use crate::toolchain::{BuildType, Toolchain};
use crate::ui;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File count and total size of a directory tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirStats {
    pub files: usize,
    pub bytes: u64,
    /// Regular files directly inside the directory, sorted by name, with sizes
    pub top_level: Vec<(String, u64)>,
}

impl DirStats {
    pub fn collect(dir: &Path) -> io::Result<Self> {
        let mut stats = DirStats::default();
        let mut pending: Vec<PathBuf> = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            for entry in fs::read_dir(&current)? {
                let entry = entry?;
                let file_type = entry.file_type()?;
                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if file_type.is_file() {
                    let size = entry.metadata()?.len();
                    stats.files += 1;
                    stats.bytes += size;
                    if current == dir {
                        stats
                            .top_level
                            .push((entry.file_name().to_string_lossy().into_owned(), size));
                    }
                }
            }
        }

        stats.top_level.sort();
        Ok(stats)
    }
}

impl<'a, R: CommandRunner + ?Sized> Toolchain<'a, R> {
    fn cmake_configure(&self, build_type: BuildType) -> CommandSpec {
        let root = &self.project.root;
        CommandSpec::new("cmake")
            .arg("-S")
            .arg(root.to_string_lossy())
            .arg("-B")
            .arg(self.project.build_dir().to_string_lossy())
            .arg(format!("-DCMAKE_BUILD_TYPE={}", build_type))
            .cwd(root)
    }

    fn cmake_build(&self, build_type: BuildType, clean: bool) -> CommandSpec {
        let mut spec = CommandSpec::new("cmake")
            .arg("--build")
            .arg(self.project.build_dir().to_string_lossy())
            .args(["--config", build_type.as_str(), "--parallel"]);
        if clean {
            spec = spec.arg("--clean-first");
        }
        spec.cwd(&self.project.root)
    }

    /// Configure and build the native backend with CMake.
    pub fn build_backend(&self, build_type: BuildType, clean: bool) -> bool {
        let mode = format!("Type: {}", build_type);
        let mut extra = vec![mode.as_str()];
        if clean {
            extra.push("Mode: Clean Build");
        }
        ui::display_banner("Building Backend", &extra);

        if !run_step(self.runner, &self.cmake_configure(build_type), "CMake configure") {
            ui::display_error("CMake configure failed");
            return false;
        }

        if !run_step(
            self.runner,
            &self.cmake_build(build_type, clean),
            &format!("CMake build ({})", build_type),
        ) {
            ui::display_error("Backend build failed!");
            return false;
        }

        ui::display_section("BACKEND BUILD SUCCESSFUL");
        true
    }

    /// Install dependencies if needed and run the frontend build script.
    ///
    /// `clean` forces a dependency reinstall before building.
    pub fn build_frontend(&self, clean: bool) -> bool {
        let extra: &[&str] = if clean { &["Mode: Clean Build"] } else { &[] };
        ui::display_banner("Building Frontend", extra);

        let frontend_dir = self.project.frontend_dir();
        if !frontend_dir.is_dir() {
            ui::display_error(&format!(
                "Frontend directory not found: {}",
                frontend_dir.display()
            ));
            return false;
        }

        ui::display_step(1, 3, "Detecting package manager...");
        let Some(pm) = self.package_manager() else {
            return false;
        };

        ui::display_step(2, 3, "Checking dependencies...");
        if !self.ensure_frontend_deps(&pm, clean) {
            return false;
        }

        ui::display_step(3, 3, "Building frontend...");
        if !run_step(
            self.runner,
            &pm.run_script("build", &frontend_dir),
            &format!("{} run build", pm.kind),
        ) {
            ui::display_error("Frontend build failed!");
            return false;
        }

        let dist_dir = frontend_dir.join("dist");
        if !dist_dir.is_dir() {
            ui::display_error("Build output directory not found!");
            ui::display_detail(&format!("Expected: {}", dist_dir.display()));
            return false;
        }

        ui::display_section("FRONTEND BUILD SUCCESSFUL");
        report_output(&dist_dir);
        true
    }

    /// Build backend then frontend; both must succeed.
    pub fn build_all(&self, build_type: BuildType, clean: bool) -> bool {
        let backend = self.build_backend(build_type, clean);
        let frontend = self.build_frontend(clean);

        if backend && frontend {
            ui::display_section("ALL BUILDS SUCCESSFUL");
            true
        } else {
            ui::display_section("SOME BUILDS FAILED");
            if !backend {
                ui::display_failure("Backend");
            }
            if !frontend {
                ui::display_failure("Frontend");
            }
            false
        }
    }
}

fn report_output(dist_dir: &Path) {
    match DirStats::collect(dist_dir) {
        Ok(stats) => {
            ui::display_field("Output", &dist_dir.display().to_string());
            ui::display_field("Total size", &ui::format_megabytes(stats.bytes));
            ui::display_field("Files", &stats.files.to_string());
            for (name, size) in &stats.top_level {
                ui::display_detail(&format!("  {} ({})", name, ui::format_kilobytes(*size)));
            }
        }
        Err(e) => tracing::warn!(dir = %dist_dir.display(), "could not inspect build output: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::runner::MockRunner;
    use crate::toolchain::testing::everything;
    use crate::toolchain::Project;
    use tempfile::TempDir;

    fn configure_line(root: &Path, build_type: &str) -> String {
        format!(
            "cmake -S {} -B {} -DCMAKE_BUILD_TYPE={}",
            root.display(),
            root.join("build").display(),
            build_type
        )
    }

    fn build_line(root: &Path, build_type: &str) -> String {
        format!(
            "cmake --build {} --config {} --parallel",
            root.join("build").display(),
            build_type
        )
    }

    #[test]
    fn test_dir_stats() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "0123456789").unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets").join("app.js"), "abcde").unwrap();

        let stats = DirStats::collect(dir.path()).unwrap();
        assert_eq!(stats.files, 2);
        assert_eq!(stats.bytes, 15);
        assert_eq!(stats.top_level, vec![("index.html".to_string(), 10)]);
    }

    #[test]
    fn test_build_backend_runs_configure_then_build() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let project = Project::new(root, Config::default());
        let runner = MockRunner::new()
            .with_status(configure_line(root, "Debug"), true)
            .with_status(build_line(root, "Debug"), true);
        let toolchain = Toolchain::new(&runner, &project);

        assert!(toolchain.build_backend(BuildType::Debug, false));
        assert_eq!(
            runner.command_lines(),
            vec![configure_line(root, "Debug"), build_line(root, "Debug")]
        );
    }

    #[test]
    fn test_build_backend_clean_first() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let project = Project::new(root, Config::default());
        let clean_line = format!("{} --clean-first", build_line(root, "Release"));
        let runner = MockRunner::new()
            .with_status(configure_line(root, "Release"), true)
            .with_status(clean_line.clone(), true);
        let toolchain = Toolchain::new(&runner, &project);

        assert!(toolchain.build_backend(BuildType::Release, true));
        assert_eq!(runner.command_lines()[1], clean_line);
    }

    #[test]
    fn test_build_backend_stops_when_configure_fails() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let project = Project::new(root, Config::default());
        let runner = MockRunner::new().with_status(configure_line(root, "Release"), false);
        let toolchain = Toolchain::new(&runner, &project);

        assert!(!toolchain.build_backend(BuildType::Release, false));
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_build_frontend_missing_directory() {
        let dir = TempDir::new().unwrap();
        let project = Project::new(dir.path(), Config::default());
        let runner = MockRunner::new();
        let toolchain = Toolchain::new(&runner, &project).with_locator(everything);

        assert!(!toolchain.build_frontend(false));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_build_frontend_requires_dist() {
        let dir = TempDir::new().unwrap();
        let frontend = dir.path().join("frontend");
        fs::create_dir_all(&frontend).unwrap();

        let project = Project::new(dir.path(), Config::default());
        let runner = MockRunner::new()
            .with_stdout("bun --version", 0, "1.1.30")
            .with_status("bun install", true)
            .with_status("bun run build", true);
        let toolchain = Toolchain::new(&runner, &project).with_locator(everything);

        // Build "succeeds" but produces no dist directory
        assert!(!toolchain.build_frontend(false));

        fs::create_dir_all(frontend.join("dist")).unwrap();
        fs::write(frontend.join("dist").join("index.html"), "<html/>").unwrap();
        assert!(toolchain.build_frontend(true));
    }
}
