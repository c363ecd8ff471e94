use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use pdg::cli::{self, orchestration, Cli};
use pdg::config;
use pdg::runner::SystemRunner;
use pdg::toolchain::{Project, Toolchain};
use pdg::ui;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run(&cli) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<bool> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    let root = cli::resolve_root(cli.root.as_deref(), &cwd);

    let config = config::load_config(cli.config.as_deref(), &root)
        .context("Error loading config")?;
    tracing::info!(root = %root.display(), app = %config.app_name, "project loaded");

    let project = Project::new(root, config);
    let runner = SystemRunner::new();
    let toolchain = Toolchain::new(&runner, &project);

    orchestration::run_command(&toolchain, &cli.command)
}

/// Logs go to stderr so command output stays clean.
fn init_logging(verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// A non-empty, valid `RUST_LOG` wins; otherwise `-v` picks the level.
fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    match rust_log.filter(|value| !value.trim().is_empty()).map(EnvFilter::try_new) {
        Some(Ok(filter)) => filter,
        _ => EnvFilter::default().add_directive(level.into()),
    }
}
