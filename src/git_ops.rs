//! Read-only git queries used by the release workflow.
//!
//! Every query fails soft: a git error, a missing `git` binary or empty output
//! all collapse to "no data" (`None` / empty list).

use crate::domain::{is_semantic_tag, parse_log_output, Commit};
use crate::error::Result;
use crate::runner::{CommandOutput, CommandRunner, CommandSpec};
use std::path::{Path, PathBuf};

/// Run a git query in `repo`, returning stdout only if it succeeded with non-blank output.
fn query<R: CommandRunner + ?Sized>(runner: &R, repo: &Path, args: &[&str]) -> Option<String> {
    let spec = CommandSpec::new("git").args(args.iter().copied()).cwd(repo);

    let output: CommandOutput = match runner.output(&spec) {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!(command = %spec, "git query could not run: {}", e);
            return None;
        }
    };

    if !output.success() {
        tracing::debug!(
            command = %spec,
            code = ?output.code,
            stderr = %output.stderr.trim(),
            "git query failed"
        );
        return None;
    }

    if output.stdout.trim().is_empty() {
        return None;
    }

    Some(output.stdout)
}

/// Finds the highest semantic-version tag in the repository.
///
/// Tags are listed with `git tag --sort=-v:refname`, so the first tag that is
/// exactly `vX.Y.Z` (or `X.Y.Z`) is the latest release.
///
/// # Returns
/// * `Some("1.2.3")` - The latest release tag with any leading `v` removed
/// * `None` - No matching tag, or the query failed
pub fn latest_semantic_tag<R: CommandRunner + ?Sized>(runner: &R, repo: &Path) -> Option<String> {
    let stdout = query(runner, repo, &["tag", "--sort=-v:refname"])?;

    let tag = stdout
        .lines()
        .map(str::trim)
        .find(|tag| is_semantic_tag(tag))?;

    Some(tag.strip_prefix('v').unwrap_or(tag).to_string())
}

/// Gets the commits after tag `v{tag}` up to HEAD, most recent first.
///
/// # Arguments
/// * `tag` - Bare version of the previous release (e.g. "1.0.0")
/// * `repo` - Repository working directory
///
/// # Returns
/// Parsed commits; empty if the range is empty or the query failed
pub fn commits_since<R: CommandRunner + ?Sized>(runner: &R, tag: &str, repo: &Path) -> Vec<Commit> {
    let range = format!("v{}..HEAD", tag);
    match query(runner, repo, &["log", range.as_str(), "--pretty=format:%s|%h|%an"]) {
        Some(stdout) => parse_log_output(&stdout),
        None => Vec::new(),
    }
}

/// Lists tracked files matching `pathspecs`, relative to `repo`.
///
/// Returns an empty list when nothing matches or git is unavailable.
pub fn tracked_files<R: CommandRunner + ?Sized>(
    runner: &R,
    repo: &Path,
    pathspecs: &[String],
) -> Vec<PathBuf> {
    let mut args = vec!["ls-files", "--"];
    args.extend(pathspecs.iter().map(String::as_str));

    query(runner, repo, &args)
        .map(|stdout| {
            stdout
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathBuf::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Resolves the project root.
///
/// Discovers the git repository containing `start` (walking up parent
/// directories) and returns its working tree. Falls back to `start` when no
/// repository is found or the repository is bare.
pub fn discover_project_root(start: &Path) -> PathBuf {
    match repository_workdir(start) {
        Ok(Some(workdir)) => workdir,
        Ok(None) => start.to_path_buf(),
        Err(e) => {
            tracing::debug!(start = %start.display(), "no git repository found: {}", e);
            start.to_path_buf()
        }
    }
}

fn repository_workdir(start: &Path) -> Result<Option<PathBuf>> {
    let repo = git2::Repository::discover(start)?;
    Ok(repo.workdir().map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::MockRunner;

    const TAGS: &str = "git tag --sort=-v:refname";
    const LOG: &str = "git log v1.0.0..HEAD --pretty=format:%s|%h|%an";

    fn root() -> PathBuf {
        PathBuf::from("/tmp/dummy")
    }

    #[test]
    fn test_returns_version_without_v_prefix() {
        let runner = MockRunner::new().with_stdout(TAGS, 0, "v2.1.0\nv1.0.0\n");
        assert_eq!(latest_semantic_tag(&runner, &root()), Some("2.1.0".to_string()));
    }

    #[test]
    fn test_tag_query_runs_in_repository() {
        let runner = MockRunner::new().with_stdout(TAGS, 0, "v1.0.0\n");
        latest_semantic_tag(&runner, &root());
        assert_eq!(runner.calls()[0].cwd, Some(root()));
    }

    #[test]
    fn test_skips_non_semantic_tags() {
        let runner =
            MockRunner::new().with_stdout(TAGS, 0, "v1.3.0-rc1\nnightly\n1.2\nv1.2.9\nv1.0.0\n");
        assert_eq!(latest_semantic_tag(&runner, &root()), Some("1.2.9".to_string()));
    }

    #[test]
    fn test_accepts_tag_without_v() {
        let runner = MockRunner::new().with_stdout(TAGS, 0, "3.0.1\n");
        assert_eq!(latest_semantic_tag(&runner, &root()), Some("3.0.1".to_string()));
    }

    #[test]
    fn test_handles_no_tags() {
        let runner = MockRunner::new().with_stdout(TAGS, 0, "\n");
        assert_eq!(latest_semantic_tag(&runner, &root()), None);
    }

    #[test]
    fn test_handles_only_invalid_tags() {
        let runner = MockRunner::new().with_stdout(TAGS, 0, "v1.2.3-beta\nlatest\n");
        assert_eq!(latest_semantic_tag(&runner, &root()), None);
    }

    #[test]
    fn test_handles_nonzero_returncode() {
        let runner = MockRunner::new().with_stdout(TAGS, 128, "v1.0.0\n");
        assert_eq!(latest_semantic_tag(&runner, &root()), None);
    }

    #[test]
    fn test_handles_missing_git() {
        let runner = MockRunner::new();
        assert_eq!(latest_semantic_tag(&runner, &root()), None);
        assert!(commits_since(&runner, "1.0.0", &root()).is_empty());
    }

    #[test]
    fn test_parses_japanese_commits() {
        let runner = MockRunner::new().with_stdout(
            LOG,
            0,
            "feat: 日本語の新機能|abc1234|author\nfix: バグ修正|def5678|author\n",
        );
        let result = commits_since(&runner, "1.0.0", &root());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].message, "feat: 日本語の新機能");
        assert_eq!(result[0].hash, "abc1234");
        assert_eq!(result[1].message, "fix: バグ修正");
        assert_eq!(result[1].hash, "def5678");
    }

    #[test]
    fn test_commit_query_uses_v_prefixed_range() {
        let runner = MockRunner::new().with_stdout(LOG, 0, "feat: x|abc|me");
        commits_since(&runner, "1.0.0", &root());
        assert_eq!(runner.command_lines(), vec![LOG]);
    }

    #[test]
    fn test_handles_empty_stdout() {
        let runner = MockRunner::new().with_stdout(LOG, 0, "");
        assert!(commits_since(&runner, "1.0.0", &root()).is_empty());
    }

    #[test]
    fn test_commits_nonzero_returncode() {
        let runner = MockRunner::new().with_stdout(LOG, 128, "feat: x|abc|me");
        assert!(commits_since(&runner, "1.0.0", &root()).is_empty());
    }

    #[test]
    fn test_tracked_files() {
        let runner = MockRunner::new().with_stdout(
            "git ls-files -- :(glob)src/**/*.cpp",
            0,
            "src/main.cpp\nsrc/app/window.cpp\n",
        );
        let files = tracked_files(&runner, &root(), &[":(glob)src/**/*.cpp".to_string()]);
        assert_eq!(
            files,
            vec![PathBuf::from("src/main.cpp"), PathBuf::from("src/app/window.cpp")]
        );
    }

    #[test]
    fn test_discover_project_root_outside_repository() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = discover_project_root(dir.path());
        // Either the temp dir itself or an enclosing checkout; never empty
        assert!(!root.as_os_str().is_empty());
    }

    #[test]
    fn test_discover_project_root_inside_repository() {
        let dir = tempfile::TempDir::new().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        let nested = dir.path().join("frontend").join("src");
        std::fs::create_dir_all(&nested).unwrap();

        let root = discover_project_root(&nested);
        assert_eq!(
            root.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
