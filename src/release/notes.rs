use crate::domain::{categorize, Category, CategoryBuckets};
use crate::git_ops;
use crate::runner::CommandRunner;
use std::path::Path;

/// Render release notes for already-categorized commits.
///
/// Only features, fixes, performance and refactor sections are emitted, each
/// only when it has entries. Documentation and uncategorized commits never
/// appear in the notes.
pub fn render_release_notes(version: &str, buckets: Option<&CategoryBuckets>) -> String {
    let mut lines = vec![format!("## v{}\n", version)];

    if let Some(buckets) = buckets {
        for category in Category::RENDERED {
            let messages = buckets.get(category);
            if messages.is_empty() {
                continue;
            }

            lines.push(format!("## {}\n", category.title()));
            for message in messages {
                lines.push(format!("- {}", category.clean_message(message)));
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Release notes together with what they were built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub markdown: String,
    /// Commits harvested since the previous tag; `None` without a previous tag
    pub commit_count: Option<usize>,
}

/// Harvest commits since `previous_tag`, categorize and render them.
///
/// With no previous tag there is nothing to diff against, so only the version
/// heading is produced and git is not queried.
///
/// # Arguments
/// * `version` - Bare version being released (e.g. "1.1.0")
/// * `previous_tag` - Bare version of the last release, if any
/// * `repo` - Repository working directory
pub fn collect_release_notes<R: CommandRunner + ?Sized>(
    runner: &R,
    version: &str,
    previous_tag: Option<&str>,
    repo: &Path,
) -> ReleaseNotes {
    let Some(tag) = previous_tag else {
        return ReleaseNotes {
            markdown: render_release_notes(version, None),
            commit_count: None,
        };
    };

    let commits = git_ops::commits_since(runner, tag, repo);
    tracing::info!(since = tag, count = commits.len(), "harvested commits");

    let buckets = categorize(&commits);
    for (category, messages) in buckets.iter() {
        tracing::debug!(%category, count = messages.len(), "categorized commits");
    }

    ReleaseNotes {
        markdown: render_release_notes(version, Some(&buckets)),
        commit_count: Some(commits.len()),
    }
}

/// Generate the Markdown release notes for `version`.
///
/// Same as [collect_release_notes], keeping only the Markdown.
pub fn generate_release_notes<R: CommandRunner + ?Sized>(
    runner: &R,
    version: &str,
    previous_tag: Option<&str>,
    repo: &Path,
) -> String {
    collect_release_notes(runner, version, previous_tag, repo).markdown
}
