//! Release planning: version selection, notes, and the follow-up commands.

pub mod notes;

pub use notes::{collect_release_notes, generate_release_notes, render_release_notes, ReleaseNotes};

use crate::boundary::BoundaryWarning;
use crate::domain::{Version, VersionBump};
use crate::error::Result;
use crate::git_ops;
use crate::runner::CommandRunner;
use std::path::{Path, PathBuf};

/// Version used when the repository has no release tag yet
pub const INITIAL_VERSION: Version = Version {
    major: 1,
    minor: 0,
    patch: 0,
};

/// Where the release version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// Given on the command line
    Explicit,
    /// Latest tag bumped by the given kind
    Bumped(VersionBump),
    /// No tag found; [INITIAL_VERSION]
    Initial,
}

/// The version to release and the tag it follows
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    pub version: Version,
    /// Bare version of the latest release tag, if any
    pub previous: Option<String>,
    pub source: VersionSource,
    pub warnings: Vec<BoundaryWarning>,
}

impl ReleasePlan {
    /// Decide the release version.
    ///
    /// An explicit version always wins (a leading `v` is accepted). Otherwise
    /// the latest tag is bumped, or [INITIAL_VERSION] is used when there is none.
    ///
    /// # Returns
    /// * `Err` - An explicit version is not `X.Y.Z`, the latest tag has a
    ///   component too large to represent, or the bump would overflow
    pub fn resolve<R: CommandRunner + ?Sized>(
        runner: &R,
        repo: &Path,
        explicit: Option<&str>,
        bump: VersionBump,
    ) -> Result<Self> {
        let previous = git_ops::latest_semantic_tag(runner, repo);
        Self::from_previous(previous, explicit, bump)
    }

    /// [ReleasePlan::resolve] with the latest tag already known
    pub fn from_previous(
        previous: Option<String>,
        explicit: Option<&str>,
        bump: VersionBump,
    ) -> Result<Self> {
        let mut warnings = Vec::new();
        let latest = previous.as_deref().map(Version::parse).transpose()?;

        let (version, source) = match (explicit, latest) {
            (Some(text), _) => {
                let version = Version::parse(text.trim())?;
                if let Some(latest) = latest.filter(|latest| version <= *latest) {
                    warnings.push(BoundaryWarning::VersionNotIncreasing {
                        requested: version.to_string(),
                        latest: latest.to_string(),
                    });
                }
                (version, VersionSource::Explicit)
            }
            (None, Some(latest)) => (latest.bump(bump)?, VersionSource::Bumped(bump)),
            (None, None) => {
                warnings.push(BoundaryWarning::NoSemanticTag {
                    initial_version: INITIAL_VERSION.to_string(),
                });
                (INITIAL_VERSION, VersionSource::Initial)
            }
        };

        Ok(ReleasePlan {
            version,
            previous,
            source,
            warnings,
        })
    }
}

/// `RELEASE_NOTES_v1.2.3.md` in the project root
pub fn notes_path(root: &Path, version: &Version) -> PathBuf {
    root.join(format!("RELEASE_NOTES_{}.md", version.tag()))
}

/// The first `max_chars` characters of `notes`, with `...` when cut.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn preview(notes: &str, max_chars: usize) -> String {
    match notes.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &notes[..end]),
        None => notes.to_string(),
    }
}

/// Shell commands the maintainer runs to publish the release
pub fn publish_commands(version: &Version, notes: &Path, remote: &str, draft: bool) -> Vec<String> {
    let tag = version.tag();
    let draft_flag = if draft { "--draft " } else { "" };
    vec![
        format!("git tag -a {} -m \"Release {}\"", tag, tag),
        format!("git push {} {}", remote, tag),
        format!(
            "gh release create {} {}--title \"{}\" --notes-file \"{}\"",
            tag,
            draft_flag,
            tag,
            notes.display()
        ),
    ]
}
