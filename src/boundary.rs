use std::fmt;

/// Non-fatal conditions met while planning a release.
/// These are reported to the user but never stop the workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No `vX.Y.Z` tag exists, so the release starts from a fixed version
    NoSemanticTag { initial_version: String },
    /// `git log` since the latest tag returned nothing: HEAD is at the tag,
    /// or the range could not be read
    NoNewCommits { latest_tag: String },
    /// An explicit version does not move past the latest tag
    VersionNotIncreasing { requested: String, latest: String },
    /// `--unsafe` only has an effect together with `--fix`
    UnsafeWithoutFix,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoSemanticTag { initial_version } => {
                write!(
                    f,
                    "No existing tags found. Using v{}",
                    initial_version
                )
            }
            BoundaryWarning::NoNewCommits { latest_tag } => {
                write!(f, "No commits found since tag 'v{}'", latest_tag)
            }
            BoundaryWarning::VersionNotIncreasing { requested, latest } => {
                write!(
                    f,
                    "Requested version v{} is not newer than latest tag v{}",
                    requested, latest
                )
            }
            BoundaryWarning::UnsafeWithoutFix => {
                write!(f, "--unsafe has no effect without --fix")
            }
        }
    }
}
