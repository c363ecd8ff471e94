use crate::error::{PdgError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn semver_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)$").expect("valid version regex"))
}

/// Returns true if `tag` is exactly `vX.Y.Z` or `X.Y.Z`.
///
/// Pre-release or build suffixes (`v1.2.3-rc1`) and short forms (`1.2`) do not match.
pub fn is_semantic_tag(tag: &str) -> bool {
    semver_tag_regex().is_match(tag)
}

/// Semantic version representation
///
/// Ordering is lexicographic over `(major, minor, patch)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version from `1.2.3` or `v1.2.3`
    pub fn parse(text: &str) -> Result<Self> {
        let captures = semver_tag_regex().captures(text).ok_or_else(|| {
            PdgError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z or vX.Y.Z",
                text
            ))
        })?;

        let component = |index: usize, name: &str| -> Result<u32> {
            captures[index].parse::<u32>().map_err(|_| {
                PdgError::version(format!("Invalid {} version: {}", name, &captures[index]))
            })
        };

        Ok(Version {
            major: component(1, "major")?,
            minor: component(2, "minor")?,
            patch: component(3, "patch")?,
        })
    }

    /// Bump version according to bump type
    ///
    /// # Returns
    /// * `Err` - The bumped component would not fit in a `u32`
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let next = |value: u32, name: &str| {
            value.checked_add(1).ok_or_else(|| {
                PdgError::version(format!("Cannot bump {} version past {}", name, value))
            })
        };

        Ok(match bump_type {
            VersionBump::Major => Version::new(next(self.major, "major")?, 0, 0),
            VersionBump::Minor => Version::new(self.major, next(self.minor, "minor")?, 0),
            VersionBump::Patch => Version::new(self.major, self.minor, next(self.patch, "patch")?),
        })
    }

    /// Tag form used when talking to git (`v1.2.3`)
    pub fn tag(&self) -> String {
        format!("v{}", self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = PdgError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Magnitude of a version increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VersionBump {
    Major,
    Minor,
    #[default]
    Patch,
}

impl VersionBump {
    /// Lenient parse: `major`, `minor`, anything else is a patch bump.
    pub fn from_name(name: &str) -> Self {
        match name {
            "major" => VersionBump::Major,
            "minor" => VersionBump::Minor,
            _ => VersionBump::Patch,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the next version string from a bare `X.Y.Z` and a bump name.
///
/// Unrecognized bump names fall back to a patch bump.
pub fn increment_version(version: &str, bump: &str) -> Result<String> {
    let current = Version::parse(version)?;
    Ok(current.bump(VersionBump::from_name(bump))?.to_string())
}
