/// A commit harvested from `git log`
///
/// Only the subject line and the abbreviated hash are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub message: String,
    pub hash: String,
}

impl Commit {
    pub fn new(message: impl Into<String>, hash: impl Into<String>) -> Self {
        Commit {
            message: message.into(),
            hash: hash.into(),
        }
    }

    /// Parse one `subject|hash|author` line.
    ///
    /// The line is split into at most three fields, so a `|` inside the author
    /// name is harmless. A line with fewer than two fields yields `None`.
    pub fn parse_log_line(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, '|');
        let message = parts.next()?;
        let hash = parts.next()?;
        Some(Commit::new(message, hash))
    }
}

/// Parse the whole output of `git log --pretty=format:%s|%h|%an`.
///
/// Blank lines and malformed lines are skipped.
pub fn parse_log_output(stdout: &str) -> Vec<Commit> {
    stdout
        .trim()
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(Commit::parse_log_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let commit = Commit::parse_log_line("feat: add login|abc1234|Alice").unwrap();
        assert_eq!(commit.message, "feat: add login");
        assert_eq!(commit.hash, "abc1234");
    }

    #[test]
    fn test_parse_line_without_author() {
        let commit = Commit::parse_log_line("fix: crash|def5678").unwrap();
        assert_eq!(commit, Commit::new("fix: crash", "def5678"));
    }

    #[test]
    fn test_parse_malformed_line() {
        assert_eq!(Commit::parse_log_line("no separators here"), None);
    }

    #[test]
    fn test_parse_author_with_pipe() {
        let commit = Commit::parse_log_line("docs: readme|0a1b2c3|Team | Bot").unwrap();
        assert_eq!(commit.message, "docs: readme");
        assert_eq!(commit.hash, "0a1b2c3");
    }

    #[test]
    fn test_parse_output_preserves_non_ascii() {
        let commits =
            parse_log_output("feat: 日本語の新機能|abc1234|author\nfix: バグ修正|def5678|author\n");
        assert_eq!(
            commits,
            vec![
                Commit::new("feat: 日本語の新機能", "abc1234"),
                Commit::new("fix: バグ修正", "def5678"),
            ]
        );
    }

    #[test]
    fn test_parse_output_drops_blank_and_malformed() {
        let commits = parse_log_output("\nfeat: a|111|x\n\ngarbage\nfix: b|222|y\n");
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[1].hash, "222");
    }

    #[test]
    fn test_parse_output_empty() {
        assert!(parse_log_output("").is_empty());
        assert!(parse_log_output("  \n \n").is_empty());
    }
}
