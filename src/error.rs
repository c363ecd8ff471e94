use thiserror::Error;

/// Unified error type for pdg operations
#[derive(Error, Debug)]
pub enum PdgError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pdg
pub type Result<T> = std::result::Result<T, PdgError>;

impl PdgError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PdgError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        PdgError::Version(msg.into())
    }

    /// Wrap a process spawn failure for `program`
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        PdgError::Spawn {
            program: program.into(),
            source,
        }
    }

    /// True when the program could not be found at all
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PdgError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
