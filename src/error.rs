//! Unified error types for the CLI.

use std::fmt;

// ---------------------------------------------------------------------------
// ResolveError
// ---------------------------------------------------------------------------

/// Errors from turning a collection into choice entries or walking a dotted
/// field path against one of its values.
#[derive(Debug)]
pub enum ResolveError {
    /// The supplied collection is neither a mapping nor a sequence.
    NotACollection,
    /// A path segment named a field the record or mapping does not have.
    UnknownField(String),
    /// A path segment was requested on a scalar value.
    FieldOnScalar(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotACollection => write!(f, "invalid collection: expected a mapping or sequence"),
            Self::UnknownField(name) => write!(f, "`{name}` is not a valid field"),
            Self::FieldOnScalar(name) => {
                write!(f, "field `{name}` requested on a scalar value")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

// ---------------------------------------------------------------------------
// PromptError
// ---------------------------------------------------------------------------

/// Unrecoverable prompt failures. Validation misses are not errors; they are
/// reported to the output sink and retried inside the prompt loop.
#[derive(Debug)]
pub enum PromptError {
    /// The input source failed or was interrupted mid-read.
    Interrupted(std::io::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupted(e) => write!(f, "input interrupted: {e}"),
        }
    }
}

impl std::error::Error for PromptError {}

impl From<std::io::Error> for PromptError {
    fn from(e: std::io::Error) -> Self {
        Self::Interrupted(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ComposeError
// ---------------------------------------------------------------------------

/// Errors from invoking `docker-compose`.
#[derive(Debug)]
pub enum ComposeError {
    /// The subprocess could not be spawned at all.
    Spawn(std::io::Error),
    /// The subprocess ran and exited nonzero (or was killed by a signal).
    Failed {
        operation: String,
        code: Option<i32>,
    },
    /// `pull` failed; usually a registry login or connectivity problem.
    PullFailed,
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "failed to run docker-compose: {e}"),
            Self::Failed { operation, code } => match code {
                Some(code) => write!(f, "docker-compose {operation} exited with status {code}"),
                None => write!(f, "docker-compose {operation} was terminated by a signal"),
            },
            Self::PullFailed => write!(
                f,
                "there was an error using 'docker-compose pull'. Are you logged into docker hub?"
            ),
        }
    }
}

impl std::error::Error for ComposeError {}

impl From<std::io::Error> for ComposeError {
    fn from(e: std::io::Error) -> Self {
        Self::Spawn(e)
    }
}

// ---------------------------------------------------------------------------
// CompError — top-level
// ---------------------------------------------------------------------------

/// Top-level error type for a CLI workflow step.
#[derive(Debug)]
pub enum CompError {
    Config(ConfigError),
    Compose(ComposeError),
    Prompt(PromptError),
    Resolve(ResolveError),
}

impl fmt::Display for CompError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Compose(e) => write!(f, "compose: {e}"),
            Self::Prompt(e) => write!(f, "prompt: {e}"),
            Self::Resolve(e) => write!(f, "choices: {e}"),
        }
    }
}

impl std::error::Error for CompError {}

impl From<ConfigError> for CompError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ComposeError> for CompError {
    fn from(e: ComposeError) -> Self {
        Self::Compose(e)
    }
}

impl From<PromptError> for CompError {
    fn from(e: PromptError) -> Self {
        Self::Prompt(e)
    }
}

impl From<ResolveError> for CompError {
    fn from(e: ResolveError) -> Self {
        Self::Resolve(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_error_display() {
        assert_eq!(
            ResolveError::NotACollection.to_string(),
            "invalid collection: expected a mapping or sequence"
        );
        assert_eq!(
            ResolveError::UnknownField("dek".into()).to_string(),
            "`dek` is not a valid field"
        );
        assert_eq!(
            ResolveError::FieldOnScalar("issue".into()).to_string(),
            "field `issue` requested on a scalar value"
        );
    }

    #[test]
    fn prompt_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed");
        let e = PromptError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("input interrupted:"), "got: {s}");
        assert!(s.contains("stdin closed"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn compose_error_display_variants() {
        let spawn = ComposeError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert!(spawn.to_string().contains("no such file"));
        assert_eq!(
            ComposeError::Failed {
                operation: "up".into(),
                code: Some(1),
            }
            .to_string(),
            "docker-compose up exited with status 1"
        );
        assert!(ComposeError::PullFailed
            .to_string()
            .contains("logged into docker hub"));
    }

    #[test]
    fn comp_error_wraps_sources() {
        let e = CompError::from(ComposeError::PullFailed);
        assert!(e.to_string().starts_with("compose:"), "got: {e}");
        let e = CompError::from(ResolveError::NotACollection);
        assert!(e.to_string().starts_with("choices:"), "got: {e}");
    }
}
