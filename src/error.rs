use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

impl Error {
    /// Whether the failure comes from user-supplied settings rather than the
    /// environment the process runs in.
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Error};

    #[test]
    fn config_errors_are_user_errors() {
        let err = Error::from(ConfigError::InvalidField {
            field: "animation.exit",
            message: "must be greater than zero".to_string(),
        });
        assert!(err.is_user_error());
        assert_eq!(
            err.to_string(),
            "invalid configuration for animation.exit: must be greater than zero"
        );
        assert!(!Error::Telemetry("boom".into()).is_user_error());
    }
}
