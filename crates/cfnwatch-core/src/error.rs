use thiserror::Error;

/// Failure of a single poll against the orchestration service.
///
/// The variant decides the propagation policy: `Recoverable` is logged and
/// the watcher waits for its next tick, `Fatal` stops every watcher and the
/// process exits non-zero.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("service error {code}: {message}")]
    Recoverable { code: String, message: String },

    #[error("fatal: {cause}")]
    Fatal {
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl WatchError {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Recoverable {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn fatal(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Fatal {
            cause: cause.into(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number, got '{value}'")]
    NotANumber { var: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

pub type Result<T> = std::result::Result<T, WatchError>;
