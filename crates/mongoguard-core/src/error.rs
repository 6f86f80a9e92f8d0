//! Shared error type across mongoguard crates.

use thiserror::Error;

/// Boxed source error from the driver or the BSON codec.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Stable error codes (one per failure class).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Explain command could not be sent or answered.
    Transport,
    /// Explain response could not be re-encoded or projected.
    Decode,
    /// Estimated cost exceeded the threshold.
    PolicyViolation,
    /// The delegated query itself failed.
    Query,
    /// Session or config file is misconfigured.
    Config,
    /// Caller cancelled the context.
    Cancelled,
    /// Caller deadline elapsed.
    DeadlineExceeded,
    /// Unsupported config version.
    UnsupportedVersion,
}

impl ErrorCode {
    /// String form used in logs and metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Decode => "DECODE",
            ErrorCode::PolicyViolation => "POLICY_VIOLATION",
            ErrorCode::Query => "QUERY",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Cancelled => "CANCELLED",
            ErrorCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GuardError>;

/// Unified error type used by core and session.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("could not run explain on query: {0}")]
    Explain(#[source] BoxError),
    #[error("could not marshal explain result: {0}")]
    Marshal(#[source] BoxError),
    #[error("could not unmarshal into explain result: {0}")]
    Unmarshal(#[source] BoxError),
    #[error("query plan: total docs examined surpassed threshold: '{operation}' {filter}")]
    ThresholdExceeded {
        operation: String,
        filter: String,
        examined: i64,
        threshold: i64,
    },
    #[error(transparent)]
    Query(BoxError),
    #[error("session misconfigured: {0}")]
    Config(String),
    #[error("{stage} cancelled")]
    Cancelled { stage: &'static str },
    #[error("{stage} deadline exceeded")]
    DeadlineExceeded { stage: &'static str },
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl GuardError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            GuardError::Explain(_) => ErrorCode::Transport,
            GuardError::Marshal(_) | GuardError::Unmarshal(_) => ErrorCode::Decode,
            GuardError::ThresholdExceeded { .. } => ErrorCode::PolicyViolation,
            GuardError::Query(_) => ErrorCode::Query,
            GuardError::Config(_) => ErrorCode::Config,
            GuardError::Cancelled { .. } => ErrorCode::Cancelled,
            GuardError::DeadlineExceeded { .. } => ErrorCode::DeadlineExceeded,
            GuardError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
        }
    }

    /// True for the expected, caller-actionable policy outcome.
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, GuardError::ThresholdExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_message_names_operation_and_filter() {
        let err = GuardError::ThresholdExceeded {
            operation: "find".into(),
            filter: r#"{"name":"x"}"#.into(),
            examined: 10_000,
            threshold: 10,
        };
        assert_eq!(
            err.to_string(),
            r#"query plan: total docs examined surpassed threshold: 'find' {"name":"x"}"#
        );
        assert_eq!(err.code().as_str(), "POLICY_VIOLATION");
        assert!(err.is_policy_violation());
    }

    #[test]
    fn query_errors_pass_through_verbatim() {
        let src: BoxError = "cursor exhausted".into();
        let err = GuardError::Query(src);
        assert_eq!(err.to_string(), "cursor exhausted");
        assert_eq!(err.code(), ErrorCode::Query);
    }
}
