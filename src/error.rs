use thiserror::Error;

/// Errors surfaced by the session engine. All of them are recoverable and
/// leave the engine untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index {index} out of range for session of {len} solves")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No solves to apply penalty to")]
    EmptySession,

    #[error("Cannot change penalty while timer is running")]
    TimerRunning,
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            EngineError::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "Index 3 out of range for session of 2 solves"
        );
        assert_eq!(
            EngineError::EmptySession.to_string(),
            "No solves to apply penalty to"
        );
    }
}
