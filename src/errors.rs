/// Error types for the pricing and strategy engine.
/// Expected conditions never surface here:
/// - Incomplete legs contribute zero P&L
/// - Implied-vol non-convergence returns the last estimate
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Parse(e.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
