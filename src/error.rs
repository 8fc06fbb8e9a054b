use thiserror::Error;

/// Everything that can go wrong while shepherding one hand through the
/// pipeline. Per-hand faults are recorded against the hand and never
/// abort the surrounding batch.
#[derive(Debug, Error)]
pub enum Error {
    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),
    #[error("solver response malformed: {0}")]
    SolverMalformedResponse(String),
    #[error("ai unavailable: {0}")]
    AiUnavailable(String),
    #[error("ai response malformed: {0}")]
    AiMalformedResponse(String),
    #[error("no gto record for hand #{0}")]
    MissingRecord(String),
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
    #[error("storage failure: {0}")]
    Encoding(#[from] serde_json::Error),
}
