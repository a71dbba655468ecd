use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    /// Horizon validation failed (end <= start, or outside the shift-type grid).
    #[error("Invalid horizon: {0}")]
    HorizonInvalid(String),

    /// A window had zero eligible candidates; only fatal when the caller requested `strict`.
    #[error("No eligible employees for window: {0}")]
    NoEligibleEmployees(String),

    /// The apply-time re-check found a conflicting write since preview; the whole run is rolled back.
    #[error("Conflict detected while applying plan: {0}")]
    ConflictOnApply(String),

    /// The orchestrator's deadline elapsed before the run completed; no side effects occurred.
    #[error("Planning run exceeded its deadline")]
    DeadlineExceeded,

    /// The Repository Interface could not be reached or timed out.
    #[error("Repository unavailable: {0}")]
    RepositoryUnavailable(String),

    /// A precondition the engine treats as a bug, not a recoverable outcome (e.g. fairness_weight <= 0).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
