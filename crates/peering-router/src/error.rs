//! Error type for router lifecycle operations.

/// Errors surfaced by the router's public API.
///
/// Processing problems inside the pipeline are never escalated here: a
/// bad update is logged and skipped so the pipeline keeps draining.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("update pipeline already started")]
    AlreadyStarted,

    #[error("update pipeline not started")]
    NotStarted,
}
