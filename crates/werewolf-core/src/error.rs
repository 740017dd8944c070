//! Error taxonomy for the agent core.
//!
//! Two layers:
//!
//! - [`Fault`] / [`HandlerError`]: per-action faults. They never escape the
//!   dispatcher; they ride alongside the (possibly empty) response so the
//!   control loop can log them and keep the session going.
//! - [`AgentError`]: fatal contract violations and construction failures.

use std::time::Duration;

use crate::protocol::AgentId;

/// Ordinary failures raised by an action handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    #[error("no alive candidates to choose from")]
    EmptyRoster,

    #[error("selected target {target} is not in the alive roster")]
    TargetOutsideRoster { target: AgentId },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("agent name has no index digits: {0}")]
    InvalidAgentName(String),

    #[error("content provider failed: {0}")]
    Content(String),

    #[error("handler terminated without producing a result")]
    Aborted,

    #[error("could not start handler: {0}")]
    Spawn(String),
}

/// Side-channel fault attached to a dispatched response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("action timed out after {limit_ms}ms")]
    Timeout { limit_ms: u64 },

    #[error("handler error: {0}")]
    HandlerError(#[from] HandlerError),

    #[error("session already finished; request ignored")]
    SessionFinished,
}

impl Fault {
    pub(crate) fn timeout(limit: Duration) -> Self {
        Fault::Timeout {
            limit_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Short stable label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Fault::Timeout { .. } => "timeout",
            Fault::HandlerError(_) => "handler_error",
            Fault::SessionFinished => "session_finished",
        }
    }
}

/// Fatal agent errors.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A decision was requested before INITIALIZE resolved the field it needs.
    /// The server guarantees ordering, so this is a protocol contract violation.
    #[error("session state not resolved: {field} is required before INITIALIZE completes")]
    UnresolvedState { field: &'static str },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for fatal agent operations.
pub type AgentResult<T> = std::result::Result<T, AgentError>;
