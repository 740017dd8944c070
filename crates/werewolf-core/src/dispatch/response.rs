//! Response values and the outcome of one dispatch.

use serde::{Deserialize, Serialize};

use crate::error::Fault;
use crate::protocol::AgentId;

/// What the agent sends back for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Response {
    Empty,
    Text(String),
}

impl Response {
    /// Response boundary for target decisions: id becomes `Agent[NN]`.
    pub fn target(id: AgentId) -> Self {
        Response::Text(id.wire_name())
    }

    /// The value the transport sends; empty responses are `""`.
    pub fn as_wire(&self) -> &str {
        match self {
            Response::Empty => "",
            Response::Text(s) => s,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Response::Empty)
    }
}

/// A response plus the fault (if any) recorded while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub response: Response,
    pub fault: Option<Fault>,
}

impl Dispatched {
    pub fn ok(response: Response) -> Self {
        Self {
            response,
            fault: None,
        }
    }

    pub fn empty() -> Self {
        Self::ok(Response::Empty)
    }

    /// A faulted action still answers, with an empty response.
    pub fn faulted(fault: Fault) -> Self {
        Self {
            response: Response::Empty,
            fault: Some(fault),
        }
    }

    /// Fold a timed handler's result into an outcome.
    pub fn from_result(result: Result<Response, Fault>) -> Self {
        match result {
            Ok(response) => Self::ok(response),
            Err(fault) => Self::faulted(fault),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;

    #[test]
    fn test_target_response_uses_wire_name() {
        assert_eq!(Response::target(AgentId(2)).as_wire(), "Agent[02]");
    }

    #[test]
    fn test_empty_response_is_blank_on_wire() {
        assert_eq!(Response::Empty.as_wire(), "");
        assert!(Dispatched::empty().response.is_empty());
    }

    #[test]
    fn test_faulted_outcome_has_empty_response() {
        let out = Dispatched::from_result(Err(Fault::HandlerError(HandlerError::EmptyRoster)));
        assert!(out.response.is_empty());
        assert_eq!(out.fault, Some(Fault::HandlerError(HandlerError::EmptyRoster)));
    }
}
