//! Agent identifiers and their wire-format names.
//!
//! Handlers work with numeric [`AgentId`]s. The `Agent[NN]` form only appears
//! at the response boundary.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// Numeric agent identifier (`Agent[03]` → `AgentId(3)`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl AgentId {
    /// Wire-format name, zero-padded to two digits.
    pub fn wire_name(self) -> String {
        name_from_index(self)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn digits() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"\d+").expect("static regex"))
}

/// Derive the agent index from a name: the first run of digits.
///
/// `"Agent03"` and `"Agent[03]"` both yield 3. Pure and deterministic.
pub fn index_from_name(name: &str) -> Result<AgentId, HandlerError> {
    let found = digits()
        .find(name)
        .ok_or_else(|| HandlerError::InvalidAgentName(name.to_string()))?;
    found
        .as_str()
        .parse::<u32>()
        .map(AgentId)
        .map_err(|_| HandlerError::InvalidAgentName(name.to_string()))
}

/// Format an index as the server's agent name, e.g. `Agent[03]`.
pub fn name_from_index(id: AgentId) -> String {
    format!("Agent[{:0>2}]", id.0)
}
