//! Typed view of one inbound server message.
//!
//! Only the fields the core reads are modelled; everything else in the
//! message is ignored by serde.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::agent_name::{index_from_name, AgentId};
use super::request::RequestKind;
use crate::error::HandlerError;

/// Liveness of an agent in the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    Alive,
    Dead,
}

/// Per-game information attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    /// The server's name for this agent, e.g. `Agent[03]`.
    pub agent: String,
    #[serde(default)]
    pub day: u32,
    /// Roles known to this agent, keyed by agent name.
    #[serde(default)]
    pub role_map: BTreeMap<String, String>,
    #[serde(default)]
    pub status_map: BTreeMap<String, AgentStatus>,
}

impl GameInfo {
    /// Role identity of `self.agent`, if the server disclosed it.
    pub fn own_role(&self) -> Option<&str> {
        self.role_map.get(&self.agent).map(String::as_str)
    }

    /// Identifiers of every agent marked alive.
    pub fn alive_agents(&self) -> Result<BTreeSet<AgentId>, HandlerError> {
        self.status_map
            .iter()
            .filter(|(_, status)| **status == AgentStatus::Alive)
            .map(|(name, _)| index_from_name(name))
            .collect()
    }
}

/// Game-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSetting {
    /// Per-action budget in milliseconds.
    #[serde(default)]
    pub action_timeout: i64,
}

impl GameSetting {
    /// Non-positive budgets collapse to a zero-length deadline.
    pub fn action_deadline(&self) -> Duration {
        Duration::from_millis(u64::try_from(self.action_timeout).unwrap_or(0))
    }
}

/// One talk or whisper utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Talk {
    #[serde(default)]
    pub idx: u32,
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub turn: u32,
    pub agent: String,
    pub text: String,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub over: bool,
}

/// A decoded server message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    pub request: RequestKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<GameInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting: Option<GameSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talk_history: Option<Vec<Talk>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whisper_history: Option<Vec<Talk>>,
}

impl Packet {
    /// A bare packet carrying only a request kind.
    pub fn new(request: RequestKind) -> Self {
        Self {
            request,
            info: None,
            setting: None,
            talk_history: None,
            whisper_history: None,
        }
    }

    pub fn with_info(mut self, info: GameInfo) -> Self {
        self.info = Some(info);
        self
    }

    pub fn with_setting(mut self, setting: GameSetting) -> Self {
        self.setting = Some(setting);
        self
    }

    /// Decode one raw message.
    pub fn decode(raw: &str) -> Result<Self, HandlerError> {
        serde_json::from_str(raw).map_err(|e| HandlerError::MalformedPayload(e.to_string()))
    }
}
