//! Durable per-agent session state.
//!
//! Owned by exactly one active [`Agent`](crate::agent::Agent) at a time and
//! moved wholesale on hand-off. Fields the server resolves later are
//! `Option`s; presence is checked through the type, not by probing.

use std::collections::{BTreeSet, VecDeque};
use std::time::Duration;

use crate::error::{AgentError, AgentResult};
use crate::protocol::{AgentId, GameInfo, GameSetting, Packet, RequestKind, Talk};

use super::journal::AgentJournal;

#[derive(Debug)]
pub struct SessionState {
    /// Immutable for the session.
    pub display_name: String,
    /// Role identity as sent by the server; set at INITIALIZE.
    pub role: Option<String>,
    /// Derived from the server-assigned name (`info.agent`) at INITIALIZE.
    pub agent_index: Option<AgentId>,
    /// Budget for every timed action.
    pub action_deadline: Duration,
    /// Raw inbound messages, FIFO.
    pub backlog: VecDeque<String>,
    /// Replaced wholesale at DAILY_INITIALIZE.
    pub alive: BTreeSet<AgentId>,
    /// False from FINISH onward.
    pub active: bool,
    /// `None` for transient construction and after FINISH.
    pub journal: Option<AgentJournal>,

    pub info: Option<GameInfo>,
    pub setting: Option<GameSetting>,
    pub talk_history: Option<Vec<Talk>>,
    pub whisper_history: Option<Vec<Talk>>,
    pub request: Option<RequestKind>,
}

impl SessionState {
    pub fn new(display_name: impl Into<String>, default_deadline: Duration) -> Self {
        Self {
            display_name: display_name.into(),
            role: None,
            agent_index: None,
            action_deadline: default_deadline,
            backlog: VecDeque::new(),
            alive: BTreeSet::new(),
            active: true,
            journal: None,
            info: None,
            setting: None,
            talk_history: None,
            whisper_history: None,
            request: None,
        }
    }

    /// Queue one raw message behind everything already pending.
    pub fn push_message(&mut self, raw: impl Into<String>) {
        self.backlog.push_back(raw.into());
    }

    /// Take the oldest pending message.
    pub fn pop_message(&mut self) -> Option<String> {
        self.backlog.pop_front()
    }

    /// Fold a decoded packet into the protocol caches.
    ///
    /// Fields present in the packet replace the cached ones; absent fields
    /// leave the cache as it was.
    pub fn absorb(&mut self, packet: &Packet) {
        self.request = Some(packet.request.clone());
        if let Some(info) = &packet.info {
            self.info = Some(info.clone());
        }
        if let Some(setting) = &packet.setting {
            self.setting = Some(setting.clone());
        }
        if let Some(talks) = &packet.talk_history {
            self.talk_history = Some(talks.clone());
        }
        if let Some(whispers) = &packet.whisper_history {
            self.whisper_history = Some(whispers.clone());
        }
    }

    pub fn require_role(&self) -> AgentResult<&str> {
        self.role
            .as_deref()
            .ok_or(AgentError::UnresolvedState { field: "role" })
    }

    pub fn require_index(&self) -> AgentResult<AgentId> {
        self.agent_index
            .ok_or(AgentError::UnresolvedState {
                field: "agent_index",
            })
    }

    /// Current day, or 0 before any game info arrived.
    pub fn day(&self) -> u32 {
        self.info.as_ref().map(|i| i.day).unwrap_or(0)
    }

    /// Alive roster in ascending id order.
    pub fn roster(&self) -> Vec<AgentId> {
        self.alive.iter().copied().collect()
    }
}
