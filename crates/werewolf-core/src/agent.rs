//! The agent: session state plus the active role implementation.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::AgentConfig;
use crate::content::{ContentProvider, RandomContent};
use crate::error::AgentResult;
use crate::metrics::METRICS;
use crate::obs;
use crate::role::{Role, RoleCapabilities};
use crate::session::{hand_off, AgentJournal, HandOffReport, SessionState};

pub struct Agent {
    pub(crate) state: SessionState,
    /// `None` until INITIALIZE reveals a role with its own implementation.
    pub(crate) behavior: Option<Role>,
    pub(crate) content: Arc<dyn ContentProvider>,
}

impl Agent {
    /// A generic agent, as created before the server reveals the role.
    pub fn new(
        display_name: impl Into<String>,
        default_deadline: Duration,
        content: Arc<dyn ContentProvider>,
        journal: Option<AgentJournal>,
    ) -> Self {
        let mut state = SessionState::new(display_name, default_deadline);
        state.journal = journal;
        Self {
            state,
            behavior: None,
            content,
        }
    }

    /// Build the generic agent described by `config`.
    ///
    /// Loads the statement list and, when journaling is on, opens the journal.
    pub fn from_config(config: &AgentConfig) -> AgentResult<Self> {
        let content = RandomContent::from_file(&config.paths.random_talk)?;
        let journal = if config.log.write {
            Some(AgentJournal::open(&config.paths.log_dir, &config.agent.name)?)
        } else {
            None
        };
        info!(
            agent = %config.agent.name,
            statements = content.len(),
            journal = journal.is_some(),
            "agent constructed"
        );
        Ok(Self::new(
            config.agent.name.clone(),
            config.action_deadline(),
            Arc::new(content),
            journal,
        ))
    }

    /// A role implementation constructed only to receive a hand-off.
    ///
    /// It has no identity and no journal of its own; everything arrives
    /// through [`hand_off`].
    pub fn transient(role: Role, content: Arc<dyn ContentProvider>) -> Self {
        Self {
            state: SessionState::new(String::new(), Duration::ZERO),
            behavior: Some(role),
            content,
        }
    }

    /// Move this agent's session into a fresh implementation of `role`.
    ///
    /// Every hand-off is counted and emitted as an `agent.hand_off` event.
    pub fn specialise(self, role: Role) -> (Agent, HandOffReport) {
        let mut target = Agent::transient(role, Arc::clone(&self.content));
        let report = hand_off(self, &mut target);
        METRICS.inc_hand_offs();
        obs::emit_hand_off(&report);
        (target, report)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn behavior(&self) -> Option<Role> {
        self.behavior
    }

    pub fn capabilities(&self) -> RoleCapabilities {
        self.behavior
            .map(Role::capabilities)
            .unwrap_or_default()
    }

    pub fn content(&self) -> Arc<dyn ContentProvider> {
        Arc::clone(&self.content)
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Queue a raw inbound message.
    pub fn receive(&mut self, raw: impl Into<String>) {
        self.state.push_message(raw);
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("state", &self.state)
            .field("behavior", &self.behavior)
            .finish_non_exhaustive()
    }
}
