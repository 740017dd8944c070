//! The control loop: feeds server lines to the agent and writes its answers.
//!
//! A [`Player`] owns the currently active [`Agent`]. After INITIALIZE reveals
//! a role with its own implementation, the player constructs that
//! implementation and hands the session off to it before the next message is
//! dispatched.

use std::mem;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::agent::Agent;
use crate::config::AgentConfig;
use crate::dispatch::Dispatched;
use crate::error::AgentResult;
use crate::metrics::METRICS;
use crate::protocol::RequestKind;
use crate::role::Role;

#[derive(Debug)]
pub struct Player {
    agent: Agent,
}

impl Player {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    pub fn from_config(config: &AgentConfig) -> AgentResult<Self> {
        Ok(Self::new(Agent::from_config(config)?))
    }

    /// The currently active implementation.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn receive(&mut self, raw: impl Into<String>) {
        self.agent.receive(raw);
    }

    pub fn is_active(&self) -> bool {
        self.agent.is_active()
    }

    /// Dispatch one queued message, then switch implementation if INITIALIZE
    /// just resolved a role.
    pub async fn step(&mut self) -> AgentResult<Option<Dispatched>> {
        let outcome = self.agent.step().await?;
        if let Some(out) = &outcome {
            let initialized = out.fault.is_none()
                && self.agent.state().request.as_ref() == Some(&RequestKind::Initialize);
            if initialized {
                self.maybe_specialise();
            }
        }
        Ok(outcome)
    }

    fn maybe_specialise(&mut self) {
        if self.agent.behavior().is_some() {
            return;
        }
        let Some(identity) = self.agent.state().role.as_deref() else {
            return;
        };
        let Some(role) = Role::from_identity(identity) else {
            warn!(role = %identity, "no implementation for role; keeping generic agent");
            return;
        };

        // Placeholder only holds the slot while the session moves.
        let placeholder = Agent::transient(role, self.agent.content());
        let source = mem::replace(&mut self.agent, placeholder);
        let (specialised, _report) = source.specialise(role);
        self.agent = specialised;
    }

    /// Serve one request per input line until FINISH or end of input.
    ///
    /// Every request gets exactly one output line; empty responses are blank
    /// lines. Returns the number of requests answered.
    pub async fn serve<R, W>(&mut self, input: R, mut output: W) -> AgentResult<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut answered = 0usize;

        while self.is_active() {
            let Some(line) = lines.next_line().await? else {
                debug!("input closed before FINISH");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            self.receive(line);
            while let Some(out) = self.step().await? {
                output.write_all(out.response.as_wire().as_bytes()).await?;
                output.write_all(b"\n").await?;
                answered += 1;
                if !self.is_active() {
                    break;
                }
            }
            output.flush().await?;
        }

        METRICS.flush();
        Ok(answered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::content::RandomContent;

    fn player() -> Player {
        let content = Arc::new(RandomContent::new(vec!["hello".into()]));
        Player::new(Agent::new("Agent03", Duration::from_millis(500), content, None))
    }

    const INIT: &str = r#"{"request":"INITIALIZE","info":{"agent":"Agent[03]","day":0,"role_map":{"Agent[03]":"WEREWOLF"}},"setting":{"action_timeout":400}}"#;

    #[tokio::test]
    async fn test_initialize_hands_off_to_role_implementation() {
        let mut p = player();
        p.receive(INIT);
        p.step().await.unwrap();

        assert_eq!(p.agent().behavior(), Some(Role::Werewolf));
        assert_eq!(p.agent().state().display_name, "Agent03");
        assert_eq!(p.agent().state().role.as_deref(), Some("WEREWOLF"));
        assert_eq!(
            p.agent().state().action_deadline,
            Duration::from_millis(400)
        );
    }

    #[tokio::test]
    async fn test_unknown_role_keeps_generic_agent() {
        let mut p = player();
        p.receive(INIT.replace("WEREWOLF", "FOX"));
        p.step().await.unwrap();

        assert_eq!(p.agent().behavior(), None);
        assert_eq!(p.agent().state().role.as_deref(), Some("FOX"));
    }

    #[tokio::test]
    async fn test_serve_answers_each_line_and_stops_at_finish() {
        let mut p = player();
        let input = format!(
            "{INIT}\n{{\"request\":\"NAME\"}}\n{{\"request\":\"FINISH\"}}\n{{\"request\":\"NAME\"}}\n"
        );
        let mut out = Vec::new();

        let answered = p.serve(input.as_bytes(), &mut out).await.unwrap();

        assert_eq!(answered, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "\nAgent03\n\n");
        assert!(!p.is_active());
    }
}
