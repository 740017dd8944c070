//! Request routing: one shared switch for every role implementation.
//!
//! Decision branches (NAME, ROLE, TALK, VOTE, WHISPER, ATTACK) run through
//! [`run_with_deadline`] with the session's `action_deadline`. Bookkeeping
//! branches (INITIALIZE, DAILY_INITIALIZE, DAILY_FINISH, FINISH) run inline.
//! Role-specific branches are gated by [`RoleCapabilities`](crate::role::RoleCapabilities).

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::agent::Agent;
use crate::content::{TalkContext, TargetAction};
use crate::error::{AgentResult, Fault, HandlerError};
use crate::metrics::METRICS;
use crate::obs;
use crate::protocol::{index_from_name, AgentId, Packet, RequestKind};

use super::deadline::run_with_deadline;
use super::response::{Dispatched, Response};

impl Agent {
    /// Pop the oldest backlog message, decode it and dispatch it.
    ///
    /// Returns `Ok(None)` when the backlog is empty. After FINISH nothing is
    /// popped and the outcome is a `SessionFinished` no-op.
    #[instrument(skip(self), fields(agent = %self.state.display_name))]
    pub async fn step(&mut self) -> AgentResult<Option<Dispatched>> {
        if !self.state.active {
            return Ok(Some(Dispatched::faulted(Fault::SessionFinished)));
        }
        let Some(raw) = self.state.pop_message() else {
            return Ok(None);
        };
        match Packet::decode(&raw) {
            Ok(packet) => self.dispatch(packet).await.map(Some),
            Err(e) => {
                let fault = Fault::HandlerError(e);
                let kind = RequestKind::Other("<undecodable>".to_string());
                obs::emit_action_fault(&self.state.display_name, &kind, &fault);
                METRICS.record_fault(&fault);
                Ok(Some(Dispatched::faulted(fault)))
            }
        }
    }

    /// Route one packet to its handler.
    ///
    /// Faults come back inside [`Dispatched`]; the only `Err` is
    /// `AgentError::UnresolvedState`, raised when a decision arrives before
    /// INITIALIZE.
    #[instrument(skip(self, packet), fields(agent = %self.state.display_name, request = %packet.request))]
    pub async fn dispatch(&mut self, packet: Packet) -> AgentResult<Dispatched> {
        if !self.state.active {
            warn!("request after FINISH ignored");
            return Ok(Dispatched::faulted(Fault::SessionFinished));
        }

        let started = Instant::now();
        self.state.absorb(&packet);
        let kind = packet.request;

        let outcome = match &kind {
            RequestKind::Initialize => self.initialize(),
            RequestKind::Name => self.name().await,
            RequestKind::Role => self.role().await?,
            RequestKind::DailyInitialize => self.daily_initialize(),
            RequestKind::DailyFinish => self.daily_finish(),
            RequestKind::Talk => self.talk().await?,
            RequestKind::Vote => self.vote().await?,
            RequestKind::Whisper => self.whisper().await?,
            RequestKind::Attack if self.capabilities().attack => self.attack().await?,
            RequestKind::Finish => self.finish(),
            RequestKind::Attack | RequestKind::Other(_) => {
                debug!("request kind not handled by this implementation");
                Dispatched::empty()
            }
        };

        METRICS.inc_dispatched();
        if let Some(fault) = &outcome.fault {
            METRICS.record_fault(fault);
            obs::emit_action_fault(&self.state.display_name, &kind, fault);
        }
        obs::emit_request_dispatched(
            &self.state.display_name,
            &kind,
            started.elapsed().as_millis() as u64,
            !outcome.response.is_empty(),
        );
        Ok(outcome)
    }

    fn initialize(&mut self) -> Dispatched {
        match self.resolve_initial() {
            Ok(()) => Dispatched::empty(),
            Err(e) => Dispatched::faulted(e.into()),
        }
    }

    /// All three fields are computed before any is written. The index comes
    /// from the server-assigned `info.agent`, not the configured name.
    fn resolve_initial(&mut self) -> Result<(), HandlerError> {
        let info = self.state.info.as_ref().ok_or_else(|| {
            HandlerError::MalformedPayload("INITIALIZE without game info".to_string())
        })?;
        let role = info
            .own_role()
            .ok_or_else(|| {
                HandlerError::MalformedPayload(format!("role of {} not disclosed", info.agent))
            })?
            .to_string();
        let index = index_from_name(&info.agent)?;
        let deadline = self
            .state
            .setting
            .as_ref()
            .map(|s| s.action_deadline())
            .unwrap_or(self.state.action_deadline);

        info!(role = %role, index = %index, deadline_ms = deadline.as_millis() as u64, "initialized");
        self.state.role = Some(role);
        self.state.agent_index = Some(index);
        self.state.action_deadline = deadline;
        Ok(())
    }

    async fn name(&self) -> Dispatched {
        let name = self.state.display_name.clone();
        Dispatched::from_result(
            run_with_deadline(self.state.action_deadline, move || Ok(Response::Text(name))).await,
        )
    }

    async fn role(&self) -> AgentResult<Dispatched> {
        let role = self.state.require_role()?.to_string();
        Ok(Dispatched::from_result(
            run_with_deadline(self.state.action_deadline, move || Ok(Response::Text(role))).await,
        ))
    }

    fn daily_initialize(&mut self) -> Dispatched {
        let alive = self
            .state
            .info
            .as_ref()
            .ok_or_else(|| {
                HandlerError::MalformedPayload("DAILY_INITIALIZE without game info".to_string())
            })
            .and_then(|info| info.alive_agents());
        match alive {
            Ok(alive) => {
                debug!(alive = alive.len(), "roster replaced");
                self.state.alive = alive;
                Dispatched::empty()
            }
            Err(e) => Dispatched::faulted(e.into()),
        }
    }

    fn daily_finish(&mut self) -> Dispatched {
        debug!(day = self.state.day(), "day finished");
        Dispatched::empty()
    }

    fn talk_context(&self, whispers: bool) -> AgentResult<TalkContext> {
        let history = if whispers {
            &self.state.whisper_history
        } else {
            &self.state.talk_history
        };
        Ok(TalkContext {
            agent: self.state.require_index()?,
            role: self.state.require_role()?.to_string(),
            day: self.state.day(),
            history: history.clone().unwrap_or_default(),
        })
    }

    async fn talk(&mut self) -> AgentResult<Dispatched> {
        let ctx = self.talk_context(false)?;
        let content = Arc::clone(&self.content);
        let result = run_with_deadline(self.state.action_deadline, move || content.talk(&ctx)).await;

        Ok(match result {
            Ok(text) => {
                let day = self.state.day();
                if let Some(journal) = self.state.journal.as_mut() {
                    if let Err(e) = journal.talk(day, &text) {
                        warn!(error = %e, "journal write failed");
                    }
                }
                Dispatched::ok(Response::Text(text))
            }
            Err(fault) => Dispatched::faulted(fault),
        })
    }

    async fn vote(&mut self) -> AgentResult<Dispatched> {
        self.state.require_index()?;
        self.state.require_role()?;
        Ok(match self.select_target(TargetAction::Vote).await {
            Ok(target) => {
                let day = self.state.day();
                if let Some(journal) = self.state.journal.as_mut() {
                    if let Err(e) = journal.vote(day, target) {
                        warn!(error = %e, "journal write failed");
                    }
                }
                Dispatched::ok(Response::target(target))
            }
            Err(fault) => Dispatched::faulted(fault),
        })
    }

    async fn attack(&mut self) -> AgentResult<Dispatched> {
        self.state.require_index()?;
        self.state.require_role()?;
        Ok(match self.select_target(TargetAction::Attack).await {
            Ok(target) => {
                let day = self.state.day();
                if let Some(journal) = self.state.journal.as_mut() {
                    if let Err(e) = journal.attack(day, target) {
                        warn!(error = %e, "journal write failed");
                    }
                }
                Dispatched::ok(Response::target(target))
            }
            Err(fault) => Dispatched::faulted(fault),
        })
    }

    async fn whisper(&mut self) -> AgentResult<Dispatched> {
        let ctx = self.talk_context(true)?;
        let deadline = self.state.action_deadline;

        let result = if self.capabilities().whisper {
            let content = Arc::clone(&self.content);
            run_with_deadline(deadline, move || {
                Ok(match content.whisper(&ctx)? {
                    Some(text) => Response::Text(text),
                    None => Response::Empty,
                })
            })
            .await
        } else {
            run_with_deadline(deadline, || Ok(Response::Empty)).await
        };
        Ok(Dispatched::from_result(result))
    }

    /// Choose a target from a snapshot of the roster, on the handler thread.
    async fn select_target(&self, action: TargetAction) -> Result<AgentId, Fault> {
        let candidates = self.state.roster();
        let content = Arc::clone(&self.content);
        run_with_deadline(self.state.action_deadline, move || {
            if candidates.is_empty() {
                return Err(HandlerError::EmptyRoster);
            }
            let target = content.choose_target(action, &candidates)?;
            if candidates.contains(&target) {
                Ok(target)
            } else {
                Err(HandlerError::TargetOutsideRoster { target })
            }
        })
        .await
    }

    fn finish(&mut self) -> Dispatched {
        self.state.active = false;
        let journal_path = match self.state.journal.take().map(|j| j.close()) {
            Some(Ok(path)) => Some(path),
            Some(Err(e)) => {
                warn!(error = %e, "journal close failed");
                None
            }
            None => None,
        };
        obs::emit_session_finished(&self.state.display_name, journal_path.as_deref());
        Dispatched::empty()
    }
}
