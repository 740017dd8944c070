//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use werewolf_core::{
    Agent, AgentId, ContentProvider, HandlerError, RandomContent, TalkContext, TargetAction,
};

pub fn agent(name: &str) -> Agent {
    let content = Arc::new(RandomContent::new(vec!["hello".into(), "who is it?".into()]));
    Agent::new(name, Duration::from_secs(2), content, None)
}

pub fn initialize(role: &str, timeout_ms: i64) -> String {
    format!(
        r#"{{"request":"INITIALIZE","info":{{"agent":"Agent[03]","day":0,"role_map":{{"Agent[03]":"{role}"}}}},"setting":{{"action_timeout":{timeout_ms}}}}}"#
    )
}

/// DAILY_INITIALIZE with the given agents alive and the rest of 1..=5 dead.
pub fn daily_initialize(day: u32, alive: &[u32]) -> String {
    let statuses: Vec<String> = (1..=5)
        .map(|i| {
            let status = if alive.contains(&i) { "ALIVE" } else { "DEAD" };
            format!(r#""Agent[{i:02}]":"{status}""#)
        })
        .collect();
    format!(
        r#"{{"request":"DAILY_INITIALIZE","info":{{"agent":"Agent[03]","day":{day},"status_map":{{{}}}}}}}"#,
        statuses.join(",")
    )
}

pub fn request(kind: &str) -> String {
    format!(r#"{{"request":"{kind}"}}"#)
}

/// Sleeps before every answer and counts how often it was called.
pub struct SlowContent {
    pub delay: Duration,
    pub calls: Arc<AtomicU32>,
}

impl SlowContent {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl ContentProvider for SlowContent {
    fn talk(&self, _ctx: &TalkContext) -> Result<String, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        Ok("too late".to_string())
    }

    fn choose_target(
        &self,
        _action: TargetAction,
        candidates: &[AgentId],
    ) -> Result<AgentId, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        Ok(candidates[0])
    }
}

/// Werewolf content that echoes the last whisper back with its context.
pub struct Whisperer;

impl ContentProvider for Whisperer {
    fn talk(&self, _ctx: &TalkContext) -> Result<String, HandlerError> {
        Ok("Over.".to_string())
    }

    fn choose_target(
        &self,
        _action: TargetAction,
        candidates: &[AgentId],
    ) -> Result<AgentId, HandlerError> {
        candidates.first().copied().ok_or(HandlerError::EmptyRoster)
    }

    fn whisper(&self, ctx: &TalkContext) -> Result<Option<String>, HandlerError> {
        Ok(ctx.history.last().map(|w| {
            format!("agreed: {} (day {}, seat {})", w.text, ctx.day, ctx.agent)
        }))
    }
}
