//! Decision-content providers.
//!
//! The dispatcher calls a [`ContentProvider`] on the handler thread, inside the
//! deadline window, with owned snapshots of what it needs. Providers return
//! values only; they never touch session state.

use std::path::Path;

use rand::seq::SliceRandom;

use crate::error::{AgentError, AgentResult, HandlerError};
use crate::protocol::{AgentId, Talk};

/// Which decision a target selection is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetAction {
    Vote,
    Attack,
}

/// Snapshot handed to talk/whisper generation.
#[derive(Debug, Clone, Default)]
pub struct TalkContext {
    pub agent: AgentId,
    pub role: String,
    pub day: u32,
    pub history: Vec<Talk>,
}

/// Source of statements and targets for the agent's decisions.
pub trait ContentProvider: Send + Sync {
    /// Produce the next public statement.
    fn talk(&self, ctx: &TalkContext) -> Result<String, HandlerError>;

    /// Choose a target among `candidates` (never empty when called).
    fn choose_target(
        &self,
        action: TargetAction,
        candidates: &[AgentId],
    ) -> Result<AgentId, HandlerError>;

    /// Produce a whisper to fellow werewolves. `None` sends nothing.
    fn whisper(&self, _ctx: &TalkContext) -> Result<Option<String>, HandlerError> {
        Ok(None)
    }
}

/// Picks statements and targets uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomContent {
    comments: Vec<String>,
}

impl RandomContent {
    pub fn new(comments: Vec<String>) -> Self {
        Self { comments }
    }

    /// Load one statement per non-empty line.
    pub fn from_file(path: &Path) -> AgentResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let comments: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        if comments.is_empty() {
            return Err(AgentError::Config(format!(
                "statement list {} is empty",
                path.display()
            )));
        }
        Ok(Self::new(comments))
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

impl ContentProvider for RandomContent {
    fn talk(&self, _ctx: &TalkContext) -> Result<String, HandlerError> {
        self.comments
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| HandlerError::Content("no statements loaded".to_string()))
    }

    fn choose_target(
        &self,
        _action: TargetAction,
        candidates: &[AgentId],
    ) -> Result<AgentId, HandlerError> {
        candidates
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or(HandlerError::EmptyRoster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_file_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("random_talk.txt");
        std::fs::write(&path, "hello\n\n  \nI am a villager\n").unwrap();

        let content = RandomContent::from_file(&path).unwrap();
        assert_eq!(content.len(), 2);
    }

    #[test]
    fn test_from_file_rejects_empty_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "\n\n").unwrap();

        assert!(matches!(
            RandomContent::from_file(&path),
            Err(AgentError::Config(_))
        ));
    }

    #[test]
    fn test_talk_picks_from_loaded_statements() {
        let content = RandomContent::new(vec!["a".into(), "b".into()]);
        for _ in 0..20 {
            let said = content.talk(&TalkContext::default()).unwrap();
            assert!(said == "a" || said == "b");
        }
    }

    #[test]
    fn test_choose_target_stays_in_candidates() {
        let content = RandomContent::new(vec!["x".into()]);
        let candidates = [AgentId(1), AgentId(4)];
        for _ in 0..50 {
            let t = content
                .choose_target(TargetAction::Vote, &candidates)
                .unwrap();
            assert!(candidates.contains(&t));
        }
    }

    #[test]
    fn test_default_whisper_sends_nothing() {
        let content = RandomContent::new(vec!["x".into()]);
        assert_eq!(content.whisper(&TalkContext::default()).unwrap(), None);
    }
}
