//! Moving a session from one role implementation to another.
//!
//! [`hand_off`] consumes the source agent, so the compiler rules out any later
//! dispatch to it, and takes the target by `&mut`, so no dispatch can be in
//! flight on either side while the move happens.

use serde::Serialize;

use crate::agent::Agent;
use crate::protocol::AgentId;
use crate::role::Role;

/// What a hand-off transferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandOffReport {
    pub display_name: String,
    pub agent_index: Option<AgentId>,
    pub from: Option<Role>,
    pub to: Option<Role>,
    /// Pending inbound messages moved with the session.
    pub backlog_len: usize,
    pub journal_moved: bool,
    /// Protocol caches that were already resolved on the source.
    pub resolved_caches: Vec<&'static str>,
}

/// Transfer `source`'s session into `target`.
///
/// Identity, backlog, liveness flag, role/index/deadline, roster, the content
/// provider and the journal always move. Protocol caches move only when the
/// source had resolved them; unresolved ones stay `None` on the target and are
/// filled from the next packet, as they would have been on the source.
///
/// `target` must be a transient agent (see [`Agent::transient`]): anything it
/// already holds is overwritten, and a journal of its own would be dropped
/// without being closed.
pub fn hand_off(source: Agent, target: &mut Agent) -> HandOffReport {
    debug_assert!(
        target.state.journal.is_none(),
        "hand-off target must be transient; it already owns a journal"
    );
    let Agent {
        state: src,
        behavior: from,
        content,
    } = source;

    let mut report = HandOffReport {
        display_name: src.display_name.clone(),
        agent_index: src.agent_index,
        from,
        to: target.behavior,
        backlog_len: src.backlog.len(),
        journal_moved: src.journal.is_some(),
        resolved_caches: Vec::new(),
    };

    target.content = content;

    let dst = &mut target.state;
    dst.display_name = src.display_name;
    dst.backlog = src.backlog;
    dst.active = src.active;
    dst.role = src.role;
    dst.agent_index = src.agent_index;
    dst.action_deadline = src.action_deadline;
    dst.alive = src.alive;
    dst.journal = src.journal;

    if let Some(info) = src.info {
        dst.info = Some(info);
        report.resolved_caches.push("info");
    }
    if let Some(setting) = src.setting {
        dst.setting = Some(setting);
        report.resolved_caches.push("setting");
    }
    if let Some(talks) = src.talk_history {
        dst.talk_history = Some(talks);
        report.resolved_caches.push("talk_history");
    }
    if let Some(whispers) = src.whisper_history {
        dst.whisper_history = Some(whispers);
        report.resolved_caches.push("whisper_history");
    }
    if let Some(request) = src.request {
        dst.request = Some(request);
        report.resolved_caches.push("request");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::content::RandomContent;
    use crate::protocol::{GameSetting, Packet, RequestKind};

    fn source() -> Agent {
        let content = Arc::new(RandomContent::new(vec!["hi".into()]));
        let mut agent = Agent::new("Agent03", Duration::from_millis(750), content, None);
        agent.state.role = Some("WEREWOLF".to_string());
        agent.state.agent_index = Some(AgentId(3));
        agent.state.alive.extend([AgentId(1), AgentId(3)]);
        agent.receive("m1");
        agent.receive("m2");
        agent
    }

    #[test]
    fn test_identity_and_backlog_move_to_target() {
        let src = source();
        let mut target = Agent::transient(Role::Werewolf, src.content());

        let report = hand_off(src, &mut target);

        let st = target.state();
        assert_eq!(st.display_name, "Agent03");
        assert_eq!(st.agent_index, Some(AgentId(3)));
        assert_eq!(st.role.as_deref(), Some("WEREWOLF"));
        assert_eq!(st.action_deadline, Duration::from_millis(750));
        assert_eq!(st.backlog, ["m1", "m2"]);
        assert_eq!(st.roster(), vec![AgentId(1), AgentId(3)]);
        assert!(st.active);

        assert_eq!(report.backlog_len, 2);
        assert_eq!(report.from, None);
        assert_eq!(report.to, Some(Role::Werewolf));
        assert!(!report.journal_moved);
    }

    #[test]
    fn test_unresolved_caches_stay_unresolved() {
        let mut src = source();
        src.state.absorb(
            &Packet::new(RequestKind::Initialize).with_setting(GameSetting {
                action_timeout: 750,
            }),
        );
        let mut target = Agent::transient(Role::Seer, src.content());

        let report = hand_off(src, &mut target);

        assert!(target.state().setting.is_some());
        assert!(target.state().info.is_none());
        assert!(target.state().talk_history.is_none());
        assert_eq!(report.resolved_caches, vec!["setting", "request"]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "hand-off target must be transient")]
    fn test_target_with_own_journal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let journal = crate::session::AgentJournal::open(dir.path(), "Agent09").unwrap();
        let content = Arc::new(RandomContent::new(vec!["hi".into()]));
        let mut target = Agent::new("Agent09", Duration::from_secs(1), content, Some(journal));

        hand_off(source(), &mut target);
    }
}
