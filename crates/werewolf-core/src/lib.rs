//! Werewolf agent core library.
//!
//! Timed action dispatch, durable session state and the hand-off of that
//! state between role implementations, for an agent playing a turn-based
//! social-deduction game against a remote server.
//!
//! The usual entry point is [`Player`]: feed it server lines and it answers
//! each with exactly one response, switching to the role-specific
//! implementation once INITIALIZE reveals the agent's role.

pub mod agent;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod metrics;
pub mod obs;
pub mod player;
pub mod protocol;
pub mod role;
pub mod session;
pub mod telemetry;

pub use agent::Agent;
pub use config::{AgentConfig, AgentSection, LogSection, PathsSection};
pub use content::{ContentProvider, RandomContent, TalkContext, TargetAction};
pub use dispatch::{run_with_deadline, Dispatched, Response};
pub use error::{AgentError, AgentResult, Fault, HandlerError};
pub use player::Player;
pub use protocol::{
    index_from_name, name_from_index, AgentId, AgentStatus, GameInfo, GameSetting, Packet,
    RequestKind, Talk,
};
pub use role::{Role, RoleCapabilities};
pub use session::{
    hand_off, read_journal, AgentJournal, HandOffReport, JournalEntry, JournalKind, SessionState,
};

pub use metrics::METRICS;
pub use obs::{emit_action_fault, emit_hand_off, emit_request_dispatched, emit_session_finished};
pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
