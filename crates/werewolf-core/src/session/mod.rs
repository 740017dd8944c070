//! Session state, its journal, and the hand-off between role implementations.
//!
//! - [`state`]: `SessionState`
//! - [`journal`]: `AgentJournal`, `JournalEntry`, `read_journal`
//! - [`handoff`]: `hand_off`, `HandOffReport`

pub mod handoff;
pub mod journal;
pub mod state;

pub use handoff::{hand_off, HandOffReport};
pub use journal::{read_journal, AgentJournal, JournalEntry, JournalKind};
pub use state::SessionState;
