//! Structured observability hooks for the agent's request lifecycle.
//!
//! Events are emitted at `info!` level, faults at `warn!`. Filter with
//! `RUST_LOG`; pass `--json` to the binary for JSON lines.

use tracing::{info, warn};

use crate::error::Fault;
use crate::protocol::RequestKind;
use crate::session::HandOffReport;

/// Emit event: one request dispatched.
pub fn emit_request_dispatched(agent: &str, request: &RequestKind, elapsed_ms: u64, answered: bool) {
    info!(
        event = "request.dispatched",
        agent = %agent,
        request = %request,
        elapsed_ms = elapsed_ms,
        answered = answered,
    );
}

/// Emit event: an action faulted (warning level).
pub fn emit_action_fault(agent: &str, request: &RequestKind, fault: &Fault) {
    warn!(
        event = "action.fault",
        agent = %agent,
        request = %request,
        fault_kind = fault.kind(),
        error = %fault,
    );
}

/// Emit event: a session moved to a new role implementation.
pub fn emit_hand_off(report: &HandOffReport) {
    info!(
        event = "agent.hand_off",
        agent = %report.display_name,
        from = ?report.from,
        to = ?report.to,
        backlog_len = report.backlog_len,
        journal_moved = report.journal_moved,
        resolved_caches = ?report.resolved_caches,
    );
}

/// Emit event: FINISH processed.
pub fn emit_session_finished(agent: &str, journal: Option<&std::path::Path>) {
    info!(
        event = "session.finished",
        agent = %agent,
        journal = ?journal,
    );
}
