//! Deadline executor: run one handler against a wall-clock budget.
//!
//! The handler runs on its own OS thread so that blocking third-party calls
//! still race the timer. When the timer wins the caller gets
//! [`Fault::Timeout`] right away. The thread is not killed: it is detached, and
//! whatever it produces later is sent into a closed channel and dropped.
//! Handlers therefore must not commit visible side effects themselves; they
//! return values, and the caller commits after a timely return.

use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::{Fault, HandlerError};

/// Run `handler` with a budget of `deadline`.
///
/// - Handler returns first: its value, or its error as `Fault::HandlerError`.
/// - Timer fires first: `Fault::Timeout`; the late result is discarded.
/// - Zero deadline: the handler is still started once, then `Timeout` is
///   returned without waiting.
pub async fn run_with_deadline<T, F>(deadline: Duration, handler: F) -> Result<T, Fault>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, HandlerError> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let started = Instant::now();

    std::thread::Builder::new()
        .name("action-handler".to_string())
        .spawn(move || {
            // Receiver gone means the deadline already passed.
            if tx.send(handler()).is_err() {
                debug!("handler finished after its deadline; result discarded");
            }
        })
        .map_err(|e| Fault::HandlerError(HandlerError::Spawn(e.to_string())))?;

    if deadline.is_zero() {
        warn!("zero-length action deadline; handler detached");
        return Err(Fault::timeout(deadline));
    }

    match tokio::time::timeout(deadline, rx).await {
        Ok(Ok(Ok(value))) => {
            debug!(elapsed_ms = started.elapsed().as_millis() as u64, "handler completed");
            Ok(value)
        }
        Ok(Ok(Err(e))) => Err(Fault::HandlerError(e)),
        // Sender dropped without sending: the handler panicked.
        Ok(Err(_)) => Err(Fault::HandlerError(HandlerError::Aborted)),
        Err(_elapsed) => {
            warn!(
                limit_ms = deadline.as_millis() as u64,
                "handler exceeded action deadline"
            );
            Err(Fault::timeout(deadline))
        }
    }
}
