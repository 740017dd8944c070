//! Request dispatch.
//!
//! - [`deadline`]: `run_with_deadline`, the timed executor
//! - [`response`]: `Response`, `Dispatched`
//! - [`router`]: `Agent::dispatch` and `Agent::step`

pub mod deadline;
pub mod response;
mod router;

pub use deadline::run_with_deadline;
pub use response::{Dispatched, Response};
