//! The slice of the server protocol the core reads.
//!
//! - [`request`]: `RequestKind`
//! - [`packet`]: `Packet`, `GameInfo`, `GameSetting`, `Talk`
//! - [`agent_name`]: `AgentId`, `index_from_name`, `name_from_index`

pub mod agent_name;
pub mod packet;
pub mod request;

pub use agent_name::{index_from_name, name_from_index, AgentId};
pub use packet::{AgentStatus, GameInfo, GameSetting, Packet, Talk};
pub use request::RequestKind;
