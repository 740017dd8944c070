//! Role vocabulary: `Role` and its `RoleCapabilities`.

use serde::{Deserialize, Serialize};

/// The role implementations an agent can be specialised into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Villager,
    Werewolf,
    Seer,
    Possessed,
    Bodyguard,
    Medium,
}

/// Which role-specific request kinds a variant handles.
///
/// The dispatcher's switch is shared; this table only gates the extension
/// branches. A kind a role does not handle is treated like an unknown request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCapabilities {
    pub attack: bool,
    pub whisper: bool,
}

impl Role {
    /// Parse the server's role identity. Unknown identities return `None`.
    pub fn from_identity(identity: &str) -> Option<Self> {
        match identity {
            "VILLAGER" => Some(Role::Villager),
            "WEREWOLF" => Some(Role::Werewolf),
            "SEER" => Some(Role::Seer),
            "POSSESSED" => Some(Role::Possessed),
            "BODYGUARD" => Some(Role::Bodyguard),
            "MEDIUM" => Some(Role::Medium),
            _ => None,
        }
    }

    pub fn capabilities(self) -> RoleCapabilities {
        match self {
            Role::Werewolf => RoleCapabilities {
                attack: true,
                whisper: true,
            },
            Role::Villager | Role::Seer | Role::Possessed | Role::Bodyguard | Role::Medium => {
                RoleCapabilities::default()
            }
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Villager => "VILLAGER",
            Role::Werewolf => "WEREWOLF",
            Role::Seer => "SEER",
            Role::Possessed => "POSSESSED",
            Role::Bodyguard => "BODYGUARD",
            Role::Medium => "MEDIUM",
        };
        write!(f, "{s}")
    }
}
