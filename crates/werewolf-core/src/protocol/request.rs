//! Request kinds sent by the game server.

use serde::{Deserialize, Serialize};

/// What the server is asking the agent to do this turn.
///
/// Unrecognised strings become [`RequestKind::Other`] so that new server
/// request types are ignored instead of rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestKind {
    Initialize,
    Name,
    Role,
    DailyInitialize,
    Talk,
    Vote,
    Whisper,
    DailyFinish,
    Finish,
    Attack,
    Other(String),
}

impl RequestKind {
    pub fn as_str(&self) -> &str {
        match self {
            RequestKind::Initialize => "INITIALIZE",
            RequestKind::Name => "NAME",
            RequestKind::Role => "ROLE",
            RequestKind::DailyInitialize => "DAILY_INITIALIZE",
            RequestKind::Talk => "TALK",
            RequestKind::Vote => "VOTE",
            RequestKind::Whisper => "WHISPER",
            RequestKind::DailyFinish => "DAILY_FINISH",
            RequestKind::Finish => "FINISH",
            RequestKind::Attack => "ATTACK",
            RequestKind::Other(s) => s,
        }
    }
}

impl From<&str> for RequestKind {
    fn from(s: &str) -> Self {
        match s {
            "INITIALIZE" => RequestKind::Initialize,
            "NAME" => RequestKind::Name,
            "ROLE" => RequestKind::Role,
            "DAILY_INITIALIZE" => RequestKind::DailyInitialize,
            "TALK" => RequestKind::Talk,
            "VOTE" => RequestKind::Vote,
            "WHISPER" => RequestKind::Whisper,
            "DAILY_FINISH" => RequestKind::DailyFinish,
            "FINISH" => RequestKind::Finish,
            "ATTACK" => RequestKind::Attack,
            other => RequestKind::Other(other.to_string()),
        }
    }
}

impl From<String> for RequestKind {
    fn from(s: String) -> Self {
        RequestKind::from(s.as_str())
    }
}

impl From<RequestKind> for String {
    fn from(kind: RequestKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds_parse() {
        assert_eq!(RequestKind::from("DAILY_INITIALIZE"), RequestKind::DailyInitialize);
        assert_eq!(RequestKind::from("ATTACK"), RequestKind::Attack);
        assert_eq!(RequestKind::from("FINISH").as_str(), "FINISH");
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let kind = RequestKind::from("DIVINE");
        assert_eq!(kind, RequestKind::Other("DIVINE".to_string()));
        assert_eq!(kind.to_string(), "DIVINE");
    }

    #[test]
    fn test_kind_deserializes_from_json_string() {
        let kind: RequestKind = serde_json::from_str("\"TALK\"").unwrap();
        assert_eq!(kind, RequestKind::Talk);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"TALK\"");
    }
}
