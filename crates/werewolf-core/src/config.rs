//! Agent configuration.
//!
//! Read once at construction from a TOML file, then overridden by
//! environment variables:
//!
//! | variable               | field               |
//! |------------------------|---------------------|
//! | `WEREWOLF_AGENT_NAME`  | `agent.name`        |
//! | `WEREWOLF_LOG_DIR`     | `paths.log_dir`     |
//! | `WEREWOLF_RANDOM_TALK` | `paths.random_talk` |

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, AgentResult};

fn default_action_timeout_ms() -> u64 {
    60_000
}

fn default_random_talk() -> PathBuf {
    PathBuf::from("res/random_talk.txt")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("log")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSection {
    /// Display name; its digits give the agent index.
    pub name: String,
    /// Budget used until INITIALIZE supplies the server's.
    #[serde(default = "default_action_timeout_ms")]
    pub action_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsSection {
    /// One statement per line.
    #[serde(default = "default_random_talk")]
    pub random_talk: PathBuf,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            random_talk: default_random_talk(),
            log_dir: default_log_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSection {
    /// Write the action journal.
    #[serde(default = "default_true")]
    pub write: bool,
}

impl Default for LogSection {
    fn default() -> Self {
        Self { write: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub agent: AgentSection,
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub log: LogSection,
}

impl AgentConfig {
    /// Defaults for an agent called `name`.
    pub fn named(name: &str) -> Self {
        Self {
            agent: AgentSection {
                name: name.to_string(),
                action_timeout_ms: default_action_timeout_ms(),
            },
            paths: PathsSection::default(),
            log: LogSection::default(),
        }
    }

    /// Load `path`, apply environment overrides, validate.
    pub fn load(path: &Path) -> AgentResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> AgentResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `WEREWOLF_*` overrides resolved through `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(name) = lookup("WEREWOLF_AGENT_NAME") {
            self.agent.name = name;
        }
        if let Some(dir) = lookup("WEREWOLF_LOG_DIR") {
            self.paths.log_dir = PathBuf::from(dir);
        }
        if let Some(talk) = lookup("WEREWOLF_RANDOM_TALK") {
            self.paths.random_talk = PathBuf::from(talk);
        }
        self
    }

    pub fn validate(&self) -> AgentResult<()> {
        if self.agent.name.trim().is_empty() {
            return Err(AgentError::Config("agent.name must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn action_deadline(&self) -> Duration {
        Duration::from_millis(self.agent.action_timeout_ms)
    }

    pub fn to_toml_string(&self) -> AgentResult<String> {
        toml::to_string_pretty(self).map_err(|e| AgentError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AgentConfig::from_toml_str("[agent]\nname = \"Agent03\"\n").unwrap();
        assert_eq!(config.agent.name, "Agent03");
        assert_eq!(config.action_deadline(), Duration::from_secs(60));
        assert_eq!(config.paths.random_talk, PathBuf::from("res/random_talk.txt"));
        assert!(config.log.write);
    }

    #[test]
    fn test_full_config_parses() {
        let text = r#"
            [agent]
            name = "Agent05"
            action_timeout_ms = 1500

            [paths]
            random_talk = "talk.txt"
            log_dir = "/tmp/wolf"

            [log]
            write = false
        "#;
        let config = AgentConfig::from_toml_str(text).unwrap();
        assert_eq!(config.action_deadline(), Duration::from_millis(1500));
        assert_eq!(config.paths.log_dir, PathBuf::from("/tmp/wolf"));
        assert!(!config.log.write);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            ("WEREWOLF_AGENT_NAME", "Agent09"),
            ("WEREWOLF_LOG_DIR", "elsewhere"),
        ]
        .into_iter()
        .collect();

        let config = AgentConfig::named("Agent01")
            .with_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.agent.name, "Agent09");
        assert_eq!(config.paths.log_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.paths.random_talk, PathBuf::from("res/random_talk.txt"));
    }

    #[test]
    fn test_empty_name_is_invalid() {
        let config = AgentConfig::named("  ");
        assert!(matches!(config.validate(), Err(AgentError::Config(_))));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        std::fs::write(&path, "[agent]\nname = \"Agent04\"\naction_timeout_ms = 250\n").unwrap();

        let config = AgentConfig::load(&path).unwrap();
        assert_eq!(config.action_deadline(), Duration::from_millis(250));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(matches!(
            AgentConfig::from_toml_str("[agent"),
            Err(AgentError::Toml(_))
        ));
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = AgentConfig::named("Agent07");
        let text = config.to_toml_string().unwrap();
        assert_eq!(AgentConfig::from_toml_str(&text).unwrap(), config);
    }
}
