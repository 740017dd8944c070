//! Werewolf agent runner
//!
//! The `werewolf-agent` command runs one agent session over a line transport.
//!
//! ## Commands
//!
//! - `play`: answer one JSON request per input line until FINISH
//! - `config`: print the resolved configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{info, Level};

use werewolf_core::{AgentConfig, Player};

#[derive(Parser)]
#[command(name = "werewolf-agent")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Werewolf game agent", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one session, reading requests line by line
    Play {
        /// Agent configuration (TOML)
        #[arg(short, long, env = "WEREWOLF_CONFIG")]
        config: PathBuf,

        /// Override the configured agent name
        #[arg(short, long)]
        name: Option<String>,

        /// Read requests from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the resolved configuration
    Config {
        /// Agent configuration (TOML)
        #[arg(short, long, env = "WEREWOLF_CONFIG")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    werewolf_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Play {
            config,
            name,
            input,
        } => cmd_play(&config, name, input.as_deref()).await,
        Commands::Config { config } => cmd_config(&config, cli.json),
    }
}

fn load_config(path: &Path, name: Option<String>) -> Result<AgentConfig> {
    let mut config = AgentConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    if let Some(name) = name {
        config.agent.name = name;
        config.validate()?;
    }
    Ok(config)
}

async fn cmd_play(config_path: &Path, name: Option<String>, input: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, name)?;
    let mut player = Player::from_config(&config).context("Failed to construct agent")?;

    info!(agent = %config.agent.name, "session starting");

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let answered = player
        .serve(reader, tokio::io::stdout())
        .await
        .context("Session aborted")?;

    info!(
        agent = %config.agent.name,
        answered,
        finished = !player.is_active(),
        "session ended"
    );
    Ok(())
}

fn cmd_config(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path, None)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", config.to_toml_string()?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path) -> PathBuf {
        let talk = dir.join("talk.txt");
        std::fs::write(&talk, "good morning\n").unwrap();
        let path = dir.join("agent.toml");
        std::fs::write(
            &path,
            format!(
                "[agent]\nname = \"Agent01\"\n\n[paths]\nrandom_talk = {:?}\nlog_dir = {:?}\n\n[log]\nwrite = false\n",
                talk.display().to_string(),
                dir.join("log").display().to_string()
            ),
        )
        .unwrap();
        path
    }

    #[test]
    fn test_cli_parses_play_arguments() {
        let cli = Cli::try_parse_from([
            "werewolf-agent",
            "--json",
            "play",
            "--config",
            "agent.toml",
            "--name",
            "Agent07",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Play { config, name, input } => {
                assert_eq!(config, PathBuf::from("agent.toml"));
                assert_eq!(name.as_deref(), Some("Agent07"));
                assert!(input.is_none());
            }
            Commands::Config { .. } => panic!("expected play"),
        }
    }

    #[test]
    fn test_name_override_replaces_configured_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path());

        let config = load_config(&path, Some("Agent05".to_string())).unwrap();
        assert_eq!(config.agent.name, "Agent05");
        assert!(load_config(&path, Some(" ".to_string())).is_err());
    }

    #[test]
    fn test_missing_config_is_reported() {
        let err = load_config(Path::new("/nonexistent/agent.toml"), None).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[tokio::test]
    async fn test_play_runs_recorded_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path());
        let input = dir.path().join("requests.jsonl");
        std::fs::write(
            &input,
            concat!(
                r#"{"request":"NAME"}"#,
                "\n",
                r#"{"request":"FINISH"}"#,
                "\n"
            ),
        )
        .unwrap();

        cmd_play(&path, None, Some(&input)).await.unwrap();
    }
}
