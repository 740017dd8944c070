//! Per-agent action journal.
//!
//! One JSON-lines file per session under the configured log directory. The
//! journal is an owned resource: it moves with the session on hand-off and
//! [`AgentJournal::close`] consumes it, so it can be released only once.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{AgentError, AgentResult};
use crate::protocol::AgentId;

/// Kind of decision recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalKind {
    Talk,
    Vote,
    Attack,
}

/// One journal line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub ts: DateTime<Utc>,
    pub session_id: Uuid,
    pub agent: String,
    pub kind: JournalKind,
    pub day: u32,
    pub detail: String,
}

/// Append-only action log for one agent session.
#[derive(Debug)]
pub struct AgentJournal {
    path: PathBuf,
    session_id: Uuid,
    agent: String,
    writer: BufWriter<File>,
}

impl AgentJournal {
    /// Open `{dir}/{agent}-{session_id}.jsonl`, creating `dir` if needed.
    pub fn open(dir: &Path, agent: &str) -> AgentResult<Self> {
        std::fs::create_dir_all(dir)?;
        let session_id = Uuid::new_v4();
        let path = dir.join(format!("{agent}-{session_id}.jsonl"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(path = %path.display(), "journal opened");
        Ok(Self {
            path,
            session_id,
            agent: agent.to_string(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn talk(&mut self, day: u32, text: &str) -> AgentResult<()> {
        self.append(JournalKind::Talk, day, text.to_string())
    }

    pub fn vote(&mut self, day: u32, target: AgentId) -> AgentResult<()> {
        self.append(JournalKind::Vote, day, target.wire_name())
    }

    pub fn attack(&mut self, day: u32, target: AgentId) -> AgentResult<()> {
        self.append(JournalKind::Attack, day, target.wire_name())
    }

    fn append(&mut self, kind: JournalKind, day: u32, detail: String) -> AgentResult<()> {
        let entry = JournalEntry {
            ts: Utc::now(),
            session_id: self.session_id,
            agent: self.agent.clone(),
            kind,
            day,
            detail,
        };
        serde_json::to_writer(&mut self.writer, &entry)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush and release the file. Returns the journal path.
    pub fn close(mut self) -> AgentResult<PathBuf> {
        self.writer.flush()?;
        debug!(path = %self.path.display(), "journal closed");
        Ok(self.path)
    }
}

/// Read every entry of a closed journal file.
pub fn read_journal(path: &Path) -> AgentResult<Vec<JournalEntry>> {
    let text = std::fs::read_to_string(path)?;
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<JournalEntry>(l).map_err(AgentError::from))
        .collect()
}
