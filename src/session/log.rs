// ABOUTME: Markdown session logger — appends each exchanged message to a per-day log file.
// ABOUTME: Files live in <workspace>/chat-history/session-YYYY-MM-DD.md and are append-only.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const TIME_FORMAT: &str = "%H:%M:%S";

/// Who wrote a logged message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Header tag used in the log file.
    pub fn header_tag(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }

    fn from_header_tag(tag: &str) -> Option<Self> {
        match tag {
            "USER" => Some(Role::User),
            "ASSISTANT" => Some(Role::Assistant),
            _ => None,
        }
    }
}

/// A single message recovered from a session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub role: Role,
    pub timestamp: NaiveTime,
    pub body: String,
}

/// Name of the log file for a given day.
pub fn session_file_name(date: NaiveDate) -> String {
    format!("session-{}.md", date.format("%Y-%m-%d"))
}

/// Render one entry exactly as it is appended to the log.
pub fn format_entry(role: Role, body: &str, at: NaiveTime) -> String {
    format!(
        "\n## {} ({})\n\n{}\n",
        role.header_tag(),
        at.format(TIME_FORMAT),
        body
    )
}

fn parse_header(line: &str) -> Option<(Role, NaiveTime)> {
    let rest = line.strip_prefix("## ")?;
    let (tag, time) = rest.split_once(" (")?;
    let time = time.strip_suffix(')')?;
    let role = Role::from_header_tag(tag)?;
    let timestamp = NaiveTime::parse_from_str(time, TIME_FORMAT).ok()?;
    Some((role, timestamp))
}

/// Recover the entries of a session log from its text.
///
/// A body line that itself looks like an entry header is indistinguishable
/// from a real header and will split the entry.
pub fn parse_entries(text: &str) -> Vec<LogEntry> {
    let lines: Vec<&str> = text.lines().collect();
    let headers: Vec<(usize, Role, NaiveTime)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| parse_header(line).map(|(role, ts)| (i, role, ts)))
        .collect();

    let mut entries = Vec::with_capacity(headers.len());
    for (n, &(idx, role, timestamp)) in headers.iter().enumerate() {
        let start = (idx + 2).min(lines.len());
        // Every header after the first is preceded by the blank line `format_entry` emits.
        let end = match headers.get(n + 1) {
            Some(&(next, _, _)) => next.saturating_sub(1).max(start),
            None => lines.len(),
        };
        entries.push(LogEntry {
            role,
            timestamp,
            body: lines[start..end].join("\n"),
        });
    }
    entries
}

/// Appends messages to the per-day markdown log inside a chat directory.
///
/// Writers are not coordinated: two processes appending on the same day can
/// interleave their blocks.
#[derive(Debug, Clone)]
pub struct SessionLog {
    dir: PathBuf,
}

impl SessionLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the log file for `date`.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(session_file_name(date))
    }

    /// Path of today's log file (local time).
    pub fn today_path(&self) -> PathBuf {
        self.path_for(Local::now().date_naive())
    }

    /// Append a message stamped with the current local time.
    pub fn append(&self, role: Role, body: &str) -> anyhow::Result<()> {
        self.append_at(role, body, Local::now().naive_local())
    }

    /// Append a message stamped with `at`, into the file for `at`'s date.
    pub fn append_at(&self, role: Role, body: &str, at: NaiveDateTime) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating chat directory {}", self.dir.display()))?;
        let path = self.path_for(at.date());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening session log {}", path.display()))?;
        file.write_all(format_entry(role, body, at.time()).as_bytes())
            .with_context(|| format!("appending to session log {}", path.display()))?;
        tracing::debug!(path = %path.display(), role = role.header_tag(), "appended session entry");
        Ok(())
    }

    /// Read and parse the log for `date`. A missing file has no entries.
    pub fn entries_for(&self, date: NaiveDate) -> anyhow::Result<Vec<LogEntry>> {
        let path = self.path_for(date);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading session log {}", path.display()))?;
        Ok(parse_entries(&text))
    }
}
