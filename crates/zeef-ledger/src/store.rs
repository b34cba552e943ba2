//! Ledger store
//!
//! Append-only JSONL persistence. Each event is serialized to one line
//! and written with a single `write_all` on a file opened in append mode,
//! so a crash between events never corrupts prior lines and concurrent
//! process restarts never lose recorded history.

use crate::error::LedgerError;
use crate::event::{EventKind, LedgerEvent};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Default ledger file name under the root directory.
pub const DEFAULT_LEDGER_FILENAME: &str = "zero_entropy_ledger.jsonl";

/// Where the ledger lives on disk.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Directory holding the ledger file; created if missing
    pub root_dir: PathBuf,
    /// File name of the ledger inside `root_dir`
    pub ledger_filename: String,
}

impl LedgerConfig {
    /// Config rooted at `root_dir` with the default file name.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ledger_filename: DEFAULT_LEDGER_FILENAME.to_string(),
        }
    }
}

/// Durable audit trail for the substrate.
///
/// Events are appended as JSON Lines. No data is discarded, no line is
/// rewritten, and the file grows monotonically.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Open the ledger under `config.root_dir`, creating the directory if
    /// needed. Idempotent: an existing ledger file is never truncated.
    ///
    /// # Errors
    /// Returns `LedgerError::Io` if the root directory cannot be created.
    pub fn open(config: &LedgerConfig) -> Result<Self, LedgerError> {
        fs::create_dir_all(&config.root_dir)?;
        let path = config.root_dir.join(&config.ledger_filename);
        tracing::debug!(path = %path.display(), "ledger opened");
        Ok(Self { path })
    }

    /// Path of the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
    }

    /// Append one event as a single JSON line.
    ///
    /// The line is written with one `write_all` call on a file opened in
    /// append mode, so the append is atomic at the OS level and never
    /// seeks into existing bytes.
    ///
    /// # Errors
    /// A failed append is fatal to the calling operation: the error
    /// propagates and is never absorbed here.
    pub fn append(&self, event: &LedgerEvent) -> Result<(), LedgerError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        tracing::debug!(kind = ?event.kind, "ledger event recorded");
        Ok(())
    }

    /// Record an executed shell command.
    ///
    /// `exit_code` is `None` when the process terminated without one
    /// (for example, killed by a signal).
    ///
    /// # Errors
    /// Propagates any append failure.
    pub fn record_command(
        &self,
        command: &str,
        cwd: &str,
        exit_code: Option<i64>,
    ) -> Result<(), LedgerError> {
        let mut payload = BTreeMap::new();
        payload.insert("command".to_string(), Value::from(command));
        payload.insert("cwd".to_string(), Value::from(cwd));
        payload.insert(
            "exit_code".to_string(),
            exit_code.map_or(Value::Null, Value::from),
        );
        self.append(&LedgerEvent {
            kind: EventKind::Command,
            payload,
            timestamp: Self::now(),
        })
    }

    /// Record a file mutation as a before/after digest pair.
    ///
    /// A `None` digest means the file did not exist on that side of the
    /// write.
    ///
    /// # Errors
    /// Propagates any append failure.
    pub fn record_file_change(
        &self,
        path: &Path,
        before_hash: Option<&str>,
        after_hash: Option<&str>,
    ) -> Result<(), LedgerError> {
        let mut payload = BTreeMap::new();
        payload.insert(
            "path".to_string(),
            Value::from(path.display().to_string()),
        );
        payload.insert(
            "before_hash".to_string(),
            before_hash.map_or(Value::Null, Value::from),
        );
        payload.insert(
            "after_hash".to_string(),
            after_hash.map_or(Value::Null, Value::from),
        );
        self.append(&LedgerEvent {
            kind: EventKind::FileChange,
            payload,
            timestamp: Self::now(),
        })
    }

    /// Record a model exchange as prompt/response digests.
    ///
    /// Content is never stored verbatim; the digests prove equality
    /// against externally retained transcripts.
    ///
    /// # Errors
    /// Propagates any append failure.
    pub fn record_kernel_call(
        &self,
        prompt_hash: &str,
        response_hash: Option<&str>,
    ) -> Result<(), LedgerError> {
        let mut payload = BTreeMap::new();
        payload.insert("prompt_hash".to_string(), Value::from(prompt_hash));
        payload.insert(
            "response_hash".to_string(),
            response_hash.map_or(Value::Null, Value::from),
        );
        self.append(&LedgerEvent {
            kind: EventKind::KernelCall,
            payload,
            timestamp: Self::now(),
        })
    }

    /// Timestamp of the most recent well-formed event, if any.
    ///
    /// Scans the file from the start and keeps the timestamp of the last
    /// line that parses. Malformed lines are logged at `warn` and
    /// skipped. A missing file, an unreadable file, or a file with no
    /// valid lines all degrade to `None` so a read problem never takes
    /// down the caller.
    #[must_use]
    pub fn latest_timestamp(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(error = %err, "failed to open ledger for read-back");
                return None;
            }
        };

        let mut latest = None;
        for line in BufReader::new(file).lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to read ledger line");
                    return latest;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LedgerEvent>(&line) {
                Ok(event) => latest = Some(event.timestamp),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping malformed ledger line");
                }
            }
        }
        latest
    }
}
