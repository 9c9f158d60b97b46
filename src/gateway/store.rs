//! Per-terminal message store with JSON file persistence.
//!
//! Every accepted message is appended to its terminal's history and the
//! whole store is rewritten to disk. A missing or corrupt store file is
//! tolerated at startup so a damaged disk never blocks the gateway.

use crate::error::{GatewayError, Result};
use crate::gateway::frame::FrameOutcome;
use crate::gateway::message::TerminalSummary;
use chrono::Local;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One received message: the raw posted body, the frame decode outcome,
/// and the local receive timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub raw: Value,
    pub outcome: FrameOutcome,
    pub receive_time: String,
}

/// Local receive timestamp in the store's display format.
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Default)]
pub struct TerminalStore {
    inner: DashMap<String, Vec<StoredMessage>>,
    save_lock: Mutex<()>,
}

impl TerminalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `path`. Missing file starts empty; a corrupt
    /// file is logged and discarded rather than blocking startup.
    pub fn load(path: &Path) -> Self {
        let store = Self::new();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "store file not yet present, starting empty");
                return store;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read store file, starting empty");
                return store;
            }
        };

        match serde_json::from_str::<BTreeMap<String, Vec<StoredMessage>>>(&contents) {
            Ok(entries) => {
                for (id_number, messages) in entries {
                    store.inner.insert(id_number, messages);
                }
                info!(path = %path.display(), terminals = store.terminal_count(), "store loaded");
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "store file is corrupt, starting empty");
            }
        }

        store
    }

    pub fn append(&self, id_number: &str, message: StoredMessage) {
        self.inner
            .entry(id_number.to_string())
            .or_default()
            .push(message);
    }

    /// Full history for one terminal, newest first. `None` when unknown.
    pub fn history(&self, id_number: &str) -> Option<Vec<StoredMessage>> {
        self.inner.get(id_number).map(|messages| {
            let mut messages = messages.clone();
            messages.reverse();
            messages
        })
    }

    /// The latest message of every terminal, newest receive time first.
    pub fn latest_per_terminal(&self) -> Vec<(String, StoredMessage)> {
        let mut latest: Vec<(String, StoredMessage)> = self
            .inner
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .last()
                    .cloned()
                    .map(|message| (entry.key().clone(), message))
            })
            .collect();

        // The timestamp format sorts lexicographically.
        latest.sort_by(|a, b| b.1.receive_time.cmp(&a.1.receive_time).then(a.0.cmp(&b.0)));
        latest
    }

    pub fn summaries(&self) -> Vec<TerminalSummary> {
        let mut summaries: Vec<TerminalSummary> = self
            .inner
            .iter()
            .map(|entry| TerminalSummary {
                id_number: entry.key().clone(),
                message_count: entry.value().len(),
                last_receive_time: entry
                    .value()
                    .last()
                    .map(|message| message.receive_time.clone())
                    .unwrap_or_default(),
            })
            .collect();

        summaries.sort_by(|a, b| a.id_number.cmp(&b.id_number));
        summaries
    }

    pub fn terminal_count(&self) -> usize {
        self.inner.len()
    }

    /// Rewrite the store file. Serialized under a lock so concurrent
    /// receives never interleave writes.
    pub fn save(&self, path: &Path) -> Result<()> {
        let _guard = self.save_lock.lock();

        let snapshot: BTreeMap<String, Vec<StoredMessage>> = self
            .inner
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let contents = serde_json::to_string_pretty(&snapshot).map_err(|err| {
            GatewayError::storage(
                "failed to serialize store",
                path.display().to_string(),
                Some(Box::new(err)),
            )
        })?;

        fs::write(path, contents).map_err(|err| {
            GatewayError::storage(
                "failed to write store file",
                path.display().to_string(),
                Some(Box::new(err)),
            )
        })
    }
}
