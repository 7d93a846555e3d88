//! File-backed offline queue for rows awaiting sync.
//!
//! Pending rows live in one pretty-printed JSON file under the app home.
//! The directory is explicit so tests (and alternate homes) can point it
//! anywhere.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::record::ExpenseRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueuedExpense {
    pub id: u64,
    pub record: ExpenseRecord,
}

pub struct OfflineQueue {
    path: PathBuf,
}

impl OfflineQueue {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(Self {
            path: dir.join("queue.json"),
        })
    }

    pub fn load(&self) -> Result<Vec<QueuedExpense>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        Ok(serde_json::from_str(&s)?)
    }

    fn save(&self, entries: &[QueuedExpense]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }

    /// Append a row (forced to synced = false) and return its queue id.
    pub fn push(&self, mut record: ExpenseRecord) -> Result<u64> {
        let mut entries = self.load()?;
        let id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        record.synced = false;
        entries.push(QueuedExpense { id, record });
        self.save(&entries)?;
        Ok(id)
    }

    pub fn unsynced(&self) -> Result<Vec<QueuedExpense>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|e| !e.record.synced)
            .collect())
    }

    pub fn mark_synced(&self, id: u64) -> Result<()> {
        let mut entries = self.load()?;
        for e in &mut entries {
            if e.id == id {
                e.record.synced = true;
            }
        }
        self.save(&entries)
    }
}
