//! JSON file ledger store.
//!
//! Persists the full identity → history mapping as one pretty-printed JSON
//! file. A missing file reads as an empty mapping; a corrupt file is an
//! error, which the ledger downgrades to empty history.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizcraft_core::traits::{LedgerEntries, LedgerStore};

/// Ledger store backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn read(&self) -> Result<LedgerEntries> {
        if !self.path.exists() {
            return Ok(LedgerEntries::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read ledger from {}", self.path.display()))?;
        let entries: LedgerEntries = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse ledger JSON in {}", self.path.display()))?;
        Ok(entries)
    }

    fn write(&self, entries: &LedgerEntries) -> Result<()> {
        let json = serde_json::to_string_pretty(entries).context("failed to serialize ledger")?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write ledger to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizcraft_core::ledger::Ledger;
    use quizcraft_core::model::Attempt;
    use std::sync::Arc;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("scores.json"));
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("scores.json"));

        let mut entries = LedgerEntries::new();
        entries.insert("alice".into(), vec![Attempt::new("Space", 7, 10)]);
        store.write(&entries).unwrap();

        let back = store.read().unwrap();
        assert_eq!(back.get("alice").unwrap()[0].topic, "Space");
        assert_eq!(back.get("alice").unwrap()[0].score, 7);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deep/scores.json"));
        store.write(&LedgerEntries::new()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.read().is_err());
    }

    #[test]
    fn ledger_survives_process_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        {
            let ledger = Ledger::new(Arc::new(JsonFileStore::new(&path)));
            ledger.append("alice", Attempt::new("Space", 7, 10)).unwrap();
        }

        // A fresh store over the same file sees the recorded attempt.
        let ledger = Ledger::new(Arc::new(JsonFileStore::new(&path)));
        let history = ledger.history("alice").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].topic, "Space");
    }

    #[test]
    fn corrupt_file_degrades_to_empty_history_via_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "garbage").unwrap();

        let ledger = Ledger::new(Arc::new(JsonFileStore::new(&path)));
        assert!(ledger.history("alice").unwrap().is_empty());
    }
}
