//! Score ledger: durable, append-only attempt history keyed by identity.
//!
//! The ledger owns the read-modify-append cycle over a [`LedgerStore`]
//! collaborator; storage technology (file, embedded store, remote service)
//! is swappable without touching session logic. Read failures on a missing
//! or corrupt backing store degrade to empty history rather than blocking
//! the session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use crate::error::QuizError;
use crate::model::{Attempt, UserHistory};
use crate::traits::{LedgerEntries, LedgerStore};

/// Append-only score ledger over an injected store.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn LedgerStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Ordered attempt history for an identity, oldest first.
    ///
    /// Returns an empty history for an identity with no prior attempts.
    /// Fails only with [`QuizError::Validation`] on an empty identity.
    pub fn history(&self, identity: &str) -> Result<UserHistory> {
        if identity.is_empty() {
            return Err(QuizError::Validation("identity must not be empty".into()).into());
        }
        let mut entries = self.load_entries();
        Ok(entries.remove(identity).unwrap_or_default())
    }

    /// Append an attempt to the end of an identity's history.
    ///
    /// Fails with [`QuizError::Validation`] on an empty identity or an
    /// attempt with an empty topic. Concurrent appends for the same
    /// identity may interleave; each append independently persists its
    /// attempt (last-write durability, not merging).
    pub fn append(&self, identity: &str, attempt: Attempt) -> Result<()> {
        if identity.is_empty() {
            return Err(QuizError::Validation("identity must not be empty".into()).into());
        }
        if attempt.topic.is_empty() {
            return Err(QuizError::Validation("attempt topic must not be empty".into()).into());
        }

        let mut entries = self.load_entries();
        entries.entry(identity.to_string()).or_default().push(attempt);
        self.store
            .write(&entries)
            .context("failed to persist score ledger")
    }

    /// Read the full mapping, degrading to empty on store failure.
    fn load_entries(&self) -> LedgerEntries {
        match self.store.read() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("ledger store unreadable, treating as empty: {err:#}");
                HashMap::new()
            }
        }
    }
}

/// In-memory [`LedgerStore`], used in tests and anywhere durability is not
/// needed.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<LedgerEntries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn read(&self) -> Result<LedgerEntries> {
        Ok(self.entries.lock().expect("ledger lock poisoned").clone())
    }

    fn write(&self, entries: &LedgerEntries) -> Result<()> {
        *self.entries.lock().expect("ledger lock poisoned") = entries.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose reads always fail, for the degrade-to-empty path.
    struct BrokenStore;

    impl LedgerStore for BrokenStore {
        fn read(&self) -> Result<LedgerEntries> {
            anyhow::bail!("backing store corrupt")
        }

        fn write(&self, _: &LedgerEntries) -> Result<()> {
            Ok(())
        }
    }

    fn ledger() -> Ledger {
        Ledger::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn history_empty_for_unknown_identity() {
        let ledger = ledger();
        assert!(ledger.history("alice").unwrap().is_empty());
    }

    #[test]
    fn append_then_history_ends_with_attempt() {
        let ledger = ledger();
        let attempt = Attempt::new("Space", 7, 10);
        ledger.append("alice", attempt.clone()).unwrap();

        let history = ledger.history("alice").unwrap();
        assert_eq!(history.last(), Some(&attempt));
    }

    #[test]
    fn appends_preserve_insertion_order() {
        let ledger = ledger();
        ledger.append("alice", Attempt::new("Space", 3, 10)).unwrap();
        ledger.append("alice", Attempt::new("Oceans", 8, 10)).unwrap();
        ledger.append("alice", Attempt::new("Space", 10, 10)).unwrap();

        let topics: Vec<_> = ledger
            .history("alice")
            .unwrap()
            .into_iter()
            .map(|a| (a.topic, a.score))
            .collect();
        assert_eq!(
            topics,
            vec![
                ("Space".to_string(), 3),
                ("Oceans".to_string(), 8),
                ("Space".to_string(), 10)
            ]
        );
    }

    #[test]
    fn identities_are_case_sensitive_and_independent() {
        let ledger = ledger();
        ledger.append("Alice", Attempt::new("Space", 5, 10)).unwrap();

        assert!(ledger.history("alice").unwrap().is_empty());
        assert_eq!(ledger.history("Alice").unwrap().len(), 1);
    }

    #[test]
    fn empty_identity_rejected() {
        let ledger = ledger();
        let err = ledger.history("").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QuizError>(),
            Some(QuizError::Validation(_))
        ));

        let err = ledger.append("", Attempt::new("Space", 1, 10)).unwrap_err();
        assert!(err.downcast_ref::<QuizError>().is_some());
    }

    #[test]
    fn empty_topic_rejected() {
        let ledger = ledger();
        let err = ledger.append("alice", Attempt::new("", 1, 10)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QuizError>(),
            Some(QuizError::Validation(_))
        ));
    }

    #[test]
    fn unreadable_store_degrades_to_empty_history() {
        let ledger = Ledger::new(Arc::new(BrokenStore));
        assert!(ledger.history("alice").unwrap().is_empty());
        // Appends still persist on their own.
        assert!(ledger.append("alice", Attempt::new("Space", 1, 10)).is_ok());
    }
}
