//! In-process risk storage.
//!
//! Every operation takes the same exclusive lock for its full duration, so
//! reads are serialized with writes. Record counts are expected to stay small.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::risk::Risk;

/// Risks keyed by identifier. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct RiskStore {
    risks: Arc<Mutex<HashMap<String, Risk>>>,
}

impl RiskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored risk.
    ///
    /// The order of the returned risks is unspecified and may differ between
    /// calls. Callers that need a stable order must sort the result.
    pub fn list(&self) -> Vec<Risk> {
        self.risks.lock().values().cloned().collect()
    }

    /// Store a risk under its `id`.
    ///
    /// The caller is responsible for the id being freshly generated; an
    /// existing entry with the same id would be replaced.
    pub fn insert(&self, risk: Risk) {
        debug!(id = %risk.id, state = %risk.state, "Storing risk");
        self.risks.lock().insert(risk.id.clone(), risk);
    }

    pub fn get(&self, id: &str) -> Option<Risk> {
        self.risks.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.risks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{id, risk::RiskState};
    use std::collections::HashSet;
    use std::thread;

    fn risk(title: &str) -> Risk {
        Risk {
            id: id::generate(),
            state: RiskState::Open,
            title: title.to_string(),
            description: format!("{title} description"),
        }
    }

    #[test]
    fn test_empty_store() {
        let store = RiskStore::new();
        assert!(store.list().is_empty());
        assert!(store.is_empty());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_insert_then_get() {
        let store = RiskStore::new();
        let stored = risk("Data loss");
        store.insert(stored.clone());

        assert_eq!(store.get(&stored.id), Some(stored));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_returns_exactly_inserted_set() {
        let store = RiskStore::new();
        let inserted: Vec<Risk> = (0..25).map(|i| risk(&format!("risk {i}"))).collect();
        for r in &inserted {
            store.insert(r.clone());
        }

        let listed: HashSet<String> = store.list().into_iter().map(|r| r.id).collect();
        let expected: HashSet<String> = inserted.into_iter().map(|r| r.id).collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn test_clones_share_storage() {
        let store = RiskStore::new();
        let handle = store.clone();
        let stored = risk("Shared");
        handle.insert(stored.clone());

        assert_eq!(store.get(&stored.id), Some(stored));
    }

    #[test]
    fn test_concurrent_inserts_are_all_visible() {
        let store = RiskStore::new();

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                thread::spawn(move || {
                    (0..50)
                        .map(|i| {
                            let r = risk(&format!("thread {t} risk {i}"));
                            store.insert(r.clone());
                            r.id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(ids.len(), 400);
        assert_eq!(store.len(), 400);
        for id in &ids {
            assert!(store.get(id).is_some());
        }
    }
}
