//! History ledger
//!
//! At most one entry per document. A repeat access updates the existing
//! entry's time in place. Past capacity, entries are evicted from the
//! front of the ledger (insertion position, not timestamp).

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::ids::IdGenerator;
use crate::models::HistoryEntry;

#[derive(Debug)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl HistoryLedger {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Record an access to a document
    pub fn touch(&mut self, document_id: &str, ids: &dyn IdGenerator, now: DateTime<Utc>) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.document_id == document_id)
        {
            entry.access_time = now;
            return;
        }

        self.push(HistoryEntry {
            id: ids.next_id(),
            document_id: document_id.to_string(),
            access_time: now,
        });
    }

    /// Append a record, evicting from the front past capacity
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
        while self.entries.len() > self.capacity {
            let evicted = self.entries.remove(0);
            warn!(document_id = %evicted.document_id, "History full, evicting oldest entry");
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_touch_upserts() {
        let ids = SequentialIds::new("h");
        let mut ledger = HistoryLedger::with_capacity(10);

        ledger.touch("a", &ids, at(1));
        ledger.touch("a", &ids, at(5));

        assert_eq!(ledger.len(), 1);
        let entry = ledger.iter().next().unwrap();
        assert_eq!(entry.id, "h1");
        assert_eq!(entry.access_time, at(5));
    }

    #[test]
    fn test_eviction_is_by_position_not_time() {
        let ids = SequentialIds::new("h");
        let mut ledger = HistoryLedger::with_capacity(3);

        // "a" is first in the ledger but has the newest timestamp
        ledger.touch("a", &ids, at(100));
        ledger.touch("b", &ids, at(1));
        ledger.touch("c", &ids, at(2));
        ledger.touch("d", &ids, at(3));

        assert_eq!(ledger.len(), 3);
        let docs: Vec<_> = ledger.iter().map(|e| e.document_id.as_str()).collect();
        assert_eq!(docs, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_repeat_touch_does_not_reorder() {
        let ids = SequentialIds::new("h");
        let mut ledger = HistoryLedger::with_capacity(2);
        let base = at(0);

        ledger.touch("a", &ids, base);
        ledger.touch("b", &ids, base + Duration::seconds(1));
        ledger.touch("a", &ids, base + Duration::seconds(2));
        ledger.touch("c", &ids, base + Duration::seconds(3));

        // "a" was refreshed but still sits at position 0, so it goes
        let docs: Vec<_> = ledger.iter().map(|e| e.document_id.as_str()).collect();
        assert_eq!(docs, vec!["b", "c"]);
    }

    #[test]
    fn test_clear() {
        let ids = SequentialIds::new("h");
        let mut ledger = HistoryLedger::with_capacity(5);
        ledger.touch("a", &ids, at(0));
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.capacity(), 5);
    }
}
