//! In-memory stores
//!
//! Three independent collections make up the system of record:
//!
//! - **Documents**: id -> document, the single source of truth
//! - **Favorites**: ordered ledger of favorite records
//! - **History**: bounded ordered ledger of access records
//!
//! Ledger records reference documents by id. Dangling references are
//! tolerated and dropped when listings are built, never cleaned up eagerly.
//! Only the document service touches these collections.

pub mod documents;
pub mod favorites;
pub mod history;

pub use documents::DocumentStore;
pub use favorites::FavoritesLedger;
pub use history::HistoryLedger;

/// Default capacity of the history ledger
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// The three stores, guarded together by the service
#[derive(Debug)]
pub struct Stores {
    pub documents: DocumentStore,
    pub favorites: FavoritesLedger,
    pub history: HistoryLedger,
}

impl Stores {
    pub fn new(history_limit: usize) -> Self {
        Self {
            documents: DocumentStore::new(),
            favorites: FavoritesLedger::new(),
            history: HistoryLedger::with_capacity(history_limit),
        }
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
