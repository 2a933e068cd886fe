//! Identifier generation
//!
//! Documents, favorite records and history records all draw their ids
//! from one generator owned by the service.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of unique, opaque string identifiers
pub trait IdGenerator: Send + Sync {
    /// Produce an id never returned before in this session
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids in hyphen-free form
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Predictable ids: `<prefix>1`, `<prefix>2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{}", self.prefix, n)
    }
}
