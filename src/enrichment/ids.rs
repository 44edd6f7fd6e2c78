//! Identifier generation

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh record identifiers
pub trait IdGenerator {
    /// Returns a new identifier of the form `<prefix>_<suffix>`
    fn next_id(&self, prefix: &str) -> String;
}

/// Random ids: prefix plus the first 8 hex digits of a v4 UUID
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("{}_{}", prefix, &hex[..8])
    }
}

/// Deterministic ids: prefix plus a zero-padded counter starting at 1
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting after `last`
    pub fn starting_after(last: u64) -> Self {
        Self {
            counter: AtomicU64::new(last),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{:08}", prefix, n)
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self, prefix: &str) -> String {
        (**self).next_id(prefix)
    }
}
