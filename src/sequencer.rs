// src/sequencer.rs
//! Latest-wins ordering for overlapping lookups on the same field.
//!
//! A postal-code lookup or message fetch that is still in flight when the
//! user edits the field again must not overwrite the newer answer. Every
//! dispatch takes a [`Ticket`]; on completion only the newest ticket of its
//! field is accepted.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    field: String,
    seq: u64,
}

impl Ticket {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct LookupSequencer {
    latest: Mutex<HashMap<String, u64>>,
}

impl LookupSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, field: &str) -> Ticket {
        let mut latest = self.lock();
        let seq = latest.entry(field.to_string()).or_insert(0);
        *seq += 1;
        Ticket {
            field: field.to_string(),
            seq: *seq,
        }
    }

    pub fn is_latest(&self, ticket: &Ticket) -> bool {
        self.lock().get(&ticket.field) == Some(&ticket.seq)
    }

    /// Hands `value` back only if no newer lookup was started for the field.
    pub fn accept<T>(&self, ticket: &Ticket, value: T) -> Option<T> {
        if self.is_latest(ticket) {
            Some(value)
        } else {
            log::debug!(
                "Discarding stale result for '{}' (#{})",
                ticket.field,
                ticket.seq
            );
            None
        }
    }

    pub async fn run<F, T>(&self, field: &str, lookup: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin(field);
        let value = lookup.await;
        self.accept(&ticket, value)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, u64>> {
        self.latest.lock().unwrap_or_else(|poisoned| {
            log::error!("LookupSequencer lock poisoned, recovering...");
            poisoned.into_inner()
        })
    }
}
