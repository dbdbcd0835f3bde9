// Shared fixtures: a scripted in-process backend and service builders.
#![allow(dead_code)]

use async_trait::async_trait;
use msg_cache::messages::{MessageBackend, MessageTable, TableSet};
use msg_cache::{AppError, Category, MemoryStore, MessageService, MissingPolicy, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct StubBackend {
    tables: Option<TableSet>,
    constants: Option<TableSet>,
    codes: Mutex<HashMap<String, String>>,
    yield_on_fetch: bool,
    pub table_calls: AtomicUsize,
    pub constants_calls: AtomicUsize,
    pub code_calls: AtomicUsize,
}

impl StubBackend {
    /// Every endpoint unreachable until configured.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_tables(mut self, payload: Value) -> Self {
        self.tables = Some(TableSet::from_messages_payload(payload).unwrap());
        self
    }

    pub fn with_constants(mut self, payload: Value) -> Self {
        self.constants = Some(TableSet::from_constants_payload(payload).unwrap());
        self
    }

    /// Bulk fetches suspend once before answering, so overlapping callers interleave.
    pub fn yielding(mut self) -> Self {
        self.yield_on_fetch = true;
        self
    }

    pub fn with_code(self, category: Category, code: &str, text: &str) -> Self {
        self.codes
            .lock()
            .unwrap()
            .insert(category.per_code_key(code), text.to_string());
        self
    }

    pub fn table_calls(&self) -> usize {
        self.table_calls.load(Ordering::SeqCst)
    }

    pub fn constants_calls(&self) -> usize {
        self.constants_calls.load(Ordering::SeqCst)
    }

    pub fn code_calls(&self) -> usize {
        self.code_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.table_calls() + self.constants_calls() + self.code_calls()
    }
}

#[async_trait]
impl MessageBackend for StubBackend {
    async fn fetch_tables(&self) -> Result<TableSet> {
        self.table_calls.fetch_add(1, Ordering::SeqCst);
        if self.yield_on_fetch {
            tokio::task::yield_now().await;
        }
        self.tables
            .clone()
            .ok_or_else(|| AppError::Http("messages/ unreachable".into()))
    }

    async fn fetch_constants(&self) -> Result<TableSet> {
        self.constants_calls.fetch_add(1, Ordering::SeqCst);
        self.constants
            .clone()
            .ok_or_else(|| AppError::Http("constants/ unreachable".into()))
    }

    async fn fetch_code(&self, category: Category, code: &str) -> Result<String> {
        self.code_calls.fetch_add(1, Ordering::SeqCst);
        self.codes
            .lock()
            .unwrap()
            .get(&category.per_code_key(code))
            .cloned()
            .ok_or_else(|| AppError::Http(format!("no {} {}", category, code)))
    }
}

pub struct Fixture {
    pub service: MessageService,
    pub store: Arc<MemoryStore>,
    pub backend: Arc<StubBackend>,
}

pub fn fixture(backend: StubBackend) -> Fixture {
    fixture_with_store(backend, Arc::new(MemoryStore::new()))
}

pub fn fixture_with_store(backend: StubBackend, store: Arc<MemoryStore>) -> Fixture {
    let backend = Arc::new(backend);
    let service = MessageService::new(store.clone(), backend.clone())
        .with_policy(MissingPolicy::Diagnostic);
    Fixture {
        service,
        store,
        backend,
    }
}

pub fn stored_table(store: &MemoryStore, category: Category) -> Option<MessageTable> {
    use msg_cache::KeyValueStore;
    store
        .get(category.table_name())
        .unwrap()
        .map(|raw| MessageTable::from_json(&raw).unwrap())
}
