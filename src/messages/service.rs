// src/messages/service.rs
use super::backend::{HttpBackend, MessageBackend, TableSet};
use super::{Category, MessageTable, MissingPolicy, NormalizedTable};
use crate::core::constants::SESSION_KEYS;
use crate::core::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Normalized working copy of the three tables, loaded once per view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageTables {
    error: NormalizedTable,
    validation: NormalizedTable,
    information: NormalizedTable,
}

impl MessageTables {
    pub fn from_set(set: &TableSet) -> Self {
        let mut tables = Self::default();
        for category in Category::ALL {
            tables.set(category, set.get(category).normalize(category));
        }
        tables
    }

    pub fn get(&self, category: Category) -> &NormalizedTable {
        match category {
            Category::Error => &self.error,
            Category::Validation => &self.validation,
            Category::Information => &self.information,
        }
    }

    pub fn set(&mut self, category: Category, table: NormalizedTable) {
        match category {
            Category::Error => self.error = table,
            Category::Validation => self.validation = table,
            Category::Information => self.information = table,
        }
    }

    /// Non-empty text for a code, compared case-insensitively.
    pub fn lookup(&self, category: Category, code: &str) -> Option<&str> {
        self.get(category).get(code).filter(|text| !text.is_empty())
    }

    pub fn total_len(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FreshSource {
    Messages,
    Constants,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed { codes: usize },
    Failed(String),
}

impl RefreshOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, Self::Refreshed { .. })
    }
}

/// Shared resolver for backend-authored message text.
///
/// Build one per process and hand clones to every consumer; clones share the
/// store and the backend client. Lookups walk memory, then the persisted
/// store, then the backend, and never fail: an exhausted chain yields the
/// empty string and the configured [`MissingPolicy`] decides what is shown.
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn MessageBackend>,
    policy: MissingPolicy,
    // Set once a bulk fetch from messages/ was persisted in this session.
    fetched: Arc<AtomicBool>,
}

impl std::fmt::Debug for MessageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageService")
            .field("policy", &self.policy)
            .field("fetched", &self.fetched.load(Ordering::Relaxed))
            .finish()
    }
}

impl MessageService {
    pub fn new(store: Arc<dyn KeyValueStore>, backend: Arc<dyn MessageBackend>) -> Self {
        Self {
            store,
            backend,
            policy: MissingPolicy::default(),
            fetched: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_policy(mut self, policy: MissingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let store = crate::storage::open_configured(config)?;
        let backend = Arc::new(HttpBackend::from_config(config)?);
        Ok(Self::new(store, backend).with_policy(config.messages.policy()))
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn policy(&self) -> &MissingPolicy {
        &self.policy
    }

    /// Table for one category: persisted snapshot if it has entries,
    /// otherwise one bulk fetch that refreshes all three snapshots.
    pub async fn load_table(&self, category: Category) -> MessageTable {
        if let Some(table) = self.cached_table(category) {
            return table;
        }

        match self.fetch_fresh().await {
            Some((set, _)) => set.get(category).clone(),
            None => MessageTable::empty(),
        }
    }

    /// All three tables normalized, with at most one bulk request.
    pub async fn load_tables(&self) -> MessageTables {
        let mut raw = TableSet::default();
        let mut missing = Vec::new();

        for category in Category::ALL {
            match self.cached_table(category) {
                Some(table) => raw.set(category, table),
                None => missing.push(category),
            }
        }

        if !missing.is_empty() {
            match self.fetch_fresh().await {
                // Persisted snapshot now matches the fetch for every category.
                Some((set, FreshSource::Messages)) => raw = set,
                Some((set, FreshSource::Constants)) => {
                    for category in missing {
                        raw.set(category, set.get(category).clone());
                    }
                }
                None => {}
            }
        }

        let tables = MessageTables::from_set(&raw);
        log::debug!("Message tables ready: {} codes", tables.total_len());
        tables
    }

    /// Text for `code`, or the empty string once every source is exhausted.
    ///
    /// Order: the in-memory `tables`, the persisted `{category}_{CODE}` entry,
    /// then a single per-code backend request whose answer is persisted.
    pub async fn resolve_text(&self, tables: &MessageTables, category: Category, code: &str) -> String {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return String::new();
        }

        if let Some(text) = tables.lookup(category, &code) {
            return text.to_string();
        }

        let key = category.per_code_key(&code);
        match self.store.get(&key) {
            Ok(Some(text)) if !text.is_empty() => {
                log::debug!("{} served from per-code cache", key);
                return text;
            }
            Ok(_) => {}
            Err(e) => log::warn!("Per-code cache read failed for {}: {}", key, e),
        }

        log::debug!("{} {} not in table, asking backend", category, code);
        match self.backend.fetch_code(category, &code).await {
            Ok(text) if !text.is_empty() => {
                if let Err(e) = self.store.set(&key, &text) {
                    log::warn!("Could not persist {}: {}", key, e);
                }
                text
            }
            Ok(_) => {
                log::warn!("Message code not found: {} {}", category, code);
                String::new()
            }
            Err(e) => {
                log::error!("Per-code fetch failed for {} {}: {}", category, code, e);
                String::new()
            }
        }
    }

    /// Like [`resolve_text`](Self::resolve_text) with the category taken from the code prefix.
    pub async fn resolve(&self, tables: &MessageTables, code: &str) -> String {
        match Category::infer(code) {
            Some(category) => self.resolve_text(tables, category, code).await,
            None => {
                log::warn!("Cannot infer category of code '{}'", code);
                String::new()
            }
        }
    }

    /// Resolved text, or whatever the missing policy shows instead.
    pub async fn display_text(&self, tables: &MessageTables, category: Category, code: &str) -> String {
        let resolved = self.resolve_text(tables, category, code).await;
        self.policy.render(code, &resolved)
    }

    /// Re-fetches every table and overwrites the persisted snapshots.
    /// Failures are logged and reported, never raised.
    pub async fn refresh_on_logout(&self) -> RefreshOutcome {
        match self.backend.fetch_tables().await {
            Ok(set) => match self.persist_tables(&set) {
                Ok(()) => {
                    self.fetched.store(true, Ordering::Release);
                    let codes = MessageTables::from_set(&set).total_len();
                    log::info!("Refreshed message tables on logout ({} codes)", codes);
                    RefreshOutcome::Refreshed { codes }
                }
                Err(e) => {
                    log::error!("Could not persist refreshed message tables: {}", e);
                    RefreshOutcome::Failed(e.to_string())
                }
            },
            Err(e) => {
                log::warn!("Failed to fetch message tables on logout: {}", e);
                RefreshOutcome::Failed(e.to_string())
            }
        }
    }

    /// Drops the session credentials right away and refreshes the message
    /// tables in the background; the handle reports the refresh outcome.
    pub fn logout(&self) -> tokio::task::JoinHandle<RefreshOutcome> {
        for key in SESSION_KEYS {
            if let Err(e) = self.store.remove(key) {
                log::warn!("Could not clear session key '{}': {}", key, e);
            }
        }
        log::info!("Session credentials cleared");

        let service = self.clone();
        tokio::spawn(async move { service.refresh_on_logout().await })
    }

    // Snapshot usable without the backend: non-empty, or empty but written
    // by a bulk fetch earlier in this session.
    fn cached_table(&self, category: Category) -> Option<MessageTable> {
        let key = category.table_name();
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        match MessageTable::from_json(&raw) {
            Ok(table) if !table.is_empty() || self.fetched.load(Ordering::Acquire) => {
                log::debug!("{} served from cache ({} entries)", key, table.len());
                Some(table)
            }
            Ok(_) => None,
            Err(e) => {
                log::warn!("Discarding unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }

    // messages/ first (persisted), then constants/ (returned only).
    async fn fetch_fresh(&self) -> Option<(TableSet, FreshSource)> {
        match self.backend.fetch_tables().await {
            Ok(set) => {
                if let Err(e) = self.persist_tables(&set) {
                    log::warn!("Could not persist message tables: {}", e);
                } else {
                    self.fetched.store(true, Ordering::Release);
                }
                return Some((set, FreshSource::Messages));
            }
            Err(e) => log::warn!("Failed to load message tables, trying constants: {}", e),
        }

        match self.backend.fetch_constants().await {
            Ok(set) => Some((set, FreshSource::Constants)),
            Err(e) => {
                log::error!("Fallback to constants failed: {}", e);
                None
            }
        }
    }

    fn persist_tables(&self, set: &TableSet) -> Result<()> {
        for category in Category::ALL {
            self.store
                .set(category.table_name(), &set.get(category).to_json())?;
        }
        Ok(())
    }
}
