// src/commands/context.rs
use crate::core::prelude::*;
use tokio::sync::RwLock;

/// State shared by every command of one handler: the message service, the
/// working copy of the tables (loaded on first use) and the command catalog.
#[derive(Debug)]
pub struct CommandContext {
    service: MessageService,
    tables: RwLock<Option<MessageTables>>,
    catalog: Vec<(String, String)>,
}

impl CommandContext {
    pub fn new(service: MessageService) -> Self {
        Self {
            service,
            tables: RwLock::new(None),
            catalog: Vec::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<(String, String)>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn service(&self) -> &MessageService {
        &self.service
    }

    pub fn catalog(&self) -> &[(String, String)] {
        &self.catalog
    }

    pub async fn tables(&self) -> MessageTables {
        if let Some(tables) = self.tables.read().await.as_ref() {
            return tables.clone();
        }

        let mut guard = self.tables.write().await;
        // Another caller may have loaded while we waited for the write lock.
        if let Some(tables) = guard.as_ref() {
            return tables.clone();
        }
        let tables = self.service.load_tables().await;
        *guard = Some(tables.clone());
        tables
    }

    pub async fn reload_tables(&self) -> MessageTables {
        let mut guard = self.tables.write().await;
        let tables = self.service.load_tables().await;
        *guard = Some(tables.clone());
        tables
    }

    /// Next `tables()` call reloads from the store or backend.
    pub async fn invalidate_tables(&self) {
        *self.tables.write().await = None;
    }
}
