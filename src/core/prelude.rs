// src/core/prelude.rs

// Core essentials
pub use crate::core::config::Config;
pub use crate::core::error::{AppError, Result};

// Standard library essentials
pub use std::sync::Arc;
pub use std::time::Duration;

// Message resolution
pub use crate::messages::{Category, MessageService, MessageTables};
pub use crate::storage::KeyValueStore;
