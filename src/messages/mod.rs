// src/messages/mod.rs
//! Backend-authored message text: errors, validations and information.
//!
//! [`MessageService`] loads the `user_error`, `user_validation` and
//! `user_information` tables from the persisted store or the backend,
//! normalizes whichever shape arrived, and resolves codes with a per-code
//! backend fallback.

pub mod backend;
pub mod category;
pub mod policy;
pub mod service;
pub mod table;

pub use backend::{HttpBackend, MessageBackend, TableSet};
pub use category::Category;
pub use policy::MissingPolicy;
pub use service::{MessageService, MessageTables, RefreshOutcome};
pub use table::{normalize, MessageTable, NormalizedTable};
