// src/validation/form.rs
use super::rules::{self, MessageRef};
use crate::core::prelude::*;
use futures::future::join_all;
use std::collections::BTreeMap;

/// Outcome of validating a whole form: one display message per failing field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormReport {
    errors: BTreeMap<String, String>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks every field, then resolves all failing codes concurrently and
/// waits for the whole batch before deciding. Unknown field names fail fast.
pub async fn validate_form(
    service: &MessageService,
    tables: &MessageTables,
    fields: &[(&str, &str)],
) -> Result<FormReport> {
    let mut failing: Vec<(&str, MessageRef)> = Vec::new();
    for &(name, value) in fields {
        if let Some(found) = rules::check(name, value)? {
            failing.push((name, found));
        }
    }

    let lookups = failing.iter().map(|(name, found)| async move {
        let text = service
            .display_text(tables, found.category, found.code)
            .await;
        (name.to_string(), text)
    });

    let errors: BTreeMap<String, String> = join_all(lookups).await.into_iter().collect();
    if !errors.is_empty() {
        log::debug!("Form rejected: {} field(s) invalid", errors.len());
    }

    Ok(FormReport { errors })
}
