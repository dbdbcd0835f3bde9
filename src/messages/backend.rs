// src/messages/backend.rs
use super::{Category, MessageTable};
use crate::core::prelude::*;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

/// The three tables of one bulk payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    pub error: MessageTable,
    pub validation: MessageTable,
    pub information: MessageTable,
}

impl TableSet {
    pub fn get(&self, category: Category) -> &MessageTable {
        match category {
            Category::Error => &self.error,
            Category::Validation => &self.validation,
            Category::Information => &self.information,
        }
    }

    pub fn set(&mut self, category: Category, table: MessageTable) {
        match category {
            Category::Error => self.error = table,
            Category::Validation => self.validation = table,
            Category::Information => self.information = table,
        }
    }

    /// `{ user_error, user_validation, user_information }`
    pub fn from_messages_payload(payload: Value) -> Result<Self> {
        Self::from_payload(payload, Category::table_name)
    }

    /// `{ ERRORS, VALIDATIONS, INFORMATION }`
    pub fn from_constants_payload(payload: Value) -> Result<Self> {
        Self::from_payload(payload, Category::constants_key)
    }

    // Missing or null fields become empty tables.
    fn from_payload(payload: Value, field: fn(Category) -> &'static str) -> Result<Self> {
        let Value::Object(mut fields) = payload else {
            return Err(AppError::Parse(
                "Message payload is not a JSON object".to_string(),
            ));
        };

        let mut set = Self::default();
        for category in Category::ALL {
            match fields.remove(field(category)) {
                None | Some(Value::Null) => {}
                Some(value) => set.set(category, MessageTable::from_value(value)),
            }
        }
        Ok(set)
    }
}

/// Source of backend-authored message text.
#[async_trait]
pub trait MessageBackend: Send + Sync {
    /// `GET messages/`: all three tables in one payload.
    async fn fetch_tables(&self) -> Result<TableSet>;

    /// `GET constants/`: the built-in defaults, used when `messages/` is down.
    async fn fetch_constants(&self) -> Result<TableSet>;

    /// `GET messages/{category}/{CODE}/`: text of a single code, possibly empty.
    async fn fetch_code(&self, category: Category, code: &str) -> Result<String>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid base_url '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "base_url '{}' cannot carry a path",
                base_url
            )));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.backend.base_url, config.backend.timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments (percent-encoded) plus a trailing slash.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("base_url '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        log::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Http(format!("{} responded {}", url, status)));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl MessageBackend for HttpBackend {
    async fn fetch_tables(&self) -> Result<TableSet> {
        let payload = self.get_json(self.endpoint(&["messages"])?).await?;
        TableSet::from_messages_payload(payload)
    }

    async fn fetch_constants(&self) -> Result<TableSet> {
        let payload = self.get_json(self.endpoint(&["constants"])?).await?;
        TableSet::from_constants_payload(payload)
    }

    async fn fetch_code(&self, category: Category, code: &str) -> Result<String> {
        let code = code.trim().to_uppercase();
        let url = self.endpoint(&["messages", category.segment(), &code])?;
        let payload = self.get_json(url).await?;

        Ok(payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}
