// src/messages/category.rs
use crate::core::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Partition of the symbolic-code namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Error,
    Validation,
    Information,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Error,
        Category::Validation,
        Category::Information,
    ];

    /// Persisted key and `/messages/` payload field of the whole table.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Error => "user_error",
            Self::Validation => "user_validation",
            Self::Information => "user_information",
        }
    }

    pub fn code_field(self) -> &'static str {
        match self {
            Self::Error => "error_code",
            Self::Validation => "validation_code",
            Self::Information => "information_code",
        }
    }

    pub fn text_field(self) -> &'static str {
        match self {
            Self::Error => "error_message",
            Self::Validation => "validation_message",
            Self::Information => "information_text",
        }
    }

    /// Path segment of the per-code endpoint and prefix of per-code keys.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Validation => "validation",
            Self::Information => "information",
        }
    }

    /// Field of the `/constants/` payload.
    pub fn constants_key(self) -> &'static str {
        match self {
            Self::Error => "ERRORS",
            Self::Validation => "VALIDATIONS",
            Self::Information => "INFORMATION",
        }
    }

    pub fn per_code_key(self, code: &str) -> String {
        format!("{}_{}", self.segment(), code.trim().to_uppercase())
    }

    /// Category implied by a code's first letter: `E`, `V` or `I`.
    pub fn infer(code: &str) -> Option<Self> {
        match code.trim().chars().next()?.to_ascii_uppercase() {
            'E' => Some(Self::Error),
            'V' => Some(Self::Validation),
            'I' => Some(Self::Information),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" | "err" | "errors" => Ok(Self::Error),
            "validation" | "val" | "validations" => Ok(Self::Validation),
            "information" | "info" => Ok(Self::Information),
            other => Err(AppError::Validation(format!(
                "Unknown category '{}' (expected error, validation or information)",
                other
            ))),
        }
    }
}
