// src/validation/rules.rs
use crate::core::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-z\s]+$").unwrap();
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
    static ref ALNUM_SPACE_HYPHEN: Regex = Regex::new(r"^[A-Za-z0-9\s-]+$").unwrap();
    static ref ALNUM_ONLY: Regex = Regex::new(r"^[A-Za-z0-9]+$").unwrap();
}

const MIN_PASSWORD_LEN: usize = 6;
const POSTAL_CODE_LEN: std::ops::RangeInclusive<usize> = 4..=10;

/// A message code plus the table it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub category: Category,
    pub code: &'static str,
}

impl MessageRef {
    const fn error(code: &'static str) -> Self {
        Self {
            category: Category::Error,
            code,
        }
    }

    const fn validation(code: &'static str) -> Self {
        Self {
            category: Category::Validation,
            code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    FirstName,
    LastName,
    Username,
    Email,
    Phone,
    Password,
    Landmark,
    PostalCode,
    /// Required free-text address parts: house/flat, street, area, district,
    /// city, state, country.
    AddressLine,
}

impl FieldKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.trim() {
            "first_name" | "firstName" => Self::FirstName,
            "last_name" | "lastName" => Self::LastName,
            "username" => Self::Username,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "password" | "new_password" => Self::Password,
            "landmark" => Self::Landmark,
            "postal_code" | "pincode" => Self::PostalCode,
            "house_flat" | "street" | "area" | "district" | "city" | "state" | "country" => {
                Self::AddressLine
            }
            _ => return None,
        };
        Some(kind)
    }
}

/// First rule the value breaks, if any.
pub fn check_field(kind: FieldKind, value: &str) -> Option<MessageRef> {
    let v = value.trim();

    match kind {
        FieldKind::Landmark => {
            if !v.is_empty() && !ALNUM_SPACE_HYPHEN.is_match(v) {
                return Some(MessageRef::error("EA003"));
            }
            None
        }
        FieldKind::PostalCode => {
            if v.is_empty() {
                Some(MessageRef::error("EA008"))
            } else if !ALNUM_ONLY.is_match(v) {
                Some(MessageRef::error("EA005"))
            } else if !POSTAL_CODE_LEN.contains(&v.chars().count()) {
                Some(MessageRef::error("EA006"))
            } else {
                None
            }
        }
        FieldKind::AddressLine => {
            if v.is_empty() {
                Some(MessageRef::error("EA004"))
            } else if !ALNUM_SPACE_HYPHEN.is_match(v) {
                Some(MessageRef::error("EA003"))
            } else {
                None
            }
        }
        FieldKind::Password => {
            if v.is_empty() {
                Some(MessageRef::validation("VA002"))
            } else if value.chars().count() < MIN_PASSWORD_LEN {
                Some(MessageRef::error("EA004"))
            } else {
                None
            }
        }
        personal => {
            if v.is_empty() {
                return Some(MessageRef::validation("VA002"));
            }
            let broken = match personal {
                FieldKind::FirstName | FieldKind::LastName => {
                    (!NAME_RE.is_match(v)).then_some("VA001")
                }
                FieldKind::Username => (!USERNAME_RE.is_match(v)).then_some("VA003"),
                FieldKind::Email => (!EMAIL_RE.is_match(v)).then_some("VA005"),
                FieldKind::Phone => (!PHONE_RE.is_match(v)).then_some("VA007"),
                _ => None,
            };
            broken.map(MessageRef::validation)
        }
    }
}

/// Rule check by field name; unknown names are a caller error.
pub fn check(name: &str, value: &str) -> Result<Option<MessageRef>> {
    let kind = FieldKind::from_name(name)
        .ok_or_else(|| AppError::Validation(format!("Unknown form field '{}'", name)))?;
    Ok(check_field(kind, value))
}

pub fn check_password_confirmation(password: &str, confirm: &str) -> Option<MessageRef> {
    (password != confirm).then_some(MessageRef::error("EF003"))
}
