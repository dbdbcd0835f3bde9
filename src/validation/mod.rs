//! Field rules for the profile, registration and address forms.
//!
//! Rules never carry display text; they name a message code that the
//! [`MessageService`](crate::messages::MessageService) resolves.

pub mod form;
pub mod rules;

pub use form::{validate_form, FormReport};
pub use rules::{check, check_field, check_password_confirmation, FieldKind, MessageRef};
