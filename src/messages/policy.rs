// src/messages/policy.rs
use crate::core::constants::DEFAULT_GENERIC_FALLBACK;

/// What the user sees once every source failed to produce text for a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingPolicy {
    /// `[MISSING: CODE]`
    Diagnostic,
    /// A neutral sentence shared by every missing code.
    Generic(String),
    /// Nothing.
    Silent,
}

impl MissingPolicy {
    /// Diagnostic marker in debug builds, the neutral sentence in release.
    pub fn for_build(generic: &str) -> Self {
        if cfg!(debug_assertions) {
            Self::Diagnostic
        } else {
            Self::Generic(generic.to_string())
        }
    }

    pub fn render(&self, code: &str, resolved: &str) -> String {
        if !resolved.is_empty() {
            return resolved.to_string();
        }

        match self {
            Self::Diagnostic => format!("[MISSING: {}]", code.trim().to_uppercase()),
            Self::Generic(text) => text.clone(),
            Self::Silent => String::new(),
        }
    }
}

impl Default for MissingPolicy {
    fn default() -> Self {
        Self::for_build(DEFAULT_GENERIC_FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_text_passes_through() {
        for policy in [
            MissingPolicy::Diagnostic,
            MissingPolicy::Generic("x".into()),
            MissingPolicy::Silent,
        ] {
            assert_eq!(policy.render("VA002", "Required"), "Required");
        }
    }

    #[test]
    fn missing_text_rendering() {
        assert_eq!(
            MissingPolicy::Diagnostic.render("ia006", ""),
            "[MISSING: IA006]"
        );
        assert_eq!(
            MissingPolicy::Generic("Try again.".into()).render("IA006", ""),
            "Try again."
        );
        assert_eq!(MissingPolicy::Silent.render("IA006", ""), "");
    }

    #[test]
    fn default_follows_build_profile() {
        let expected = if cfg!(debug_assertions) {
            MissingPolicy::Diagnostic
        } else {
            MissingPolicy::Generic(DEFAULT_GENERIC_FALLBACK.into())
        };
        assert_eq!(MissingPolicy::default(), expected);
    }
}
