use crate::core::prelude::*;
use std::path::PathBuf;

/// Directory next to the executable that holds config and cache files.
pub fn get_base_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().map_err(AppError::Io)?;
    let base_dir = exe_path
        .parent()
        .ok_or_else(|| AppError::Config("Executable has no parent directory".to_string()))?;
    Ok(base_dir.join(".msg"))
}

/// Resolves a configured storage path; relative paths live under the base dir.
pub fn resolve_storage_path(raw: &str) -> Result<PathBuf> {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(get_base_dir()?.join(path))
}

/// Short single-line preview for log output, cut on char boundaries.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!(
            "{}...",
            text.chars()
                .take(max_chars.saturating_sub(3))
                .collect::<String>()
        )
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_keeps_short_text() {
        assert_eq!(preview("Required", 20), "Required");
    }

    #[test]
    fn preview_cuts_on_char_boundaries() {
        let cut = preview("äöüäöüäöüäöü", 8);
        assert_eq!(cut, "äöüäö...");
    }

    #[test]
    fn absolute_storage_path_is_kept() {
        let raw = if cfg!(windows) {
            "C:\\cache\\messages.json"
        } else {
            "/tmp/cache/messages.json"
        };
        assert_eq!(resolve_storage_path(raw).ok(), Some(PathBuf::from(raw)));
    }
}
