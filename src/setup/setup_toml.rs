// =====================================================
// FILE: src/setup/setup_toml.rs - DEFAULT CONFIG
// =====================================================

use crate::core::prelude::*;
use std::path::PathBuf;
use tokio::fs;

const CONFIG_FILE_NAME: &str = "msg-cache.toml";

const DEFAULT_CONFIG: &str = r#"[general]
# error | warn | info | debug | trace
log_level = "info"

[backend]
# Root of the auth API; /messages/ and /constants/ are resolved against it.
base_url = "http://127.0.0.1:8000/api/auth/"
# Request timeout in seconds (1-120)
timeout_secs = 10

[storage]
# JSON file holding the persisted message tables.
# Relative paths live in the .msg directory next to the binary. Empty = in-memory only.
path = "messages.json"

[messages]
# auto | diagnostic | generic | silent
#   auto       = [MISSING: CODE] in debug builds, generic text in release
#   diagnostic = always show [MISSING: CODE]
#   generic    = always show generic_fallback
#   silent     = show nothing
missing_policy = "auto"
generic_fallback = "Something went wrong. Please try again."
"#;

pub async fn ensure_config_exists() -> Result<PathBuf> {
    let config_dir = crate::core::helpers::get_base_dir()?;
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .await
            .map_err(AppError::Io)?;
        log::debug!("Config directory created: {}", config_dir.display());
    }

    let config_path = config_dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        write_default_config(&config_path).await?;
        log::info!("Config file created: {}", config_path.display());
    }

    Ok(config_path)
}

pub async fn write_default_config(path: &std::path::Path) -> Result<()> {
    fs::write(path, DEFAULT_CONFIG).await.map_err(AppError::Io)
}

pub fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(path) = std::env::var("MSG_CACHE_CONFIG") {
        paths.push(PathBuf::from(path));
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(base_dir) = exe_path.parent() {
            paths.push(base_dir.join(".msg").join(CONFIG_FILE_NAME));
            paths.push(base_dir.join(CONFIG_FILE_NAME));
            paths.push(base_dir.join("config").join(CONFIG_FILE_NAME));
        }
    }
    #[cfg(debug_assertions)]
    {
        paths.push(PathBuf::from(CONFIG_FILE_NAME));
    }
    paths
}
