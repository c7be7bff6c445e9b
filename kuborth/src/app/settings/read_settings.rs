use std::fs;

use super::write_settings::{config_file_path, Settings};

/// Load settings from disk. Best-effort: a missing file, an unreadable
/// path, or a parse error all fall back to `Settings::default()` rather
/// than failing startup.
pub fn load_settings() -> Settings {
    let path = match config_file_path() {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "could not determine settings path, using defaults");
            return Settings::default();
        }
    };
    if !path.exists() {
        return Settings::default();
    }
    let bytes = match fs::read_to_string(&path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read settings file, using defaults");
            return Settings::default();
        }
    };
    match toml::from_str(&bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not parse settings file, using defaults");
            Settings::default()
        }
    }
}
