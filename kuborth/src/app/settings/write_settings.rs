use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::app::types::{ColumnsMode, ResourceOrder, TableMode};

/// User-editable settings persisted to a TOML file (§6 "External
/// Interfaces"). Loading is best-effort and never fails startup; saving is
/// only ever explicit ("save as defaults").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub resources: ResourceSettings,
    pub objects: ObjectSettings,
    pub panel: PanelSettings,
    pub input: InputSettings,
    pub viewer: ViewerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceSettings {
    pub show_non_empty_only: bool,
    pub order: ResourceOrder,
    pub favorites: Vec<String>,
    pub columns: ColumnsMode,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        ResourceSettings {
            show_non_empty_only: false,
            order: ResourceOrder::Favorites,
            favorites: Vec::new(),
            columns: ColumnsMode::Normal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectSettings {
    pub order: String,
    pub columns: ColumnsMode,
}

impl Default for ObjectSettings {
    fn default() -> Self {
        ObjectSettings { order: "name".to_string(), columns: ColumnsMode::Normal }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelSettings {
    pub table_mode: TableMode,
}

impl Default for PanelSettings {
    fn default() -> Self {
        PanelSettings { table_mode: TableMode::Scroll }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputSettings {
    pub mouse_double_click_timeout_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        InputSettings { mouse_double_click_timeout_ms: 300 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewerSettings {
    pub theme: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        ViewerSettings { theme: "dracula".to_string() }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            resources: ResourceSettings::default(),
            objects: ObjectSettings::default(),
            panel: PanelSettings::default(),
            input: InputSettings::default(),
            viewer: ViewerSettings::default(),
        }
    }
}

/// Compute the config file path using `XDG_CONFIG_HOME`, falling back to
/// `$HOME/.config/kuborth/settings.toml`.
pub fn config_file_path() -> Result<PathBuf> {
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        let mut p = PathBuf::from(xdg);
        p.push("kuborth");
        p.push("settings.toml");
        return Ok(p);
    }

    let home = env::var("HOME").context("HOME not set; cannot determine config directory")?;
    let mut p = PathBuf::from(home);
    p.push(".config");
    p.push("kuborth");
    p.push("settings.toml");
    Ok(p)
}

/// Save settings to disk (creates the parent directory if needed). Only
/// called from the explicit "save as defaults" action, never implicitly.
pub fn save_settings(settings: &Settings) -> Result<()> {
    let path = config_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create config dir {}", parent.display()))?;
    }
    let s = toml::to_string_pretty(settings).context("failed to serialize settings to TOML")?;
    let mut file =
        fs::File::create(&path).with_context(|| format!("failed to create settings file {}", path.display()))?;
    file.write_all(s.as_bytes()).with_context(|| format!("failed to write settings to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_external_interface_table() {
        let s = Settings::default();
        assert!(!s.resources.show_non_empty_only);
        assert_eq!(s.resources.order, ResourceOrder::Favorites);
        assert_eq!(s.objects.order, "name");
        assert_eq!(s.panel.table_mode, TableMode::Scroll);
        assert_eq!(s.input.mouse_double_click_timeout_ms, 300);
        assert_eq!(s.viewer.theme, "dracula");
    }

    #[test]
    fn round_trips_through_toml() {
        let s = Settings::default();
        let text = toml::to_string_pretty(&s).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(s, back);
    }
}
