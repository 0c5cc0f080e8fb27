// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings come from an optional `pinmap.yaml` in the working directory.
//! Any field left out takes its default.

use crate::models::color::HexColor;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file looked up at startup.
pub const CONFIG_FILE: &str = "pinmap.yaml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where entries are saved between sessions.
    pub state_file: PathBuf,
    /// Background map image.
    pub map_image: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Initial width of the entry list panel.
    pub list_panel_width: f32,
    /// Fill for newly added entries.
    pub default_color: HexColor,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("state.json"),
            map_image: PathBuf::from("worldmap.png"),
            window_title: "OSRS Farming Points".to_string(),
            window_size: [1920.0, 1080.0],
            min_window_size: [800.0, 600.0],
            list_panel_width: 300.0,
            default_color: HexColor::YELLOW,
        }
    }
}

/// Load settings from `path`, or defaults if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let yaml = match std::fs::read_to_string(path) {
        Ok(yaml) => yaml,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No {} found, using default settings", path.display());
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };
    let config = serde_yaml::from_str(&yaml)
        .with_context(|| format!("Malformed settings file {}", path.display()))?;
    log::info!("Loaded settings from {}", path.display());
    Ok(config)
}
