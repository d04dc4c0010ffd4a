// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::color::Rgb;
use crate::analytics::gain::{DEFAULT_DOWN_COLOR, DEFAULT_UP_COLOR};
use crate::analytics::lines::LineMode;
use crate::analytics::ohlc::Resolution;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fundclip", "fundclip"));

pub const CONFIG_ENV: &str = "FUNDCLIP_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub resolution: String,
    pub line_mode: LineMode,
    pub max_points: Option<usize>,
    pub view_sold: bool,
    pub up_color: Rgb,
    pub down_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: "1 month".to_string(),
            line_mode: LineMode::Absolute,
            max_points: Some(100),
            view_sold: false,
            up_color: DEFAULT_UP_COLOR,
            down_color: DEFAULT_DOWN_COLOR,
        }
    }
}

impl Settings {
    pub fn resolution(&self) -> Result<Resolution> {
        self.resolution
            .parse()
            .with_context(|| format!("Invalid resolution '{}' in settings", self.resolution))
    }
}

pub fn config_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p.trim()));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("settings.json"))
}

pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read settings at {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parse settings at {}", path.display()))?;
    settings.resolution()?;
    Ok(settings)
}

pub fn load() -> Result<Settings> {
    load_from(&config_path()?)
}
