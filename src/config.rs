// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Engine tolerances.
//!
//! Defaults reproduce the stock selection behavior. A YAML (or JSON) file can
//! override individual fields; anything left out keeps its default.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an optional config file.
pub const CONFIG_ENV: &str = "SHELFMASK_CONFIG";

/// Tunable selection tolerances.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Smallest accepted rectangle side, in image pixels.
    pub min_rect_size: f64,
    /// Drawn vertex handle radius, in display pixels.
    pub vertex_radius: f64,
    /// Multiplier on `vertex_radius` for close/delete clicks.
    pub vertex_hit_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_rect_size: 5.0,
            vertex_radius: 8.0,
            vertex_hit_factor: 1.5,
        }
    }
}

impl EngineConfig {
    /// Click tolerance around a polygon vertex, in display pixels.
    pub fn vertex_hit_radius(&self) -> f64 {
        self.vertex_radius * self.vertex_hit_factor
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("Invalid JSON config {}", path.display()))?,
            _ => serde_yaml::from_str(&text)
                .with_context(|| format!("Invalid YAML config {}", path.display()))?,
        };
        Ok(config)
    }

    /// Resolve the config from `SHELFMASK_CONFIG`, falling back to defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded engine config from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                log::error!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }
}
