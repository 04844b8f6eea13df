// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Application configuration management.
//!
//! Persistent configuration is stored as TOML through `confy`. Every field
//! has a serde default so older or hand-edited files keep loading; command
//! line flags override individual values for a single run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const APP_NAME: &str = "feedmap-desktop";
const CONFIG_NAME: &str = "config";

/// USGS feed with magnitude 2.5+ earthquakes of the past week
pub const DEFAULT_QUAKE_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/2.5_week.atom";

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Remote earthquake feed (Atom or GeoJSON)
    #[serde(default = "default_quake_feed_url")]
    pub quake_feed_url: String,

    /// Local copy of the earthquake feed; used instead of the URL when set
    #[serde(default)]
    pub quake_feed_path: Option<PathBuf>,

    /// OpenFlights airports.dat
    #[serde(default = "default_airports_path")]
    pub airports_path: PathBuf,

    /// OpenFlights routes.dat
    #[serde(default = "default_routes_path")]
    pub routes_path: PathBuf,

    /// Airport property compared by the category (right-click) filter
    #[serde(default = "default_category_property")]
    pub airport_category_property: String,

    /// Initial map zoom level
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// Initial map centre latitude
    #[serde(default)]
    pub start_latitude: f64,

    /// Initial map centre longitude
    #[serde(default)]
    pub start_longitude: f64,

    /// Cache downloaded map tiles on disk
    #[serde(default = "default_true")]
    pub tile_cache: bool,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1
}

fn default_quake_feed_url() -> String {
    DEFAULT_QUAKE_FEED_URL.to_string()
}

fn default_airports_path() -> PathBuf {
    PathBuf::from("data/airports.dat")
}

fn default_routes_path() -> PathBuf {
    PathBuf::from("data/routes.dat")
}

fn default_category_property() -> String {
    geofeed::airport::DEFAULT_CATEGORY_PROPERTY.to_string()
}

fn default_zoom() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            quake_feed_url: default_quake_feed_url(),
            quake_feed_path: None,
            airports_path: default_airports_path(),
            routes_path: default_routes_path(),
            airport_category_property: default_category_property(),
            default_zoom: default_zoom(),
            start_latitude: 0.0,
            start_longitude: 0.0,
            tile_cache: true,
        }
    }
}

/// Where the earthquake feed is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    /// Interpret a command line value: `http(s)://` is a URL, anything else a path.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            FeedSource::Url(value.to_string())
        } else {
            FeedSource::File(PathBuf::from(value))
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Url(url) => f.write_str(url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, creating it with defaults on first run
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// The local feed file wins over the URL
    pub fn quake_feed(&self) -> FeedSource {
        match &self.quake_feed_path {
            Some(path) => FeedSource::File(path.clone()),
            None => FeedSource::Url(self.quake_feed_url.clone()),
        }
    }

    /// Tile cache directory, when caching is enabled
    pub fn tile_cache_dir(&self) -> Option<PathBuf> {
        if !self.tile_cache {
            return None;
        }
        let mut path = dirs::cache_dir().unwrap_or_else(|| PathBuf::from(".cache"));
        path.push(APP_NAME);
        path.push("tiles");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_feed_is_remote() {
        let config = AppConfig::default();
        assert_eq!(config.quake_feed(), FeedSource::Url(DEFAULT_QUAKE_FEED_URL.to_string()));
        assert_eq!(config.airport_category_property, "type");
    }

    #[test]
    fn test_local_feed_wins() {
        let config = AppConfig {
            quake_feed_path: Some(PathBuf::from("2.5_week.atom")),
            ..Default::default()
        };
        assert_eq!(config.quake_feed(), FeedSource::File(PathBuf::from("2.5_week.atom")));
    }

    #[test]
    fn test_feed_source_parse() {
        assert_eq!(
            FeedSource::parse("https://example.org/feed.geojson"),
            FeedSource::Url("https://example.org/feed.geojson".to_string())
        );
        assert_eq!(
            FeedSource::parse("2.5_week.atom"),
            FeedSource::File(PathBuf::from("2.5_week.atom"))
        );
    }

    #[test]
    fn test_tile_cache_can_be_disabled() {
        let config = AppConfig {
            tile_cache: false,
            ..Default::default()
        };
        assert!(config.tile_cache_dir().is_none());
        assert!(AppConfig::default().tile_cache_dir().is_some());
    }
}
