use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;

/// Rendering defaults for the generated map artifact. Every field can be
/// overridden from `config.toml` in the platform config directory; a
/// missing or unreadable file falls back to the defaults.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    #[serde(default = "default_tile_attribution")]
    pub tile_attribution: String,
    #[serde(default = "default_map_center")]
    pub map_center: [f64; 2],
    #[serde(default = "default_zoom_start")]
    pub zoom_start: f64,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u8,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
    #[serde(default = "default_open_viewer")]
    pub open_viewer: bool,
}

fn default_output_file() -> String {
    "map.html".to_string()
}

fn default_tile_url() -> String {
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
        .to_string()
}

fn default_tile_attribution() -> String {
    "Tiles &copy; Esri &mdash; Source: Esri, Maxar, Earthstar Geographics".to_string()
}

fn default_map_center() -> [f64; 2] {
    [30.0, 20.0]
}

fn default_zoom_start() -> f64 {
    2.5
}

fn default_min_zoom() -> u8 {
    2
}

fn default_max_zoom() -> u8 {
    7
}

fn default_open_viewer() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
            tile_url: default_tile_url(),
            tile_attribution: default_tile_attribution(),
            map_center: default_map_center(),
            zoom_start: default_zoom_start(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            open_viewer: default_open_viewer(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("com", "haplomap", "haplomap") {
            let config_path = proj_dirs.config_dir().join("config.toml");

            if config_path.exists() {
                if let Ok(content) = fs::read_to_string(config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Config::default()
    }
}
