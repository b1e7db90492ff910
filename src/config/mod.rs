use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// Natural Earth sources, in the order they are classified.
///
/// 10m land carries the continents, minor islands and reefs fill in what it
/// misses, and 50m land catches anything dropped by the others.
pub const DEFAULT_INPUTS: [&str; 4] = [
    "ne_10m_land.json",
    "ne_10m_minor_islands.json",
    "ne_10m_reefs.json",
    "ne_50m_land.json",
];

/// 0.02° is about 2.2km at the equator
pub const DEFAULT_RESOLUTION: f64 = 0.02;

pub const DEFAULT_DESCRIPTION: &str = "RLE encoded land grid from Natural Earth 10m data. \
    Each row contains [start, length] pairs for land segments.";

fn default_resolution() -> f64 {
    DEFAULT_RESOLUTION
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_inputs() -> Vec<PathBuf> {
    DEFAULT_INPUTS.iter().map(PathBuf::from).collect()
}
fn default_output_json() -> PathBuf {
    PathBuf::from("land-grid-10m.json")
}
fn default_output_bin() -> PathBuf {
    PathBuf::from("land-grid-10m.bin")
}
fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    /// Directory that relative input and output paths resolve against
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_inputs")]
    pub inputs: Vec<PathBuf>,
    #[serde(default = "default_output_json")]
    pub output_json: PathBuf,
    #[serde(default = "default_output_bin")]
    pub output_bin: PathBuf,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            data_dir: default_data_dir(),
            inputs: default_inputs(),
            output_json: default_output_json(),
            output_bin: default_output_bin(),
            description: default_description(),
            verbose: false,
        }
    }
}

impl FileConfig {
    /// Load the first config file found in the standard locations
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to parse config file");
                    }
                }
            }
        }
        None
    }

    /// Resolve a path against `data_dir` unless it is already absolute
    pub fn resolve(&self, path: &std::path::Path) -> PathBuf {
        self.data_dir.join(path)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("landgrid.toml"));
    paths.push(PathBuf::from(".landgrid.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("landgrid").join("config.toml"));
        paths.push(config_dir.join("landgrid.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".landgrid.toml"));
    }

    paths
}
