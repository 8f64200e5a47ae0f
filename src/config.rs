use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::{NoteboardError, Position, Result, DEFAULT_COLOR};

const CONFIG_FILE_NAME: &str = "config.json";
const STORE_FILE_NAME: &str = "store.json";

/// Size of the board the notes are laid out on, in pixels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// Whether `position` falls inside the visible canvas
    pub fn contains(&self, position: Position) -> bool {
        (0.0..=self.width).contains(&position.x) && (0.0..=self.height).contains(&position.y)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        CanvasSize {
            width: 1200.0,
            height: 600.0,
        }
    }
}

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// File holding the key-value store
    pub store_path: PathBuf,

    /// Color pre-selected in the note form
    pub default_color: String,

    /// Canvas dimensions used by the display surface
    pub canvas: CanvasSize,
}

impl Default for Config {
    fn default() -> Self {
        let store_path = project_dirs()
            .map(|dirs| dirs.data_dir().join(STORE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(STORE_FILE_NAME));

        Config {
            store_path,
            default_color: DEFAULT_COLOR.to_string(),
            canvas: CanvasSize::default(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "noteboard")
}

impl Config {
    /// Where the configuration file lives when no path is given
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults; an unreadable one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                debug!("No configuration directory available, using defaults");
                return Ok(Config::default());
            }
        };

        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse config file {}: {}", path.display(), e);
            NoteboardError::ConfigError {
                message: format!("{}: {}", path.display(), e),
            }
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Writes the configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    error!("Failed to create config directory: {}", e);
                    NoteboardError::DirectoryError {
                        path: parent.to_path_buf(),
                    }
                })?;
            }
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Configuration written to {}", path.display());
        Ok(())
    }
}
