//! Where the CLI finds its settings and its diagram store.
//!
//! A TOML file is read from `--config` when given. Otherwise the first of
//! `classcanvas/config.toml` and the platform config directory that exists
//! is used, and built-in defaults apply when neither does.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use classcanvas::{CanvasError, config::AppConfig};

const APPLICATION: &str = "classcanvas";
const CONFIG_FILE: &str = "config.toml";
const LOCAL_CONFIG: &str = "classcanvas/config.toml";
const FALLBACK_STORE_DIR: &str = ".classcanvas";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot parse configuration file: {0}")]
    Parse(String),

    #[error("configuration file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl From<ConfigError> for CanvasError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation(msg) => CanvasError::Validation(msg),
            other => CanvasError::Io(io::Error::other(other.to_string())),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", APPLICATION, APPLICATION)
}

/// Loads the application configuration.
///
/// # Errors
///
/// An explicit path that does not exist is an error, unlike the implicit
/// locations which are skipped. Any file that is read must parse and pass
/// [`AppConfig::validate`].
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CanvasError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Reading configuration passed on the command line");
        return read_config(path);
    }

    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG)];
    match project_dirs() {
        Some(dirs) => candidates.push(dirs.config_dir().join(CONFIG_FILE)),
        None => debug!("No platform configuration directory on this system"),
    }

    match candidates.iter().find(|path| path.is_file()) {
        Some(path) => {
            info!(path:% = path.display(); "Reading configuration");
            read_config(path)
        }
        None => {
            debug!(searched:? = candidates; "No configuration file, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Directory holding the stored diagram.
///
/// `--store` takes precedence over `[storage] directory`, which takes
/// precedence over the platform data directory.
pub fn store_directory(explicit: Option<impl AsRef<Path>>, config: &AppConfig) -> PathBuf {
    if let Some(path) = explicit {
        return path.as_ref().to_path_buf();
    }
    if let Some(path) = config.storage().directory() {
        return path.to_path_buf();
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            debug!(fallback = FALLBACK_STORE_DIR; "No platform data directory, storing locally");
            PathBuf::from(FALLBACK_STORE_DIR)
        })
}

fn read_config(path: &Path) -> Result<AppConfig, CanvasError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let text = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))?;
    config.validate().map_err(ConfigError::Validation)?;
    Ok(config)
}
