use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Host that serves `/<video id>/<quality>.jpg` thumbnails.
pub const DEFAULT_THUMBNAIL_HOST: &str = "https://img.youtube.com/vi";

/// Prefix of batch archive names (`<prefix>-YYYY-MM-DD-HH-MM-SS.zip`).
pub const DEFAULT_ARCHIVE_PREFIX: &str = "yt-thumbnails";

/// How entries are stored inside the batch archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

/// Global configuration loaded from `~/.config/ytthumb/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YtThumbConfig {
    /// Base URL of the thumbnail host, without trailing slash.
    pub thumbnail_host: String,
    /// File name prefix for batch archives.
    pub archive_prefix: String,
    /// Archive entry compression: "deflated" (default) or "stored".
    #[serde(default)]
    pub compression: Compression,
    /// Where archives and single images are written (None = current directory).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Whole-request timeout in seconds (None = wait indefinitely).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for YtThumbConfig {
    fn default() -> Self {
        Self {
            thumbnail_host: DEFAULT_THUMBNAIL_HOST.to_string(),
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
            compression: Compression::default(),
            output_dir: None,
            request_timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

impl YtThumbConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    /// Output directory, falling back to the process working directory.
    pub fn resolve_output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytthumb")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<YtThumbConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = YtThumbConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: YtThumbConfig = toml::from_str(&data)?;
    Ok(cfg)
}
