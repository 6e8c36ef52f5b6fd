//! # Startup Configuration
//!
//! All tunables of the portfolio live in one TOML file under the user's
//! configuration directory (`<config dir>/portfolio-carousel/config.toml`).
//! The file is read once at startup; the application never writes back to
//! it, apart from creating it with defaults on first start so users have
//! something to edit.
//!
//! Every section uses `#[serde(default)]`, so a file that sets only a few
//! keys is valid and everything else keeps the defaults below.

use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::carousel::{CarouselSettings, SlideSource};

const APP_DIR: &str = "portfolio-carousel";
const CONFIG_FILE: &str = "config.toml";

/// One entry of a paginated list (research item, project, recommendation)
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct SectionEntry {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// A paginated list shown in its own tab
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SectionConfig {
    pub title: String,
    pub items_per_page: usize,
    pub entries: Vec<SectionEntry>,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            items_per_page: 4,
            entries: Vec::new(),
        }
    }
}

impl SectionConfig {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Slide sources in display order
    pub slides: Vec<SlideSource>,

    /// Viewports at most this wide count as compact input surfaces
    pub compact_width_px: f32,

    pub carousel: CarouselSettings,

    pub sections: Vec<SectionConfig>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            slides: vec![
                SlideSource::new("./assets/img/Photos/profile/china.jpeg"),
                SlideSource::new("./assets/img/Photos/profile/hike.jpeg"),
                SlideSource::new("./assets/img/Photos/profile/office.jpeg"),
            ],
            compact_width_px: 768.0,
            carousel: CarouselSettings::default(),
            sections: vec![
                SectionConfig::titled("Research"),
                SectionConfig::titled("Projects"),
                SectionConfig::titled("Recommendations"),
            ],
        }
    }
}

/// Directory holding the config file and the theme flag
pub fn app_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| eyre!("Could not determine the user configuration directory"))
}

impl PortfolioConfig {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Writes the default configuration to `path` unless a file already exists.
    pub async fn ensure_default(path: &Path) -> Result<()> {
        if tokio::fs::try_exists(path)
            .await
            .map_err(|e| eyre!("Failed to check for config file: {}", e))?
        {
            debug!("Config file {} already exists", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
        }

        let content = toml::to_string_pretty(&PortfolioConfig::default())
            .map_err(|e| eyre!("Failed to serialize default config: {}", e))?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| eyre!("Failed to write default config file: {}", e))?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;
        let config = Self::parse(&content)
            .map_err(|e| eyre!("Invalid config file {}: {}", path.display(), e))?;

        info!(
            "Loaded config from {} ({} slides, {} sections)",
            path.display(),
            config.slides.len(),
            config.sections.len()
        );
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| eyre!("{}", e))
    }

    /// Makes sure a config file exists in `dir` and loads it
    pub async fn load_or_create(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);
        Self::ensure_default(&path).await?;
        Self::load_from(&path).await
    }
}
