//! Light/dark theme flag, persisted as the application's only stored value.

use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const THEME_FILE: &str = "theme.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn egui_theme(self) -> egui::Theme {
        match self {
            ThemeMode::Light => egui::Theme::Light,
            ThemeMode::Dark => egui::Theme::Dark,
        }
    }

    /// Label for the toggle button, naming the mode it switches to
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemeMode::Light => "🌙 Dark",
            ThemeMode::Dark => "☀ Light",
        }
    }
}

// On-disk shape: a single `theme = "..."` entry
#[derive(Debug, Default, Serialize, Deserialize)]
struct ThemeFile {
    theme: ThemeMode,
}

/// Reads and writes the theme flag
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store inside the given configuration directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(THEME_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored mode; a missing or unreadable file means Light.
    pub async fn load(&self) -> ThemeMode {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => match toml::from_str::<ThemeFile>(&content) {
                Ok(file) => {
                    debug!("Loaded theme {:?} from {}", file.theme, self.path.display());
                    file.theme
                }
                Err(e) => {
                    warn!(
                        "Ignoring invalid theme file {}: {}",
                        self.path.display(),
                        e
                    );
                    ThemeMode::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ThemeMode::default(),
            Err(e) => {
                warn!("Unable to read theme file {}: {}", self.path.display(), e);
                ThemeMode::default()
            }
        }
    }

    pub async fn save(&self, theme: ThemeMode) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| eyre!("Failed to create theme directory: {}", e))?;
        }

        let content = toml::to_string(&ThemeFile { theme })
            .map_err(|e| eyre!("Failed to serialize theme: {}", e))?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| eyre!("Failed to write theme file: {}", e))?;

        info!("Saved theme {:?} to {}", theme, self.path.display());
        Ok(())
    }
}
