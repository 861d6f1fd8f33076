//! Input field configuration persistence
//!
//! Stores user preferences in `~/.config/overlay-input/config.yaml`

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::clipboard::ClipboardBridge;
use crate::editable::{EditConstraints, DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_LENGTH};
use crate::measure::{FontMeasure, MonospaceMeasure, TextMeasure};
use crate::mouse::MULTI_CLICK_WINDOW;
use crate::session::EditSession;

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Maximum number of characters in the field
    pub max_length: usize,
    /// Undo entries kept (including the initial state)
    pub history_capacity: usize,
    /// Presses closer together than this form double/triple clicks
    pub multi_click_ms: u64,
    /// Cell width used when no font is configured
    pub char_width: f32,
    /// TTF/OTF used to measure the field's text
    pub font_path: Option<String>,
    pub font_size: f32,
    /// Model the language-model backend is asked to use
    pub model_name: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            multi_click_ms: MULTI_CLICK_WINDOW.as_millis() as u64,
            char_width: 8.0,
            font_path: None,
            font_size: 14.0,
            model_name: "llama3.2".to_string(),
        }
    }
}

impl InputConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to disk
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save to the default config file
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    pub fn constraints(&self) -> EditConstraints {
        EditConstraints::with_max_length(self.max_length)
    }

    pub fn multi_click_window(&self) -> Duration {
        Duration::from_millis(self.multi_click_ms)
    }

    /// Text measurement from the configured font, falling back to monospace
    pub fn measure(&self) -> Box<dyn TextMeasure> {
        if let Some(path) = &self.font_path {
            match FontMeasure::load(Path::new(path), self.font_size) {
                Ok(measure) => return Box::new(measure),
                Err(e) => tracing::warn!("{:#}, measuring with {}px cells", e, self.char_width),
            }
        }
        Box::new(MonospaceMeasure::new(self.char_width))
    }

    /// Build an edit session from this config with an in-process clipboard
    pub fn session(&self) -> EditSession {
        EditSession::new(self.constraints())
            .with_history_capacity(self.history_capacity)
            .with_click_window(self.multi_click_window())
            .with_measure(self.measure())
    }

    /// Build an edit session bound to the system clipboard
    pub fn system_session(&self) -> EditSession {
        self.session().with_clipboard(ClipboardBridge::system())
    }
}
