// ABOUTME: Selector configuration handling.
// ABOUTME: Loads and saves options, gaps and swatches from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{DeepColour, SwatchPalette};

/// A section or behaviour the selector can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorOption {
    /// Alpha can be edited as well as the colour
    AlphaChannel,
    /// Preview of the colour above the colourspace
    ColourAtTop,
    /// The preview doubles as a hex editor
    EditableColour,
    RgbSliders,
    HsbSliders,
    /// Radio toggles choosing the active parameter
    Toggle,
    Reset,
    OriginalColour,
    /// 2D plane plus 1D strip
    Colourspace,
    HexEdit,
}

impl SelectorOption {
    pub fn all() -> &'static [SelectorOption] {
        &[
            SelectorOption::AlphaChannel,
            SelectorOption::ColourAtTop,
            SelectorOption::EditableColour,
            SelectorOption::RgbSliders,
            SelectorOption::HsbSliders,
            SelectorOption::Toggle,
            SelectorOption::Reset,
            SelectorOption::OriginalColour,
            SelectorOption::Colourspace,
            SelectorOption::HexEdit,
        ]
    }

    /// Options a selector shows when nothing is configured.
    pub fn defaults() -> Vec<SelectorOption> {
        vec![
            SelectorOption::AlphaChannel,
            SelectorOption::ColourAtTop,
            SelectorOption::RgbSliders,
            SelectorOption::Colourspace,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Visible sections
    pub options: Vec<SelectorOption>,

    /// Space left around the selector's edge, in pixels
    pub edge_gap: i32,

    /// Space around the plane and strip, in pixels
    pub colourspace_gap: i32,

    /// Colour shown when the selector opens
    pub initial_colour: DeepColour,

    pub swatches: SwatchPalette,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            options: SelectorOption::defaults(),
            edge_gap: 4,
            colourspace_gap: 7,
            initial_colour: DeepColour::WHITE,
            swatches: SwatchPalette::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read selector config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid selector config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not encode selector config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

impl SelectorConfig {
    /// `<config dir>/deep-colour/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("deep-colour").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }

    /// Missing files give the defaults quietly; unreadable or invalid ones
    /// are logged and replaced by the defaults.
    pub fn load_or_default_from(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_or_default() -> Self {
        Self::default_path().map_or_else(Self::default, |path| Self::load_or_default_from(&path))
    }

    /// Write as TOML, creating the parent directory.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save(&path)?;
        Ok(path)
    }
}
