//! Engine configuration.
//!
//! The configuration selects the few places where the rules can be tuned:
//! whether turns alternate, whether a move may leave the mover's own king
//! attacked, and which side moves first. It can be built in code or loaded
//! from a TOML file:
//!
//! ```toml
//! turn_order = "alternate"
//! self_check = "forbidden"
//! starting_color = "white"
//! ```

use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to write the configuration out as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Who may move next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnOrder {
    /// Only the active color may move; it flips after every applied move.
    #[default]
    Alternate,
    /// Either color may move. After a move the opponent of the piece that
    /// moved becomes the active color. Meant for setting up test positions.
    Free,
}

/// Whether a move may leave the mover's own king attacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfCheckPolicy {
    /// Destinations are taken straight from the move generator. The only
    /// check avoidance is that a king never steps next to the enemy king.
    #[default]
    Allowed,
    /// Every candidate is played on a copy of the board and dropped if the
    /// mover's king is then in check. Pinned pieces stay put and a king
    /// cannot walk into an attacked cell.
    Forbidden,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Turn alternation. Defaults to [`TurnOrder::Alternate`].
    pub turn_order: TurnOrder,
    /// Self-check filtering. Defaults to [`SelfCheckPolicy::Allowed`].
    pub self_check: SelfCheckPolicy,
    /// The color to move first. Defaults to White.
    pub starting_color: Color,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            turn_order: TurnOrder::Alternate,
            self_check: SelfCheckPolicy::Allowed,
            starting_color: Color::White,
        }
    }
}

impl EngineConfig {
    /// Configuration for arranging positions by hand: either side may move.
    pub fn debug() -> Self {
        EngineConfig {
            turn_order: TurnOrder::Free,
            ..Self::default()
        }
    }

    /// Returns the configuration with self-check filtering turned on.
    pub fn strict(self) -> Self {
        EngineConfig {
            self_check: SelfCheckPolicy::Forbidden,
            ..self
        }
    }

    /// Parses a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    ///
    /// Returns the default configuration if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// or [`ConfigError::Parse`] if it contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if the value cannot be written as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}
