//! Model configuration: side bounds and initial sides.
//!
//! Always available as a plain struct. With the `config` feature it also
//! deserializes from TOML:
//!
//! ```toml
//! min_side = 0.01
//! max_side = 100.0
//! base = 3.0
//! height = 4.0
//! ```
//!
//! Missing keys take their [`Default`] values.

use std::fmt;

use crate::triangle::{MAX_SIDE, MIN_SIDE};

/// Errors from building or loading a model configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min` must be positive, finite and no greater than `max`.
    InvalidBounds { min: f64, max: f64 },
    /// An initial side was not a finite number.
    NonFinite { field: &'static str, value: f64 },
    /// The configuration file could not be read.
    Io(String),
    /// The configuration text could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds { min, max } => {
                write!(f, "invalid side bounds [{min}, {max}]")
            }
            Self::NonFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            Self::Io(msg) => write!(f, "config io error: {msg}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Bounds and initial sides for a [`TriangleModel`](crate::TriangleModel).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct ModelConfig {
    pub min_side: f64,
    pub max_side: f64,
    pub base: f64,
    pub height: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            min_side: MIN_SIDE,
            max_side: MAX_SIDE,
            base: 3.0,
            height: 4.0,
        }
    }
}

impl ModelConfig {
    /// Check bounds and initial sides. Initial sides outside the bounds are
    /// accepted (the model clamps them).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_side, self.max_side);
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        for (field, value) in [("base", self.base), ("height", self.height)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    #[cfg(feature = "config")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    #[cfg(feature = "config")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        tracing::debug!(message = "config.load", path = %path.display());
        Self::from_toml_str(&text)
    }
}
