//! Configuration loading
//!
//! Parses the TOML configuration file into [`TracklineConfig`] and checks
//! it. Every key is optional; missing sections and keys take the defaults.

use log::{debug, info};
use trackline_core::config::{ConfigError, TracklineConfig};

/// Configuration loading errors
#[derive(Debug)]
pub enum LoadError {
    /// Not valid TOML, or keys/types that do not match the schema
    Parse(toml::de::Error),
    /// Well-formed but out of range
    Invalid(ConfigError),
}

impl From<toml::de::Error> for LoadError {
    fn from(e: toml::de::Error) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoadError::Parse(e) => write!(f, "failed to parse config: {}", e),
            LoadError::Invalid(e) => write!(f, "invalid config: {}", e),
        }
    }
}

/// Parse and validate a TOML configuration
pub fn load_config(source: &str) -> Result<TracklineConfig, LoadError> {
    let config: TracklineConfig = toml::from_str(source)?;
    debug!("Parsed config: {:?}", config);
    config.validate()?;
    info!(
        "Config loaded: bus {} at {:#04x}, {}x{} at {} Hz",
        config.bus.line,
        config.bus.address,
        config.display.columns,
        config.display.rows,
        config.display.refresh_hz
    );
    Ok(config)
}
