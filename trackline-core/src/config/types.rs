//! Configuration type definitions
//!
//! Every section falls back to its defaults when omitted, matching a stock
//! 16x2 panel on a PCF8574 backpack at 0x27 on `/dev/i2c-1`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum lines the controller can address
pub const MAX_ROWS: u8 = 4;

/// Maximum characters per line (40-byte DDRAM half)
pub const MAX_COLUMNS: u8 = 40;

/// Highest 7-bit I2C address
pub const MAX_I2C_ADDRESS: u8 = 0x7F;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// I2C address does not fit in 7 bits
    InvalidAddress(u8),
    /// Row count outside 1-4
    InvalidRows(u8),
    /// Column count outside 1-40
    InvalidColumns(u8),
    /// Refresh frequency not a positive finite number
    InvalidRefreshRate(f32),
    /// Scroll speed negative or not finite
    InvalidScrollSpeed(f32),
    /// Zero polling interval
    InvalidPollInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidAddress(a) => write!(f, "i2c address {:#04x} exceeds 0x7f", a),
            ConfigError::InvalidRows(r) => write!(f, "rows must be 1-{}, got {}", MAX_ROWS, r),
            ConfigError::InvalidColumns(c) => {
                write!(f, "columns must be 1-{}, got {}", MAX_COLUMNS, c)
            }
            ConfigError::InvalidRefreshRate(hz) => {
                write!(f, "refresh_hz must be positive, got {}", hz)
            }
            ConfigError::InvalidScrollSpeed(s) => {
                write!(f, "scroll speed must be zero or positive, got {}", s)
            }
            ConfigError::InvalidPollInterval => write!(f, "poll interval_ms must be positive"),
        }
    }
}

/// I2C bus location of the LCD backpack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BusConfig {
    /// Bus line (`/dev/i2c-<line>` on Linux)
    pub line: u8,
    /// 7-bit device address
    pub address: u8,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            line: 1,
            address: 0x27,
        }
    }
}

/// Panel geometry and refresh cadence
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DisplayConfig {
    /// Number of lines (1-4)
    pub rows: u8,
    /// Characters per line
    pub columns: u8,
    /// Refresh loop frequency in Hz
    pub refresh_hz: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 16,
            refresh_hz: 10.0,
        }
    }
}

/// Scrolling behaviour for text wider than a line
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ScrollConfig {
    /// Characters per second (0 disables scrolling)
    pub speed: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { speed: 4.0 }
    }
}

/// Player state polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PollConfig {
    /// Delay between state fetches in milliseconds
    pub interval_ms: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_ms: 200 }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TracklineConfig {
    pub bus: BusConfig,
    pub display: DisplayConfig,
    pub scroll: ScrollConfig,
    pub poll: PollConfig,
}

impl TracklineConfig {
    /// Check every value is within what the hardware and loops accept
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.address > MAX_I2C_ADDRESS {
            return Err(ConfigError::InvalidAddress(self.bus.address));
        }
        if self.display.rows == 0 || self.display.rows > MAX_ROWS {
            return Err(ConfigError::InvalidRows(self.display.rows));
        }
        if self.display.columns == 0 || self.display.columns > MAX_COLUMNS {
            return Err(ConfigError::InvalidColumns(self.display.columns));
        }
        let hz = self.display.refresh_hz;
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ConfigError::InvalidRefreshRate(hz));
        }
        let speed = self.scroll.speed;
        if !speed.is_finite() || speed < 0.0 {
            return Err(ConfigError::InvalidScrollSpeed(speed));
        }
        if self.poll.interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        Ok(())
    }
}
