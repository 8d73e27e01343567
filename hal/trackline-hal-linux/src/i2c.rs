//! I2C bus driver for Linux i2c-dev
//!
//! Wraps [`linux_embedded_hal::I2cdev`] so it can be handed to the LCD driver.

use embedded_hal::i2c::I2c;
use linux_embedded_hal::{I2CError, I2cdev};
use log::{debug, info};
use trackline_hal::{I2cBus, OpenI2cBus};

/// Error from Linux I2C operations
#[derive(Debug, thiserror::Error)]
pub enum LinuxBusError {
    /// The bus device node could not be opened
    #[error("cannot open {path}: {reason}")]
    Open {
        /// Device node path
        path: String,
        /// Underlying OS error
        reason: String,
    },
    /// A transfer on an open bus failed
    #[error("i2c transfer failed: {0:?}")]
    Transfer(I2CError),
}

impl From<I2CError> for LinuxBusError {
    fn from(e: I2CError) -> Self {
        LinuxBusError::Transfer(e)
    }
}

/// An open `/dev/i2c-N` bus
pub struct LinuxI2c {
    dev: I2cdev,
    path: String,
}

impl LinuxI2c {
    /// Device node path for a bus line
    pub fn device_path(line: u8) -> String {
        format!("/dev/i2c-{line}")
    }

    /// Path of the device node backing this bus
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl OpenI2cBus for LinuxI2c {
    fn open(line: u8) -> Result<Self, Self::Error> {
        let path = Self::device_path(line);
        let dev = I2cdev::new(&path).map_err(|e| LinuxBusError::Open {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        info!("Opened I2C bus {}", path);
        Ok(Self { dev, path })
    }
}

impl I2cBus for LinuxI2c {
    type Error = LinuxBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        I2c::write(&mut self.dev, address, data)?;
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        I2c::read(&mut self.dev, address, buf)?;
        Ok(())
    }
}

impl Drop for LinuxI2c {
    fn drop(&mut self) {
        debug!("Releasing I2C bus {}", self.path);
    }
}
