//! Top-level display
//!
//! Couples a [`Screen`] to the hardware that shows it. The refresh loop
//! drives [`Display::tick`]; other tasks change row content through
//! [`Display::row`] and the backlight through [`Display::set_backlight`].

use embassy_time::Duration;
use log::{debug, trace, warn};
use portable_atomic::{AtomicBool, Ordering};
use trackline_core::config::TracklineConfig;
use trackline_display::{ContentNode, LineDisplay, RowNode, Screen};
use trackline_drivers::{Hd44780, LcdError};
use trackline_hal::OpenI2cBus;

/// A screen bound to a display backend
pub struct Display<D> {
    backend: D,
    screen: Screen,
    backlight: AtomicBool,
    period: Duration,
}

impl<D: LineDisplay> Display<D> {
    /// Show `screen` on `backend`, refreshing `refresh_hz` times a second
    pub fn new(backend: D, screen: Screen, refresh_hz: f32) -> Self {
        let micros = (1_000_000.0 / refresh_hz) as u64;
        Self {
            backend,
            screen,
            backlight: AtomicBool::new(false),
            period: Duration::from_micros(micros.max(1)),
        }
    }

    /// Row at zero-based `index`
    pub fn row(&self, index: usize) -> Option<&RowNode> {
        self.screen.row(index)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn backend(&self) -> &D {
        &self.backend
    }

    /// Target time between refresh ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Backlight state applied on the next tick
    pub fn set_backlight(&self, on: bool) {
        if self.backlight.swap(on, Ordering::Relaxed) != on {
            debug!("Backlight {}", if on { "on" } else { "off" });
        }
    }

    pub fn backlight(&self) -> bool {
        self.backlight.load(Ordering::Relaxed)
    }

    /// Advance the screen by `delta` and push every row and the backlight
    ///
    /// Failures are logged per row; one bad row does not stop the others.
    pub async fn tick(&self, delta: Duration) {
        trace!("Tick, {} us since last", delta.as_micros());
        self.screen.update(delta);

        for (index, row) in self.screen.rows().iter().enumerate() {
            let Ok(line) = u8::try_from(index + 1) else {
                warn!("Row {} has no line number, skipped", index);
                continue;
            };
            let text = row.content();
            if let Err(e) = self.backend.show(&text, line, 0).await {
                warn!("Failed to show line {}: {:?}", line, e);
            }
        }

        if let Err(e) = self.backend.set_backlight(self.backlight()).await {
            warn!("Failed to set backlight: {:?}", e);
        }
    }

    /// Clear and darken the display, then release the backend
    pub async fn close(self) -> Result<(), D::Error> {
        self.backend.close().await
    }
}

impl<B: OpenI2cBus> Display<Hd44780<B>> {
    /// Open the LCD named by `config` and show `screen` on it
    pub async fn open(
        config: &TracklineConfig,
        screen: Screen,
    ) -> Result<Self, LcdError<B::Error>> {
        let lcd = Hd44780::open(config.bus.line, config.bus.address).await?;
        Ok(Self::new(lcd, screen, config.display.refresh_hz))
    }
}
