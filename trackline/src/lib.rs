//! Now-playing character LCD
//!
//! Ties the pieces together: loads the configuration, lays out the
//! now-playing screen, and runs the two loops that keep it current.
//!
//! # Architecture
//!
//! ```text
//!  StateSource ──poll_loop──► NowPlaying ──► TextNodes ─┐
//!                     │                                 │
//!                     └──► Display backlight flag       ▼
//!                                   │                Screen
//!                                   ▼                   │
//!  LineDisplay (Hd44780) ◄──refresh_loop── update + content
//! ```
//!
//! The poll loop only writes text and the backlight flag; the refresh
//! loop is the only one that touches the bus.
//!
//! # Example
//!
//! ```ignore
//! let config = trackline::load_config(&text)?;
//! let (layout, screen) = NowPlaying::new(&config);
//! let display = Display::<Hd44780<LinuxI2c>>::open(&config, screen).await?;
//! let shutdown = Shutdown::new();
//! trackline::run(&display, &layout, &mut source, &config, &shutdown).await;
//! display.close().await?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod channels;
pub mod config;
pub mod display;
pub mod layout;
pub mod tasks;

pub use channels::{Shutdown, StopSignal};
pub use config::{load_config, LoadError};
pub use display::Display;
pub use layout::NowPlaying;

use embassy_futures::join::join;
use embassy_time::Duration;
use log::info;
use trackline_core::config::TracklineConfig;
use trackline_core::traits::StateSource;
use trackline_display::LineDisplay;

/// Run the refresh and poll loops until `shutdown` is requested
///
/// The display is left open; close it afterwards with [`Display::close`].
pub async fn run<D: LineDisplay, S: StateSource>(
    display: &Display<D>,
    layout: &NowPlaying,
    source: &mut S,
    config: &TracklineConfig,
    shutdown: &Shutdown,
) {
    let interval = Duration::from_millis(config.poll.interval_ms as u64);
    join(
        tasks::refresh_loop(display, &shutdown.refresh),
        tasks::poll_loop(source, layout, display, interval, &shutdown.poll),
    )
    .await;
    info!("All loops stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::tests::{Call, FakeLcd};
    use alloc::string::ToString;
    use embassy_futures::block_on;
    use embassy_time::Timer;
    use trackline_core::state::PlayerState;

    struct Fixed(PlayerState);

    impl StateSource for Fixed {
        type Error = ();

        async fn fetch_state(&mut self) -> Result<PlayerState, ()> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_run_shows_state_then_closes() {
        let mut config = load_config("[display]\nrefresh_hz = 50.0\n[poll]\ninterval_ms = 10\n").unwrap();
        config.scroll.speed = 0.0;

        let lcd = FakeLcd::new();
        let (layout, screen) = NowPlaying::new(&config);
        let display = Display::new(&lcd, screen, config.display.refresh_hz);
        let mut source = Fixed(PlayerState::new("play", "A Title", "An Artist"));
        let shutdown = Shutdown::new();

        block_on(join(
            run(&display, &layout, &mut source, &config, &shutdown),
            async {
                Timer::after_millis(100).await;
                shutdown.request();
            },
        ));
        block_on(display.close()).unwrap();

        let calls = lcd.calls();
        assert!(calls.contains(&Call::Show("An Artist       ".to_string(), 1, 0)));
        assert!(calls.contains(&Call::Show("A Title         ".to_string(), 2, 0)));
        assert!(calls.contains(&Call::Backlight(true)));
        assert_eq!(
            calls[calls.len() - 3..],
            [Call::Clear, Call::Backlight(false), Call::Close]
        );
    }
}
