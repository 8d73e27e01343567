//! Player state polling loop
//!
//! Pulls the player state at a fixed interval and writes it into the
//! now-playing layout. A failed fetch keeps whatever is on screen.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};
use log::{info, trace, warn};
use trackline_core::state::PlayerState;
use trackline_core::traits::StateSource;
use trackline_display::LineDisplay;

use crate::channels::StopSignal;
use crate::display::Display;
use crate::layout::NowPlaying;

/// What one poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// New state shown
    Applied,
    /// Same as the last shown state
    Unchanged,
    /// Fetch failed; screen left as it was
    Failed,
}

/// Fetch once and show the result if it changed
///
/// `last` holds the most recently shown state and is updated on
/// [`PollOutcome::Applied`].
pub async fn poll_once<S: StateSource, D: LineDisplay>(
    source: &mut S,
    layout: &NowPlaying,
    display: &Display<D>,
    last: &mut Option<PlayerState>,
) -> PollOutcome {
    let state = match source.fetch_state().await {
        Ok(state) => state,
        Err(e) => {
            warn!("Failed to fetch player state: {:?}", e);
            return PollOutcome::Failed;
        }
    };

    if last.as_ref() == Some(&state) {
        trace!("Player state unchanged");
        return PollOutcome::Unchanged;
    }

    display.set_backlight(layout.apply(&state));
    *last = Some(state);
    PollOutcome::Applied
}

/// Poll `source` every `interval` until `stop` fires
pub async fn poll_loop<S: StateSource, D: LineDisplay>(
    source: &mut S,
    layout: &NowPlaying,
    display: &Display<D>,
    interval: Duration,
    stop: &StopSignal,
) {
    info!("Poll loop started, every {} ms", interval.as_millis());

    let mut ticker = Ticker::every(interval);
    let mut last = None;
    loop {
        if stop.signaled() {
            break;
        }

        poll_once(source, layout, display, &mut last).await;

        if let Either::Second(()) = select(ticker.next(), stop.wait()).await {
            break;
        }
    }

    stop.reset();
    info!("Poll loop stopped");
}
