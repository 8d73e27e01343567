//! Display refresh loop
//!
//! Each tick advances the screen by the time since the previous tick and
//! pushes every row. The loop aims for a constant period: the cost of a
//! tick is subtracted from the sleep, and a tick that overruns is followed
//! immediately by the next one without building up a backlog.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};
use log::{info, trace};
use trackline_display::LineDisplay;

use crate::channels::StopSignal;
use crate::display::Display;

/// Refresh `display` until `stop` fires
pub async fn refresh_loop<D: LineDisplay>(display: &Display<D>, stop: &StopSignal) {
    let period = display.period();
    info!("Refresh loop started, period {} ms", period.as_millis());

    let mut last_start: Option<Instant> = None;
    loop {
        if stop.signaled() {
            break;
        }

        let start = Instant::now();
        let delta = match last_start {
            Some(last) => start - last,
            None => Duration::from_ticks(0),
        };
        last_start = Some(start);

        display.tick(delta).await;

        let spent = start.elapsed();
        if spent >= period {
            trace!("Tick overran by {} us", (spent - period).as_micros());
            continue;
        }
        if let Either::Second(()) = select(Timer::after(period - spent), stop.wait()).await {
            break;
        }
    }

    stop.reset();
    info!("Refresh loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::tests::{Call, FakeLcd};
    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use trackline_display::Screen;

    #[test]
    fn test_stop_before_start_skips_ticks() {
        let lcd = FakeLcd::new();
        let display = Display::new(&lcd, Screen::new(2, 4), 10.0);
        let stop = StopSignal::new();
        stop.signal(());

        block_on(refresh_loop(&display, &stop));
        assert!(lcd.calls().is_empty());
        assert!(!stop.signaled());
    }

    #[test]
    fn test_stop_interrupts_sleep() {
        let lcd = FakeLcd::new();
        // One tick per second; the stop arrives well before the second tick
        let display = Display::new(&lcd, Screen::new(1, 4), 1.0);
        let stop = StopSignal::new();

        let started = Instant::now();
        block_on(join(refresh_loop(&display, &stop), async {
            Timer::after_millis(50).await;
            stop.signal(());
        }));

        assert!(started.elapsed() < Duration::from_millis(900));
        let calls = lcd.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], Call::Backlight(false));
    }

    #[test]
    fn test_ticks_repeat_at_frequency() {
        let lcd = FakeLcd::new();
        let display = Display::new(&lcd, Screen::new(1, 4), 50.0);
        let stop = StopSignal::new();

        block_on(join(refresh_loop(&display, &stop), async {
            Timer::after_millis(110).await;
            stop.signal(());
        }));

        // Ticks at roughly 0, 20, 40, 60, 80 and 100 ms
        let ticks = lcd
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::Backlight(_)))
            .count();
        assert!((3..=7).contains(&ticks), "{} ticks", ticks);
    }
}
