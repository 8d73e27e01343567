//! Inter-task signals

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Request for a loop to return
pub type StopSignal = Signal<CriticalSectionRawMutex, ()>;

/// Stop requests for both loops
///
/// A [`Signal`] wakes a single waiter, so each loop gets its own.
pub struct Shutdown {
    pub refresh: StopSignal,
    pub poll: StopSignal,
}

impl Shutdown {
    pub const fn new() -> Self {
        Self {
            refresh: Signal::new(),
            poll: Signal::new(),
        }
    }

    /// Ask both loops to return after their current iteration
    pub fn request(&self) {
        self.refresh.signal(());
        self.poll.signal(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
