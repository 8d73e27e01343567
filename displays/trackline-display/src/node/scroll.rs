//! Bouncing scroll window
//!
//! Shows a fixed-length window onto its child's text and moves it one
//! cell at a time at a fixed speed. When the window hits the end of the
//! text it reverses, and it reverses again at the start.

use alloc::string::String;

use embassy_time::Duration;
use log::trace;

use super::{cell_count, guard, window, ContentNode, Guard, NodeRef};

/// Direction-reversing window onto a child node
pub struct ScrollNode {
    state: Guard<ScrollState>,
}

struct ScrollState {
    child: Option<NodeRef>,
    length: usize,
    /// Characters per second
    speed: f32,
    offset: isize,
    reverse: bool,
    elapsed: Duration,
    /// Child content as of the last `content()` call, unpadded
    cached: String,
}

impl ScrollState {
    /// Time the window rests on one offset, `None` when scrolling is off
    fn character_duration(&self) -> Option<Duration> {
        if self.speed > 0.0 && self.speed.is_finite() {
            let micros = (1_000_000.0 / self.speed) as u64;
            Some(Duration::from_micros(micros.max(1)))
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.offset = 0;
        self.reverse = false;
        self.elapsed = Duration::from_ticks(0);
    }

    /// Fold `offset` back into the readable range, flipping direction at
    /// either end
    fn bounce(&mut self, padded_len: usize) {
        let last = (padded_len - self.length) as isize;
        if !self.reverse && self.offset > last {
            self.reverse = true;
            self.offset = last;
        } else if self.reverse && self.offset < 0 {
            self.reverse = false;
            self.offset = 0;
        }
        self.offset = self.offset.clamp(0, last);
    }

    fn advance(&mut self, delta: Duration) {
        let Some(step) = self.character_duration() else {
            self.elapsed = Duration::from_ticks(0);
            return;
        };

        let cap = Duration::from_ticks(step.as_ticks().saturating_mul(2));
        self.elapsed = (self.elapsed + delta).min(cap);

        // One cell per update; leftover time carries into the next one
        if self.elapsed >= step {
            self.elapsed = self.elapsed - step;
            self.offset += if self.reverse { -1 } else { 1 };
        }
    }
}

impl ScrollNode {
    /// Scroll `child` through a window of `length` cells at `speed` characters
    /// per second
    pub fn new(child: NodeRef, length: usize, speed: f32) -> Self {
        Self {
            state: guard(ScrollState {
                child: Some(child),
                length,
                speed,
                offset: 0,
                reverse: false,
                elapsed: Duration::from_ticks(0),
                cached: String::new(),
            }),
        }
    }

    /// Replace the scrolled node; the window restarts at the beginning
    pub fn set_child(&self, child: Option<NodeRef>) {
        self.state.lock(|s| {
            let mut s = s.borrow_mut();
            s.child = child;
            s.cached.clear();
            s.reset();
        });
    }

    pub fn set_speed(&self, speed: f32) {
        self.state.lock(|s| s.borrow_mut().speed = speed);
    }

    pub fn set_length(&self, length: usize) {
        self.state.lock(|s| s.borrow_mut().length = length);
    }

    pub fn length(&self) -> usize {
        self.state.lock(|s| s.borrow().length)
    }

    fn child(&self) -> Option<NodeRef> {
        self.state.lock(|s| s.borrow().child.clone())
    }
}

impl ContentNode for ScrollNode {
    fn content(&self) -> String {
        let current = self.child().map(|c| c.content()).unwrap_or_default();

        self.state.lock(|s| {
            let mut s = s.borrow_mut();
            if s.cached != current {
                trace!("scroll content changed, restarting window");
                s.cached = current;
                s.reset();
            }

            let padded_len = cell_count(&s.cached).max(s.length);
            s.bounce(padded_len);

            let (offset, length) = (s.offset as usize, s.length);
            window(&s.cached, offset, length)
        })
    }

    fn update(&self, delta: Duration) {
        if let Some(child) = self.child() {
            child.update(delta);
        }
        self.state.lock(|s| s.borrow_mut().advance(delta));
    }
}
