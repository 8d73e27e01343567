//! Now-playing screen layout
//!
//! ```text
//! row 0: RowNode ── TextNode(artist)
//! row 1: RowNode ── ScrollNode(columns, speed) ── TextNode(title)
//! ```
//!
//! A single-row display shows only the scrolling title. Rows past the
//! second stay blank.

use alloc::sync::Arc;

use log::debug;
use trackline_core::config::TracklineConfig;
use trackline_core::state::PlayerState;
use trackline_display::{NodeRef, Screen, ScrollNode, TextNode};

/// Handles to the text nodes of the now-playing screen
pub struct NowPlaying {
    artist: Arc<TextNode>,
    title: Arc<TextNode>,
}

impl NowPlaying {
    /// Build the layout and the screen it writes into
    pub fn new(config: &TracklineConfig) -> (Self, Screen) {
        let columns = config.display.columns as usize;
        let screen = Screen::new(config.display.rows as usize, columns);

        let artist = Arc::new(TextNode::default());
        let title = Arc::new(TextNode::default());
        let scroller: NodeRef = Arc::new(ScrollNode::new(
            title.clone(),
            columns,
            config.scroll.speed,
        ));

        match (screen.row(0), screen.row(1)) {
            (Some(top), Some(bottom)) => {
                top.set_child(Some(artist.clone() as NodeRef));
                bottom.set_child(Some(scroller));
            }
            (Some(only), None) => only.set_child(Some(scroller)),
            _ => {}
        }

        (Self { artist, title }, screen)
    }

    /// Show `state`; returns whether the backlight should be on
    pub fn apply(&self, state: &PlayerState) -> bool {
        debug!(
            "Now {}: {} - {}",
            state.status.as_str(),
            state.artist,
            state.title
        );
        self.artist.set_text(&state.artist);
        self.title.set_text(&state.title);
        state.wants_backlight()
    }
}
