//! Player state as reported by the media player

use alloc::string::{String, ToString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Playback status
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum PlaybackStatus {
    Play,
    Pause,
    #[default]
    Stop,
    /// Any status string the display does not act on
    Unknown(String),
}

impl PlaybackStatus {
    /// Parse the player's status string (`"play"`, `"pause"`, `"stop"`)
    pub fn parse(status: &str) -> Self {
        match status {
            "play" => PlaybackStatus::Play,
            "pause" => PlaybackStatus::Pause,
            "stop" => PlaybackStatus::Stop,
            other => PlaybackStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlaybackStatus::Play => "play",
            PlaybackStatus::Pause => "pause",
            PlaybackStatus::Stop => "stop",
            PlaybackStatus::Unknown(s) => s.as_str(),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackStatus::Play)
    }
}

impl From<&str> for PlaybackStatus {
    fn from(status: &str) -> Self {
        Self::parse(status)
    }
}

impl From<String> for PlaybackStatus {
    fn from(status: String) -> Self {
        match Self::parse(&status) {
            PlaybackStatus::Unknown(_) => PlaybackStatus::Unknown(status),
            known => known,
        }
    }
}

impl From<PlaybackStatus> for String {
    fn from(status: PlaybackStatus) -> Self {
        match status {
            PlaybackStatus::Unknown(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Snapshot of the player
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerState {
    pub status: PlaybackStatus,
    pub title: String,
    pub artist: String,
}

impl PlayerState {
    pub fn new(status: &str, title: &str, artist: &str) -> Self {
        Self {
            status: PlaybackStatus::parse(status),
            title: title.to_string(),
            artist: artist.to_string(),
        }
    }

    /// Backlight follows playback: lit while playing, dark otherwise
    pub fn wants_backlight(&self) -> bool {
        self.status.is_playing()
    }
}
