//! Adapter interfaces for external media players.
//!
//! Playback is delegated to a separate process; adapters hide how that
//! process is found, configured and awaited.

pub mod mpv;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use mpv::MpvPlayer;

/// Errors launching or awaiting a player process
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Failed to launch player '{binary}': {source}")]
    Launch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for player '{binary}': {source}")]
    Wait {
        binary: String,
        #[source]
        source: std::io::Error,
    },
}

/// How a player process finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOutcome {
    /// Exit code, if the process was not killed by a signal
    pub exit_code: Option<i32>,
}

impl PlaybackOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for external players
#[async_trait]
pub trait Player: Send + Sync {
    /// Human-readable player name
    fn name(&self) -> &str;

    /// Play the files once, in order, returning when the player exits
    async fn play(&self, files: &[PathBuf]) -> Result<PlaybackOutcome, PlaybackError>;
}
