//! Hands an entry's media files to the player.

use std::path::Path;

use tracing::{info, warn};

use crate::adapters::{PlaybackError, PlaybackOutcome, Player};
use crate::library::media::find_media_files;

/// What happened when an entry was dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The player ran to completion
    Played {
        files: usize,
        outcome: PlaybackOutcome,
    },

    /// Nothing playable under the entry's directory
    NoMedia,
}

/// Plays entries one at a time through a [`Player`]
pub struct Dispatcher<'a> {
    player: &'a dyn Player,
    media_extensions: &'a [String],
}

impl<'a> Dispatcher<'a> {
    pub fn new(player: &'a dyn Player, media_extensions: &'a [String]) -> Self {
        Self {
            player,
            media_extensions,
        }
    }

    /// Play every media file under `dir` in natural order and wait for the player
    pub async fn dispatch(&self, dir: &Path) -> Result<DispatchOutcome, PlaybackError> {
        let files = find_media_files(dir, self.media_extensions);
        if files.is_empty() {
            warn!(dir = %dir.display(), "No media files found, skipping");
            return Ok(DispatchOutcome::NoMedia);
        }

        info!(player = self.player.name(), files = files.len(), "Starting playback");
        let outcome = self.player.play(&files).await?;

        if !outcome.success() {
            warn!(exit_code = ?outcome.exit_code, "Player exited unsuccessfully");
        }

        Ok(DispatchOutcome::Played {
            files: files.len(),
            outcome,
        })
    }
}
