//! mpv adapter.
//!
//! Spawns `mpv --loop-playlist=no --no-video <files...>` and waits for it.
//! There is no timeout: a player that never exits blocks the caller.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{PlaybackError, PlaybackOutcome, Player};

/// Default player binary
pub const DEFAULT_BINARY: &str = "mpv";

/// Play the batch once, audio only
pub const DEFAULT_ARGS: &[&str] = &["--loop-playlist=no", "--no-video"];

/// mpv adapter using subprocess mode
#[derive(Debug, Clone)]
pub struct MpvPlayer {
    /// Path to the player binary (default: "mpv")
    binary_path: String,

    /// Arguments placed before the file list
    args: Vec<String>,
}

impl Default for MpvPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MpvPlayer {
    pub fn new() -> Self {
        Self {
            binary_path: DEFAULT_BINARY.to_string(),
            args: DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Create a player with a custom binary and arguments
    pub fn with_command(binary_path: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
            args,
        }
    }

    pub fn binary_path(&self) -> &str {
        &self.binary_path
    }

    /// Full argument list for a batch
    pub fn command_args(&self, files: &[PathBuf]) -> Vec<std::ffi::OsString> {
        self.args
            .iter()
            .map(Into::into)
            .chain(files.iter().map(|f| f.as_os_str().to_os_string()))
            .collect()
    }
}

#[async_trait]
impl Player for MpvPlayer {
    fn name(&self) -> &str {
        "mpv"
    }

    async fn play(&self, files: &[PathBuf]) -> Result<PlaybackOutcome, PlaybackError> {
        debug!(binary = %self.binary_path, files = files.len(), "Launching player");

        let mut child = Command::new(&self.binary_path)
            .args(self.command_args(files))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| PlaybackError::Launch {
                binary: self.binary_path.clone(),
                source,
            })?;

        let status = child.wait().await.map_err(|source| PlaybackError::Wait {
            binary: self.binary_path.clone(),
            source,
        })?;

        Ok(PlaybackOutcome {
            exit_code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_args() {
        let player = MpvPlayer::new();
        let args = player.command_args(&[PathBuf::from("/lib/a b/01.mp3"), PathBuf::from("02.mp3")]);

        assert_eq!(
            args,
            vec![
                "--loop-playlist=no",
                "--no-video",
                "/lib/a b/01.mp3",
                "02.mp3"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_launch_error() {
        let player = MpvPlayer::with_command("/nonexistent/dlplay-test-player", Vec::new());
        let err = player.play(&[]).await.unwrap_err();
        assert!(matches!(err, PlaybackError::Launch { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_codes_are_reported() {
        let ok = MpvPlayer::with_command("true", Vec::new());
        assert!(ok.play(&[]).await.unwrap().success());

        let failing = MpvPlayer::with_command("false", Vec::new());
        let outcome = failing.play(&[]).await.unwrap();
        assert!(!outcome.success());
        assert_eq!(outcome.exit_code, Some(1));
    }
}
