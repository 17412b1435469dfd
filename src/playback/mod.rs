//! Cue playback
//!
//! Plays the audio half of a feedback cue through one of several backends.

use crate::config::Settings;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "sound")]
pub mod sound;
pub mod system;

/// Trait for cue players
#[async_trait]
pub trait CuePlayer: Send + Sync + std::fmt::Debug {
    /// Start playing `audio`. When `clear` is set, anything still playing is dropped first.
    async fn play(&self, audio: &Path, clear: bool) -> Result<()>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Player that ignores every cue
#[derive(Debug, Default)]
pub struct SilentPlayer;

#[async_trait]
impl CuePlayer for SilentPlayer {
    async fn play(&self, _audio: &Path, _clear: bool) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Factory to create the configured cue player
pub fn create_player(settings: &Settings) -> Result<Arc<dyn CuePlayer>> {
    let player: Arc<dyn CuePlayer> = match settings.player.as_str() {
        "system" => Arc::new(system::SystemPlayer::new()),
        #[cfg(feature = "sound")]
        "rodio" => Arc::new(sound::SoundEngine::new()?),
        #[cfg(not(feature = "sound"))]
        "rodio" => {
            warn!("  - rodio playback not compiled in (enable the 'sound' feature), using system");
            Arc::new(system::SystemPlayer::new())
        }
        "none" => Arc::new(SilentPlayer),
        other => {
            warn!("  - Unknown player '{}', falling back to system", other);
            Arc::new(system::SystemPlayer::new())
        }
    };
    info!("🔊 Cue player '{}' initialized", player.name());
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_picks_backend() {
        let mut settings = Settings::default();

        settings.player = "none".to_string();
        assert_eq!(create_player(&settings).unwrap().name(), "none");

        settings.player = "system".to_string();
        assert_eq!(create_player(&settings).unwrap().name(), "system");

        settings.player = "gramophone".to_string();
        assert_eq!(create_player(&settings).unwrap().name(), "system");
    }

    #[tokio::test]
    async fn test_silent_player_accepts_anything() {
        let player = SilentPlayer;
        assert!(player.play(Path::new("/no/such/file.mp3"), true).await.is_ok());
    }
}
