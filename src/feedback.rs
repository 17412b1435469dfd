//! Audio + visual acknowledgment

use crate::config::Cue;
use crate::playback::CuePlayer;
use std::sync::Arc;
use tracing::warn;

/// Emits feedback cues to the user
#[derive(Debug, Clone)]
pub struct Feedback {
    player: Arc<dyn CuePlayer>,
}

impl Feedback {
    pub fn new(player: Arc<dyn CuePlayer>) -> Self {
        Self { player }
    }

    /// Play the cue's audio (without flushing queued audio) and show its visual.
    ///
    /// Playback failures are logged and swallowed.
    pub async fn emit(&self, cue: &Cue) {
        if let Some(audio) = &cue.audio {
            if let Err(e) = self.player.play(audio, false).await {
                warn!("🔇 Could not play cue {:?}: {}", audio, e);
            }
        }

        if !cue.visual.is_empty() {
            println!("{}", cue.visual);
        }
    }
}
