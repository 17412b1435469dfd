//! Mock Cue Player for Testing
//!
//! Records every cue that was played.

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock player that records played cues
#[derive(Debug, Default)]
pub struct MockPlayer {
    /// All cue files that were "played"
    pub played: Arc<Mutex<Vec<PathBuf>>>,
    /// Simulate playback failure
    pub should_fail: bool,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl unison::playback::CuePlayer for MockPlayer {
    async fn play(&self, audio: &Path, _clear: bool) -> Result<()> {
        if self.should_fail {
            return Err(anyhow::anyhow!("Mock playback failure"));
        }
        self.played.lock().unwrap().push(audio.to_path_buf());
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
