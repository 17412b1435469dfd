//! Sound Engine for cue playback
//!
//! Uses a channel-based architecture to handle rodio's non-Send stream.
//! The engine spawns a dedicated audio thread that owns the playback infrastructure.

use super::CuePlayer;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use tracing::{error, info, warn};

/// Commands sent to the audio thread
enum AudioCommand {
    Play { path: PathBuf, clear: bool },
}

/// Thread-safe handle to the sound engine
#[derive(Clone)]
pub struct SoundEngine {
    sender: mpsc::Sender<AudioCommand>,
}

impl std::fmt::Debug for SoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundEngine").finish()
    }
}

impl SoundEngine {
    pub fn new() -> Result<Self> {
        let (sender, receiver) = mpsc::channel::<AudioCommand>();

        thread::Builder::new()
            .name("unison-audio".to_string())
            .spawn(move || Self::audio_thread(receiver))?;

        Ok(Self { sender })
    }

    fn audio_thread(receiver: mpsc::Receiver<AudioCommand>) {
        // Initialize audio output on this thread
        let (_stream, stream_handle) = match rodio::OutputStream::try_default() {
            Ok(s) => s,
            Err(e) => {
                warn!("🔇 Failed to initialize audio output: {}", e);
                return;
            }
        };

        let mut sink = match rodio::Sink::try_new(&stream_handle) {
            Ok(s) => s,
            Err(e) => {
                error!("❌ Failed to create audio sink: {}", e);
                return;
            }
        };

        info!("🔊 Audio thread started");

        while let Ok(cmd) = receiver.recv() {
            match cmd {
                AudioCommand::Play { path, clear } => {
                    if clear {
                        sink.stop();
                        // A stopped sink cannot be reused
                        match rodio::Sink::try_new(&stream_handle) {
                            Ok(new_sink) => sink = new_sink,
                            Err(e) => {
                                error!("❌ Failed to recreate audio sink: {}", e);
                                return;
                            }
                        }
                    }
                    if let Err(e) = Self::queue(&sink, &path) {
                        error!("❌ Cue playback failed for {:?}: {}", path, e);
                    }
                }
            }
        }

        info!("🔇 Audio thread stopped");
    }

    fn queue(sink: &rodio::Sink, path: &Path) -> Result<()> {
        let file = std::fs::File::open(path)?;
        let source = rodio::Decoder::new(std::io::BufReader::new(file))?;
        sink.append(source);
        Ok(())
    }
}

#[async_trait]
impl CuePlayer for SoundEngine {
    async fn play(&self, audio: &Path, clear: bool) -> Result<()> {
        if !audio.exists() {
            anyhow::bail!("Cue file not found: {:?}", audio);
        }
        self.sender
            .send(AudioCommand::Play {
                path: audio.to_path_buf(),
                clear,
            })
            .map_err(|e| anyhow::anyhow!("Audio thread disconnected: {}", e))
    }

    fn name(&self) -> &str {
        "rodio"
    }
}
