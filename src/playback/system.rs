//! System fallback cue player

use super::CuePlayer;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use tracing::debug;

/// Command lines tried in order; the cue path is appended
const CANDIDATES: &[&[&str]] = &[
    &["mpg123", "-q"],
    &["ffplay", "-nodisp", "-autoexit", "-loglevel", "quiet"],
    &["paplay"],
];

/// Plays cues by spawning whichever audio tool is installed
#[derive(Debug, Default)]
pub struct SystemPlayer {
    current: Mutex<Option<Child>>,
}

impl SystemPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn(audio: &Path) -> Result<Child> {
        for candidate in CANDIDATES {
            let (program, args) = candidate
                .split_first()
                .ok_or_else(|| anyhow::anyhow!("Empty player command"))?;
            let spawned = Command::new(program)
                .args(args.iter())
                .arg(audio)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            if let Ok(child) = spawned {
                debug!("System playing {:?} via {}", audio, program);
                return Ok(child);
            }
        }

        Err(anyhow::anyhow!(
            "No system audio player found (tried mpg123, ffplay, paplay)"
        ))
    }
}

#[async_trait]
impl CuePlayer for SystemPlayer {
    async fn play(&self, audio: &Path, clear: bool) -> Result<()> {
        if !audio.exists() {
            anyhow::bail!("Cue file not found: {:?}", audio);
        }

        let mut current = self
            .current
            .lock()
            .map_err(|e| anyhow::anyhow!("Player lock poisoned: {}", e))?;

        if let Some(mut previous) = current.take() {
            match previous.try_wait() {
                Ok(Some(_)) => {}
                _ if clear => {
                    let _ = previous.kill();
                    let _ = previous.wait();
                }
                // Still playing and not cleared: let it finish on its own
                _ => {
                    std::thread::spawn(move || {
                        let _ = previous.wait();
                    });
                }
            }
        }

        *current = Some(Self::spawn(audio)?);
        Ok(())
    }

    fn name(&self) -> &str {
        "system"
    }
}
