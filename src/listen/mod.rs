//! Speech capture
//!
//! Provides the transcription sources the processing loop listens to:
//! - Stdin: one utterance per line (typed or piped from another recognizer)
//! - Speechd: speechd-ng's VAD-gated recognition over D-Bus

pub mod speechd;
pub mod stdin;

use crate::config::Settings;
use crate::error::UnisonResult;
use async_trait::async_trait;
use tracing::{info, warn};

pub use speechd::SpeechdListener;
pub use stdin::StdinListener;

/// Trait for speech sources
#[async_trait]
pub trait Listener: Send {
    /// Block until an utterance is transcribed.
    ///
    /// `Ok(None)` means silence or unrecognised audio. `Err(UnisonError::InputClosed)`
    /// means the source is exhausted and no further input will arrive.
    async fn listen(&mut self) -> UnisonResult<Option<String>>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Factory to create the configured listener, degrading to stdin
pub async fn create_listener(settings: &Settings) -> Box<dyn Listener> {
    let listener: Box<dyn Listener> = match settings.listener.as_str() {
        "stdin" => Box::new(StdinListener::new()),
        "speechd" | "speechd_ng" => or_stdin(
            SpeechdListener::connect()
                .await
                .map(|l| Box::new(l) as Box<dyn Listener>),
        ),
        other => {
            warn!("  - Unknown listener '{}', falling back to stdin", other);
            Box::new(StdinListener::new())
        }
    };
    info!("🎙️ Listener '{}' initialized", listener.name());
    listener
}

fn or_stdin(connected: UnisonResult<Box<dyn Listener>>) -> Box<dyn Listener> {
    connected.unwrap_or_else(|e| {
        warn!("⚠️ Speech service unavailable, falling back to stdin: {}", e);
        Box::new(StdinListener::new())
    })
}

/// Trim a transcript, mapping blank text to silence
pub fn clean_transcript(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
