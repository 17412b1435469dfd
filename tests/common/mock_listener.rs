//! Mock Listener for Testing
//!
//! Replays a script of utterances, then reports the input as closed.

use async_trait::async_trait;
use std::collections::VecDeque;
use unison::error::{UnisonError, UnisonResult};
use unison::listen::Listener;

/// One scripted listen result
pub enum Heard {
    Text(&'static str),
    Silence,
    Fault,
    /// Never returns, like a microphone nobody speaks into
    Hang,
}

/// Mock listener that returns predetermined utterances
pub struct MockListener {
    script: VecDeque<Heard>,
}

impl MockListener {
    pub fn new(script: Vec<Heard>) -> Self {
        Self {
            script: script.into(),
        }
    }

    /// Create a mock that hears the given phrases in order
    pub fn with_phrases(phrases: &[&'static str]) -> Self {
        Self::new(phrases.iter().copied().map(Heard::Text).collect())
    }
}

#[async_trait]
impl Listener for MockListener {
    async fn listen(&mut self) -> UnisonResult<Option<String>> {
        match self.script.pop_front() {
            Some(Heard::Text(text)) => Ok(Some(text.to_string())),
            Some(Heard::Silence) => Ok(None),
            Some(Heard::Fault) => Err(UnisonError::Listener("microphone unplugged".into())),
            Some(Heard::Hang) => std::future::pending().await,
            None => Err(UnisonError::InputClosed),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
