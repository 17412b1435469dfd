//! Processing loop
//!
//! Owns the activation-keyword gate and the feedback state, and runs the
//! listen → process → feedback cycle until cancelled.

use crate::audit;
use crate::config::Settings;
use crate::error::{UnisonError, UnisonResult};
use crate::feedback::Feedback;
use crate::listen::Listener;
use crate::switch::Switch;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of processing one (lowercased) utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keyword absent: the message, returned unchanged
    NotCommand(String),
    /// A module matched and succeeded
    Executed,
    /// Keyword present but no module matched, or the module failed
    Failed,
}

pub struct Brain {
    settings: Arc<Settings>,
    /// Lowercased activation keyword
    keyword: String,
    listener: Box<dyn Listener>,
    feedback: Feedback,
    switch: Switch,
    /// Acknowledge the previous cycle before the next listen
    feedback_enabled: bool,
}

impl Brain {
    pub fn new(
        settings: Arc<Settings>,
        listener: Box<dyn Listener>,
        feedback: Feedback,
        switch: Switch,
    ) -> Self {
        Self {
            keyword: settings.keyword.to_lowercase(),
            settings,
            listener,
            feedback,
            switch,
            feedback_enabled: true,
        }
    }

    pub fn feedback_enabled(&self) -> bool {
        self.feedback_enabled
    }

    pub fn switch(&self) -> &Switch {
        &self.switch
    }

    /// Gate `msg` on the activation keyword and dispatch it
    pub fn process_msg(&mut self, msg: String) -> Outcome {
        if !msg.contains(self.keyword.as_str()) {
            debug!("Not a command: '{}'", msg);
            return Outcome::NotCommand(msg);
        }

        info!("🗣️ {}", msg);
        if let Some(path) = &self.settings.audit_log {
            if let Err(e) = audit::log(path, &msg) {
                warn!("⚠️ Could not write audit log {:?}: {}", path, e);
            }
        }

        if self.switch.run(&msg) {
            Outcome::Executed
        } else {
            Outcome::Failed
        }
    }

    /// Run a single cycle: acknowledge, listen, process.
    ///
    /// Returns `None` for silence. Only `UnisonError::InputClosed` is returned as an error.
    pub async fn cycle(&mut self) -> UnisonResult<Option<Outcome>> {
        self.acknowledge().await;
        let heard = self.listener.listen().await;
        self.handle(heard).await
    }

    /// Loop until `cancel` fires or the listener runs out of input
    pub async fn run(&mut self, cancel: CancellationToken) -> UnisonResult<()> {
        info!(
            "✅ Listening for '{}' ({} modules)",
            self.keyword,
            self.switch.len()
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            self.acknowledge().await;

            let heard = tokio::select! {
                _ = cancel.cancelled() => break,
                heard = self.listener.listen() => heard,
            };

            match self.handle(heard).await {
                Ok(_) => {}
                Err(UnisonError::InputClosed) => {
                    info!("📭 Input closed");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        info!("👋 Processing loop stopped");
        Ok(())
    }

    async fn acknowledge(&self) {
        if self.feedback_enabled {
            self.feedback.emit(&self.settings.success_cue).await;
        }
    }

    async fn handle(
        &mut self,
        heard: UnisonResult<Option<String>>,
    ) -> UnisonResult<Option<Outcome>> {
        let msg = match heard {
            Ok(Some(msg)) if !msg.trim().is_empty() => msg,
            Ok(_) => {
                self.feedback_enabled = false;
                return Ok(None);
            }
            Err(UnisonError::InputClosed) => return Err(UnisonError::InputClosed),
            Err(e) => {
                // Collaborator faults never take the loop down
                warn!("⚠️ Listener failed, treating as silence: {}", e);
                self.feedback_enabled = false;
                return Ok(None);
            }
        };

        let outcome = self.process_msg(msg.to_lowercase());
        match outcome {
            Outcome::NotCommand(_) => self.feedback_enabled = false,
            Outcome::Executed => self.feedback_enabled = true,
            Outcome::Failed => {
                self.feedback_enabled = false;
                self.feedback.emit(&self.settings.failure_cue).await;
            }
        }
        Ok(Some(outcome))
    }
}
