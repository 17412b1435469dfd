//! speechd-ng listener using D-Bus
//!
//! Uses zbus for async D-Bus communication with the speechd-ng daemon.

use super::{clean_transcript, Listener};
use crate::error::{UnisonError, UnisonResult};
use async_trait::async_trait;
use tracing::{debug, info, warn};
use zbus::{proxy, Connection};

/// D-Bus proxy for the speechd-ng service
#[proxy(
    interface = "org.speech.Service",
    default_service = "org.speech.Service",
    default_path = "/org/speech/Service"
)]
trait SpeechService {
    /// Listen with VAD and return transcript
    fn listen_vad(&self) -> zbus::Result<String>;

    /// Ping the service
    fn ping(&self) -> zbus::Result<String>;
}

/// Listener backed by speechd-ng's speech recognition
pub struct SpeechdListener {
    proxy: SpeechServiceProxy<'static>,
}

impl SpeechdListener {
    /// Connect to the speechd-ng D-Bus service
    pub async fn connect() -> UnisonResult<Self> {
        let connection = Connection::session()
            .await
            .map_err(|e| UnisonError::Listener(format!("D-Bus session unavailable: {}", e)))?;
        let proxy = SpeechServiceProxy::new(&connection)
            .await
            .map_err(|e| UnisonError::Listener(e.to_string()))?;

        match proxy.ping().await {
            Ok(response) => {
                info!("🎙️ Connected to speechd-ng: {}", response);
            }
            Err(e) => {
                warn!("⚠️ speechd-ng not responding: {}", e);
                return Err(UnisonError::Listener(format!(
                    "speechd-ng not responding: {}",
                    e
                )));
            }
        }

        Ok(Self { proxy })
    }
}

#[async_trait]
impl Listener for SpeechdListener {
    async fn listen(&mut self) -> UnisonResult<Option<String>> {
        debug!("Listening via speechd-ng...");
        let transcript = self
            .proxy
            .listen_vad()
            .await
            .map_err(|e| UnisonError::Listener(e.to_string()))?;
        Ok(clean_transcript(&transcript))
    }

    fn name(&self) -> &str {
        "speechd"
    }
}
