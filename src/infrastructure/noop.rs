//! No-op backend adapter
//!
//! Used when no platform engine is wired up.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::application::ports::{AudioBackend, BackendError, BackendEvent};

/// No-op engine: accepts every command with a fixed status string and
/// never emits progress events.
pub struct NoopBackend {
    events: broadcast::Sender<BackendEvent>,
}

impl NoopBackend {
    /// Create a new no-op backend
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self { events }
    }
}

impl Default for NoopBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioBackend for NoopBackend {
    async fn start_recorder(&self, _uri: &str) -> Result<String, BackendError> {
        Ok("noop".to_string())
    }

    async fn stop_recorder(&self) -> Result<String, BackendError> {
        Ok("noop".to_string())
    }

    async fn start_player(&self, _uri: &str) -> Result<String, BackendError> {
        Ok("noop".to_string())
    }

    async fn resume_player(&self) -> Result<String, BackendError> {
        Ok("noop".to_string())
    }

    async fn stop_player(&self) -> Result<String, BackendError> {
        Ok("noop".to_string())
    }

    async fn seek_to_player(&self, _position: f64) -> Result<String, BackendError> {
        Ok("noop".to_string())
    }

    async fn set_volume(&self, _volume: f64) -> Result<String, BackendError> {
        Ok("noop".to_string())
    }

    async fn set_subscription_duration(&self, _secs: f64) -> Result<String, BackendError> {
        Ok("noop".to_string())
    }

    fn events(&self) -> broadcast::Receiver<BackendEvent> {
        self.events.subscribe()
    }
}
