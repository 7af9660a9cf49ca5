//! Native audio engine port interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

/// Backend command errors
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("backend command '{command}' failed: {message}")]
    CommandFailed {
        command: &'static str,
        message: String,
    },

    #[error("no audio engine available")]
    Unavailable,
}

/// Unit an engine expects for seek positions.
///
/// One platform family's engine takes seconds; facade callers always
/// pass milliseconds and the facade converts before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeekUnit {
    #[default]
    Milliseconds,
    Seconds,
}

/// A numeric field that some engines deliver as a JSON number and
/// others as a string-encoded number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Lenient float view of the field.
    ///
    /// Strings that do not parse yield NaN, so a malformed field never
    /// compares equal to anything.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Playback progress payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayTick {
    pub current_position: Numeric,
    pub duration: Numeric,
}

/// Progress events published by the native engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BackendEvent {
    /// Record progress; the payload is engine-specific and is re-emitted
    /// to listeners verbatim
    RecordProgress(serde_json::Value),
    /// Playback progress
    PlayProgress(PlayTick),
}

/// Port for the platform-native audio engine.
///
/// The engine performs the real capture, decoding, and mixing; this
/// crate only drives it. Every command resolves with an engine-provided
/// status string or fails with [`BackendError`]. Progress is published
/// on the stream returned by [`AudioBackend::events`]; emission
/// frequency is governed by
/// [`AudioBackend::set_subscription_duration`].
#[async_trait]
pub trait AudioBackend: Send + Sync + 'static {
    /// Start recording into the given resource identifier
    async fn start_recorder(&self, uri: &str) -> Result<String, BackendError>;

    /// Stop the active recording
    async fn stop_recorder(&self) -> Result<String, BackendError>;

    /// Start playing the given resource identifier
    async fn start_player(&self, uri: &str) -> Result<String, BackendError>;

    /// Resume playback from the current position
    async fn resume_player(&self) -> Result<String, BackendError>;

    /// Stop playback without releasing the loaded resource
    async fn stop_player(&self) -> Result<String, BackendError>;

    /// Seek to a position, expressed in this engine's [`SeekUnit`]
    async fn seek_to_player(&self, position: f64) -> Result<String, BackendError>;

    /// Set playback volume
    async fn set_volume(&self, volume: f64) -> Result<String, BackendError>;

    /// Set how often progress events are emitted, in seconds
    async fn set_subscription_duration(&self, secs: f64) -> Result<String, BackendError>;

    /// Unit this engine expects for [`AudioBackend::seek_to_player`]
    fn seek_unit(&self) -> SeekUnit {
        SeekUnit::default()
    }

    /// Subscribe to the engine's progress stream
    fn events(&self) -> broadcast::Receiver<BackendEvent>;
}
