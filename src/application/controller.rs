//! Recorder/player control facade

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::ports::{AudioBackend, BackendError, BackendEvent, SeekUnit};
use crate::application::relay::{Subscription, Topic};
use crate::domain::options::PlayerOptions;
use crate::domain::session::TransportSession;

/// Parsed playback progress delivered to `playback` listeners.
/// Both fields are milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackProgress {
    pub current_position: f64,
    pub duration: f64,
}

/// Snapshot of the facade's transport state
#[derive(Debug, Clone, PartialEq)]
pub struct TransportStatus {
    pub is_recording: bool,
    pub is_playing: bool,
    pub current_position: f64,
    pub duration: f64,
}

/// How the playback relay task is torn down when playback ends
enum RelayTeardown {
    /// Facade-initiated stop: abort the task
    Abort,
    /// End-of-track reached inside the relay task itself: drop the
    /// handle and let the loop exit on its own
    Drain,
}

#[derive(Debug, Default)]
struct Track {
    current_position: f64,
    duration: f64,
}

struct Shared<B> {
    backend: Arc<B>,
    uri: String,
    recorder: Mutex<TransportSession>,
    player: Mutex<TransportSession>,
    track: Mutex<Track>,
    recordback: Topic<serde_json::Value>,
    playback: Topic<PlaybackProgress>,
    playback_end: Topic<()>,
    record_relay: Mutex<Option<JoinHandle<()>>>,
    play_relay: Mutex<Option<JoinHandle<()>>>,
}

/// Control facade over a platform-native audio engine.
///
/// Tracks one recording and one playback session, forwards guarded
/// transport commands to the engine, and rebroadcasts engine progress
/// to registered listeners. Redundant commands (start while started,
/// stop while stopped) are logged no-ops that resolve `Ok(None)`;
/// engine failures propagate unchanged.
///
/// Cloning is cheap; clones share the same session.
pub struct RecorderPlayer<B: AudioBackend> {
    shared: Arc<Shared<B>>,
}

impl<B: AudioBackend> Clone for RecorderPlayer<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: AudioBackend> RecorderPlayer<B> {
    /// Create a facade over `backend` with default options
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, PlayerOptions::default())
    }

    /// Create a facade over `backend` with explicit options
    pub fn with_options(backend: B, options: PlayerOptions) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend: Arc::new(backend),
                uri: options.uri_or_default(),
                recorder: Mutex::new(TransportSession::new()),
                player: Mutex::new(TransportSession::new()),
                track: Mutex::new(Track::default()),
                recordback: Topic::new(),
                playback: Topic::new(),
                playback_end: Topic::new(),
                record_relay: Mutex::new(None),
                play_relay: Mutex::new(None),
            }),
        }
    }

    /// Resource identifier used by start commands
    pub fn uri(&self) -> &str {
        &self.shared.uri
    }

    /// Whether a recording session is active
    pub fn is_recording(&self) -> bool {
        self.shared.recorder.lock().unwrap().is_active()
    }

    /// Whether a playback session is active
    pub fn is_playing(&self) -> bool {
        self.shared.player.lock().unwrap().is_active()
    }

    /// Last playback position reported by the engine, in milliseconds
    pub fn current_position(&self) -> f64 {
        self.shared.track.lock().unwrap().current_position
    }

    /// Last track duration reported by the engine, in milliseconds
    pub fn duration(&self) -> f64 {
        self.shared.track.lock().unwrap().duration
    }

    /// Snapshot of the transport state
    pub fn status(&self) -> TransportStatus {
        let track = self.shared.track.lock().unwrap();
        TransportStatus {
            is_recording: self.is_recording(),
            is_playing: self.is_playing(),
            current_position: track.current_position,
            duration: track.duration,
        }
    }

    /// Start recording into the configured uri.
    ///
    /// If a recording session is already active this is a logged no-op
    /// resolving `Ok(None)`. A failure of the forwarded engine command
    /// propagates and leaves the session active; issue
    /// [`RecorderPlayer::stop_recorder`] to recover.
    pub async fn start_recorder(&self) -> Result<Option<String>, BackendError> {
        let generation = {
            let mut recorder = self.shared.recorder.lock().unwrap();
            match recorder.activate("start recorder") {
                Ok(generation) => generation,
                Err(transition) => {
                    info!("recorder command skipped: {}", transition);
                    return Ok(None);
                }
            }
        };
        self.attach_record_relay(generation);
        let status = self.shared.backend.start_recorder(&self.shared.uri).await?;
        Ok(Some(status))
    }

    /// Stop the active recording.
    ///
    /// A logged no-op resolving `Ok(None)` when nothing is recording.
    pub async fn stop_recorder(&self) -> Result<Option<String>, BackendError> {
        {
            let mut recorder = self.shared.recorder.lock().unwrap();
            if let Err(transition) = recorder.deactivate("stop recorder") {
                info!("recorder command skipped: {}", transition);
                return Ok(None);
            }
        }
        Self::detach_relay(&self.shared.record_relay);
        let status = self.shared.backend.stop_recorder().await?;
        Ok(Some(status))
    }

    /// Start playing the configured uri.
    ///
    /// If a playback session is already active this is a logged no-op
    /// resolving `Ok(None)`. A failure of the forwarded engine command
    /// propagates and leaves the session active; issue
    /// [`RecorderPlayer::stop_player`] to recover.
    pub async fn start_player(&self) -> Result<Option<String>, BackendError> {
        let Some(generation) = self.activate_player("start player") else {
            return Ok(None);
        };
        self.attach_play_relay(generation);
        let status = self.shared.backend.start_player(&self.shared.uri).await?;
        Ok(Some(status))
    }

    /// Resume playback from the paused position.
    ///
    /// Same guard as [`RecorderPlayer::start_player`].
    pub async fn resume_player(&self) -> Result<Option<String>, BackendError> {
        let Some(generation) = self.activate_player("resume player") else {
            return Ok(None);
        };
        self.attach_play_relay(generation);
        let status = self.shared.backend.resume_player().await?;
        Ok(Some(status))
    }

    /// Pause playback.
    ///
    /// Implemented as an engine stop that keeps the current position; no
    /// `playback-end` event is emitted. A logged no-op when nothing is
    /// playing.
    pub async fn pause_player(&self) -> Result<Option<String>, BackendError> {
        {
            let mut player = self.shared.player.lock().unwrap();
            if let Err(transition) = player.deactivate("pause player") {
                info!("player command skipped: {}", transition);
                return Ok(None);
            }
        }
        Self::detach_relay(&self.shared.play_relay);
        let status = self.shared.backend.stop_player().await?;
        Ok(Some(status))
    }

    /// Stop playback.
    ///
    /// Resets the position to 0, emits `playback-end` to local
    /// listeners, then stops the engine. A logged no-op when nothing is
    /// playing.
    pub async fn stop_player(&self) -> Result<Option<String>, BackendError> {
        self.finish_playback("stop player", RelayTeardown::Abort)
            .await
    }

    /// Seek to a playback position given in milliseconds.
    ///
    /// Engines whose [`SeekUnit`] is seconds get the converted value;
    /// callers always work in milliseconds. Always forwarded, active
    /// session or not.
    pub async fn seek_to_player(&self, position_ms: f64) -> Result<String, BackendError> {
        let position = match self.shared.backend.seek_unit() {
            SeekUnit::Milliseconds => position_ms,
            SeekUnit::Seconds => position_ms / 1000.0,
        };
        self.shared.backend.seek_to_player(position).await
    }

    /// Set playback volume in `[0.0, 1.0]`.
    ///
    /// Out-of-range input is rejected with a logged warning and resolves
    /// `Ok(None)` without reaching the engine.
    pub async fn set_volume(&self, volume: f64) -> Result<Option<String>, BackendError> {
        if !(0.0..=1.0).contains(&volume) {
            warn!("volume {} out of range, expected 0.0 to 1.0", volume);
            return Ok(None);
        }
        let status = self.shared.backend.set_volume(volume).await?;
        Ok(Some(status))
    }

    /// Set how often the engine reports progress, in seconds
    pub async fn set_subscription_duration(&self, secs: f64) -> Result<String, BackendError> {
        self.shared.backend.set_subscription_duration(secs).await
    }

    /// Listen for record progress events.
    ///
    /// The engine payload is re-emitted verbatim. Returns a handle that
    /// unsubscribes exactly this callback.
    pub fn add_record_back_listener<F>(&self, callback: F) -> Subscription<serde_json::Value>
    where
        F: Fn(&serde_json::Value) + Send + Sync + 'static,
    {
        self.shared.recordback.subscribe(callback)
    }

    /// Remove every record progress listener
    pub fn remove_record_back_listener(&self) {
        self.shared.recordback.clear();
    }

    /// Listen for playback progress events
    pub fn add_play_back_listener<F>(&self, callback: F) -> Subscription<PlaybackProgress>
    where
        F: Fn(&PlaybackProgress) + Send + Sync + 'static,
    {
        self.shared.playback.subscribe(callback)
    }

    /// Remove every playback progress listener
    pub fn remove_play_back_listener(&self) {
        self.shared.playback.clear();
    }

    /// Listen for the end of playback, whether commanded or end-of-track
    pub fn add_play_back_end_listener<F>(&self, callback: F) -> Subscription<()>
    where
        F: Fn(&()) + Send + Sync + 'static,
    {
        self.shared.playback_end.subscribe(callback)
    }

    /// Remove every playback-end listener
    pub fn remove_play_back_end_listener(&self) {
        self.shared.playback_end.clear();
    }

    fn activate_player(&self, action: &'static str) -> Option<u64> {
        let mut player = self.shared.player.lock().unwrap();
        match player.activate(action) {
            Ok(generation) => Some(generation),
            Err(transition) => {
                info!("player command skipped: {}", transition);
                None
            }
        }
    }

    /// Shared stop-playback path for commanded stops and end-of-track
    async fn finish_playback(
        &self,
        action: &'static str,
        teardown: RelayTeardown,
    ) -> Result<Option<String>, BackendError> {
        {
            let mut player = self.shared.player.lock().unwrap();
            if let Err(transition) = player.deactivate(action) {
                info!("player command skipped: {}", transition);
                return Ok(None);
            }
        }
        self.shared.track.lock().unwrap().current_position = 0.0;
        match teardown {
            RelayTeardown::Abort => Self::detach_relay(&self.shared.play_relay),
            RelayTeardown::Drain => {
                self.shared.play_relay.lock().unwrap().take();
            }
        }
        self.shared.playback_end.emit(&());
        let status = self.shared.backend.stop_player().await?;
        Ok(Some(status))
    }

    /// Spawn the record relay for the given activation generation.
    ///
    /// The relay re-emits record progress verbatim while the session
    /// still accepts the generation, and drops anything stale.
    fn attach_record_relay(&self, generation: u64) {
        let shared = Arc::clone(&self.shared);
        let mut events = shared.backend.events();
        let handle = tokio::spawn(async move {
            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("record relay lagged, skipped {} events", skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                if !shared.recorder.lock().unwrap().accepts(generation) {
                    break;
                }
                if let BackendEvent::RecordProgress(payload) = event {
                    shared.recordback.emit(&payload);
                }
            }
        });
        if let Some(previous) = self.shared.record_relay.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }

    /// Spawn the playback relay for the given activation generation.
    ///
    /// Each accepted tick updates the stored position, is re-emitted to
    /// `playback` listeners, and ends the session when the position
    /// reaches the duration. Stale ticks are dropped.
    fn attach_play_relay(&self, generation: u64) {
        let facade = self.clone();
        let mut events = facade.shared.backend.events();
        let handle = tokio::spawn(async move {
            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("playback relay lagged, skipped {} events", skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                if !facade.shared.player.lock().unwrap().accepts(generation) {
                    break;
                }
                let BackendEvent::PlayProgress(tick) = event else {
                    continue;
                };

                let progress = PlaybackProgress {
                    current_position: tick.current_position.as_f64(),
                    duration: tick.duration.as_f64(),
                };
                {
                    let mut track = facade.shared.track.lock().unwrap();
                    track.current_position = progress.current_position;
                    track.duration = progress.duration;
                }
                facade.shared.playback.emit(&progress);

                // Exact equality is the engine's end-of-stream signal
                if progress.current_position == progress.duration {
                    if let Err(error) = facade
                        .finish_playback("finish playback", RelayTeardown::Drain)
                        .await
                    {
                        warn!("engine stop after track end failed: {}", error);
                    }
                    break;
                }
            }
        });
        if let Some(previous) = self.shared.play_relay.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }

    fn detach_relay(slot: &Mutex<Option<JoinHandle<()>>>) {
        if let Some(handle) = slot.lock().unwrap().take() {
            handle.abort();
        }
    }
}
