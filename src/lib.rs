//! Tapedeck - recorder/player control facade
//!
//! This crate tracks recording and playback session state, forwards
//! guarded transport commands to a platform-native audio engine, and
//! rebroadcasts the engine's progress events to application listeners.
//! The engine itself (codec access, hardware buffers, file I/O) lives
//! outside this crate, behind the [`AudioBackend`] port.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: transport state machine, elapsed-time formatting, options
//! - **Application**: the [`RecorderPlayer`] facade, the [`AudioBackend`]
//!   port, and the event relay
//! - **Infrastructure**: backend adapters (platform engines are out of tree)

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the public surface
pub use application::controller::{PlaybackProgress, RecorderPlayer, TransportStatus};
pub use application::ports::{AudioBackend, BackendError, BackendEvent, Numeric, PlayTick, SeekUnit};
pub use application::relay::Subscription;
pub use domain::clock::{mmss, mmssss};
pub use domain::options::{PlayerOptions, DEFAULT_URI};
