//! Application layer - Use cases and port interfaces
//!
//! Contains the facade use case, the event relay, and the trait
//! definition for the platform-native audio engine.

pub mod controller;
pub mod ports;
pub mod relay;

// Re-export use cases
pub use controller::{PlaybackProgress, RecorderPlayer, TransportStatus};
pub use relay::{Subscription, Topic};
