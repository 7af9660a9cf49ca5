//! Infrastructure layer - Adapter implementations
//!
//! Real engines are platform-specific and live outside this crate;
//! the adapters here are in-process stand-ins.

pub mod noop;

// Re-export adapters
pub use noop::NoopBackend;
