//! Transport session state machine

use std::fmt;
use thiserror::Error;

/// States of one transport direction (record or play)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransportState {
    #[default]
    Idle,
    Active,
}

impl TransportState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when a transition is requested from the wrong state
#[derive(Debug, Clone, Error)]
#[error("cannot {action} while {state}")]
pub struct InvalidTransition {
    pub state: TransportState,
    pub action: &'static str,
}

/// Session entity for one transport direction.
///
/// State machine:
///   IDLE -> ACTIVE (activate)
///   ACTIVE -> IDLE (deactivate)
///
/// Each activation bumps a generation counter. A relay attachment
/// captures the generation returned by [`TransportSession::activate`]
/// and delivers events only while [`TransportSession::accepts`] holds
/// for it, so progress arriving after a stop (or after a stop/start
/// cycle) is recognizably stale and gets dropped.
#[derive(Debug, Default)]
pub struct TransportSession {
    state: TransportState,
    generation: u64,
}

impl TransportSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Check if the session is active
    pub fn is_active(&self) -> bool {
        self.state == TransportState::Active
    }

    /// Generation of the most recent activation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Transition from IDLE to ACTIVE.
    ///
    /// Returns the generation tag for this activation.
    pub fn activate(&mut self, action: &'static str) -> Result<u64, InvalidTransition> {
        if self.state != TransportState::Idle {
            return Err(InvalidTransition {
                state: self.state,
                action,
            });
        }
        self.state = TransportState::Active;
        self.generation += 1;
        Ok(self.generation)
    }

    /// Transition from ACTIVE to IDLE
    pub fn deactivate(&mut self, action: &'static str) -> Result<(), InvalidTransition> {
        if self.state != TransportState::Active {
            return Err(InvalidTransition {
                state: self.state,
                action,
            });
        }
        self.state = TransportState::Idle;
        Ok(())
    }

    /// Whether an event tagged with `generation` may still be delivered
    pub fn accepts(&self, generation: u64) -> bool {
        self.is_active() && self.generation == generation
    }
}
