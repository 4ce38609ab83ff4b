//! Capability Loading
//!
//! Some features can only render once an asynchronous dependency is
//! available in the execution environment. The event map is the example
//! here: the mapping library exists only in a browser and is fetched on
//! first use. This module models that wait explicitly:
//!
//! - **machine**: The `Unmounted → Loading → Ready | Failed` state machine
//! - **loader**: Drives a [`CapabilitySource`] with a per-attempt timeout
//!   and exponential backoff between attempts
//! - **shared**: Process-wide memoisation so separate mounts share one load,
//!   plus the [`MountToken`] that discards results for torn-down views
//!
//! The source and the timer are traits so the browser, the host process and
//! tests can each plug in their own.

pub mod loader;
pub mod machine;
pub mod shared;

pub use loader::CapabilityLoader;
#[cfg(feature = "server")]
pub use loader::TokioTimer;
pub use machine::CapabilityMachine;
pub use shared::{MountToken, SharedCapability};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Where a capability stands
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityState<T> {
    /// Not requested yet
    Unmounted,
    /// Request in flight (1-based attempt number)
    Loading { attempt: u32 },
    /// Capability resolved
    Ready(T),
    /// All attempts failed
    Failed(CapabilityError),
}

impl<T> Default for CapabilityState<T> {
    fn default() -> Self {
        CapabilityState::Unmounted
    }
}

impl<T> CapabilityState<T> {
    /// Short state name for logs and errors
    pub fn label(&self) -> &'static str {
        match self {
            CapabilityState::Unmounted => "unmounted",
            CapabilityState::Loading { .. } => "loading",
            CapabilityState::Ready(_) => "ready",
            CapabilityState::Failed(_) => "failed",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CapabilityState::Ready(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CapabilityState::Loading { .. })
    }

    /// The resolved value, if ready
    pub fn ready(&self) -> Option<&T> {
        match self {
            CapabilityState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Errors raised while acquiring a capability
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    /// A single attempt did not finish in time
    #[error("Capability '{capability}' timed out after {after_ms} ms")]
    Timeout { capability: String, after_ms: u64 },

    /// The environment refused or could not provide the capability
    #[error("Capability '{capability}' unavailable: {reason}")]
    Unavailable { capability: String, reason: String },

    /// Every attempt failed
    #[error("Capability '{capability}' failed after {attempts} attempts: {last}")]
    Exhausted {
        capability: String,
        attempts: u32,
        last: Box<CapabilityError>,
    },

    /// An event arrived in a state that does not accept it
    #[error("Invalid capability transition '{event}' from state '{from}'")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
}

impl CapabilityError {
    /// Helper for sources reporting an environment failure
    pub fn unavailable(capability: impl Into<String>, reason: impl Into<String>) -> Self {
        CapabilityError::Unavailable {
            capability: capability.into(),
            reason: reason.into(),
        }
    }

    /// Whether asking again could succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, CapabilityError::InvalidTransition { .. })
    }
}

/// Timeout and retry settings for a capability request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadPolicy {
    /// Time allowed for one attempt
    pub timeout_ms: u64,
    /// Attempts before giving up (at least 1)
    pub max_attempts: u32,
    /// Delay after the first failure
    pub initial_backoff_ms: u64,
    /// Upper bound on any delay
    pub max_backoff_ms: u64,
    /// Growth factor between delays
    pub multiplier: u32,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_attempts: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
            multiplier: 2,
        }
    }
}

impl LoadPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Delay after the given failed attempt (1-based)
    pub fn backoff_for(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1);
        let factor = u64::from(self.multiplier.max(1)).saturating_pow(exponent);
        let delay = self.initial_backoff_ms.saturating_mul(factor);
        Duration::from_millis(delay.min(self.max_backoff_ms))
    }
}

/// Something that can be requested asynchronously and may fail
#[async_trait(?Send)]
pub trait CapabilitySource {
    /// Handle produced once the capability is available
    type Output: Clone + 'static;

    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Perform one request
    async fn request(&self) -> Result<Self::Output, CapabilityError>;
}

/// Injected sleep used for timeouts and backoff
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_schedule() {
        let policy = LoadPolicy::default();
        assert_eq!(policy.backoff_for(1), Duration::from_millis(500));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(1_000));
        assert_eq!(policy.backoff_for(3), Duration::from_millis(2_000));
        assert_eq!(policy.backoff_for(5), Duration::from_millis(8_000));
        assert_eq!(policy.backoff_for(60), Duration::from_millis(8_000));
    }

    #[test]
    fn test_backoff_without_growth() {
        let policy = LoadPolicy {
            multiplier: 1,
            ..LoadPolicy::default()
        };
        assert_eq!(policy.backoff_for(4), Duration::from_millis(500));
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(CapabilityState::<()>::default().label(), "unmounted");
        assert_eq!(CapabilityState::<()>::Loading { attempt: 2 }.label(), "loading");
        assert_eq!(CapabilityState::Ready(1).ready(), Some(&1));
    }

    #[test]
    fn test_error_display() {
        let err = CapabilityError::Exhausted {
            capability: "leaflet".to_string(),
            attempts: 3,
            last: Box::new(CapabilityError::Timeout {
                capability: "leaflet".to_string(),
                after_ms: 10_000,
            }),
        };
        assert_eq!(
            err.to_string(),
            "Capability 'leaflet' failed after 3 attempts: Capability 'leaflet' timed out after 10000 ms"
        );
        assert!(err.is_retryable());
        assert!(!CapabilityError::InvalidTransition {
            from: "ready",
            event: "begin"
        }
        .is_retryable());
    }
}
