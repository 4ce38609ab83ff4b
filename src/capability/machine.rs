//! Capability state machine
//!
//! ```text
//! Unmounted ──begin──▶ Loading{1} ──retry──▶ Loading{n+1}
//!                          │
//!              resolve ◀───┴───▶ fail
//!                 │                │
//!               Ready           Failed ──begin──▶ Loading{1}
//!
//! teardown: any state ──▶ Unmounted
//! ```

use super::{CapabilityError, CapabilityState};

/// Enforces legal transitions between capability states
#[derive(Debug, Clone)]
pub struct CapabilityMachine<T> {
    state: CapabilityState<T>,
}

impl<T> Default for CapabilityMachine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CapabilityMachine<T> {
    pub fn new() -> Self {
        Self {
            state: CapabilityState::Unmounted,
        }
    }

    pub fn state(&self) -> &CapabilityState<T> {
        &self.state
    }

    pub fn into_state(self) -> CapabilityState<T> {
        self.state
    }

    /// Start (or restart after failure) a load; returns the attempt number
    pub fn begin(&mut self) -> Result<u32, CapabilityError> {
        match self.state {
            CapabilityState::Unmounted | CapabilityState::Failed(_) => {
                self.state = CapabilityState::Loading { attempt: 1 };
                Ok(1)
            }
            _ => Err(self.invalid("begin")),
        }
    }

    /// Move to the next attempt; returns the new attempt number
    pub fn retry(&mut self) -> Result<u32, CapabilityError> {
        match self.state {
            CapabilityState::Loading { attempt } => {
                let next = attempt + 1;
                self.state = CapabilityState::Loading { attempt: next };
                Ok(next)
            }
            _ => Err(self.invalid("retry")),
        }
    }

    /// The capability became available
    pub fn resolve(&mut self, value: T) -> Result<(), CapabilityError> {
        match self.state {
            CapabilityState::Loading { .. } => {
                self.state = CapabilityState::Ready(value);
                Ok(())
            }
            _ => Err(self.invalid("resolve")),
        }
    }

    /// Loading gave up
    pub fn fail(&mut self, error: CapabilityError) -> Result<(), CapabilityError> {
        match self.state {
            CapabilityState::Loading { .. } => {
                self.state = CapabilityState::Failed(error);
                Ok(())
            }
            _ => Err(self.invalid("fail")),
        }
    }

    /// The owning view went away; all state is discarded
    pub fn teardown(&mut self) {
        self.state = CapabilityState::Unmounted;
    }

    fn invalid(&self, event: &'static str) -> CapabilityError {
        CapabilityError::InvalidTransition {
            from: self.state.label(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut machine = CapabilityMachine::new();
        assert_eq!(machine.begin().unwrap(), 1);
        assert_eq!(machine.retry().unwrap(), 2);
        machine.resolve("leaflet").unwrap();
        assert_eq!(machine.state(), &CapabilityState::Ready("leaflet"));
    }

    #[test]
    fn test_restart_after_failure() {
        let mut machine: CapabilityMachine<()> = CapabilityMachine::new();
        machine.begin().unwrap();
        machine
            .fail(CapabilityError::unavailable("leaflet", "script blocked"))
            .unwrap();
        assert_eq!(machine.state().label(), "failed");

        assert_eq!(machine.begin().unwrap(), 1);
        assert!(machine.state().is_loading());
    }

    #[test]
    fn test_illegal_transitions() {
        let mut machine = CapabilityMachine::new();
        assert_eq!(
            machine.resolve(1).unwrap_err(),
            CapabilityError::InvalidTransition {
                from: "unmounted",
                event: "resolve"
            }
        );
        assert!(machine.retry().is_err());

        machine.begin().unwrap();
        assert!(machine.begin().is_err());
        machine.resolve(1).unwrap();
        assert!(machine.begin().is_err());
        assert!(machine
            .fail(CapabilityError::unavailable("x", "late"))
            .is_err());
    }

    #[test]
    fn test_teardown_discards_state() {
        let mut machine = CapabilityMachine::new();
        machine.begin().unwrap();
        machine.resolve(42).unwrap();
        machine.teardown();
        assert_eq!(machine.state(), &CapabilityState::Unmounted);
        assert_eq!(machine.begin().unwrap(), 1);
    }
}
