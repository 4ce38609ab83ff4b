//! Capability loader
//!
//! Races each request against the policy timeout and backs off between
//! failed attempts. Every state change is reported to an observer so a view
//! can mirror it (skeleton while loading, live content once ready).

use futures::future::{select, Either};

use super::{CapabilityError, CapabilityMachine, CapabilitySource, CapabilityState, LoadPolicy, Timer};

/// Drives a capability source to `Ready` or `Failed`
pub struct CapabilityLoader<S, T> {
    source: S,
    timer: T,
    policy: LoadPolicy,
}

impl<S, T> CapabilityLoader<S, T>
where
    S: CapabilitySource,
    T: Timer,
{
    pub fn new(source: S, timer: T, policy: LoadPolicy) -> Self {
        Self {
            source,
            timer,
            policy,
        }
    }

    pub fn policy(&self) -> &LoadPolicy {
        &self.policy
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load the capability, ignoring intermediate states
    pub async fn load(&self) -> Result<S::Output, CapabilityError> {
        self.load_observed(|_| {}).await
    }

    /// Load the capability, reporting every state change to `observe`
    pub async fn load_observed<F>(&self, mut observe: F) -> Result<S::Output, CapabilityError>
    where
        F: FnMut(&CapabilityState<S::Output>),
    {
        let name = self.source.name().to_string();
        let max_attempts = self.policy.max_attempts.max(1);
        let mut machine = CapabilityMachine::new();

        let mut attempt = machine.begin()?;
        observe(machine.state());

        loop {
            tracing::debug!(capability = %name, attempt, "Requesting capability");

            match self.attempt(&name).await {
                Ok(value) => {
                    machine.resolve(value.clone())?;
                    observe(machine.state());
                    tracing::info!(capability = %name, attempt, "Capability ready");
                    return Ok(value);
                }
                Err(e) if attempt < max_attempts => {
                    let delay = self.policy.backoff_for(attempt);
                    tracing::warn!(
                        capability = %name,
                        attempt,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "Capability request failed, backing off"
                    );
                    self.timer.sleep(delay).await;
                    attempt = machine.retry()?;
                    observe(machine.state());
                }
                Err(e) => {
                    let error = CapabilityError::Exhausted {
                        capability: name.clone(),
                        attempts: attempt,
                        last: Box::new(e),
                    };
                    machine.fail(error.clone())?;
                    observe(machine.state());
                    tracing::error!(capability = %name, error = %error, "Capability unavailable");
                    return Err(error);
                }
            }
        }
    }

    /// One request bounded by the policy timeout
    async fn attempt(&self, name: &str) -> Result<S::Output, CapabilityError> {
        let timeout = self.policy.timeout();
        let request = self.source.request();
        let deadline = self.timer.sleep(timeout);

        match select(request, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(CapabilityError::Timeout {
                capability: name.to_string(),
                after_ms: timeout.as_millis() as u64,
            }),
        }
    }
}

/// Timer backed by the tokio runtime
#[cfg(feature = "server")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[cfg(feature = "server")]
#[async_trait::async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: std::time::Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::time::Duration;

    enum Outcome {
        Ready(&'static str),
        Fail(&'static str),
        Hang,
    }

    struct ScriptedSource {
        outcomes: RefCell<VecDeque<Outcome>>,
        requests: Cell<u32>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Outcome>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.into()),
                requests: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl CapabilitySource for ScriptedSource {
        type Output = &'static str;

        fn name(&self) -> &str {
            "leaflet"
        }

        async fn request(&self) -> Result<Self::Output, CapabilityError> {
            self.requests.set(self.requests.get() + 1);
            let next = self.outcomes.borrow_mut().pop_front().unwrap_or(Outcome::Hang);
            match next {
                Outcome::Ready(value) => Ok(value),
                Outcome::Fail(reason) => Err(CapabilityError::unavailable("leaflet", reason)),
                Outcome::Hang => futures::future::pending().await,
            }
        }
    }

    /// Resolves immediately and records what it was asked to wait for
    #[derive(Default)]
    struct RecordingTimer {
        waits: RefCell<Vec<Duration>>,
    }

    #[async_trait(?Send)]
    impl Timer for RecordingTimer {
        async fn sleep(&self, duration: Duration) {
            self.waits.borrow_mut().push(duration);
        }
    }

    fn ms(values: &[u64]) -> Vec<Duration> {
        values.iter().map(|v| Duration::from_millis(*v)).collect()
    }

    #[tokio::test]
    async fn test_ready_on_first_attempt() {
        let loader = CapabilityLoader::new(
            ScriptedSource::new(vec![Outcome::Ready("L")]),
            RecordingTimer::default(),
            LoadPolicy::default(),
        );

        let mut seen = Vec::new();
        let result = loader.load_observed(|s| seen.push(s.clone())).await;

        assert_eq!(result.unwrap(), "L");
        assert_eq!(
            seen,
            vec![CapabilityState::Loading { attempt: 1 }, CapabilityState::Ready("L")]
        );
        assert_eq!(loader.source().requests.get(), 1);
        assert!(loader.timer.waits.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_retries_with_backoff_then_succeeds() {
        let loader = CapabilityLoader::new(
            ScriptedSource::new(vec![
                Outcome::Fail("network"),
                Outcome::Fail("network"),
                Outcome::Ready("L"),
            ]),
            RecordingTimer::default(),
            LoadPolicy::default(),
        );

        let mut seen = Vec::new();
        let result = loader.load_observed(|s| seen.push(s.label())).await;

        assert_eq!(result.unwrap(), "L");
        assert_eq!(seen, vec!["loading", "loading", "loading", "ready"]);
        assert_eq!(loader.source().requests.get(), 3);
        assert_eq!(*loader.timer.waits.borrow(), ms(&[500, 1_000]));
    }

    #[tokio::test]
    async fn test_hanging_request_times_out_and_exhausts() {
        let loader = CapabilityLoader::new(
            ScriptedSource::new(vec![]),
            RecordingTimer::default(),
            LoadPolicy::default(),
        );

        let mut last = None;
        let result = loader.load_observed(|s| last = Some(s.clone())).await;

        match result.unwrap_err() {
            CapabilityError::Exhausted {
                attempts, last: cause, ..
            } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*cause, CapabilityError::Timeout { after_ms: 10_000, .. }));
            }
            other => panic!("expected exhausted error, got {:?}", other),
        }
        assert!(matches!(last, Some(CapabilityState::Failed(_))));
        assert_eq!(
            *loader.timer.waits.borrow(),
            ms(&[10_000, 500, 10_000, 1_000, 10_000])
        );
    }

    #[tokio::test]
    async fn test_single_attempt_policy() {
        let policy = LoadPolicy {
            max_attempts: 1,
            ..LoadPolicy::default()
        };
        let loader = CapabilityLoader::new(
            ScriptedSource::new(vec![Outcome::Fail("blocked"), Outcome::Ready("L")]),
            RecordingTimer::default(),
            policy,
        );

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, CapabilityError::Exhausted { attempts: 1, .. }));
        assert_eq!(loader.source().requests.get(), 1);
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn test_tokio_timer_bounds_a_hanging_request() {
        let policy = LoadPolicy {
            timeout_ms: 5,
            max_attempts: 2,
            initial_backoff_ms: 1,
            max_backoff_ms: 1,
            multiplier: 2,
        };
        let loader = CapabilityLoader::new(ScriptedSource::new(vec![]), TokioTimer, policy);

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, CapabilityError::Exhausted { attempts: 2, .. }));
    }
}
