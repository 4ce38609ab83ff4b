//! Shared capability handle and mount guard
//!
//! A [`SharedCapability`] holds at most one load at a time. Every mount that
//! asks for the capability awaits the same future, so the mapping library is
//! fetched once per page lifetime rather than once per mount. A failed load
//! is forgotten so the next mount tries again.
//!
//! Single-threaded by construction (`Rc`): it lives on the UI event loop.

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::CapabilityError;

type SharedLoad<T> = Shared<LocalBoxFuture<'static, Result<T, CapabilityError>>>;

struct Inner<T: Clone + 'static> {
    pending: Option<SharedLoad<T>>,
    requests: u32,
}

/// Memoised, process-wide capability
pub struct SharedCapability<T: Clone + 'static> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T: Clone + 'static> Clone for SharedCapability<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Default for SharedCapability<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> fmt::Debug for SharedCapability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SharedCapability")
            .field("pending", &inner.pending.is_some())
            .field("requests", &inner.requests)
            .finish()
    }
}

impl<T: Clone + 'static> SharedCapability<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                pending: None,
                requests: 0,
            })),
        }
    }

    /// Await the capability, starting a load with `start` only if none is
    /// cached or in flight
    pub async fn get_or_load<F>(&self, start: F) -> Result<T, CapabilityError>
    where
        F: FnOnce() -> LocalBoxFuture<'static, Result<T, CapabilityError>>,
    {
        let load = {
            let mut inner = self.inner.borrow_mut();
            match &inner.pending {
                Some(existing) => existing.clone(),
                None => {
                    let load = start().shared();
                    inner.pending = Some(load.clone());
                    inner.requests += 1;
                    tracing::debug!(requests = inner.requests, "Starting shared capability load");
                    load
                }
            }
        };

        let result = load.clone().await;

        if result.is_err() {
            let mut inner = self.inner.borrow_mut();
            let same_load = inner
                .pending
                .as_ref()
                .map(|pending| pending.ptr_eq(&load))
                .unwrap_or(false);
            if same_load {
                inner.pending = None;
            }
        }

        result
    }

    /// The resolved value, if a load already succeeded
    pub fn ready(&self) -> Option<T> {
        let inner = self.inner.borrow();
        match inner.pending.as_ref().and_then(|p| p.peek()) {
            Some(Ok(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Number of underlying loads started
    pub fn requests(&self) -> u32 {
        self.inner.borrow().requests
    }

    /// Forget any cached or in-flight load
    pub fn reset(&self) {
        self.inner.borrow_mut().pending = None;
    }
}

/// Liveness flag for a mounted view
///
/// Async work captures a clone; the view deactivates it on teardown and
/// results arriving afterwards are dropped.
#[derive(Debug, Clone)]
pub struct MountToken {
    active: Rc<Cell<bool>>,
}

impl Default for MountToken {
    fn default() -> Self {
        Self::new()
    }
}

impl MountToken {
    pub fn new() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Mark the view as torn down
    pub fn deactivate(&self) {
        self.active.set(false);
    }

    /// Run `apply` only while the view is still mounted
    pub fn apply<F: FnOnce()>(&self, apply: F) -> bool {
        if self.is_active() {
            apply();
            true
        } else {
            tracing::debug!("Discarding result for a torn-down view");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;

    fn ready(value: u32) -> LocalBoxFuture<'static, Result<u32, CapabilityError>> {
        async move { Ok(value) }.boxed_local()
    }

    fn failing() -> LocalBoxFuture<'static, Result<u32, CapabilityError>> {
        async { Err(CapabilityError::unavailable("leaflet", "offline")) }.boxed_local()
    }

    #[tokio::test]
    async fn test_second_mount_reuses_resolved_load() {
        let shared = SharedCapability::new();

        assert_eq!(shared.get_or_load(|| ready(1)).await.unwrap(), 1);
        assert_eq!(shared.get_or_load(|| ready(2)).await.unwrap(), 1);
        assert_eq!(shared.requests(), 1);
        assert_eq!(shared.ready(), Some(1));
    }

    #[tokio::test]
    async fn test_concurrent_mounts_share_one_request() {
        let shared = SharedCapability::new();
        let (tx, rx) = oneshot::channel::<u32>();

        let first = shared.get_or_load(move || {
            async move {
                rx.await
                    .map_err(|_| CapabilityError::unavailable("leaflet", "cancelled"))
            }
            .boxed_local()
        });
        let second = shared.get_or_load(|| ready(99));
        let release = async move {
            let _ = tx.send(7);
        };

        let (a, b, ()) = futures::join!(first, second, release);
        assert_eq!(a.unwrap(), 7);
        assert_eq!(b.unwrap(), 7);
        assert_eq!(shared.requests(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let shared = SharedCapability::new();

        assert!(shared.get_or_load(failing).await.is_err());
        assert_eq!(shared.ready(), None);

        assert_eq!(shared.get_or_load(|| ready(3)).await.unwrap(), 3);
        assert_eq!(shared.requests(), 2);
    }

    #[tokio::test]
    async fn test_reset_forces_reload() {
        let shared = SharedCapability::new();
        shared.get_or_load(|| ready(1)).await.unwrap();
        shared.reset();
        assert_eq!(shared.get_or_load(|| ready(2)).await.unwrap(), 2);
        assert_eq!(shared.requests(), 2);
    }

    #[test]
    fn test_mount_token_drops_late_results() {
        let token = MountToken::new();
        let view_state = Rc::new(Cell::new(0));

        let handle = token.clone();
        let state = Rc::clone(&view_state);
        assert!(handle.apply(|| state.set(1)));

        token.deactivate();
        let state = Rc::clone(&view_state);
        assert!(!handle.apply(|| state.set(2)));
        assert_eq!(view_state.get(), 1);
    }
}
