//! Document head resources
//!
//! Views that need an external stylesheet or script acquire it through a
//! [`HeadRegistry`]. Acquisition is idempotent: the element is appended once,
//! no matter how many views hold a [`HeadLease`], and is removed when the
//! last lease drops. Elements the hosting page declared itself are used as-is
//! and never removed.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// An element in the document head
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HeadResource {
    Stylesheet { href: String },
    Script { src: String },
}

impl HeadResource {
    pub fn stylesheet(href: &str) -> Self {
        HeadResource::Stylesheet {
            href: href.to_string(),
        }
    }

    pub fn script(src: &str) -> Self {
        HeadResource::Script {
            src: src.to_string(),
        }
    }

    /// The URL the element points at
    pub fn url(&self) -> &str {
        match self {
            HeadResource::Stylesheet { href } => href,
            HeadResource::Script { src } => src,
        }
    }
}

impl fmt::Display for HeadResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadResource::Stylesheet { href } => write!(f, "stylesheet {}", href),
            HeadResource::Script { src } => write!(f, "script {}", src),
        }
    }
}

/// Errors from the document head
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeadError {
    #[error("Document head unavailable: {0}")]
    NoHead(String),

    #[error("Failed to append {resource}: {reason}")]
    Append { resource: String, reason: String },

    #[error("Failed to remove {resource}: {reason}")]
    Remove { resource: String, reason: String },
}

/// The document whose head is being edited
pub trait HeadHost {
    /// Whether an equivalent element is already present
    fn contains(&self, resource: &HeadResource) -> bool;

    fn append(&self, resource: &HeadResource) -> Result<(), HeadError>;

    fn remove(&self, resource: &HeadResource) -> Result<(), HeadError>;
}

#[derive(Debug)]
struct Entry {
    leases: usize,
    owned: bool,
}

struct Inner<H> {
    host: H,
    entries: RefCell<HashMap<HeadResource, Entry>>,
}

/// Reference-counted access to head resources
pub struct HeadRegistry<H: HeadHost> {
    inner: Rc<Inner<H>>,
}

impl<H: HeadHost> Clone for HeadRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: HeadHost> HeadRegistry<H> {
    pub fn new(host: H) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                entries: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }

    /// Ensure `resource` is in the head for as long as the lease lives
    pub fn acquire(&self, resource: HeadResource) -> Result<HeadLease<H>, HeadError> {
        let mut entries = self.inner.entries.borrow_mut();

        if let Some(entry) = entries.get_mut(&resource) {
            entry.leases += 1;
        } else {
            let owned = if self.inner.host.contains(&resource) {
                tracing::debug!(resource = %resource, "Head resource declared by page");
                false
            } else {
                self.inner.host.append(&resource)?;
                tracing::debug!(resource = %resource, "Appended head resource");
                true
            };
            entries.insert(resource.clone(), Entry { leases: 1, owned });
        }

        Ok(HeadLease {
            registry: self.clone(),
            resource: Some(resource),
        })
    }

    /// Live leases on `resource`
    pub fn leases(&self, resource: &HeadResource) -> usize {
        self.inner
            .entries
            .borrow()
            .get(resource)
            .map(|e| e.leases)
            .unwrap_or(0)
    }

    fn release(&self, resource: &HeadResource) {
        let mut entries = self.inner.entries.borrow_mut();
        let Some(entry) = entries.get_mut(resource) else {
            return;
        };

        entry.leases -= 1;
        if entry.leases > 0 {
            return;
        }

        let owned = entry.owned;
        entries.remove(resource);
        if owned {
            match self.inner.host.remove(resource) {
                Ok(()) => tracing::debug!(resource = %resource, "Removed head resource"),
                Err(e) => tracing::warn!(resource = %resource, error = %e, "Failed to remove head resource"),
            }
        }
    }
}

/// Keeps a head resource in place until dropped
pub struct HeadLease<H: HeadHost> {
    registry: HeadRegistry<H>,
    resource: Option<HeadResource>,
}

impl<H: HeadHost> HeadLease<H> {
    pub fn resource(&self) -> Option<&HeadResource> {
        self.resource.as_ref()
    }
}

impl<H: HeadHost> fmt::Debug for HeadLease<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadLease").field("resource", &self.resource).finish()
    }
}

impl<H: HeadHost> Drop for HeadLease<H> {
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            self.registry.release(&resource);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct RecordingHost {
        present: RefCell<HashSet<HeadResource>>,
        appended: RefCell<Vec<HeadResource>>,
        removed: RefCell<Vec<HeadResource>>,
    }

    impl RecordingHost {
        fn with_declared(resource: HeadResource) -> Self {
            let host = Self::default();
            host.present.borrow_mut().insert(resource);
            host
        }
    }

    impl HeadHost for RecordingHost {
        fn contains(&self, resource: &HeadResource) -> bool {
            self.present.borrow().contains(resource)
        }

        fn append(&self, resource: &HeadResource) -> Result<(), HeadError> {
            self.present.borrow_mut().insert(resource.clone());
            self.appended.borrow_mut().push(resource.clone());
            Ok(())
        }

        fn remove(&self, resource: &HeadResource) -> Result<(), HeadError> {
            self.present.borrow_mut().remove(resource);
            self.removed.borrow_mut().push(resource.clone());
            Ok(())
        }
    }

    struct BrokenHost;

    impl HeadHost for BrokenHost {
        fn contains(&self, _: &HeadResource) -> bool {
            false
        }

        fn append(&self, _: &HeadResource) -> Result<(), HeadError> {
            Err(HeadError::NoHead("document has no <head>".to_string()))
        }

        fn remove(&self, _: &HeadResource) -> Result<(), HeadError> {
            Ok(())
        }
    }

    fn css() -> HeadResource {
        HeadResource::stylesheet("https://unpkg.com/leaflet@1.9.4/dist/leaflet.css")
    }

    #[test]
    fn test_acquire_is_idempotent() {
        let registry = HeadRegistry::new(RecordingHost::default());

        let first = registry.acquire(css()).unwrap();
        let second = registry.acquire(css()).unwrap();

        assert_eq!(registry.host().appended.borrow().len(), 1);
        assert_eq!(registry.leases(&css()), 2);

        drop(first);
        assert!(registry.host().removed.borrow().is_empty());

        drop(second);
        assert_eq!(*registry.host().removed.borrow(), vec![css()]);
        assert_eq!(registry.leases(&css()), 0);
    }

    #[test]
    fn test_remount_appends_again() {
        let registry = HeadRegistry::new(RecordingHost::default());
        drop(registry.acquire(css()).unwrap());
        let _lease = registry.acquire(css()).unwrap();
        assert_eq!(registry.host().appended.borrow().len(), 2);
    }

    #[test]
    fn test_declared_resource_left_alone() {
        let registry = HeadRegistry::new(RecordingHost::with_declared(css()));

        let lease = registry.acquire(css()).unwrap();
        assert!(registry.host().appended.borrow().is_empty());
        drop(lease);

        assert!(registry.host().removed.borrow().is_empty());
        assert!(registry.host().contains(&css()));
    }

    #[test]
    fn test_distinct_resources_tracked_separately() {
        let registry = HeadRegistry::new(RecordingHost::default());
        let script = HeadResource::script("https://unpkg.com/leaflet@1.9.4/dist/leaflet.js");

        let _css = registry.acquire(css()).unwrap();
        let js = registry.acquire(script.clone()).unwrap();
        drop(js);

        assert_eq!(*registry.host().removed.borrow(), vec![script]);
        assert_eq!(registry.leases(&css()), 1);
    }

    #[test]
    fn test_append_failure_leaves_no_entry() {
        let registry = HeadRegistry::new(BrokenHost);
        let err = registry.acquire(css()).unwrap_err();
        assert!(matches!(err, HeadError::NoHead(_)));
        assert_eq!(registry.leases(&css()), 0);
    }

    #[test]
    fn test_resource_display() {
        assert_eq!(
            css().to_string(),
            "stylesheet https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"
        );
        assert_eq!(css().url(), "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css");
    }
}
