//! Browser side of the Leaflet capability
//!
//! [`LeafletSource`] injects the script through the head registry and
//! resolves once `window.L` exists. [`BrowserTimer`] sleeps on the browser
//! event loop. Both plug into the core [`CapabilityLoader`].

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::future::FutureExt;
use js_sys::Reflect;
use palour::capability::{
    CapabilityError, CapabilityLoader, CapabilitySource, CapabilityState, LoadPolicy,
    SharedCapability, Timer,
};
use palour::head::{HeadLease, HeadRegistry, HeadResource};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use super::head::DomHead;

const CAPABILITY: &str = "leaflet";

/// Proof that `window.L` is available
#[derive(Clone)]
pub struct Leaflet {
    pub version: String,
    _script: Rc<Option<HeadLease<DomHead>>>,
}

impl fmt::Debug for Leaflet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaflet")
            .field("version", &self.version)
            .finish()
    }
}

/// `L.version`, or `None` while the library is absent
fn leaflet_version() -> Option<String> {
    let window = web_sys::window()?;
    let leaflet = Reflect::get(&window, &JsValue::from_str("L")).ok()?;
    if leaflet.is_undefined() || leaflet.is_null() {
        return None;
    }
    let version = Reflect::get(&leaflet, &JsValue::from_str("version"))
        .ok()
        .and_then(|v| v.as_string());
    Some(version.unwrap_or_else(|| "unknown".to_string()))
}

type Outcome = Result<(), String>;

/// `load`/`error` listeners on a script element, detached on drop
struct ScriptListeners {
    element: Element,
    on_load: Closure<dyn FnMut(web_sys::Event)>,
    on_error: Closure<dyn FnMut(web_sys::Event)>,
}

impl ScriptListeners {
    fn attach(element: Element, done: oneshot::Sender<Outcome>) -> Result<Self, JsValue> {
        let done = Rc::new(RefCell::new(Some(done)));

        let load_done = Rc::clone(&done);
        let on_load = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            if let Some(tx) = load_done.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        });

        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            if let Some(tx) = done.borrow_mut().take() {
                let _ = tx.send(Err("script failed to load".to_string()));
            }
        });

        element.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        element.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;

        Ok(Self {
            element,
            on_load,
            on_error,
        })
    }
}

impl Drop for ScriptListeners {
    fn drop(&mut self) {
        let _ = self
            .element
            .remove_event_listener_with_callback("load", self.on_load.as_ref().unchecked_ref());
        let _ = self
            .element
            .remove_event_listener_with_callback("error", self.on_error.as_ref().unchecked_ref());
    }
}

/// Loads the Leaflet script into the document
pub struct LeafletSource {
    head: HeadRegistry<DomHead>,
    script: HeadResource,
}

impl LeafletSource {
    pub fn new(head: HeadRegistry<DomHead>, script: HeadResource) -> Self {
        Self { head, script }
    }

    fn unavailable(reason: impl Into<String>) -> CapabilityError {
        CapabilityError::unavailable(CAPABILITY, reason)
    }
}

#[async_trait(?Send)]
impl CapabilitySource for LeafletSource {
    type Output = Leaflet;

    fn name(&self) -> &str {
        CAPABILITY
    }

    async fn request(&self) -> Result<Leaflet, CapabilityError> {
        if let Some(version) = leaflet_version() {
            return Ok(Leaflet {
                version,
                _script: Rc::new(None),
            });
        }

        // Dropping the lease on failure removes the element, so the next
        // attempt appends a fresh one.
        let lease = self
            .head
            .acquire(self.script.clone())
            .map_err(|e| Self::unavailable(e.to_string()))?;

        let element = DomHead::find(&self.script)
            .ok_or_else(|| Self::unavailable("script element missing after append"))?;

        let (tx, rx) = oneshot::channel();
        let listeners = ScriptListeners::attach(element, tx)
            .map_err(|e| Self::unavailable(format!("{:?}", e)))?;

        let outcome = rx.await;
        drop(listeners);

        match outcome {
            Ok(Ok(())) => match leaflet_version() {
                Some(version) => Ok(Leaflet {
                    version,
                    _script: Rc::new(Some(lease)),
                }),
                None => Err(Self::unavailable("script loaded but window.L is missing")),
            },
            Ok(Err(reason)) => Err(Self::unavailable(reason)),
            Err(_) => Err(Self::unavailable("script listener dropped")),
        }
    }
}

/// Timer on the browser event loop
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}

/// Load Leaflet once per page, sharing the request between mounts
///
/// `observe` sees every state change of the load this call starts. A call
/// that joins a load already in flight only sees the final result.
pub async fn load_leaflet<F>(
    shared: &SharedCapability<Leaflet>,
    head: &HeadRegistry<DomHead>,
    script: HeadResource,
    policy: LoadPolicy,
    observe: F,
) -> Result<Leaflet, CapabilityError>
where
    F: FnMut(&CapabilityState<Leaflet>) + 'static,
{
    let head = head.clone();
    shared
        .get_or_load(move || {
            async move {
                let loader =
                    CapabilityLoader::new(LeafletSource::new(head, script), BrowserTimer, policy);
                loader.load_observed(observe).await
            }
            .boxed_local()
        })
        .await
}
