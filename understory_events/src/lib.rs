// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_events --heading-base-level=0

//! Understory Events: uniform event subscription over two native wiring models.
//!
//! ## Overview
//!
//! Hosts wire events either by listener registration or by attach/detach. This crate
//! hides the difference behind one [`Events`] instance per document:
//!
//! - [`backend`]: [`detect_backend`] picks a strategy once. [`StandardBackend`] passes
//!   handlers through; [`LegacyBackend`] attaches receiver-binding wrappers and keeps a
//!   [`ListenerRegistry`] so they can be found again.
//! - [`identity`]: stable [`Identity`] keys for elements, in a weak side table.
//! - [`contains`]: the memoized containment oracle.
//! - [`hover`]: synthetic enter/leave built from raw over/out and containment.
//! - [`delegate`]: one subscription on an ancestor, re-targeted per dispatch.
//!
//! Every subscribing call returns a [`Subscription`]; cancelling it undoes exactly
//! what that call wired, and cancelling twice is harmless.
//!
//! ## Handlers
//!
//! A [`Handler`] is a shared `Fn(&Element, &Event)`. The first argument is the
//! receiver: the subscribed element, the hovered element, or the delegated match.
//! Unsubscribing by handler compares by reference, so keep the `Rc` you subscribed.
//! [`handler`] wraps a closure.
//!
//! ## Configuration
//!
//! [`Events::builder`] can force a backend and choose a [`CachePolicy`]. The default
//! detects the backend and retains containment answers.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_element::{Document, Event};
//! use understory_events::{Events, handler};
//!
//! let doc = Document::standard();
//! let frames = doc.create_element("ul").with_id("frames");
//! let frame = doc.create_element("li").with_class("frame");
//! let label = doc.create_element("span");
//! doc.root().append_child(&frames).unwrap();
//! frames.append_child(&frame).unwrap();
//! frame.append_child(&label).unwrap();
//!
//! let events = Events::new(&doc).unwrap();
//! let selected = Rc::new(RefCell::new(None));
//! let s = Rc::clone(&selected);
//! let sub = events
//!     .delegate_by_class("frame", &frames, "click", handler(move |this, _| {
//!         *s.borrow_mut() = Some(this.clone());
//!     }))
//!     .unwrap();
//!
//! Event::click(&label).dispatch();
//! assert!(selected.borrow().as_ref().unwrap().ptr_eq(&frame));
//! assert!(events.contains(Some(&frames), Some(&label)));
//! sub.cancel();
//! ```
//!
//! Logging goes through `tracing`; this crate never installs a subscriber.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use understory_element::{Document, Element, Event, Listener};

pub mod backend;
pub mod contains;
pub mod delegate;
mod error;
pub mod hover;
pub mod identity;
pub mod registry;
mod subscription;

pub use backend::{BackendKind, EventBackend, LegacyBackend, StandardBackend, detect_backend};
pub use contains::{CachePolicy, Containment, ContainmentCache};
pub use delegate::nearest_matching;
pub use error::EventsError;
pub use identity::{Identity, IdentityTable};
pub use registry::ListenerRegistry;
pub use subscription::Subscription;

/// A subscribed callback: receiver element, then event.
pub type Handler = Listener;

/// Wrap a closure as a [`Handler`].
pub fn handler(f: impl Fn(&Element, &Event) + 'static) -> Handler {
    Rc::new(f)
}

/// Configures and builds an [`Events`] instance.
#[derive(Clone, Debug)]
pub struct EventsBuilder<'a> {
    document: &'a Document,
    backend: Option<BackendKind>,
    cache_policy: CachePolicy,
}

impl EventsBuilder<'_> {
    /// Use `kind` instead of detecting. The host must still support it.
    pub fn backend(mut self, kind: BackendKind) -> Self {
        self.backend = Some(kind);
        self
    }

    /// Containment cache policy.
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Build the instance.
    pub fn build(self) -> Result<Events, EventsError> {
        let kind = match self.backend {
            Some(kind) if kind.is_supported_by(self.document) => kind,
            Some(kind) => {
                tracing::error!(?kind, "forced event backend is not supported by the host");
                return Err(EventsError::NoBackend);
            }
            None => detect_backend(self.document)?,
        };
        tracing::info!(backend = ?kind, cache = ?self.cache_policy, "event backend selected");

        let identities = Rc::new(IdentityTable::new());
        let registry = Rc::new(ListenerRegistry::new());
        let backend: Box<dyn EventBackend> = match kind {
            BackendKind::Standard => Box::new(StandardBackend),
            BackendKind::Legacy => Box::new(LegacyBackend::new(
                Rc::clone(&identities),
                Rc::clone(&registry),
            )),
        };
        let containment = Containment::new(
            identities,
            Rc::new(ContainmentCache::new(self.cache_policy)),
        );
        Ok(Events {
            inner: Rc::new(Inner {
                backend,
                containment,
                registry,
            }),
        })
    }
}

/// The event layer for one document.
///
/// Owns the identity table, the containment cache and the legacy listener registry.
/// Cloning shares them.
#[derive(Clone)]
pub struct Events {
    inner: Rc<Inner>,
}

struct Inner {
    backend: Box<dyn EventBackend>,
    containment: Containment,
    registry: Rc<ListenerRegistry>,
}

impl core::fmt::Debug for Events {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Events")
            .field("backend", &self.inner.backend)
            .field("identities", &self.inner.containment.identities().len())
            .field("cached_pairs", &self.cached_pairs())
            .field("registry", &self.inner.registry)
            .finish()
    }
}

impl Events {
    /// Start configuring an instance for `document`.
    pub fn builder(document: &Document) -> EventsBuilder<'_> {
        EventsBuilder {
            document,
            backend: None,
            cache_policy: CachePolicy::default(),
        }
    }

    /// Detect the backend and retain containment answers.
    pub fn new(document: &Document) -> Result<Self, EventsError> {
        Self::builder(document).build()
    }

    /// The backend in use.
    pub fn backend_kind(&self) -> BackendKind {
        self.inner.backend.kind()
    }

    /// Subscribe `handler` to the native event `name` on `element`.
    pub fn subscribe(
        &self,
        element: &Element,
        name: &str,
        handler: Handler,
    ) -> Result<Subscription, EventsError> {
        self.inner.backend.subscribe(element, name, handler)
    }

    /// Remove every native subscription of `handler` for `name` on `element`.
    ///
    /// Synthetic subscriptions wrap the handler and are only removed by cancelling them.
    pub fn unsubscribe(
        &self,
        element: &Element,
        name: &str,
        handler: &Handler,
    ) -> Result<(), EventsError> {
        self.inner.backend.unsubscribe(element, name, handler)
    }

    /// Subscribe, routing `"mouseenter"` to [`entered`](Self::entered) and
    /// `"mouseleave"` to [`left`](Self::left).
    pub fn on(
        &self,
        element: &Element,
        name: &str,
        handler: Handler,
    ) -> Result<Subscription, EventsError> {
        match name {
            "mouseenter" => self.entered(element, handler),
            "mouseleave" => self.left(element, handler),
            _ => self.subscribe(element, name, handler),
        }
    }

    /// Alias of [`unsubscribe`](Self::unsubscribe).
    pub fn off(&self, element: &Element, name: &str, handler: &Handler) -> Result<(), EventsError> {
        self.unsubscribe(element, name, handler)
    }

    /// Wire a map of event names to handlers with [`on`](Self::on).
    ///
    /// The result cancels every pair. If one pair fails, the pairs already wired are
    /// cancelled and the error is returned.
    pub fn on_map<'n>(
        &self,
        element: &Element,
        pairs: impl IntoIterator<Item = (&'n str, Handler)>,
    ) -> Result<Subscription, EventsError> {
        let mut parts = Vec::new();
        for (name, handler) in pairs {
            match self.on(element, name, handler) {
                Ok(sub) => parts.push(sub),
                Err(err) => {
                    Subscription::all(parts).cancel();
                    return Err(err);
                }
            }
        }
        Ok(Subscription::all(parts))
    }

    /// Is `ancestor` the same element as `node`, or one of its ancestors?
    pub fn contains(&self, ancestor: Option<&Element>, node: Option<&Element>) -> bool {
        self.inner.containment.contains(ancestor, node)
    }

    /// Identity of `element`, assigned on first observation.
    pub fn identity_of(&self, element: Option<&Element>) -> Option<Identity> {
        element.map(|e| self.inner.containment.identities().identity_of(e))
    }

    /// Identity table, containment cache and policy.
    pub fn containment(&self) -> &Containment {
        &self.inner.containment
    }

    /// Drop every remembered containment answer.
    pub fn invalidate_containment(&self) {
        self.inner.containment.cache().invalidate_all();
    }

    /// Drop remembered answers under and about `element`, typically after moving it.
    pub fn forget_containment(&self, element: &Element) {
        if let Some(id) = self.inner.containment.identities().peek(element) {
            self.inner.containment.cache().forget(id);
        }
    }

    /// Number of remembered containment answers.
    pub fn cached_pairs(&self) -> usize {
        self.inner.containment.cache().cached_pairs()
    }

    /// Number of {handler, wrapper} pairs recorded by the attach/detach backend.
    pub fn legacy_registrations(&self) -> usize {
        self.inner.registry.len()
    }

    /// Release bookkeeping for elements that no longer exist.
    ///
    /// Returns the number of identities released.
    pub fn prune(&self) -> usize {
        let dead = self.inner.containment.identities().prune();
        for &id in &dead {
            self.inner.containment.cache().forget(id);
            self.inner.registry.forget(id);
        }
        if !dead.is_empty() {
            tracing::debug!(released = dead.len(), "pruned dead elements");
        }
        dead.len()
    }
}
