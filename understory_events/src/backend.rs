// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event backends: one strategy per native wiring model.
//!
//! ## Selection
//!
//! [`detect_backend`] inspects a [`Document`] once:
//!
//! - [`BackendKind::Standard`] when the root and the window both expose listener
//!   registration and removal.
//! - Otherwise [`BackendKind::Legacy`] when both expose attach and detach.
//! - Otherwise [`EventsError::NoBackend`].
//!
//! ## Standard
//!
//! Handlers are registered as they are. Cancelling removes the same handler for the
//! same event name. The host deduplicates registrations, so subscribing one handler
//! twice on the same element and name yields one registration.
//!
//! ## Legacy
//!
//! Attach/detach hosts call back with the event only. Each subscription attaches a
//! fresh wrapper under `"on" + name` that calls the handler with the element as
//! receiver, and records the {handler, wrapper} pair in the [`ListenerRegistry`].
//! Cancelling detaches that one wrapper; unsubscribing by handler detaches every
//! wrapper recorded for the handler.
//!
//! Wrappers hold the element weakly, so attaching never keeps an element alive.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};

use understory_element::{AttachedFn, Capabilities, Document, Element, Event, HostError};

use crate::Handler;
use crate::error::EventsError;
use crate::identity::IdentityTable;
use crate::registry::ListenerRegistry;
use crate::subscription::Subscription;

/// Which wiring model a backend drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Listener registration.
    Standard,
    /// Attach/detach with `"on"`-prefixed property names.
    Legacy,
}

impl BackendKind {
    fn required(self) -> Capabilities {
        match self {
            Self::Standard => Capabilities::STANDARD,
            Self::Legacy => Capabilities::LEGACY,
        }
    }

    /// Does `document` expose this model on both its root and its window?
    pub fn is_supported_by(self, document: &Document) -> bool {
        let need = self.required();
        document.root().capabilities().contains(need)
            && document.window_capabilities().contains(need)
    }
}

/// Pick the backend `document` supports, preferring listener registration.
pub fn detect_backend(document: &Document) -> Result<BackendKind, EventsError> {
    [BackendKind::Standard, BackendKind::Legacy]
        .into_iter()
        .find(|kind| kind.is_supported_by(document))
        .ok_or_else(|| {
            tracing::error!(
                root = ?document.root().capabilities(),
                window = ?document.window_capabilities(),
                "no usable event backend"
            );
            EventsError::NoBackend
        })
}

/// A native wiring strategy.
pub trait EventBackend: core::fmt::Debug {
    /// The model this backend drives.
    fn kind(&self) -> BackendKind;

    /// Deliver `name` events on `element` to `handler`, with `element` as receiver.
    fn subscribe(
        &self,
        element: &Element,
        name: &str,
        handler: Handler,
    ) -> Result<Subscription, EventsError>;

    /// Remove every subscription of `handler` for `name` on `element`.
    fn unsubscribe(&self, element: &Element, name: &str, handler: &Handler)
    -> Result<(), EventsError>;
}

/// Listener-registration backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardBackend;

impl EventBackend for StandardBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Standard
    }

    fn subscribe(
        &self,
        element: &Element,
        name: &str,
        handler: Handler,
    ) -> Result<Subscription, EventsError> {
        require(element, Capabilities::REMOVE_LISTENER, "remove_event_listener")?;
        element.add_event_listener(name, Rc::clone(&handler))?;
        tracing::debug!(name, backend = "standard", "subscribed");

        let weak = element.downgrade();
        let name = name.to_string();
        Ok(Subscription::new(move || {
            if let Some(element) = weak.upgrade()
                && let Err(err) = element.remove_event_listener(&name, &handler)
            {
                tracing::warn!(name = %name, %err, "cancel could not remove listener");
            }
            tracing::debug!(name = %name, backend = "standard", "cancelled");
        }))
    }

    fn unsubscribe(
        &self,
        element: &Element,
        name: &str,
        handler: &Handler,
    ) -> Result<(), EventsError> {
        element.remove_event_listener(name, handler)?;
        tracing::debug!(name, backend = "standard", "unsubscribed");
        Ok(())
    }
}

/// Attach/detach backend.
#[derive(Debug)]
pub struct LegacyBackend {
    identities: Rc<IdentityTable>,
    registry: Rc<ListenerRegistry>,
}

impl LegacyBackend {
    /// Create a backend recording pairs in `registry`, keyed by `identities`.
    pub fn new(identities: Rc<IdentityTable>, registry: Rc<ListenerRegistry>) -> Self {
        Self {
            identities,
            registry,
        }
    }

    /// Registry of attached {handler, wrapper} pairs.
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }
}

fn property(name: &str) -> String {
    format!("on{name}")
}

fn require(
    element: &Element,
    cap: Capabilities,
    primitive: &'static str,
) -> Result<(), EventsError> {
    if element.capabilities().contains(cap) {
        Ok(())
    } else {
        Err(HostError::Unsupported { primitive }.into())
    }
}

impl EventBackend for LegacyBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Legacy
    }

    fn subscribe(
        &self,
        element: &Element,
        name: &str,
        handler: Handler,
    ) -> Result<Subscription, EventsError> {
        require(element, Capabilities::DETACH, "detach_event")?;
        let id = self.identities.identity_of(element);
        let receiver = element.downgrade();
        let bound = Rc::clone(&handler);
        let wrapper: AttachedFn = Rc::new(move |event: &Event| {
            if let Some(this) = receiver.upgrade() {
                bound(&this, event);
            }
        });
        element.attach_event(&property(name), Rc::clone(&wrapper))?;
        self.registry.record(id, name, handler, Rc::clone(&wrapper));
        tracing::debug!(name, element = %id, backend = "legacy", "subscribed");

        let registry = Rc::clone(&self.registry);
        let weak = element.downgrade();
        let name = name.to_string();
        Ok(Subscription::new(move || {
            // Already removed by an unsubscribe-by-handler: nothing left to detach.
            if registry.remove_wrapper(id, &name, &wrapper)
                && let Some(element) = weak.upgrade()
                && let Err(err) = element.detach_event(&property(&name), &wrapper)
            {
                tracing::warn!(name = %name, %err, "cancel could not detach wrapper");
            }
            tracing::debug!(name = %name, element = %id, backend = "legacy", "cancelled");
        }))
    }

    fn unsubscribe(
        &self,
        element: &Element,
        name: &str,
        handler: &Handler,
    ) -> Result<(), EventsError> {
        let id = self.identities.identity_of(element);
        let wrappers = self.registry.take_handler(id, name, handler);
        let prop = property(name);
        for wrapper in &wrappers {
            element.detach_event(&prop, wrapper)?;
        }
        tracing::debug!(
            name,
            element = %id,
            removed = wrappers.len(),
            backend = "legacy",
            "unsubscribed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, Handler) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        (hits, Rc::new(move |_, _| h.set(h.get() + 1)))
    }

    fn legacy() -> LegacyBackend {
        LegacyBackend::new(
            Rc::new(IdentityTable::new()),
            Rc::new(ListenerRegistry::new()),
        )
    }

    #[test]
    fn detection_prefers_standard() {
        let both = Document::new(Capabilities::STANDARD | Capabilities::LEGACY);
        assert_eq!(detect_backend(&both), Ok(BackendKind::Standard));
        assert_eq!(
            detect_backend(&Document::legacy()),
            Ok(BackendKind::Legacy)
        );
    }

    #[test]
    fn detection_requires_root_and_window() {
        let split = Document::with_window(Capabilities::STANDARD, Capabilities::LEGACY);
        assert_eq!(detect_backend(&split), Err(EventsError::NoBackend));
        let half = Document::new(Capabilities::ADD_LISTENER | Capabilities::ATTACH);
        assert_eq!(detect_backend(&half), Err(EventsError::NoBackend));
        let mixed = Document::with_window(
            Capabilities::STANDARD | Capabilities::LEGACY,
            Capabilities::LEGACY,
        );
        assert_eq!(detect_backend(&mixed), Ok(BackendKind::Legacy));
    }

    #[test]
    fn standard_cancel_removes_listener() {
        let doc = Document::standard();
        let e = doc.create_element("div");
        let (hits, h) = counter();
        let sub = StandardBackend.subscribe(&e, "click", h).unwrap();
        Event::click(&e).dispatch();
        sub.cancel();
        sub.cancel();
        Event::click(&e).dispatch();
        assert_eq!(hits.get(), 1);
        assert_eq!(e.listener_count("click"), 0);
    }

    #[test]
    fn legacy_rebinds_receiver() {
        let doc = Document::legacy();
        let parent = doc.create_element("ul");
        let child = doc.create_element("li");
        parent.append_child(&child).unwrap();
        let seen = Rc::new(Cell::new(false));
        let s = Rc::clone(&seen);
        let p = parent.clone();
        let h: Handler = Rc::new(move |this: &Element, _| s.set(this.ptr_eq(&p)));
        let backend = legacy();
        let _sub = backend.subscribe(&parent, "click", h).unwrap();
        Event::click(&child).dispatch();
        assert!(seen.get(), "receiver is the subscribed element, not the origin");
        assert_eq!(parent.attached_count("onclick"), 1);
    }

    #[test]
    fn legacy_cancel_is_per_subscription() {
        let doc = Document::legacy();
        let e = doc.create_element("div");
        let (hits, h) = counter();
        let backend = legacy();
        let first = backend.subscribe(&e, "click", Rc::clone(&h)).unwrap();
        let _second = backend.subscribe(&e, "click", Rc::clone(&h)).unwrap();
        Event::click(&e).dispatch();
        assert_eq!(hits.get(), 2);
        first.cancel();
        Event::click(&e).dispatch();
        assert_eq!(hits.get(), 3);
        assert_eq!(backend.registry().len(), 1);
    }

    #[test]
    fn legacy_unsubscribe_by_handler_removes_all() {
        let doc = Document::legacy();
        let e = doc.create_element("div");
        let (hits, h) = counter();
        let (other_hits, other) = counter();
        let backend = legacy();
        let sub = backend.subscribe(&e, "click", Rc::clone(&h)).unwrap();
        backend.subscribe(&e, "click", Rc::clone(&h)).unwrap();
        backend.subscribe(&e, "click", other).unwrap();
        backend.unsubscribe(&e, "click", &h).unwrap();
        Event::click(&e).dispatch();
        assert_eq!((hits.get(), other_hits.get()), (0, 1));
        sub.cancel();
        assert_eq!(e.attached_count("onclick"), 1, "cancel after off is a no-op");
    }

    #[test]
    fn wrong_model_is_reported() {
        let e = Document::standard().create_element("div");
        let (_hits, h) = counter();
        assert!(matches!(
            legacy().subscribe(&e, "click", h),
            Err(EventsError::Host(HostError::Unsupported { .. }))
        ));
    }
}
