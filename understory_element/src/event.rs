// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events and host dispatch.
//!
//! An [`Event`] names its kind, the element it targets, and (for pointer transitions)
//! the related element the pointer came from or went to. [`Event::dispatch`] plays the
//! host's role: it walks from the target to the root and invokes, on every node,
//! registered listeners first and attached callbacks second.
//!
//! Dispatch snapshots each node's callbacks before invoking them, so a callback may
//! register or remove callbacks (including itself) without affecting the current pass.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::Cell;

use kurbo::Point;

use crate::tree::Element;
use crate::types::HostError;

/// The node a pointer transition came from or went to.
#[derive(Clone, Debug)]
pub enum RelatedTarget {
    /// An element in this tree.
    Element(Element),
    /// A text node; `parent` is the element containing it.
    Text {
        /// Element owning the text node.
        parent: Element,
    },
    /// A node that cannot be inspected (another frame, for example).
    Foreign,
}

impl RelatedTarget {
    /// Resolve to an element: text nodes resolve to their parent.
    ///
    /// Fails with [`HostError::ForeignTarget`] for nodes that cannot be inspected.
    pub fn resolve(&self) -> Result<Element, HostError> {
        match self {
            Self::Element(e) => Ok(e.clone()),
            Self::Text { parent } => Ok(parent.clone()),
            Self::Foreign => Err(HostError::ForeignTarget),
        }
    }
}

impl From<Element> for RelatedTarget {
    fn from(e: Element) -> Self {
        Self::Element(e)
    }
}

/// A host event.
#[derive(Debug)]
pub struct Event {
    kind: String,
    target: Element,
    related: Option<RelatedTarget>,
    position: Option<Point>,
    bubbles: bool,
    propagation_stopped: Cell<bool>,
}

impl Event {
    /// A bubbling event of `kind` targeting `target`.
    pub fn new(kind: &str, target: &Element) -> Self {
        Self {
            kind: kind.to_string(),
            target: target.clone(),
            related: None,
            position: None,
            bubbles: true,
            propagation_stopped: Cell::new(false),
        }
    }

    /// `mouseover` on `target`, entered from `related`.
    pub fn mouse_over(target: &Element, related: Option<RelatedTarget>) -> Self {
        Self::new("mouseover", target).with_related(related)
    }

    /// `mouseout` from `target`, leaving for `related`.
    pub fn mouse_out(target: &Element, related: Option<RelatedTarget>) -> Self {
        Self::new("mouseout", target).with_related(related)
    }

    /// `click` on `target`.
    pub fn click(target: &Element) -> Self {
        Self::new("click", target)
    }

    /// Set the related target.
    pub fn with_related(mut self, related: Option<RelatedTarget>) -> Self {
        self.related = related;
        self
    }

    /// Set the pointer position.
    pub fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Deliver only to the target.
    pub fn non_bubbling(mut self) -> Self {
        self.bubbles = false;
        self
    }

    /// Event kind, e.g. `"click"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The element the event originated on.
    pub fn target(&self) -> &Element {
        &self.target
    }

    /// The related target, if the host supplied one.
    pub fn related(&self) -> Option<&RelatedTarget> {
        self.related.as_ref()
    }

    /// Pointer position, if any.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Does the event walk up to the root?
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Stop delivery to ancestors of the node currently being visited.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Has [`stop_propagation`](Self::stop_propagation) been called?
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    /// Deliver the event, returning the number of callbacks invoked.
    ///
    /// On each node from the target upward: listeners registered for the kind, in
    /// registration order, then callbacks attached under `"on" + kind`. Stopping
    /// propagation finishes the current node and skips the rest.
    pub fn dispatch(&self) -> usize {
        let path: Vec<Element> = if self.bubbles {
            self.target.ancestors_or_self().collect()
        } else {
            alloc::vec![self.target.clone()]
        };
        let property = format!("on{}", self.kind);
        let mut invoked = 0;
        for node in &path {
            for listener in node.listeners_for(&self.kind) {
                listener(node, self);
                invoked += 1;
            }
            for callback in node.attached_for(&property) {
                callback(self);
                invoked += 1;
            }
            if self.propagation_stopped() {
                break;
            }
        }
        invoked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttachedFn, Capabilities, Listener};
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn el(tag: &str) -> Element {
        Element::new(tag, Capabilities::STANDARD | Capabilities::LEGACY)
    }

    #[test]
    fn related_target_resolution() {
        let p = el("p");
        assert!(RelatedTarget::from(p.clone()).resolve().unwrap().ptr_eq(&p));
        let text = RelatedTarget::Text { parent: p.clone() };
        assert!(text.resolve().unwrap().ptr_eq(&p));
        assert_eq!(
            RelatedTarget::Foreign.resolve().unwrap_err(),
            HostError::ForeignTarget
        );
    }

    #[test]
    fn bubbles_target_to_root_listeners_before_attached() {
        let root = el("body");
        let child = el("div");
        root.append_child(&child).unwrap();
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();

        let l = Rc::clone(&log);
        let on_root: Listener = Rc::new(move |_, _| l.borrow_mut().push("root listener"));
        root.add_event_listener("click", on_root).unwrap();
        let l = Rc::clone(&log);
        let on_child: AttachedFn = Rc::new(move |_| l.borrow_mut().push("child attached"));
        child.attach_event("onclick", on_child).unwrap();
        let l = Rc::clone(&log);
        let on_child_l: Listener = Rc::new(move |_, _| l.borrow_mut().push("child listener"));
        child.add_event_listener("click", on_child_l).unwrap();

        assert_eq!(Event::click(&child).dispatch(), 3);
        assert_eq!(
            *log.borrow(),
            vec!["child listener", "child attached", "root listener"]
        );
    }

    #[test]
    fn listener_receives_registration_element() {
        let root = el("body");
        let child = el("div");
        root.append_child(&child).unwrap();
        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        let l: Listener = Rc::new(move |this: &Element, ev: &Event| {
            *s.borrow_mut() = Some((this.clone(), ev.target().clone()));
        });
        root.add_event_listener("click", l).unwrap();
        Event::click(&child).dispatch();
        let (this, target) = seen.borrow_mut().take().unwrap();
        assert!(this.ptr_eq(&root));
        assert!(target.ptr_eq(&child));
    }

    #[test]
    fn stop_propagation_and_non_bubbling() {
        let root = el("body");
        let child = el("div");
        root.append_child(&child).unwrap();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let count: Listener = Rc::new(move |_, _| h.set(h.get() + 1));
        root.add_event_listener("click", Rc::clone(&count)).unwrap();
        let stop: Listener = Rc::new(|_, ev: &Event| ev.stop_propagation());
        child.add_event_listener("click", stop).unwrap();
        Event::click(&child).dispatch();
        assert_eq!(hits.get(), 0);

        let other = el("span");
        root.append_child(&other).unwrap();
        other.add_event_listener("click", Rc::clone(&count)).unwrap();
        Event::click(&other).non_bubbling().dispatch();
        assert_eq!(hits.get(), 1, "root is not visited");
    }

    #[test]
    fn removal_during_dispatch_does_not_affect_current_pass() {
        let e = el("div");
        let hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Listener>>> = Rc::default();
        let (h, s) = (Rc::clone(&hits), Rc::clone(&slot));
        let l: Listener = Rc::new(move |this: &Element, _| {
            h.set(h.get() + 1);
            if let Some(me) = s.borrow_mut().take() {
                this.remove_event_listener("click", &me).unwrap();
            }
        });
        *slot.borrow_mut() = Some(Rc::clone(&l));
        e.add_event_listener("click", l).unwrap();
        Event::click(&e).dispatch();
        Event::click(&e).dispatch();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn position_is_carried() {
        let e = el("div");
        let ev = Event::mouse_over(&e, None).at(Point::new(3.0, 4.0));
        assert_eq!(ev.position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(ev.kind(), "mouseover");
        assert!(ev.related().is_none());
    }
}
