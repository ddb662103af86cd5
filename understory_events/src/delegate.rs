// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delegation: one subscription on an ancestor, re-targeted per dispatch.
//!
//! A delegated subscription sits on a single element. For every event that reaches
//! it, a matcher looks at the event's origin and either names the element the
//! handler should run for, or declines. The handler's receiver is the matched
//! element, not the element holding the subscription.
//!
//! [`Events::delegate_by_class`] matches the nearest ancestor-or-self of the origin
//! carrying a class. The walk goes all the way to the root, so a matching element
//! above the delegating element still matches.

use alloc::string::ToString;

use understory_combinators::first;
use understory_element::{Element, Event};

use crate::error::EventsError;
use crate::subscription::Subscription;
use crate::{Events, Handler};

/// Nearest element, starting at `start` and walking up to the root, for which `pred` holds.
pub fn nearest_matching(
    start: &Element,
    mut pred: impl FnMut(&Element) -> bool,
) -> Option<Element> {
    first(|e: &Element| pred(e), start.ancestors_or_self())
}

impl Events {
    /// Subscribe to `name` on `element`, re-dispatching to whatever `matcher` picks.
    ///
    /// `matcher` receives the event's origin and the event.
    pub fn delegate<M>(
        &self,
        matcher: M,
        element: &Element,
        name: &str,
        handler: Handler,
    ) -> Result<Subscription, EventsError>
    where
        M: Fn(&Element, &Event) -> Option<Element> + 'static,
    {
        let listener = crate::handler(move |_delegator: &Element, event: &Event| {
            if let Some(matched) = matcher(event.target(), event) {
                handler(&matched, event);
            }
        });
        self.subscribe(element, name, listener)
    }

    /// Like [`delegate`](Self::delegate), with the origin itself as the only candidate.
    pub fn delegate_if<P>(
        &self,
        predicate: P,
        element: &Element,
        name: &str,
        handler: Handler,
    ) -> Result<Subscription, EventsError>
    where
        P: Fn(&Element, &Event) -> bool + 'static,
    {
        self.delegate(
            move |origin: &Element, event: &Event| {
                predicate(origin, event).then(|| origin.clone())
            },
            element,
            name,
            handler,
        )
    }

    /// Delegate to the nearest ancestor-or-self of the origin carrying `class`.
    pub fn delegate_by_class(
        &self,
        class: &str,
        element: &Element,
        name: &str,
        handler: Handler,
    ) -> Result<Subscription, EventsError> {
        let class = class.to_string();
        self.delegate(
            move |origin: &Element, _event: &Event| {
                nearest_matching(origin, |e| e.has_class(&class))
            },
            element,
            name,
            handler,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use understory_element::{Capabilities, Document};

    #[test]
    fn nearest_matching_walks_to_root_and_stops() {
        let a = Element::new("div", Capabilities::STANDARD).with_class("hit");
        let b = Element::new("div", Capabilities::STANDARD);
        let c = Element::new("div", Capabilities::STANDARD);
        a.append_child(&b).unwrap();
        b.append_child(&c).unwrap();
        assert!(nearest_matching(&c, |e| e.has_class("hit")).unwrap().ptr_eq(&a));
        assert!(nearest_matching(&a, |e| e.has_class("hit")).unwrap().ptr_eq(&a));
        assert!(nearest_matching(&c, |e| e.has_class("miss")).is_none());
    }

    fn recorder() -> (Rc<RefCell<Vec<Element>>>, Handler) {
        let seen: Rc<RefCell<Vec<Element>>> = Rc::default();
        let s = Rc::clone(&seen);
        (seen, handler(move |this, _| s.borrow_mut().push(this.clone())))
    }

    #[test]
    fn delegate_if_binds_to_origin() {
        let doc = Document::standard();
        let list = doc.create_element("ul");
        let item = doc.create_element("li").with_id("x");
        let other = doc.create_element("li");
        doc.root().append_child(&list).unwrap();
        list.append_child(&item).unwrap();
        list.append_child(&other).unwrap();
        let events = Events::new(&doc).unwrap();
        let (seen, h) = recorder();
        let _sub = events
            .delegate_if(
                |origin: &Element, _: &Event| origin.id().as_deref() == Some("x"),
                &list,
                "click",
                h,
            )
            .unwrap();
        Event::click(&other).dispatch();
        Event::click(&item).dispatch();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].ptr_eq(&item));
    }

    #[test]
    fn delegate_with_custom_matcher() {
        let doc = Document::legacy();
        let table = doc.create_element("table");
        let row = doc.create_element("tr");
        let cell = doc.create_element("td");
        doc.root().append_child(&table).unwrap();
        table.append_child(&row).unwrap();
        row.append_child(&cell).unwrap();
        let events = Events::new(&doc).unwrap();
        let (seen, h) = recorder();
        let _sub = events
            .delegate(
                |origin: &Element, _: &Event| {
                    nearest_matching(origin, |e| e.tag() == "tr")
                },
                &table,
                "click",
                h,
            )
            .unwrap();
        Event::click(&cell).dispatch();
        Event::click(&table).dispatch();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].ptr_eq(&row));
    }

    #[test]
    fn class_match_may_sit_above_the_delegator() {
        let doc = Document::standard();
        let outer = doc.create_element("div").with_class("frame");
        let inner = doc.create_element("div");
        let leaf = doc.create_element("span");
        doc.root().append_child(&outer).unwrap();
        outer.append_child(&inner).unwrap();
        inner.append_child(&leaf).unwrap();
        let events = Events::new(&doc).unwrap();
        let (seen, h) = recorder();
        let sub = events.delegate_by_class("frame", &inner, "click", h).unwrap();
        Event::click(&leaf).dispatch();
        assert!(seen.borrow()[0].ptr_eq(&outer));
        sub.cancel();
        Event::click(&leaf).dispatch();
        assert_eq!(seen.borrow().len(), 1);
    }
}
