// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic hover: enter/leave once per dwell.
//!
//! Raw `mouseover`/`mouseout` fire every time the pointer crosses a child boundary,
//! and both bubble. The helpers here turn them into one "entered" per dwell on an
//! element and one "left" when the pointer goes somewhere outside it.
//!
//! ## Rules
//!
//! - `entered`: a `mouseover` reaching the element fires the handler unless the
//!   pointer is already inside. A `mouseout` whose related element is outside the
//!   element ends the dwell. A related target that cannot be inspected leaves the
//!   dwell as it was.
//! - `left`: a `mouseout` reaching the element fires the handler when the related
//!   element is outside it. Missing and uninspectable related targets count as outside.
//!
//! "Outside" is decided with [`Events::contains`], so the containment cache applies.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_element::{Document, Event, RelatedTarget};
//! use understory_events::{Events, handler};
//!
//! let doc = Document::standard();
//! let card = doc.create_element("div");
//! let label = doc.create_element("span");
//! doc.root().append_child(&card).unwrap();
//! card.append_child(&label).unwrap();
//!
//! let events = Events::new(&doc).unwrap();
//! let enters = Rc::new(Cell::new(0));
//! let e = Rc::clone(&enters);
//! let _sub = events
//!     .entered(&card, handler(move |_, _| e.set(e.get() + 1)))
//!     .unwrap();
//!
//! Event::mouse_over(&card, None).dispatch();
//! Event::mouse_out(&card, Some(RelatedTarget::from(label.clone()))).dispatch();
//! Event::mouse_over(&label, Some(RelatedTarget::from(card.clone()))).dispatch();
//! assert_eq!(enters.get(), 1);
//! ```

use alloc::rc::Rc;
use core::cell::Cell;

use understory_element::{Element, Event};

use crate::contains::Containment;
use crate::error::EventsError;
use crate::subscription::Subscription;
use crate::{Events, Handler};

/// Where a transition's related target points, as far as hover is concerned.
#[derive(Clone, Debug)]
pub(crate) enum Related {
    /// The host supplied none (pointer left the document).
    Absent,
    /// The related node cannot be inspected.
    Foreign,
    /// An element; text nodes are already resolved to their parent.
    Element(Element),
}

impl Related {
    pub(crate) fn of(event: &Event) -> Self {
        match event.related().map(|r| r.resolve()) {
            None => Self::Absent,
            Some(Ok(element)) => Self::Element(element),
            Some(Err(err)) => {
                tracing::trace!(%err, kind = event.kind(), "related target not inspectable");
                Self::Foreign
            }
        }
    }

    fn element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            Self::Absent | Self::Foreign => None,
        }
    }
}

/// Does the transition described by `related` leave `element`?
///
/// `None` when that cannot be decided.
pub(crate) fn leaves(
    containment: &Containment,
    element: &Element,
    related: &Related,
) -> Option<bool> {
    match related {
        Related::Foreign => None,
        _ => Some(!containment.contains(Some(element), related.element())),
    }
}

impl Events {
    /// Fire `handler`, with `element` as receiver, once each time the pointer enters it.
    ///
    /// Cancelling the returned capability removes both underlying subscriptions.
    pub fn entered(&self, element: &Element, handler: Handler) -> Result<Subscription, EventsError> {
        let inside = Rc::new(Cell::new(false));

        let over = {
            let inside = Rc::clone(&inside);
            crate::handler(move |this: &Element, event: &Event| {
                if !inside.replace(true) {
                    handler(this, event);
                }
            })
        };
        let out = {
            let containment = self.containment().clone();
            crate::handler(move |this: &Element, event: &Event| {
                if leaves(&containment, this, &Related::of(event)) == Some(true) {
                    inside.set(false);
                }
            })
        };

        let over = self.subscribe(element, "mouseover", over)?;
        match self.subscribe(element, "mouseout", out) {
            Ok(out) => Ok(Subscription::all([over, out])),
            Err(err) => {
                over.cancel();
                Err(err)
            }
        }
    }

    /// Fire `handler`, with `element` as receiver, each time the pointer leaves it.
    pub fn left(&self, element: &Element, handler: Handler) -> Result<Subscription, EventsError> {
        let containment = self.containment().clone();
        let out = crate::handler(move |this: &Element, event: &Event| {
            if leaves(&containment, this, &Related::of(event)) != Some(false) {
                handler(this, event);
            }
        });
        self.subscribe(element, "mouseout", out)
    }
}
