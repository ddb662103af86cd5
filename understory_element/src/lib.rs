// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_element --heading-base-level=0

//! Understory Element: a small host element tree with native event wiring.
//!
//! ## Overview
//!
//! This crate models the host side of event handling: a tree of reference-identified
//! [`Element`]s owned by a [`Document`], the two native wiring models a host may expose,
//! and a dispatcher that delivers an [`Event`] from its target up to the root.
//!
//! - Identity: elements are handles; [`Element::ptr_eq`] is the only equality.
//! - Structure: parent/child links, ids and class lists. Parents own children; the
//!   child-to-parent link is weak.
//! - Wiring: each element exposes some subset of [`Capabilities`].
//!   - Listener registration ([`Element::add_event_listener`]) passes the callback the
//!     element it was registered on and deduplicates by reference.
//!   - Attach/detach ([`Element::attach_event`]) takes an `"on" + kind` property,
//!     calls the callback with the event only, and allows duplicates.
//! - Dispatch: [`Event::dispatch`] walks target → root, honoring `stop_propagation`.
//!
//! Calling a primitive an element does not expose fails with [`HostError::Unsupported`].
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_element::{Document, Event, Listener};
//!
//! let doc = Document::standard();
//! let list = doc.create_element("ul");
//! let item = doc.create_element("li").with_class("item");
//! doc.root().append_child(&list).unwrap();
//! list.append_child(&item).unwrap();
//!
//! let clicks = Rc::new(Cell::new(0));
//! let c = Rc::clone(&clicks);
//! let on_click: Listener = Rc::new(move |_this, _ev| c.set(c.get() + 1));
//! list.add_event_listener("click", on_click).unwrap();
//!
//! // Bubbles from the item to the list.
//! Event::click(&item).dispatch();
//! assert_eq!(clicks.get(), 1);
//! ```
//!
//! Elements use `Rc` and `RefCell` internally; the tree is single-threaded.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod event;
mod tree;
mod types;

pub use document::Document;
pub use event::{Event, RelatedTarget};
pub use tree::{Element, WeakElement};
pub use types::{AttachedFn, Capabilities, HostError, Listener, same_callback};
