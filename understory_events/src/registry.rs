// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry for the attach/detach backend.
//!
//! Attach/detach hosts compare callbacks by reference, but the backend never attaches
//! the caller's handler directly: it attaches a wrapper that re-binds the receiver.
//! The registry remembers which wrapper belongs to which handler so both
//! unsubscribe-by-handler and per-subscription cancellation find the right one.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;
use understory_element::{AttachedFn, same_callback};

use crate::Handler;
use crate::identity::Identity;

struct Entry {
    handler: Handler,
    wrapper: AttachedFn,
}

/// (element identity, event name) → ordered {handler, wrapper} pairs.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: RefCell<HashMap<(Identity, String), Vec<Entry>>>,
}

impl core::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let entries = self.entries.borrow();
        f.debug_struct("ListenerRegistry")
            .field("keys", &entries.len())
            .field("pairs", &entries.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair for `(id, name)`.
    pub fn record(&self, id: Identity, name: &str, handler: Handler, wrapper: AttachedFn) {
        self.entries
            .borrow_mut()
            .entry((id, name.to_string()))
            .or_default()
            .push(Entry { handler, wrapper });
    }

    /// Remove the pair owning `wrapper`. Returns whether it was present.
    pub fn remove_wrapper(&self, id: Identity, name: &str, wrapper: &AttachedFn) -> bool {
        !self
            .remove_where(id, name, |e| same_callback(&e.wrapper, wrapper))
            .is_empty()
    }

    /// Remove every pair whose handler is `handler`, returning their wrappers in order.
    pub fn take_handler(&self, id: Identity, name: &str, handler: &Handler) -> Vec<AttachedFn> {
        self.remove_where(id, name, |e| same_callback(&e.handler, handler))
    }

    /// Number of pairs for `(id, name)`.
    pub fn count(&self, id: Identity, name: &str) -> usize {
        self.entries
            .borrow()
            .get(&(id, name.to_string()))
            .map_or(0, Vec::len)
    }

    /// Total number of pairs.
    pub fn len(&self) -> usize {
        self.entries.borrow().values().map(Vec::len).sum()
    }

    /// True when no pair is recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every pair recorded for `id`.
    pub fn forget(&self, id: Identity) -> usize {
        let mut removed = 0;
        self.entries.borrow_mut().retain(|(key, _), list| {
            if *key == id {
                removed += list.len();
                false
            } else {
                true
            }
        });
        removed
    }

    fn remove_where(
        &self,
        id: Identity,
        name: &str,
        pred: impl Fn(&Entry) -> bool,
    ) -> Vec<AttachedFn> {
        let key = (id, name.to_string());
        let mut entries = self.entries.borrow_mut();
        let mut taken = Vec::new();
        if let Some(list) = entries.get_mut(&key) {
            let mut i = 0;
            while i < list.len() {
                if pred(&list[i]) {
                    taken.push(list.remove(i).wrapper);
                } else {
                    i += 1;
                }
            }
            if list.is_empty() {
                entries.remove(&key);
            }
        }
        taken
    }
}
