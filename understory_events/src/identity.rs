// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity registry: stable integer keys for reference-identified elements.
//!
//! Elements are only comparable by reference, which makes them poor map keys. The
//! registry hands out an [`Identity`] the first time it sees an element and returns
//! the same value for as long as the element lives. Elements are never mutated;
//! the registry keeps a side table keyed by element address holding weak handles.
//!
//! A weak handle pins its element's allocation, so an address cannot be reused by
//! another element while its entry exists. Dead entries are replaced with a fresh
//! identity when seen again and dropped by [`IdentityTable::prune`].

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::num::NonZeroU64;

use hashbrown::HashMap;
use understory_element::{Element, WeakElement};

/// A process-lifetime unique element key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(NonZeroU64);

impl Identity {
    /// The raw value.
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl core::fmt::Display for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side table mapping elements to identities.
#[derive(Debug)]
pub struct IdentityTable {
    next: Cell<u64>,
    entries: RefCell<HashMap<usize, (WeakElement, Identity)>>,
}

impl Default for IdentityTable {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityTable {
    /// Create an empty table. The first identity handed out is 1.
    pub fn new() -> Self {
        Self {
            next: Cell::new(1),
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Identity of `element`, assigning one on first observation.
    pub fn identity_of(&self, element: &Element) -> Identity {
        let key = element.as_ptr().addr();
        let mut entries = self.entries.borrow_mut();
        if let Some((weak, id)) = entries.get(&key)
            && weak.is_alive()
            && weak.points_to(element)
        {
            return *id;
        }
        let id = self.fresh();
        entries.insert(key, (element.downgrade(), id));
        id
    }

    /// Identity of `element` if one was already assigned.
    pub fn peek(&self, element: &Element) -> Option<Identity> {
        let key = element.as_ptr().addr();
        self.entries
            .borrow()
            .get(&key)
            .filter(|(weak, _)| weak.is_alive() && weak.points_to(element))
            .map(|(_, id)| *id)
    }

    /// Number of entries, live or dead.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True if no identity has been assigned (or all were pruned).
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drop entries whose element is gone, returning their identities.
    pub fn prune(&self) -> Vec<Identity> {
        let mut dead = Vec::new();
        self.entries.borrow_mut().retain(|_, (weak, id)| {
            let alive = weak.is_alive();
            if !alive {
                dead.push(*id);
            }
            alive
        });
        dead
    }

    fn fresh(&self) -> Identity {
        let raw = self.next.get();
        self.next.set(raw + 1);
        // Counter starts at 1 and only grows.
        Identity(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }
}
