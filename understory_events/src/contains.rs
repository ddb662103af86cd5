// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Containment oracle: memoized ancestor-or-self tests.
//!
//! ## Semantics
//!
//! [`Containment::contains`] answers "is `ancestor` the node itself or one of its
//! ancestors?". The first query for a pair walks the parent chain from the node,
//! collecting the identity of every element it visits, until it reaches the ancestor
//! or runs out of parents. The outcome is then recorded for every visited element
//! under the ancestor, so later queries for any of them are a map lookup.
//!
//! A remembered answer, true or false, short-circuits the walk, including when it is
//! found for an element part-way up the chain.
//!
//! ## Staleness
//!
//! The cache is never invalidated by tree mutation. Under [`CachePolicy::Retain`],
//! moving an element after it was queried leaves the old answer in place. Callers
//! that reparent elements can [`forget`](Containment::forget) an ancestor, clear the
//! whole cache with [`invalidate_all`](Containment::invalidate_all), or build with
//! [`CachePolicy::Disabled`].

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;
use understory_element::Element;

use crate::identity::{Identity, IdentityTable};

/// Whether containment outcomes are remembered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Remember every outcome for the lifetime of the cache.
    #[default]
    Retain,
    /// Walk the parent chain on every query.
    Disabled,
}

/// Ancestor identity → (descendant identity → outcome).
#[derive(Debug, Default)]
pub struct ContainmentCache {
    policy: CachePolicy,
    map: RefCell<HashMap<Identity, HashMap<Identity, bool>>>,
}

impl ContainmentCache {
    /// Create an empty cache.
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            map: RefCell::new(HashMap::new()),
        }
    }

    /// Current policy.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Remembered outcome for the pair, if any.
    pub fn get(&self, ancestor: Identity, node: Identity) -> Option<bool> {
        if self.policy == CachePolicy::Disabled {
            return None;
        }
        self.map
            .borrow()
            .get(&ancestor)
            .and_then(|m| m.get(&node))
            .copied()
    }

    /// Remember `outcome` for every node in `nodes` under `ancestor`.
    pub fn record(&self, ancestor: Identity, nodes: &[Identity], outcome: bool) {
        if self.policy == CachePolicy::Disabled || nodes.is_empty() {
            return;
        }
        let mut map = self.map.borrow_mut();
        let row = map.entry(ancestor).or_default();
        for &node in nodes {
            row.insert(node, outcome);
        }
    }

    /// Forget everything.
    pub fn invalidate_all(&self) {
        self.map.borrow_mut().clear();
    }

    /// Forget every outcome recorded under `ancestor`, and every outcome about it.
    pub fn forget(&self, id: Identity) {
        let mut map = self.map.borrow_mut();
        map.remove(&id);
        for row in map.values_mut() {
            row.remove(&id);
        }
    }

    /// Number of remembered (ancestor, node) pairs.
    pub fn cached_pairs(&self) -> usize {
        self.map.borrow().values().map(HashMap::len).sum()
    }
}

/// Identity table plus containment cache: everything a containment query needs.
///
/// Cheap to clone; clones share state. Closures installed as host listeners hold one
/// of these rather than the whole event layer.
#[derive(Clone, Debug)]
pub struct Containment {
    identities: Rc<IdentityTable>,
    cache: Rc<ContainmentCache>,
}

impl Containment {
    /// Combine an identity table and a cache.
    pub fn new(identities: Rc<IdentityTable>, cache: Rc<ContainmentCache>) -> Self {
        Self { identities, cache }
    }

    /// Identity table in use.
    pub fn identities(&self) -> &IdentityTable {
        &self.identities
    }

    /// Cache in use.
    pub fn cache(&self) -> &ContainmentCache {
        &self.cache
    }

    /// Is `ancestor` the same element as `node`, or one of its ancestors?
    ///
    /// False when either is absent. An element contains itself; that answer is not
    /// memoized.
    pub fn contains(&self, ancestor: Option<&Element>, node: Option<&Element>) -> bool {
        let (Some(ancestor), Some(node)) = (ancestor, node) else {
            return false;
        };
        if ancestor.ptr_eq(node) {
            return true;
        }
        let anc_id = self.identities.identity_of(ancestor);
        let mut visited: Vec<Identity> = Vec::new();
        let mut outcome = false;
        let mut cursor = Some(node.clone());
        while let Some(current) = cursor {
            if current.ptr_eq(ancestor) {
                outcome = true;
                break;
            }
            let id = self.identities.identity_of(&current);
            if let Some(hit) = self.cache.get(anc_id, id) {
                tracing::trace!(ancestor = %anc_id, node = %id, hit, "containment cache hit");
                outcome = hit;
                break;
            }
            visited.push(id);
            cursor = current.parent();
        }
        if !visited.is_empty() {
            tracing::trace!(
                ancestor = %anc_id,
                walked = visited.len(),
                outcome,
                "containment walk"
            );
        }
        self.cache.record(anc_id, &visited, outcome);
        outcome
    }
}
