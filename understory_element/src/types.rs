// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: host capabilities, native callback shapes, and errors.

use alloc::rc::Rc;

use crate::event::Event;
use crate::tree::Element;

bitflags::bitflags! {
    /// Event-wiring primitives a host target exposes.
    ///
    /// A host either offers the listener-registration pair, the attach/detach pair,
    /// or (rarely) both. Calling a primitive the target does not expose fails with
    /// [`HostError::Unsupported`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// `add_event_listener` is available.
        const ADD_LISTENER    = 0b0000_0001;
        /// `remove_event_listener` is available.
        const REMOVE_LISTENER = 0b0000_0010;
        /// `attach_event` is available.
        const ATTACH          = 0b0000_0100;
        /// `detach_event` is available.
        const DETACH          = 0b0000_1000;
        /// Both halves of the listener-registration model.
        const STANDARD = Self::ADD_LISTENER.bits() | Self::REMOVE_LISTENER.bits();
        /// Both halves of the attach/detach model.
        const LEGACY = Self::ATTACH.bits() | Self::DETACH.bits();
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Listener-registration callback.
///
/// The host calls it with the element the listener was registered on and the event.
/// Registration and removal compare listeners by reference (`Rc` address).
pub type Listener = Rc<dyn Fn(&Element, &Event)>;

/// Attach/detach callback.
///
/// The host calls it with the event only; there is no receiver. Detaching compares
/// callbacks by reference, so the caller must keep the exact `Rc` it attached.
pub type AttachedFn = Rc<dyn Fn(&Event)>;

/// Compare two shared callbacks by address, ignoring vtables.
pub fn same_callback<T: ?Sized>(a: &Rc<T>, b: &Rc<T>) -> bool {
    core::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Errors reported by host primitives.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The target does not expose this wiring primitive.
    #[error("host target does not provide `{primitive}`")]
    Unsupported {
        /// Name of the missing primitive.
        primitive: &'static str,
    },
    /// `remove_child` was given a node that is not a child.
    #[error("node is not a child of this element")]
    NotAChild,
    /// `append_child` would make an element its own ancestor.
    #[error("appending would make an element its own ancestor")]
    HierarchyCycle,
    /// A related target lives in another tree and cannot be inspected.
    #[error("related target belongs to a foreign tree and cannot be inspected")]
    ForeignTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_flags() {
        assert!(Capabilities::STANDARD.contains(Capabilities::ADD_LISTENER));
        assert!(Capabilities::STANDARD.contains(Capabilities::REMOVE_LISTENER));
        assert!(!Capabilities::STANDARD.intersects(Capabilities::LEGACY));
        assert_eq!(Capabilities::default(), Capabilities::STANDARD);
    }

    #[test]
    fn same_callback_is_by_address() {
        let a: Rc<dyn Fn(u8) -> u8> = Rc::new(|x| x);
        let b: Rc<dyn Fn(u8) -> u8> = Rc::new(|x| x);
        assert!(same_callback(&a, &Rc::clone(&a)));
        assert!(!same_callback(&a, &b));
    }
}
