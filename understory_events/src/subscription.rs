// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellation capabilities.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use understory_combinators::doall;

type CancelFn = Box<dyn FnOnce()>;

/// Undoes exactly the subscription(s) it was returned for.
///
/// [`cancel`](Self::cancel) runs the undo step once; later calls do nothing.
/// Clones share the same state, so cancelling any clone cancels them all.
#[derive(Clone)]
pub struct Subscription {
    cancel: Rc<RefCell<Option<CancelFn>>>,
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl Subscription {
    /// A capability that runs `undo` on first cancellation.
    pub fn new(undo: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Rc::new(RefCell::new(Some(Box::new(undo)))),
        }
    }

    /// A capability that cancels every part, in order.
    pub fn all(parts: impl IntoIterator<Item = Self>) -> Self {
        let parts: Vec<Self> = parts.into_iter().collect();
        Self::new(move || {
            doall(|part: &Self, _| part.cancel(), &parts);
        })
    }

    /// Undo the subscription. Safe to call any number of times.
    pub fn cancel(&self) {
        // Release the borrow before running user-visible teardown.
        let undo = self.cancel.borrow_mut().take();
        if let Some(undo) = undo {
            undo();
        }
    }

    /// Has [`cancel`](Self::cancel) run?
    pub fn is_cancelled(&self) -> bool {
        self.cancel.borrow().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn cancel_is_idempotent() {
        let runs = Rc::new(Cell::new(0));
        let r = Rc::clone(&runs);
        let sub = Subscription::new(move || r.set(r.get() + 1));
        assert!(!sub.is_cancelled());
        sub.cancel();
        sub.cancel();
        sub.clone().cancel();
        assert_eq!(runs.get(), 1);
        assert!(sub.is_cancelled());
    }

    #[test]
    fn composite_cancels_parts_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let part = |n: u8| {
            let l = Rc::clone(&log);
            Subscription::new(move || l.borrow_mut().push(n))
        };
        let (a, b) = (part(1), part(2));
        b.cancel();
        let all = Subscription::all([a.clone(), b, part(3)]);
        all.cancel();
        all.cancel();
        assert_eq!(*log.borrow(), alloc::vec![2, 1, 3]);
        assert!(a.is_cancelled());
    }

    #[test]
    fn undo_may_cancel_itself() {
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();
        let s = Rc::clone(&slot);
        let sub = Subscription::new(move || {
            if let Some(me) = s.borrow().as_ref() {
                me.cancel();
            }
        });
        *slot.borrow_mut() = Some(sub.clone());
        sub.cancel();
        assert!(sub.is_cancelled());
        slot.borrow_mut().take();
    }
}
