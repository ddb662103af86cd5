// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: element handles, structure, classes, native wiring.

use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::types::{AttachedFn, Capabilities, HostError, Listener, same_callback};

/// Handle to an element.
///
/// Cloning the handle does not clone the element; two handles are the same node
/// exactly when [`Element::ptr_eq`] says so. There is no structural equality.
///
/// ## Ownership
///
/// - A parent owns its children (strong).
/// - A child refers to its parent weakly.
/// - Detached subtrees live as long as some handle does.
#[derive(Clone)]
pub struct Element(Rc<ElementData>);

/// Non-owning handle to an element, for side tables.
#[derive(Clone, Default)]
pub struct WeakElement(Weak<ElementData>);

pub(crate) struct ElementData {
    tag: String,
    capabilities: Capabilities,
    id: RefCell<Option<String>>,
    classes: RefCell<Vec<String>>,
    parent: RefCell<Weak<Self>>,
    children: RefCell<Vec<Element>>,
    listeners: RefCell<Vec<(String, Listener)>>,
    attached: RefCell<Vec<(String, AttachedFn)>>,
}

impl core::fmt::Debug for Element {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.0.tag)
            .field("id", &self.0.id.borrow())
            .field("classes", &self.0.classes.borrow())
            .field("children", &self.0.children.borrow().len())
            .finish_non_exhaustive()
    }
}

impl core::fmt::Debug for WeakElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("WeakElement")
            .field(&(self.0.strong_count() > 0))
            .finish()
    }
}

impl Element {
    /// Create a detached element that exposes `capabilities`.
    ///
    /// Elements normally come from [`Document::create_element`](crate::Document::create_element),
    /// which hands out the document's capabilities.
    pub fn new(tag: &str, capabilities: Capabilities) -> Self {
        Self(Rc::new(ElementData {
            tag: tag.to_string(),
            capabilities,
            id: RefCell::new(None),
            classes: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            attached: RefCell::new(Vec::new()),
        }))
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    /// Wiring primitives this element exposes.
    pub fn capabilities(&self) -> Capabilities {
        self.0.capabilities
    }

    /// Reference identity.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared element data; stable while any strong handle lives.
    pub fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    /// Non-owning handle.
    pub fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.0))
    }

    // --- attributes ---------------------------------------------------------

    /// Element id, if set.
    pub fn id(&self) -> Option<String> {
        self.0.id.borrow().clone()
    }

    /// Set or clear the element id.
    pub fn set_id(&self, id: Option<&str>) {
        *self.0.id.borrow_mut() = id.map(ToString::to_string);
    }

    /// Builder-style [`set_id`](Self::set_id).
    pub fn with_id(self, id: &str) -> Self {
        self.set_id(Some(id));
        self
    }

    /// Does the class list contain `class`?
    pub fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|c| c == class)
    }

    /// Add `class` unless present.
    pub fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.classes.borrow_mut().push(class.to_string());
        }
    }

    /// Builder-style [`add_class`](Self::add_class).
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Remove every occurrence of `class`.
    pub fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().retain(|c| c != class);
    }

    /// Space-separated class list.
    pub fn class_name(&self) -> String {
        self.0.classes.borrow().join(" ")
    }

    // --- structure ----------------------------------------------------------

    /// Parent element, or `None` for a root or detached element.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(Self)
    }

    /// Snapshot of the children, in order.
    pub fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    /// Iterate over `self` and its ancestors, nearest first.
    pub fn ancestors_or_self(&self) -> impl Iterator<Item = Self> + use<> {
        core::iter::successors(Some(self.clone()), Self::parent)
    }

    /// Append `child` as the last child, moving it from its current parent.
    pub fn append_child(&self, child: &Self) -> Result<(), HostError> {
        if self.ancestors_or_self().any(|a| a.ptr_eq(child)) {
            return Err(HostError::HierarchyCycle);
        }
        child.detach();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
        Ok(())
    }

    /// Builder-style [`append_child`](Self::append_child) for freshly created children.
    pub fn with_child(self, child: &Self) -> Result<Self, HostError> {
        self.append_child(child)?;
        Ok(self)
    }

    /// Remove `child` from this element.
    pub fn remove_child(&self, child: &Self) -> Result<(), HostError> {
        let pos = self
            .0
            .children
            .borrow()
            .iter()
            .position(|c| c.ptr_eq(child))
            .ok_or(HostError::NotAChild)?;
        let removed = self.0.children.borrow_mut().remove(pos);
        *removed.0.parent.borrow_mut() = Weak::new();
        Ok(())
    }

    /// Remove this element from its parent, if any.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            // The parent link implies membership in the parent's child list.
            let _ = parent.remove_child(self);
        }
    }

    /// Depth-first, pre-order walk of `self` and its descendants.
    pub fn descendants_or_self(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack = alloc::vec![self.clone()];
        while let Some(node) = stack.pop() {
            stack.extend(node.0.children.borrow().iter().rev().cloned());
            out.push(node);
        }
        out
    }

    // --- listener registration ----------------------------------------------

    /// Register `listener` for `kind`. Registering the same listener twice is a no-op.
    pub fn add_event_listener(&self, kind: &str, listener: Listener) -> Result<(), HostError> {
        self.require(Capabilities::ADD_LISTENER, "add_event_listener")?;
        let mut listeners = self.0.listeners.borrow_mut();
        if !listeners
            .iter()
            .any(|(k, l)| k == kind && same_callback(l, &listener))
        {
            listeners.push((kind.to_string(), listener));
        }
        Ok(())
    }

    /// Remove `listener` for `kind`, matched by reference. Unknown listeners are ignored.
    pub fn remove_event_listener(&self, kind: &str, listener: &Listener) -> Result<(), HostError> {
        self.require(Capabilities::REMOVE_LISTENER, "remove_event_listener")?;
        self.0
            .listeners
            .borrow_mut()
            .retain(|(k, l)| !(k == kind && same_callback(l, listener)));
        Ok(())
    }

    /// Number of registered listeners for `kind`.
    pub fn listener_count(&self, kind: &str) -> usize {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|(k, _)| k == kind)
            .count()
    }

    // --- attach/detach ------------------------------------------------------

    /// Attach `callback` under a handler property name such as `"onclick"`.
    ///
    /// The same callback may be attached more than once.
    pub fn attach_event(&self, property: &str, callback: AttachedFn) -> Result<(), HostError> {
        self.require(Capabilities::ATTACH, "attach_event")?;
        self.0
            .attached
            .borrow_mut()
            .push((property.to_string(), callback));
        Ok(())
    }

    /// Detach one attachment of `callback` under `property`, matched by reference.
    pub fn detach_event(&self, property: &str, callback: &AttachedFn) -> Result<(), HostError> {
        self.require(Capabilities::DETACH, "detach_event")?;
        let mut attached = self.0.attached.borrow_mut();
        if let Some(pos) = attached
            .iter()
            .position(|(p, c)| p == property && same_callback(c, callback))
        {
            attached.remove(pos);
        }
        Ok(())
    }

    /// Number of attached callbacks under `property`.
    pub fn attached_count(&self, property: &str) -> usize {
        self.0
            .attached
            .borrow()
            .iter()
            .filter(|(p, _)| p == property)
            .count()
    }

    pub(crate) fn listeners_for(&self, kind: &str) -> Vec<Listener> {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|(k, _)| k == kind)
            .map(|(_, l)| Rc::clone(l))
            .collect()
    }

    pub(crate) fn attached_for(&self, property: &str) -> Vec<AttachedFn> {
        self.0
            .attached
            .borrow()
            .iter()
            .filter(|(p, _)| p == property)
            .map(|(_, c)| Rc::clone(c))
            .collect()
    }

    fn require(&self, cap: Capabilities, primitive: &'static str) -> Result<(), HostError> {
        if self.0.capabilities.contains(cap) {
            Ok(())
        } else {
            Err(HostError::Unsupported { primitive })
        }
    }
}

impl WeakElement {
    /// An empty weak handle that never upgrades.
    pub fn new() -> Self {
        Self(Weak::new())
    }

    /// Upgrade to a strong handle if the element is still alive.
    pub fn upgrade(&self) -> Option<Element> {
        self.0.upgrade().map(Element)
    }

    /// True while some strong handle to the element exists.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Does this weak handle point at `element`?
    pub fn points_to(&self, element: &Element) -> bool {
        core::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&element.0))
    }
}
