// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Documents: a root element, a window target, and the capabilities they share.

use alloc::vec::Vec;

use crate::tree::Element;
use crate::types::Capabilities;

/// A document owns the root element and describes what the host can wire.
///
/// Every element created through the document gets the document's element
/// capabilities. The window capabilities are tracked separately since hosts
/// have been known to expose different primitives on the window.
#[derive(Clone, Debug)]
pub struct Document {
    root: Element,
    capabilities: Capabilities,
    window: Capabilities,
}

impl Document {
    /// A document whose elements and window expose `capabilities`.
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_window(capabilities, capabilities)
    }

    /// A document with distinct element and window capabilities.
    pub fn with_window(capabilities: Capabilities, window: Capabilities) -> Self {
        Self {
            root: Element::new("html", capabilities),
            capabilities,
            window,
        }
    }

    /// Listener-registration host.
    pub fn standard() -> Self {
        Self::new(Capabilities::STANDARD)
    }

    /// Attach/detach host.
    pub fn legacy() -> Self {
        Self::new(Capabilities::LEGACY)
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Capabilities of the root element and of every element created here.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Capabilities of the window target.
    pub fn window_capabilities(&self) -> Capabilities {
        self.window
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> Element {
        Element::new(tag, self.capabilities)
    }

    /// First element in document order with the given id.
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.root
            .descendants_or_self()
            .into_iter()
            .find(|e| e.id().as_deref() == Some(id))
    }

    /// All elements in document order carrying `class`.
    pub fn elements_by_class(&self, class: &str) -> Vec<Element> {
        self.root
            .descendants_or_self()
            .into_iter()
            .filter(|e| e.has_class(class))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elements_inherit_capabilities() {
        let doc = Document::legacy();
        let e = doc.create_element("div");
        assert_eq!(e.capabilities(), Capabilities::LEGACY);
        assert_eq!(doc.root().capabilities(), Capabilities::LEGACY);
        assert_eq!(doc.window_capabilities(), Capabilities::LEGACY);
    }

    #[test]
    fn window_may_differ() {
        let doc = Document::with_window(Capabilities::STANDARD, Capabilities::ADD_LISTENER);
        assert_eq!(doc.capabilities(), Capabilities::STANDARD);
        assert_eq!(doc.window_capabilities(), Capabilities::ADD_LISTENER);
    }

    #[test]
    fn lookups() {
        let doc = Document::standard();
        let list = doc.create_element("ul").with_id("list");
        let a = doc.create_element("li").with_class("item");
        let b = doc.create_element("li").with_class("item").with_id("b");
        doc.root().append_child(&list).unwrap();
        list.append_child(&a).unwrap();
        list.append_child(&b).unwrap();

        assert!(doc.get_element_by_id("list").unwrap().ptr_eq(&list));
        assert!(doc.get_element_by_id("b").unwrap().ptr_eq(&b));
        assert!(doc.get_element_by_id("missing").is_none());
        let items = doc.elements_by_class("item");
        assert_eq!(items.len(), 2);
        assert!(items[0].ptr_eq(&a));

        b.detach();
        assert!(doc.get_element_by_id("b").is_none(), "detached nodes are not found");
    }
}
