// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class-scoped click delegation on a legacy host.
//!
//! A stack-frame list holds one subscription. Clicks anywhere inside a `.frame`
//! select that frame; the handler toggles a `selected` class so exactly one frame is
//! selected at a time.
//!
//! Run:
//! - `cargo run -p understory_demos --example events_delegation`

use tracing_subscriber::EnvFilter;
use understory_element::{Document, Element, Event};
use understory_events::{BackendKind, Events, handler};

fn frame(doc: &Document, name: &str) -> (Element, Element) {
    let li = doc.create_element("li").with_class("frame").with_id(name);
    let code = doc.create_element("pre");
    let token = doc.create_element("span");
    li.append_child(&code).unwrap();
    code.append_child(&token).unwrap();
    (li, token)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let doc = Document::legacy();
    let frames = doc.create_element("ul").with_id("frames");
    doc.root().append_child(&frames).unwrap();
    let mut tokens = Vec::new();
    for name in ["main", "render", "dispatch"] {
        let (li, token) = frame(&doc, name);
        frames.append_child(&li).unwrap();
        tokens.push(token);
    }

    let events = Events::new(&doc).unwrap();
    assert_eq!(events.backend_kind(), BackendKind::Legacy);

    let list = doc.get_element_by_id("frames").unwrap();
    let sweep = doc.clone();
    let sub = events
        .delegate_by_class(
            "frame",
            &list,
            "click",
            handler(move |this, _| {
                for selected in sweep.elements_by_class("selected") {
                    selected.remove_class("selected");
                }
                this.add_class("selected");
            }),
        )
        .unwrap();

    for (token, expect) in tokens.iter().zip(["main", "render", "dispatch"]).rev() {
        Event::click(token).dispatch();
        let selected = doc.elements_by_class("selected");
        println!("clicked inside #{expect}: selected {:?}", selected[0].id());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id().as_deref(), Some(expect));
    }

    // Clicking the list itself matches no frame.
    Event::click(&list).dispatch();
    assert_eq!(doc.elements_by_class("selected").len(), 1);

    sub.cancel();
    println!("legacy registrations after cancel: {}", events.legacy_registrations());
    assert_eq!(events.legacy_registrations(), 0);
}
