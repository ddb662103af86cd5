// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/leave from raw over/out transitions.
//!
//! A pointer sweeps across a card, its label, and back out. Raw `mouseover`/`mouseout`
//! fire at every boundary; the synthetic `mouseenter`/`mouseleave` fire once each.
//!
//! Run:
//! - `cargo run -p understory_demos --example events_hover`
//! - `RUST_LOG=understory_events=trace cargo run -p understory_demos --example events_hover`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_element::{Document, Element, Event, RelatedTarget};
use understory_events::{Events, handler};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let doc = Document::standard();
    let card = doc.create_element("div").with_class("card");
    let label = doc.create_element("span");
    let sidebar = doc.create_element("aside");
    doc.root().append_child(&card).unwrap();
    doc.root().append_child(&sidebar).unwrap();
    card.append_child(&label).unwrap();

    let events = Events::new(&doc).unwrap();
    let log: Rc<RefCell<Vec<String>>> = Rc::default();

    let record = |what: &'static str| {
        let log = Rc::clone(&log);
        handler(move |this: &Element, ev: &Event| {
            log.borrow_mut()
                .push(format!("{what} <{}> at {:?}", this.tag(), ev.position()));
        })
    };
    let _enter = events.on(&card, "mouseenter", record("enter")).unwrap();
    let _leave = events.on(&card, "mouseleave", record("leave")).unwrap();
    let _raw = events.on(&card, "mouseover", record("raw over")).unwrap();

    let rel = |e: &Element| Some(RelatedTarget::from(e.clone()));
    let steps = [
        Event::mouse_over(&card, rel(&sidebar)).at(Point::new(10.0, 10.0)),
        Event::mouse_out(&card, rel(&label)).at(Point::new(20.0, 10.0)),
        Event::mouse_over(&label, rel(&card)).at(Point::new(20.0, 10.0)),
        Event::mouse_out(&label, rel(&card)).at(Point::new(40.0, 10.0)),
        Event::mouse_over(&card, rel(&label)).at(Point::new(40.0, 10.0)),
        Event::mouse_out(&card, rel(&sidebar)).at(Point::new(90.0, 10.0)),
    ];
    for step in &steps {
        step.dispatch();
    }

    println!("== Transitions ==");
    for line in log.borrow().iter() {
        println!("  {line}");
    }
    println!("cached containment answers: {}", events.cached_pairs());

    let log = log.borrow();
    assert_eq!(log.iter().filter(|l| l.starts_with("enter")).count(), 1);
    assert_eq!(log.iter().filter(|l| l.starts_with("leave")).count(), 1);
    assert_eq!(log.iter().filter(|l| l.starts_with("raw over")).count(), 3);
}
