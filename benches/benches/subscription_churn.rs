// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_element::{Document, Event};
use understory_events::{Events, Handler, handler};

fn hosts() -> [(&'static str, Document); 2] {
    [("standard", Document::standard()), ("legacy", Document::legacy())]
}

fn gen_handlers(n: usize, hits: &Rc<Cell<u64>>) -> Vec<Handler> {
    (0..n)
        .map(|i| {
            let h = Rc::clone(hits);
            handler(move |_, _| h.set(h.get() + i as u64))
        })
        .collect()
}

fn bench_subscribe_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("subscribe_cancel");
    for (label, doc) in hosts() {
        let events = Events::new(&doc).unwrap();
        let target = doc.create_element("button");
        doc.root().append_child(&target).unwrap();
        let hits = Rc::new(Cell::new(0));
        for &n in &[16usize, 256] {
            let handlers = gen_handlers(n, &hits);
            group.throughput(Throughput::Elements(n as u64));
            group.bench_function(format!("{}_n{}", label, n), |b| {
                b.iter(|| {
                    let subs: Vec<_> = handlers
                        .iter()
                        .map(|h| events.on(&target, "click", Rc::clone(h)).unwrap())
                        .collect();
                    for sub in subs.iter().rev() {
                        sub.cancel();
                    }
                    black_box(subs.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_unsubscribe_by_handler(c: &mut Criterion) {
    let mut group = c.benchmark_group("unsubscribe_by_handler");
    for (label, doc) in hosts() {
        let events = Events::new(&doc).unwrap();
        let target = doc.create_element("button");
        let hits = Rc::new(Cell::new(0));
        let handlers = gen_handlers(128, &hits);
        group.bench_function(label, |b| {
            b.iter_batched(
                || {
                    for h in &handlers {
                        events.on(&target, "click", Rc::clone(h)).unwrap();
                    }
                },
                |()| {
                    for h in &handlers {
                        events.off(&target, "click", h).unwrap();
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_delegated_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("delegated_dispatch");
    for (label, doc) in hosts() {
        let events = Events::new(&doc).unwrap();
        let list = doc.create_element("ul");
        doc.root().append_child(&list).unwrap();
        let mut leaves = Vec::new();
        for i in 0..64 {
            let item = doc.create_element("li");
            if i % 2 == 0 {
                item.add_class("frame");
            }
            let text = doc.create_element("span");
            item.append_child(&text).unwrap();
            list.append_child(&item).unwrap();
            leaves.push(text);
        }
        let hits = Rc::new(Cell::new(0));
        let on_frame = gen_handlers(1, &hits).remove(0);
        let _sub = events
            .delegate_by_class("frame", &list, "click", on_frame)
            .unwrap();
        group.throughput(Throughput::Elements(leaves.len() as u64));
        group.bench_function(label, |b| {
            b.iter(|| {
                for leaf in &leaves {
                    black_box(Event::click(leaf).dispatch());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_subscribe_cancel,
    bench_unsubscribe_by_handler,
    bench_delegated_dispatch,
);
criterion_main!(benches);
