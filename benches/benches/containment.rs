// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_element::{Document, Element};
use understory_events::{CachePolicy, Events};

/// A single parent chain of `depth` elements under the document root, root-most first.
fn gen_chain(doc: &Document, depth: usize) -> Vec<Element> {
    let mut out = Vec::with_capacity(depth);
    let mut parent = doc.root().clone();
    for _ in 0..depth {
        let e = doc.create_element("div");
        parent.append_child(&e).unwrap();
        out.push(e.clone());
        parent = e;
    }
    out
}

/// `width` siblings under each of `depth` levels; returns the leaves.
fn gen_comb(doc: &Document, depth: usize, width: usize) -> (Element, Vec<Element>) {
    let top = doc.create_element("section");
    doc.root().append_child(&top).unwrap();
    let mut spine = top.clone();
    let mut leaves = Vec::with_capacity(depth * width);
    for _ in 0..depth {
        for _ in 0..width {
            let leaf = doc.create_element("span");
            spine.append_child(&leaf).unwrap();
            leaves.push(leaf);
        }
        let next = doc.create_element("div");
        spine.append_child(&next).unwrap();
        spine = next;
    }
    (top, leaves)
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains_chain");
    for &depth in &[16usize, 64, 256] {
        let doc = Document::standard();
        let chain = gen_chain(&doc, depth);
        let (top, leaf) = (&chain[0], &chain[depth - 1]);

        group.bench_function(format!("walk_d{}", depth), |b| {
            let events = Events::builder(&doc)
                .cache_policy(CachePolicy::Disabled)
                .build()
                .unwrap();
            b.iter(|| black_box(events.contains(Some(top), Some(leaf))));
        });
        group.bench_function(format!("first_query_d{}", depth), |b| {
            b.iter_batched(
                || Events::new(&doc).unwrap(),
                |events| black_box(events.contains(Some(top), Some(leaf))),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("cached_d{}", depth), |b| {
            let events = Events::new(&doc).unwrap();
            events.contains(Some(top), Some(leaf));
            b.iter(|| black_box(events.contains(Some(top), Some(leaf))));
        });
    }
    group.finish();
}

fn bench_hover_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains_sweep");
    let doc = Document::standard();
    let (top, leaves) = gen_comb(&doc, 32, 16);
    let outside = doc.create_element("aside");
    doc.root().append_child(&outside).unwrap();
    group.throughput(Throughput::Elements(leaves.len() as u64 * 2));
    for (label, policy) in [("retain", CachePolicy::Retain), ("disabled", CachePolicy::Disabled)] {
        group.bench_function(label, |b| {
            let events = Events::builder(&doc).cache_policy(policy).build().unwrap();
            b.iter(|| {
                let mut inside = 0usize;
                for leaf in &leaves {
                    inside += usize::from(events.contains(Some(&top), Some(leaf)));
                    inside += usize::from(events.contains(Some(&outside), Some(leaf)));
                }
                black_box(inside);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain, bench_hover_sweep);
criterion_main!(benches);
