// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folding, composition, partial application and advice.
//!
//! Run:
//! - `cargo run -p understory_demos --example combinators_basics`

use understory_combinators::{
    MethodTable, Nested, compose, flatten, interpose, partial, partition, reduce, reduce_from,
    select, zipmap,
};

fn main() {
    // Unseeded fold: the first item is the seed.
    let total = reduce(|a, b| a + b, [1, 2, 3, 4]).unwrap();
    let widest = reduce(|a: char, b: char| a.max(b), "understory".chars()).unwrap();
    println!("== Folds ==\n  sum {total}, max char {widest:?}");
    assert_eq!(total, reduce_from(|a, b| a + b, 1, [2, 3, 4]));
    assert!(reduce(|a: i32, b| a + b, Vec::new()).is_err());

    // Right-to-left composition.
    let square = |x: i32| x * x;
    let increment = |x: i32| x + 1;
    let p = compose![square, increment];
    println!("== Compose ==\n  square(increment(3)) = {}", p.call(3));
    assert_eq!(p.call(3), 16);

    // Partial application feeding a selector.
    let at_least = |min: i32, x: i32| x >= min;
    let keep = partial(at_least, 3);
    let big = select(|x: &i32| keep(*x), [1, 5, 2, 8]);
    println!("== Partial ==\n  {big:?}");
    assert_eq!(big, vec![5, 8]);

    // Sequence helpers.
    let chunks = partition(2, &[1, 2, 3, 4, 5]).unwrap();
    let joined: String = interpose(',', "abc".chars()).into_iter().collect();
    let index = zipmap(["a", "b"], [1, 2]);
    let flat = flatten(Nested::List(vec![
        Nested::Item(1),
        Nested::List(vec![Nested::Item(2), Nested::List(vec![Nested::Item(3)])]),
    ]));
    println!("== Sequences ==\n  {chunks:?} {joined} {index:?} {flat:?}");

    // Advice on an owned method table; bound callers see it.
    let table: MethodTable<str, usize> = MethodTable::new();
    table.define("weight", |s: &str| s.len());
    let weight = table.bind("weight");
    table
        .advise_after("weight", |ret: &usize, s: &str| {
            s.starts_with('_').then_some(ret * 10)
        })
        .unwrap();
    println!(
        "== Advice ==\n  weight(\"ab\") = {:?}, weight(\"_ab\") = {:?}",
        weight("ab"),
        weight("_ab")
    );
    assert_eq!(weight("_ab"), Ok(30));
}
