// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folds and list helpers.
//!
//! Functions take the callable first and the sequence last, so they read well
//! after [`partial`](crate::partial::partial) has fixed the callable:
//!
//! ```
//! use understory_combinators::{partial, select};
//!
//! let evens = partial(select::<u32, Vec<u32>, _>, |n: &u32| n % 2 == 0);
//! assert_eq!(evens(vec![1, 2, 3, 4]), vec![2, 4]);
//! ```
//!
//! Any [`IntoIterator`] works as input, including a character sequence:
//!
//! ```
//! use understory_combinators::reduce_from;
//!
//! let n = reduce_from(|acc: usize, c: char| acc + usize::from(c == 'l'), 0, "hello".chars());
//! assert_eq!(n, 2);
//! ```

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::error::CombinatorError;

/// Fold `items` with `f`, seeding the accumulator with the first element.
///
/// Folding starts from the second element. An empty sequence is a precondition
/// violation and yields [`CombinatorError::EmptySequence`].
pub fn reduce<T, I, F>(f: F, items: I) -> Result<T, CombinatorError>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T, T) -> T,
{
    let mut iter = items.into_iter();
    let seed = iter
        .next()
        .ok_or(CombinatorError::EmptySequence { op: "reduce" })?;
    Ok(iter.fold(seed, f))
}

/// Fold `items` with `f`, starting from `initial`.
pub fn reduce_from<A, T, I, F>(f: F, initial: A, items: I) -> A
where
    I: IntoIterator<Item = T>,
    F: FnMut(A, T) -> A,
{
    items.into_iter().fold(initial, f)
}

/// Call `f` with every item and its index for side effects, then return the items.
pub fn doall<T, F>(mut f: F, items: &[T]) -> &[T]
where
    F: FnMut(&T, usize),
{
    for (i, item) in items.iter().enumerate() {
        f(item, i);
    }
    items
}

/// Collect the result of applying `f` to every item.
pub fn map<T, U, I, F>(f: F, items: I) -> Vec<U>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> U,
{
    items.into_iter().map(f).collect()
}

/// Keep the items for which `pred` holds.
pub fn select<T, I, F>(mut pred: F, items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> bool,
{
    items.into_iter().filter(|item| pred(item)).collect()
}

/// Keep the items for which `pred` does not hold.
pub fn reject<T, I, F>(mut pred: F, items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> bool,
{
    select(move |item: &T| !pred(item), items)
}

/// Return the complement of `pred`.
pub fn negate<T: ?Sized, F>(pred: F) -> impl Fn(&T) -> bool
where
    F: Fn(&T) -> bool,
{
    move |value: &T| !pred(value)
}

/// Return the first item for which `pred` holds.
pub fn first<T, I, F>(mut pred: F, items: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> bool,
{
    items.into_iter().find(|item| pred(item))
}

/// Does `pred` hold for every item? True for an empty sequence.
pub fn all<T, I, F>(pred: F, items: I) -> bool
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> bool,
{
    items.into_iter().all(pred)
}

/// Does `pred` hold for at least one item?
pub fn some<T, I, F>(pred: F, items: I) -> bool
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> bool,
{
    items.into_iter().any(pred)
}

/// Does `pred` hold for at least one item and fail for at least one other?
///
/// Stops as soon as both outcomes have been seen.
pub fn only_some<T, I, F>(mut pred: F, items: I) -> bool
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> bool,
{
    let (mut seen_true, mut seen_false) = (false, false);
    for item in items {
        if pred(item) {
            seen_true = true;
        } else {
            seen_false = true;
        }
        if seen_true && seen_false {
            return true;
        }
    }
    false
}

/// Return `value` unchanged.
pub fn identity<T>(value: T) -> T {
    value
}

/// Build a predicate that tests for equality with `expected`.
pub fn eq<T: PartialEq>(expected: T) -> impl Fn(&T) -> bool {
    move |value: &T| *value == expected
}

/// Adapt `f` to callers that pass a second argument, such as an index, and drop it.
pub fn unary<A, B, R>(f: impl Fn(A) -> R) -> impl Fn(A, B) -> R {
    move |arg: A, _extra: B| f(arg)
}

/// Build a getter that reads `key` from a map.
pub fn prop<K: Ord, V: Clone>(key: K) -> impl Fn(&BTreeMap<K, V>) -> Option<V> {
    move |object: &BTreeMap<K, V>| object.get(&key).cloned()
}

/// Position of the first item equal to `needle`.
pub fn index_of<T: PartialEq>(needle: &T, items: &[T]) -> Option<usize> {
    items.iter().position(|item| item == needle)
}

/// Keep the first occurrence of every distinct item, in order.
///
/// Uses equality only, so it is quadratic; intended for short lists.
pub fn uniq<T, I>(items: I) -> Vec<T>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Items of `list` that do not appear in `other`.
pub fn difference<T: PartialEq + Clone>(list: &[T], other: &[T]) -> Vec<T> {
    select(|item: &T| !other.contains(item), list.iter().cloned())
}

/// Items of `list` that also appear in `other`.
pub fn intersection<T: PartialEq + Clone>(list: &[T], other: &[T]) -> Vec<T> {
    select(|item: &T| other.contains(item), list.iter().cloned())
}

/// Group `items` into chunks of `n`; the last chunk may be shorter.
pub fn partition<T: Clone>(n: usize, items: &[T]) -> Result<Vec<Vec<T>>, CombinatorError> {
    if n == 0 {
        return Err(CombinatorError::ZeroChunk);
    }
    Ok(items.chunks(n).map(<[T]>::to_vec).collect())
}

/// Place `sep` between consecutive items.
pub fn interpose<T: Clone, I>(sep: T, items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
{
    let mut out = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(sep.clone());
        }
        out.push(item);
    }
    out
}

/// Concatenate two sequences.
pub fn concat<T, A, B>(first: A, second: B) -> Vec<T>
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
{
    first.into_iter().chain(second).collect()
}

/// Map every item to a sequence and concatenate the results.
pub fn mapcat<T, U, I, J, F>(f: F, items: I) -> Vec<U>
where
    I: IntoIterator<Item = T>,
    J: IntoIterator<Item = U>,
    F: FnMut(T) -> J,
{
    reduce_from(concat, Vec::new(), map(f, items))
}

/// Pair `keys` with `vals`; surplus keys or values are dropped.
pub fn zipmap<K: Ord, V, KI, VI>(keys: KI, vals: VI) -> BTreeMap<K, V>
where
    KI: IntoIterator<Item = K>,
    VI: IntoIterator<Item = V>,
{
    keys.into_iter().zip(vals).collect()
}

/// Drop the absent items.
pub fn seldef<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    items.into_iter().flatten().collect()
}

/// Map the present items, dropping absent inputs and absent results.
pub fn mapdef<T, U, I, F>(mut f: F, items: I) -> Vec<U>
where
    I: IntoIterator<Item = Option<T>>,
    F: FnMut(T) -> Option<U>,
{
    seldef(map(|item: Option<T>| item.and_then(&mut f), items))
}

/// A value or an arbitrarily nested list of values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Nested<T> {
    /// A single value.
    Item(T),
    /// A nested list.
    List(Vec<Self>),
}

/// Flatten a nested list depth-first into its leaf values.
pub fn flatten<T>(nested: Nested<T>) -> Vec<T> {
    let mut out = Vec::new();
    let mut stack = alloc::vec![nested];
    while let Some(node) = stack.pop() {
        match node {
            Nested::Item(value) => out.push(value),
            Nested::List(children) => stack.extend(children.into_iter().rev()),
        }
    }
    out
}
