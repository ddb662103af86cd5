// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Right-to-left function composition.
//!
//! A [`Pipeline`] holds an ordered list of unary stages and applies the *last*
//! stage first, the way mathematical composition reads: `compose![f, g]` is
//! `x ↦ f(g(x))`.
//!
//! Every stage is a `Fn(T) -> T`, so "is this callable" is settled when the
//! pipeline is built rather than when it runs.
//!
//! ```
//! use understory_combinators::compose::{Pipeline, compose, stage};
//!
//! let square = |x: i64| x * x;
//! let increment = |x: i64| x + 1;
//!
//! let p = compose([stage(square), stage(increment)]);
//! assert_eq!(p.call(3), 16);
//!
//! // A single callable is a one-stage pipeline.
//! assert_eq!(Pipeline::from_fn(square).call(5), 25);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

/// A boxed pipeline stage.
pub type Stage<'a, T> = Box<dyn Fn(T) -> T + 'a>;

/// Box a closure as a [`Stage`].
pub fn stage<'a, T, F>(f: F) -> Stage<'a, T>
where
    F: Fn(T) -> T + 'a,
{
    Box::new(f)
}

/// An ordered sequence of unary functions, applied last to first.
pub struct Pipeline<'a, T> {
    stages: Vec<Stage<'a, T>>,
}

impl<T> core::fmt::Debug for Pipeline<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl<T> Default for Pipeline<'_, T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<'a, T> Pipeline<'a, T> {
    /// An empty pipeline; [`call`](Self::call) returns its input.
    pub fn identity() -> Self {
        Self { stages: Vec::new() }
    }

    /// A one-stage pipeline.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(T) -> T + 'a,
    {
        Self {
            stages: alloc::vec![stage(f)],
        }
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True when the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Add a stage that runs *after* every existing stage.
    ///
    /// In composition terms this places `f` at the front of the list.
    pub fn then<F>(mut self, f: F) -> Self
    where
        F: Fn(T) -> T + 'a,
    {
        self.stages.insert(0, stage(f));
        self
    }

    /// Run the pipeline: the last stage receives `input`, and each earlier stage
    /// receives the result of the one after it.
    pub fn call(&self, input: T) -> T {
        self.stages.iter().rev().fold(input, |acc, f| f(acc))
    }

    /// Turn the pipeline into a plain closure.
    pub fn into_fn(self) -> impl Fn(T) -> T + 'a
    where
        T: 'a,
    {
        move |input| self.call(input)
    }
}

/// Compose `fns` into a [`Pipeline`] (last function applied first).
pub fn compose<'a, T, I>(fns: I) -> Pipeline<'a, T>
where
    I: IntoIterator<Item = Stage<'a, T>>,
{
    Pipeline {
        stages: fns.into_iter().collect(),
    }
}

/// Compose `fns`, calling every stage with a shared `receiver`.
///
/// The receiver is fixed when the pipeline is built; stages cannot observe a
/// different one at call time.
pub fn compose_with<'a, R, T, F, I>(receiver: R, fns: I) -> Pipeline<'a, T>
where
    R: 'a,
    T: 'a,
    F: Fn(&R, T) -> T + 'a,
    I: IntoIterator<Item = F>,
{
    let receiver = Rc::new(receiver);
    compose(fns.into_iter().map(|f| {
        let receiver = Rc::clone(&receiver);
        stage(move |x| f(&*receiver, x))
    }))
}

/// Compose two functions whose types differ: `compose2(f, g)(x) == f(g(x))`.
pub fn compose2<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
where
    F: Fn(B) -> C,
    G: Fn(A) -> B,
{
    move |x| f(g(x))
}

/// Build a [`Pipeline`] from a list of closures or functions.
///
/// `compose![f, g, h]` is `x ↦ f(g(h(x)))`.
#[macro_export]
macro_rules! compose {
    () => {
        $crate::compose::Pipeline::identity()
    };
    ($($f:expr),+ $(,)?) => {
        $crate::compose::compose([$($crate::compose::stage($f)),+])
    };
}
