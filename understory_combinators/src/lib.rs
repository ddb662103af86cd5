// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_combinators --heading-base-level=0

//! Understory Combinators: small functional building blocks.
//!
//! ## Overview
//!
//! This crate collects the handful of higher-order helpers the rest of the workspace
//! leans on when wiring events and declarative maps:
//!
//! - [`seq`]: folds and list helpers ([`reduce`], [`reduce_from`], [`select`], [`reject`], …).
//! - [`compose`]: right-to-left function pipelines ([`Pipeline`], [`compose()`](compose::compose), [`compose2`]).
//! - [`partial`]: partial application and receiver binding ([`partial()`](partial::partial), [`bind`], [`partial_recv`]).
//! - [`advice`]: before/after/around decorators and an owned [`MethodTable`] whose named
//!   slots can be advised and late-bound.
//!
//! All helpers are pure except the slot-replacing methods on [`MethodTable`], which
//! only ever touch a table the caller owns.
//!
//! ## Preconditions
//!
//! Shape errors that the type system cannot rule out (folding an empty sequence without a seed,
//! chunking by zero, calling a missing method) are reported synchronously as a [`CombinatorError`].
//!
//! ## Example
//!
//! ```
//! use understory_combinators::{compose, partial, reduce};
//!
//! let square = |x: i32| x * x;
//! let increment = |x: i32| x + 1;
//!
//! // Last stage runs first: (3 + 1)^2.
//! let p = compose![square, increment];
//! assert_eq!(p.call(3), 16);
//!
//! let add = |a: i32, b: i32| a + b;
//! assert_eq!(partial(add, 2)(5), 7);
//!
//! assert_eq!(reduce(|a, b| a + b, [1, 2, 3, 4]), Ok(10));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod advice;
pub mod compose;
mod error;
pub mod partial;
pub mod seq;

pub use advice::{Method, MethodTable, after, around, before};
pub use compose::{Pipeline, Stage, compose2, compose_with, stage};
pub use error::CombinatorError;
pub use partial::{bind, call_with, partial, partial_recv};
pub use seq::{
    Nested, all, concat, difference, doall, eq, first, flatten, identity, index_of, interpose,
    intersection, map, mapcat, mapdef, negate, only_some, partition, prop, reduce, reduce_from,
    reject, seldef, select, some, unary, uniq, zipmap,
};
