// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Before/after/around advice.
//!
//! ## Decorators
//!
//! [`before`], [`after`] and [`around`] take an existing callable and return a new one;
//! the original is left untouched and the caller decides where the decorated version goes.
//!
//! - `before`: run the advice with the call's arguments, then the original; return the original's result.
//! - `after`: run the original, then the advice with the result and the arguments.
//!   A `Some` from the advice overrides the result; `None` lets the original result through.
//! - `around`: hand the original and the arguments to the advice, which decides everything.
//!
//! Arguments are passed by reference so both the advice and the original observe
//! the same values. Use a tuple for several arguments.
//!
//! ## Method tables
//!
//! [`MethodTable`] is an owned table of named slots. Advising a slot replaces it with
//! the decorated callable, and [`MethodTable::bind`] looks the slot up on every call,
//! so bound callers see advice installed after they were bound.
//!
//! ```
//! use understory_combinators::MethodTable;
//!
//! let table: MethodTable<i32, i32> = MethodTable::new();
//! table.define("double", |x: &i32| x * 2);
//! let double = table.bind("double");
//!
//! table.advise_after("double", |ret: &i32, _x: &i32| (*ret > 10).then_some(10)).unwrap();
//! assert_eq!(double(&3), Ok(6));
//! assert_eq!(double(&8), Ok(10));
//! ```

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::error::CombinatorError;

/// Call `advice`, then `original`, with the same arguments.
pub fn before<A, R, O, F>(original: O, advice: F) -> impl Fn(&A) -> R
where
    A: ?Sized,
    O: Fn(&A) -> R,
    F: Fn(&A),
{
    move |args: &A| {
        advice(args);
        original(args)
    }
}

/// Call `original`, then `advice` with its result and the arguments.
///
/// `Some` from the advice replaces the result.
pub fn after<A, R, O, F>(original: O, advice: F) -> impl Fn(&A) -> R
where
    A: ?Sized,
    O: Fn(&A) -> R,
    F: Fn(&R, &A) -> Option<R>,
{
    move |args: &A| {
        let ret = original(args);
        advice(&ret, args).unwrap_or(ret)
    }
}

/// Replace `original` with `advice`, which receives the original as its first argument.
pub fn around<A, R, O, F>(original: O, advice: F) -> impl Fn(&A) -> R
where
    A: ?Sized,
    O: Fn(&A) -> R,
    F: Fn(&dyn Fn(&A) -> R, &A) -> R,
{
    move |args: &A| advice(&original, args)
}

/// A shared, callable method slot.
pub type Method<A, R> = Rc<dyn Fn(&A) -> R>;

/// An owned table of named methods.
///
/// Cloning the table clones the handle; clones share slots.
pub struct MethodTable<A: ?Sized, R> {
    slots: Rc<RefCell<BTreeMap<String, Method<A, R>>>>,
}

impl<A: ?Sized, R> Clone for MethodTable<A, R> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<A: ?Sized, R> core::fmt::Debug for MethodTable<A, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<String> = self.slots.borrow().keys().cloned().collect();
        f.debug_struct("MethodTable")
            .field("methods", &names)
            .finish()
    }
}

impl<A: ?Sized + 'static, R: 'static> Default for MethodTable<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized + 'static, R: 'static> MethodTable<A, R> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(BTreeMap::new())),
        }
    }

    /// Define (or redefine) a method, returning the previous one.
    pub fn define<F>(&self, name: &str, f: F) -> Option<Method<A, R>>
    where
        F: Fn(&A) -> R + 'static,
    {
        self.install(name, Rc::new(f))
    }

    /// Look up a method.
    pub fn get(&self, name: &str) -> Option<Method<A, R>> {
        self.slots.borrow().get(name).cloned()
    }

    /// Names of all defined methods, sorted.
    pub fn names(&self) -> Vec<String> {
        self.slots.borrow().keys().cloned().collect()
    }

    /// Call a method by name.
    ///
    /// The slot is resolved before the call and no borrow is held while it runs,
    /// so methods may redefine or advise the table.
    pub fn call(&self, name: &str, args: &A) -> Result<R, CombinatorError> {
        let method = self.lookup(name)?;
        Ok(method(args))
    }

    /// Late-bound method: `name` is resolved on every call.
    pub fn bind(&self, name: &str) -> impl Fn(&A) -> Result<R, CombinatorError> + use<A, R> {
        let table = self.clone();
        let name = name.to_string();
        move |args: &A| table.call(&name, args)
    }

    /// Replace `name` with [`before`] advice.
    pub fn advise_before<F>(&self, name: &str, advice: F) -> Result<(), CombinatorError>
    where
        F: Fn(&A) + 'static,
    {
        let original = self.lookup(name)?;
        let wrapped: Method<A, R> = Rc::new(before(move |args: &A| original(args), advice));
        self.install(name, wrapped);
        Ok(())
    }

    /// Replace `name` with [`after`] advice.
    pub fn advise_after<F>(&self, name: &str, advice: F) -> Result<(), CombinatorError>
    where
        F: Fn(&R, &A) -> Option<R> + 'static,
    {
        let original = self.lookup(name)?;
        let wrapped: Method<A, R> = Rc::new(after(move |args: &A| original(args), advice));
        self.install(name, wrapped);
        Ok(())
    }

    /// Replace `name` with [`around`] advice.
    pub fn advise_around<F>(&self, name: &str, advice: F) -> Result<(), CombinatorError>
    where
        F: Fn(&dyn Fn(&A) -> R, &A) -> R + 'static,
    {
        let original = self.lookup(name)?;
        let wrapped: Method<A, R> = Rc::new(around(move |args: &A| original(args), advice));
        self.install(name, wrapped);
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<Method<A, R>, CombinatorError> {
        self.get(name).ok_or_else(|| CombinatorError::UnknownMethod {
            name: name.to_string(),
        })
    }

    fn install(&self, name: &str, method: Method<A, R>) -> Option<Method<A, R>> {
        self.slots.borrow_mut().insert(name.to_string(), method)
    }
}
