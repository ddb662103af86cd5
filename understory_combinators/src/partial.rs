// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partial application and receiver binding.
//!
//! - [`partial`] fixes the leading argument: `partial(f, a)(b) == f(a, b)`.
//! - [`partial_recv`] fixes the leading argument but leaves the receiver to the caller.
//! - [`bind`] fixes both the receiver and the leading argument.
//!
//! Late binding by method name lives on [`MethodTable::bind`](crate::advice::MethodTable::bind).

/// Fix the first argument of `f`.
///
/// The bound value is cloned for every call.
pub fn partial<A, B, R, F>(f: F, a: A) -> impl Fn(B) -> R
where
    A: Clone,
    F: Fn(A, B) -> R,
{
    move |b| f(a.clone(), b)
}

/// Fix the first non-receiver argument of `f`, keeping the receiver supplied at call time.
///
/// ```
/// use understory_combinators::partial_recv;
///
/// struct Counter { base: u32 }
/// let add = partial_recv(|c: &Counter, a: u32, b: u32| c.base + a + b, 10);
/// assert_eq!(add(&Counter { base: 1 }, 5), 16);
/// assert_eq!(add(&Counter { base: 2 }, 5), 17);
/// ```
pub fn partial_recv<S, A, B, R, F>(f: F, a: A) -> impl Fn(&S, B) -> R
where
    S: ?Sized,
    A: Clone,
    F: Fn(&S, A, B) -> R,
{
    move |receiver: &S, b| f(receiver, a.clone(), b)
}

/// Fix the receiver and first argument of `f`.
pub fn bind<S, A, B, R, F>(receiver: S, f: F, a: A) -> impl Fn(B) -> R
where
    A: Clone,
    F: Fn(&S, A, B) -> R,
{
    move |b| f(&receiver, a.clone(), b)
}

/// Capture `args` and return a function that calls whatever it is given with them.
///
/// ```
/// use understory_combinators::{call_with, map};
///
/// let at_two = call_with(2_i32);
/// let fs: [&dyn Fn(&i32) -> i32; 2] = [&|x: &i32| x + 1, &|x: &i32| x * 10];
/// assert_eq!(map(|f| at_two(f), fs), vec![3, 20]);
/// ```
pub fn call_with<A, R>(args: A) -> impl Fn(&dyn Fn(&A) -> R) -> R {
    move |f| f(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    #[test]
    fn partial_prepends_bound_argument() {
        let sub = |a: i32, b: i32| a - b;
        assert_eq!(partial(sub, 10)(3), 7);
    }

    #[test]
    fn partial_clones_bound_value_per_call() {
        let join = |mut a: String, b: &str| {
            a.push_str(b);
            a
        };
        let hello = partial(join, "hello ".to_string());
        assert_eq!(hello("a"), "hello a");
        assert_eq!(hello("b"), "hello b", "bound value is not mutated by earlier calls");
    }

    #[test]
    fn bind_fixes_receiver() {
        let v = alloc::vec![1, 2, 3];
        let nth_plus = bind(v, |v: &Vec<i32>, k: i32, i: usize| v[i] + k, 100);
        assert_eq!(nth_plus(0), 101);
        assert_eq!(nth_plus(2), 103);
    }
}
