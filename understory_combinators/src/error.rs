// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Precondition violations reported by the combinators.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombinatorError {
    /// A fold without an initial value was given no elements.
    #[error("{op} needs a non-empty sequence when no initial value is given")]
    EmptySequence {
        /// Name of the operation that was called.
        op: &'static str,
    },
    /// [`partition`](crate::seq::partition) was asked for zero-sized chunks.
    #[error("partition needs a chunk size greater than zero")]
    ZeroChunk,
    /// A [`MethodTable`](crate::advice::MethodTable) has no slot with this name.
    #[error("no method named `{name}` on the receiver")]
    UnknownMethod {
        /// The slot name that was looked up.
        name: String,
    },
}
