// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_element::HostError;

/// Errors reported by the event layer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EventsError {
    /// The host exposes neither complete wiring model on both the document root and the window,
    /// or a forced backend is not supported by the host.
    #[error("host supports neither listener registration nor attach/detach")]
    NoBackend,
    /// A host primitive failed.
    #[error(transparent)]
    Host(#[from] HostError),
}
