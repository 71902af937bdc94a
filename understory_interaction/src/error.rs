// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by configuration and engine lifecycle.
//!
//! Missing a shape under the pointer and an unexpired drag dwell are normal outcomes,
//! not errors. Handlers cannot fail; a panicking handler unwinds through
//! [`Engine::handle`](crate::engine::Engine::handle).

use crate::types::InputKind;

/// Invalid [`GestureConfig`](crate::config::GestureConfig).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A zero tap delay would make every touch a non-tap.
    #[error("tap delay must be greater than zero")]
    ZeroTapDelay,
    /// A zero threshold would suppress every click.
    #[error("click suppression threshold must be greater than zero")]
    ZeroClickThreshold,
    /// A touch offset has a NaN or infinite component.
    #[error("touch offset {index} is not finite")]
    NonFiniteOffset {
        /// Position in the offset list.
        index: usize,
    },
}

/// Engine lifecycle and routing failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Input arrived while no surface is attached.
    #[error("no input surface is attached")]
    NotAttached,
    /// `attach` was called while a surface is attached.
    #[error("an input surface is already attached")]
    AlreadyAttached,
    /// The engine was detached and cannot be reused.
    #[error("the engine was detached and is inert")]
    Disposed,
    /// The surface's device class does not deliver this input kind.
    #[error("{0:?} input is not wired for the attached surface")]
    Unwired(InputKind),
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
