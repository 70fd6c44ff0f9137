// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for registration and recompute passes.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use core::error::Error;
use core::fmt;

use crate::condition::{BoundaryCondition, Edge};
use crate::tracker::WatchId;

/// Error returned by [`ScrollTracker::register`](crate::ScrollTracker::register).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterError {
    /// The selector did not match any element in the host.
    ElementNotFound {
        /// The selector that was looked up.
        selector: String,
    },
    /// The host rejected the selector as malformed.
    InvalidSelector {
        /// The selector that was looked up.
        selector: String,
        /// Why the host rejected it.
        reason: SelectorError,
    },
    /// The host has no geometry for the element (for example, it is not attached
    /// to the document).
    Detached,
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementNotFound { selector } => {
                write!(f, "no element matches selector `{selector}`")
            }
            Self::InvalidSelector { selector, reason } => {
                write!(f, "invalid selector `{selector}`: {reason}")
            }
            Self::Detached => f.write_str("element has no layout geometry"),
        }
    }
}

impl Error for RegisterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSelector { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// A selector the host could not parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorError {
    message: Cow<'static, str>,
}

impl SelectorError {
    /// Creates an error carrying the host's explanation.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The host's explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for SelectorError {}

/// Error reported by a fallible boundary callback.
///
/// Build one from a static or formatted message with [`CallbackError::msg`],
/// or wrap any error value with [`CallbackError::new`].
pub struct CallbackError {
    repr: Repr,
}

enum Repr {
    Message(Cow<'static, str>),
    Source(Box<dyn Error + 'static>),
}

impl CallbackError {
    /// Wraps an error value.
    pub fn new<E: Error + 'static>(source: E) -> Self {
        Self {
            repr: Repr::Source(Box::new(source)),
        }
    }

    /// Creates an error from a message.
    pub fn msg(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            repr: Repr::Message(message.into()),
        }
    }
}

impl fmt::Debug for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Message(m) => f.debug_tuple("CallbackError").field(m).finish(),
            Repr::Source(e) => f.debug_tuple("CallbackError").field(e).finish(),
        }
    }
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Message(m) => f.write_str(m),
            Repr::Source(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl Error for CallbackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.repr {
            Repr::Message(_) => None,
            Repr::Source(e) => Some(e.as_ref()),
        }
    }
}

/// A non-fatal problem encountered while recomputing one entry.
///
/// Failures never stop a pass: the remaining conditions of the entry and the
/// remaining entries are still evaluated.
#[derive(Debug)]
pub enum PassFailure {
    /// A fallible callback returned an error.
    Callback {
        /// Entry whose callback failed.
        watch: WatchId,
        /// Condition that flipped.
        condition: BoundaryCondition,
        /// Direction of the flip.
        edge: Edge,
        /// The error returned by the callback.
        error: CallbackError,
    },
    /// The host had no geometry for the entry's element; its flags were left untouched.
    Detached {
        /// Entry whose element is gone.
        watch: WatchId,
    },
}

impl PassFailure {
    /// The entry this failure belongs to.
    #[must_use]
    pub fn watch(&self) -> WatchId {
        match self {
            Self::Callback { watch, .. } | Self::Detached { watch } => *watch,
        }
    }
}

impl fmt::Display for PassFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback {
                watch,
                condition,
                edge,
                error,
            } => write!(
                f,
                "{edge:?} callback for {} on {watch:?} failed: {error}",
                condition.key()
            ),
            Self::Detached { watch } => write!(f, "{watch:?} has no layout geometry"),
        }
    }
}

impl Error for PassFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Callback { error, .. } => Some(error),
            Self::Detached { .. } => None,
        }
    }
}
