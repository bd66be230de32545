//! # Dispatch Error Types
//!
//! The only failure mode of the bus is a listener returning an error.
//! How far that error travels depends on the bus's [`DispatchPolicy`].
//!
//! [`DispatchPolicy`]: cadence_shared::DispatchPolicy

use std::error::Error as StdError;

use thiserror::Error;

use crate::events::EventKind;

/// Error returned by a fallible listener.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ListenerError(Box<dyn StdError + Send + Sync>);

impl ListenerError {
    /// Wraps any error (or message) raised inside a listener.
    pub fn new(error: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(error.into())
    }

    /// Returns the wrapped error.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.0
    }
}

impl From<&str> for ListenerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ListenerError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Result type returned by listeners.
pub type ListenerResult = Result<(), ListenerError>;

/// One failed listener inside an isolated dispatch.
#[derive(Debug)]
pub struct ListenerFailure {
    /// Position of the listener in the dispatch snapshot.
    pub index: usize,
    /// What the listener returned.
    pub error: ListenerError,
}

/// Errors that can occur while firing an event.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Fail-fast dispatch stopped at the first failing listener.
    #[error("listener {index} for `{kind}` failed, {skipped} listener(s) skipped: {source}")]
    Aborted {
        /// Kind being dispatched.
        kind: EventKind,
        /// Position of the failing listener.
        index: usize,
        /// Listeners after it that never ran.
        skipped: usize,
        /// What the listener returned.
        source: ListenerError,
    },

    /// Isolated dispatch ran every listener, some of which failed.
    #[error("{} listener(s) for `{kind}` failed", failures.len())]
    Isolated {
        /// Kind being dispatched.
        kind: EventKind,
        /// Every failure, in dispatch order.
        failures: Vec<ListenerFailure>,
    },
}

impl DispatchError {
    /// Kind whose dispatch failed.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Aborted { kind, .. } | Self::Isolated { kind, .. } => *kind,
        }
    }

    /// Number of listeners that returned an error.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        match self {
            Self::Aborted { .. } => 1,
            Self::Isolated { failures, .. } => failures.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aborted_message() {
        let err = DispatchError::Aborted {
            kind: EventKind::TogglePlay,
            index: 1,
            skipped: 2,
            source: "boom".into(),
        };
        assert_eq!(
            err.to_string(),
            "listener 1 for `togglePlay` failed, 2 listener(s) skipped: boom"
        );
        assert_eq!(err.kind(), EventKind::TogglePlay);
        assert_eq!(err.failure_count(), 1);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_isolated_message() {
        let err = DispatchError::Isolated {
            kind: EventKind::Loop,
            failures: vec![
                ListenerFailure { index: 0, error: "a".into() },
                ListenerFailure { index: 3, error: "b".into() },
            ],
        };
        assert_eq!(err.to_string(), "2 listener(s) for `loop` failed");
        assert_eq!(err.failure_count(), 2);
    }

    #[test]
    fn test_listener_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = ListenerError::new(io);
        assert_eq!(err.to_string(), "disk gone");
        assert!(err.into_inner().downcast_ref::<std::io::Error>().is_some());
    }
}
