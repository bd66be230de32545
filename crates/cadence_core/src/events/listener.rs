//! Listener handle stored in the registry.

use std::fmt;
use std::sync::Arc;

use crate::error::ListenerResult;

type ListenerFn<E> = dyn Fn(&E) -> ListenerResult + Send + Sync;

/// A registered callback for payload type `E`.
///
/// Cloning is cheap (one `Arc` bump), which is what lets `fire` snapshot the
/// listener list and release the registry lock before calling anything.
pub struct Listener<E> {
    callback: Arc<ListenerFn<E>>,
}

impl<E> Listener<E> {
    /// Wraps a callback that cannot fail.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        Self::fallible(move |event| {
            callback(event);
            Ok(())
        })
    }

    /// Wraps a callback whose error is reported through `fire`.
    pub fn fallible<F>(callback: F) -> Self
    where
        F: Fn(&E) -> ListenerResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    #[inline]
    pub(crate) fn call(&self, event: &E) -> ListenerResult {
        (self.callback)(event)
    }
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<E> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("payload", &std::any::type_name::<E>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TogglePlay;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_infallible_listener_returns_ok() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let listener = Listener::new(move |_: &TogglePlay| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(listener.call(&TogglePlay { play: true }).is_ok());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fallible_listener_error() {
        let listener = Listener::fallible(|event: &TogglePlay| {
            if event.play {
                Err("refusing to play".into())
            } else {
                Ok(())
            }
        });

        assert!(listener.call(&TogglePlay { play: false }).is_ok());
        let err = listener.call(&TogglePlay { play: true }).unwrap_err();
        assert_eq!(err.to_string(), "refusing to play");
    }

    #[test]
    fn test_clone_shares_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let listener = Listener::new(move |_: &TogglePlay| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let copy = listener.clone();

        listener.call(&TogglePlay { play: true }).unwrap();
        copy.call(&TogglePlay { play: true }).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(format!("{listener:?}").contains("TogglePlay"));
    }
}
