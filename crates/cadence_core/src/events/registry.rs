//! Ordered per-kind listener lists.

use std::fmt;

use super::listener::Listener;

/// Where a registration run is inserted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Position {
    /// After every listener already registered.
    #[default]
    Append,
    /// Starting at this index. An index past the end appends.
    At(usize),
}

/// Listeners for one kind, in dispatch order.
pub struct ListenerList<E> {
    listeners: Vec<Listener<E>>,
}

impl<E> ListenerList<E> {
    /// Number of registered listeners.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Inserts `listeners` as one contiguous run, keeping their relative
    /// order. Returns the index of the first inserted listener.
    pub(crate) fn insert<I>(&mut self, position: Position, listeners: I) -> usize
    where
        I: IntoIterator<Item = Listener<E>>,
    {
        let at = match position {
            Position::Append => self.listeners.len(),
            Position::At(index) => index.min(self.listeners.len()),
        };
        self.listeners.splice(at..at, listeners);
        at
    }

    /// Copy of the current list. Dispatch iterates the copy, so listeners
    /// added while it runs are not visited.
    pub(crate) fn snapshot(&self) -> Vec<Listener<E>> {
        self.listeners.clone()
    }
}

impl<E> Default for ListenerList<E> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for ListenerList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.listeners.len())
            .finish()
    }
}
