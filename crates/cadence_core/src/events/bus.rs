//! Event bus: the `register`/`fire` surface over the registry.
//!
//! Dispatch is synchronous and ordered. `fire` copies the listener list for
//! the kind and releases the registry lock before calling anyone, so a
//! listener may register more listeners or fire further events on the same
//! bus without deadlocking.

use std::sync::Arc;

use cadence_shared::DispatchPolicy;
use parking_lot::RwLock;

use super::catalog::{Event, EventKind, Registry};
use super::listener::Listener;
use super::registry::Position;
use crate::error::{DispatchError, ListenerFailure};

/// Typed publish/subscribe bus.
///
/// Cheap to clone; every clone shares the same registry.
///
/// # Example
///
/// ```
/// use cadence_core::{EventBus, Listener, LoopTick, Position};
///
/// let bus = EventBus::new();
/// bus.register(Position::Append, [Listener::new(|tick: &LoopTick| {
///     assert!(tick.delta >= 0.0);
/// })]);
/// bus.fire(LoopTick { delta: 40.0 }).unwrap();
/// ```
#[derive(Clone)]
pub struct EventBus {
    registry: Arc<RwLock<Registry>>,
    policy: DispatchPolicy,
}

impl EventBus {
    /// Creates a bus with the default fail-fast policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(DispatchPolicy::default())
    }

    /// Creates a bus with an explicit failure policy.
    #[must_use]
    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            policy,
        }
    }

    /// Failure policy used by [`EventBus::fire`].
    #[inline]
    #[must_use]
    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Registers `listeners` for `E` as one contiguous run.
    ///
    /// With [`Position::Append`] the run goes after every existing listener;
    /// with [`Position::At`] it starts at that index.
    pub fn register<E, I>(&self, position: Position, listeners: I)
    where
        E: Event,
        I: IntoIterator<Item = Listener<E>>,
    {
        let mut registry = self.registry.write();
        let slot = E::slot_mut(&mut registry);
        let before = slot.len();
        let at = slot.insert(position, listeners);
        tracing::debug!(
            kind = E::KIND.as_str(),
            at,
            added = slot.len() - before,
            total = slot.len(),
            "registered listeners"
        );
    }

    /// Appends a single infallible listener for `E`.
    pub fn on<E, F>(&self, callback: F)
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.register(Position::Append, [Listener::new(callback)]);
    }

    /// Calls every listener registered for `E` when the call begins, in order.
    ///
    /// Firing a kind without listeners does nothing.
    ///
    /// # Errors
    ///
    /// Under [`DispatchPolicy::FailFast`] the first failing listener stops the
    /// dispatch and [`DispatchError::Aborted`] is returned. Under
    /// [`DispatchPolicy::Isolated`] every listener runs and
    /// [`DispatchError::Isolated`] carries all failures.
    pub fn fire<E: Event>(&self, payload: E) -> Result<(), DispatchError> {
        let listeners = E::slot(&self.registry.read()).snapshot();
        if listeners.is_empty() {
            tracing::trace!(kind = E::KIND.as_str(), "no listeners");
            return Ok(());
        }

        tracing::trace!(
            kind = E::KIND.as_str(),
            listeners = listeners.len(),
            ?payload,
            "dispatching"
        );

        match self.policy {
            DispatchPolicy::FailFast => {
                for (index, listener) in listeners.iter().enumerate() {
                    if let Err(source) = listener.call(&payload) {
                        return Err(DispatchError::Aborted {
                            kind: E::KIND,
                            index,
                            skipped: listeners.len() - index - 1,
                            source,
                        });
                    }
                }
                Ok(())
            }
            DispatchPolicy::Isolated => {
                let failures: Vec<ListenerFailure> = listeners
                    .iter()
                    .enumerate()
                    .filter_map(|(index, listener)| {
                        let error = listener.call(&payload).err()?;
                        tracing::warn!(
                            kind = E::KIND.as_str(),
                            index,
                            %error,
                            "listener failed, continuing dispatch"
                        );
                        Some(ListenerFailure { index, error })
                    })
                    .collect();

                if failures.is_empty() {
                    Ok(())
                } else {
                    Err(DispatchError::Isolated {
                        kind: E::KIND,
                        failures,
                    })
                }
            }
        }
    }

    /// Number of listeners currently registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry.read().listener_count(kind)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("policy", &self.policy)
            .field("registry", &*self.registry.read())
            .finish()
    }
}
